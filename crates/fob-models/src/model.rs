//! The output graph: one [`Model`] per declaration, stored in an arena and
//! cross-referenced by [`ModelId`].

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::introspect::DeclarationKind;

/// Stable index of a model inside its [`ModelGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl ModelId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    Class,
    Interface,
    TypeAlias,
}

impl From<DeclarationKind> for ModelKind {
    fn from(kind: DeclarationKind) -> Self {
        match kind {
            DeclarationKind::Class => Self::Class,
            DeclarationKind::Interface => Self::Interface,
            DeclarationKind::TypeAlias => Self::TypeAlias,
        }
    }
}

/// A generic parameter of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericArgument {
    pub name: String,
    pub bound: Option<String>,
}

/// A type reference: either a model in the same graph or a raw type name
/// that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Model(ModelId),
    Named(String),
}

impl TypeRef {
    pub fn model(&self) -> Option<ModelId> {
        match self {
            Self::Model(id) => Some(*id),
            Self::Named(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Model(_) => None,
            Self::Named(name) => Some(name),
        }
    }
}

/// Return type of a function field. Sequence return types are recorded by
/// their element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Single(TypeRef),
    Sequence(TypeRef),
}

impl ReturnType {
    pub fn type_ref(&self) -> &TypeRef {
        match self {
            Self::Single(ty) | Self::Sequence(ty) => ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    pub name: String,
    pub ty: TypeRef,
}

/// One classified member of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaField {
    /// The member's type is an atomic or opaque reference.
    Default { name: String, ty: TypeRef },
    /// The member's type is a sequence.
    Array { name: String, element_type: TypeRef },
    /// The member's type is a generic instantiation such as `Box<T>`.
    Reference {
        name: String,
        reference_name: String,
        arguments: Vec<TypeRef>,
    },
    /// The member's type has exactly one call signature.
    Function {
        name: String,
        arguments: Vec<FunctionArgument>,
        return_type: ReturnType,
    },
}

impl SchemaField {
    pub fn name(&self) -> &str {
        match self {
            Self::Default { name, .. }
            | Self::Array { name, .. }
            | Self::Reference { name, .. }
            | Self::Function { name, .. } => name,
        }
    }

    /// Every type reference held by this field, in field order.
    pub fn type_refs(&self) -> Vec<&TypeRef> {
        match self {
            Self::Default { ty, .. } => vec![ty],
            Self::Array { element_type, .. } => vec![element_type],
            Self::Reference { arguments, .. } => arguments.iter().collect(),
            Self::Function {
                arguments,
                return_type,
                ..
            } => arguments
                .iter()
                .map(|argument| &argument.ty)
                .chain(std::iter::once(return_type.type_ref()))
                .collect(),
        }
    }
}

/// Inheritance references captured during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heritage {
    Interface { extends: Vec<TypeRef> },
    Class {
        extends: Option<TypeRef>,
        implements: Vec<TypeRef>,
    },
    TypeAlias,
}

impl Heritage {
    pub fn extends(&self) -> Vec<&TypeRef> {
        match self {
            Self::Interface { extends } => extends.iter().collect(),
            Self::Class { extends, .. } => extends.iter().collect(),
            Self::TypeAlias => Vec::new(),
        }
    }

    pub fn implements(&self) -> &[TypeRef] {
        match self {
            Self::Class { implements, .. } => implements,
            Self::Interface { .. } | Self::TypeAlias => &[],
        }
    }
}

/// A node representing one declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub(crate) id: ModelId,
    pub(crate) name: String,
    pub(crate) kind: ModelKind,
    pub(crate) arguments: Vec<GenericArgument>,
    pub(crate) schema: Vec<SchemaField>,
    pub(crate) heritage: Heritage,
    pub(crate) dependencies: Vec<ModelId>,
    pub(crate) dependants: Vec<ModelId>,
}

impl Model {
    pub(crate) fn stub(id: ModelId, name: String, kind: ModelKind) -> Self {
        let heritage = match kind {
            ModelKind::Interface => Heritage::Interface {
                extends: Vec::new(),
            },
            ModelKind::Class => Heritage::Class {
                extends: None,
                implements: Vec::new(),
            },
            ModelKind::TypeAlias => Heritage::TypeAlias,
        };
        Self {
            id,
            name,
            kind,
            arguments: Vec::new(),
            schema: Vec::new(),
            heritage,
            dependencies: Vec::new(),
            dependants: Vec::new(),
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Declaration name. Unique within a graph and used as the identifier in
    /// serialized output.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn arguments(&self) -> &[GenericArgument] {
        &self.arguments
    }

    pub fn schema(&self) -> &[SchemaField] {
        &self.schema
    }

    pub fn heritage(&self) -> &Heritage {
        &self.heritage
    }

    pub fn dependencies(&self) -> &[ModelId] {
        &self.dependencies
    }

    pub fn dependants(&self) -> &[ModelId] {
        &self.dependants
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.schema.iter().find(|field| field.name() == name)
    }
}

/// Arena of models produced by one build.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    pub(crate) models: Vec<Model>,
    pub(crate) index: FxHashMap<String, ModelId>,
}

impl ModelGraph {
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&Model> {
        self.index.get(name).and_then(|id| self.get(*id))
    }

    /// The model a reference points at, if it is resolved.
    pub fn resolve(&self, ty: &TypeRef) -> Option<&Model> {
        ty.model().and_then(|id| self.get(id))
    }

    /// Display name for a reference: the model name or the raw text.
    pub fn ref_name<'a>(&'a self, ty: &'a TypeRef) -> &'a str {
        match ty {
            TypeRef::Model(id) => self.get(*id).map(Model::name).unwrap_or_default(),
            TypeRef::Named(name) => name,
        }
    }

    pub fn dependencies(&self, id: ModelId) -> impl Iterator<Item = &Model> {
        self.get(id)
            .into_iter()
            .flat_map(|model| model.dependencies.iter())
            .filter_map(move |dependency| self.get(*dependency))
    }

    pub fn dependants(&self, id: ModelId) -> impl Iterator<Item = &Model> {
        self.get(id)
            .into_iter()
            .flat_map(|model| model.dependants.iter())
            .filter_map(move |dependant| self.get(*dependant))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Number of dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.models.iter().map(|model| model.dependencies.len()).sum()
    }

    pub fn into_models(self) -> Vec<Model> {
        self.models
    }
}
