//! Field-kind discrimination shared by the classifier.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::introspect::{Declaration, DeclarationKind, Signature, TypeArgument, TypeExpr};
use crate::model::{ModelId, TypeRef};

/// Name of the single field carried by aliases of atomic types.
pub const ALIAS_SENTINEL: &str = "==>";

/// Shape a member's type takes in the schema. Checked in declaration order:
/// the first matching shape wins.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldShape<'a> {
    Function(&'a Signature),
    Array(&'a TypeExpr),
    Reference {
        symbol: &'a str,
        arguments: &'a [TypeArgument],
    },
    Default,
}

pub(crate) fn discriminate(ty: &TypeExpr) -> FieldShape<'_> {
    // Overloaded or non-invocable types are not functions.
    if let [signature] = ty.signatures() {
        return FieldShape::Function(signature);
    }
    if let Some(element) = ty.array_element() {
        return FieldShape::Array(element);
    }
    match ty.generic_symbol() {
        Some(symbol) if !symbol.is_empty() && !ty.type_arguments().is_empty() => {
            FieldShape::Reference {
                symbol,
                arguments: ty.type_arguments(),
            }
        }
        _ => FieldShape::Default,
    }
}

/// Type aliases of primitives, literals, unions, enums and the top/bottom
/// types are type expressions, not records.
pub(crate) fn is_degenerate_alias(declaration: &Declaration) -> bool {
    declaration.kind == DeclarationKind::TypeAlias
        && declaration
            .aliased
            .as_ref()
            .is_some_and(TypeExpr::is_atomic)
}

/// Insertion-ordered set of models a declaration depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    models: IndexSet<ModelId, FxBuildHasher>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `ty` when it points at a model. Returns `true` if newly added.
    pub fn record(&mut self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Model(id) => self.models.insert(*id),
            TypeRef::Named(_) => false,
        }
    }

    pub fn insert(&mut self, id: ModelId) -> bool {
        self.models.insert(id)
    }

    pub fn extend(&mut self, other: &DependencySet) {
        self.models.extend(other.models.iter().copied());
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.models.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
