//! Input side of the model builder.
//!
//! A [`TypeIntrospector`] hands over every declared class, interface and type
//! alias as an owned [`DeclarationSet`]. Type shapes are already resolved by
//! the time they reach the builder; [`TypeExpr`] only answers questions about
//! them. [`oxc::OxcIntrospector`] is the bundled implementation for
//! TypeScript sources.

pub mod oxc;
mod types;

pub use types::{Parameter, Signature, TypeArgument, TypeAtom, TypeExpr};

use crate::error::Result;

/// Supplies the declarations a model graph is built from.
pub trait TypeIntrospector {
    /// Enumerate every declaration, grouped by category.
    fn declarations(&self) -> Result<DeclarationSet>;
}

/// Declarations grouped in the order they are registered: interfaces, then
/// type aliases, then classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    pub interfaces: Vec<Declaration>,
    pub type_aliases: Vec<Declaration>,
    pub classes: Vec<Declaration>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration to the collection matching its kind.
    pub fn push(&mut self, declaration: Declaration) {
        match declaration.kind {
            DeclarationKind::Interface => self.interfaces.push(declaration),
            DeclarationKind::TypeAlias => self.type_aliases.push(declaration),
            DeclarationKind::Class => self.classes.push(declaration),
        }
    }

    pub fn with(mut self, declaration: Declaration) -> Self {
        self.push(declaration);
        self
    }

    /// Iterates interfaces, then type aliases, then classes.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.interfaces
            .iter()
            .chain(self.type_aliases.iter())
            .chain(self.classes.iter())
    }

    pub fn len(&self) -> usize {
        self.interfaces.len() + self.type_aliases.len() + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends every declaration of `other`, preserving per-category order.
    pub fn extend(&mut self, other: DeclarationSet) {
        self.interfaces.extend(other.interfaces);
        self.type_aliases.extend(other.type_aliases);
        self.classes.extend(other.classes);
    }
}

impl TypeIntrospector for DeclarationSet {
    fn declarations(&self) -> Result<DeclarationSet> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    TypeAlias,
}

/// A named type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub type_parameters: Vec<TypeParameter>,
    /// Interfaces: every `extends` clause. Classes: at most one.
    pub extends: Vec<HeritageClause>,
    /// Classes only.
    pub implements: Vec<HeritageClause>,
    pub members: Vec<Member>,
    /// Type aliases only: the aliased type.
    pub aliased: Option<TypeExpr>,
}

impl Declaration {
    fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            aliased: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    pub fn type_alias(name: impl Into<String>, aliased: TypeExpr) -> Self {
        let mut declaration = Self::new(name, DeclarationKind::TypeAlias);
        declaration.aliased = Some(aliased);
        declaration
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_extends(mut self, clause: impl Into<HeritageClause>) -> Self {
        self.extends.push(clause.into());
        self
    }

    pub fn with_implements(mut self, clause: impl Into<HeritageClause>) -> Self {
        self.implements.push(clause.into());
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

/// A generic parameter with its optional constraint text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<String>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    pub fn bounded(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: Some(constraint.into()),
        }
    }
}

/// An `extends` or `implements` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageClause {
    /// The referenced expression, e.g. `Base` in `extends Base<T>`.
    pub name: String,
    /// The clause as written, including type arguments.
    pub text: String,
}

impl HeritageClause {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl From<&str> for HeritageClause {
    fn from(name: &str) -> Self {
        Self::new(name, name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A property signature in an interface or object literal type.
    PropertySignature,
    /// A class property.
    Property,
    Method,
    GetAccessor,
    SetAccessor,
}

/// A member of a declaration with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub ty: TypeExpr,
    /// The member's own type annotation as written, when present.
    pub annotation: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: MemberKind, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            annotation: None,
        }
    }

    /// Property signature whose annotation is the type's own text.
    pub fn property_signature(name: impl Into<String>, ty: TypeExpr) -> Self {
        let annotation = Some(ty.text().to_string());
        Self {
            annotation,
            ..Self::new(name, MemberKind::PropertySignature, ty)
        }
    }

    pub fn property(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(name, MemberKind::Property, ty)
    }

    pub fn method(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(name, MemberKind::Method, ty)
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}
