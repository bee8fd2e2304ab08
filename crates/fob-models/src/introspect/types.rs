//! Owned type-shape descriptions answered by an introspector.

use std::sync::Arc;

/// Atomic type classifications. A type carrying one of these is an opaque
/// type expression rather than a structural record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeAtom {
    Primitive,
    Literal,
    Union,
    Enum,
    Any,
    Unknown,
    Never,
    Null,
    Undefined,
}

/// A resolved type expression together with the shape queries the model
/// builder asks of it.
///
/// Element types and signatures are shared, so cloning a type is shallow
/// and expanded aliases can be reused wherever they are referenced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeExpr {
    text: String,
    atom: Option<TypeAtom>,
    element: Option<Arc<TypeExpr>>,
    signatures: Arc<[Signature]>,
    symbol: Option<String>,
    alias_symbol: Option<String>,
    type_arguments: Vec<TypeArgument>,
}

impl TypeExpr {
    /// An opaque, non-atomic type known only by its text.
    pub fn named(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// An atomic type (primitive, literal, union, ...).
    pub fn atom(text: impl Into<String>, atom: TypeAtom) -> Self {
        Self {
            text: text.into(),
            atom: Some(atom),
            ..Self::default()
        }
    }

    /// A sequence type whose elements are `element`.
    pub fn array(text: impl Into<String>, element: TypeExpr) -> Self {
        Self {
            text: text.into(),
            element: Some(Arc::new(element)),
            ..Self::default()
        }
    }

    /// An invocable type with a single signature.
    pub fn function(text: impl Into<String>, signature: Signature) -> Self {
        Self {
            text: text.into(),
            signatures: Arc::from([signature]),
            ..Self::default()
        }
    }

    /// A generic instantiation such as `Box<T>`.
    pub fn generic(
        text: impl Into<String>,
        symbol: impl Into<String>,
        arguments: Vec<TypeArgument>,
    ) -> Self {
        Self {
            text: text.into(),
            symbol: Some(symbol.into()),
            type_arguments: arguments,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_atom(mut self, atom: Option<TypeAtom>) -> Self {
        self.atom = atom;
        self
    }

    pub fn with_element(mut self, element: Option<TypeExpr>) -> Self {
        self.element = element.map(Arc::new);
        self
    }

    pub fn with_signatures(mut self, signatures: Vec<Signature>) -> Self {
        self.signatures = signatures.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Marks this type as an application of the alias `symbol`.
    pub fn with_alias_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.alias_symbol = Some(symbol.into());
        self
    }

    pub fn with_type_arguments(mut self, arguments: Vec<TypeArgument>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// Textual name of the type.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn atom_kind(&self) -> Option<TypeAtom> {
        self.atom
    }

    /// `true` for primitives, literals, unions, enums and the top/bottom types.
    pub fn is_atomic(&self) -> bool {
        self.atom.is_some()
    }

    /// Element type when this type is a sequence.
    pub fn array_element(&self) -> Option<&TypeExpr> {
        self.element.as_deref()
    }

    /// Invocable signatures of this type. Overloaded types report several.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Symbol naming this type, preferring the alias symbol for alias applications.
    pub fn generic_symbol(&self) -> Option<&str> {
        self.alias_symbol.as_deref().or(self.symbol.as_deref())
    }

    pub fn type_arguments(&self) -> &[TypeArgument] {
        &self.type_arguments
    }
}

/// One type argument of a generic application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgument {
    pub ty: TypeExpr,
    /// Spelling used in source when the argument is a direct type reference.
    pub written: Option<String>,
}

impl TypeArgument {
    pub fn new(ty: TypeExpr) -> Self {
        Self { ty, written: None }
    }

    pub fn written(ty: TypeExpr, written: impl Into<String>) -> Self {
        Self {
            ty,
            written: Some(written.into()),
        }
    }

    /// Name used to resolve this argument: the written spelling wins.
    pub fn name(&self) -> &str {
        self.written.as_deref().unwrap_or(self.ty.text())
    }
}

/// A single call signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_type: Box<TypeExpr>,
}

impl Signature {
    pub fn new(parameters: Vec<Parameter>, return_type: TypeExpr) -> Self {
        Self {
            parameters,
            return_type: Box::new(return_type),
        }
    }

    /// Renders the signature in arrow form, e.g. `(a: A) => R`.
    pub fn arrow_text(&self) -> String {
        format!("({}) => {}", self.parameter_list(), self.return_type.text())
    }

    /// Renders the signature in call-signature form, e.g. `(a: A): R`.
    pub fn call_text(&self) -> String {
        format!("({}): {}", self.parameter_list(), self.return_type.text())
    }

    fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| format!("{}: {}", parameter.name, parameter.ty.text()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeExpr,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_symbol_takes_precedence() {
        let ty = TypeExpr::generic("Maybe<Item>", "Union", vec![])
            .with_alias_symbol("Maybe");
        assert_eq!(ty.generic_symbol(), Some("Maybe"));
    }

    #[test]
    fn written_argument_name_wins() {
        let argument = TypeArgument::written(TypeExpr::named("string | number"), "Key");
        assert_eq!(argument.name(), "Key");
        assert_eq!(TypeArgument::new(TypeExpr::named("Item")).name(), "Item");
    }

    #[test]
    fn renders_signature_text() {
        let signature = Signature::new(
            vec![Parameter::new("id", TypeExpr::atom("string", TypeAtom::Primitive))],
            TypeExpr::named("User"),
        );
        assert_eq!(signature.arrow_text(), "(id: string) => User");
        assert_eq!(signature.call_text(), "(id: string): User");
    }
}
