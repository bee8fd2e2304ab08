//! Schema field classifier (pass 2).
//!
//! Turns every member of every declaration into exactly one [`SchemaField`]
//! and collects the models each declaration depends on. Work per
//! declaration only reads the sealed registry, so it runs on the rayon pool
//! when requested.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::fields::{ALIAS_SENTINEL, DependencySet, FieldShape, discriminate, is_degenerate_alias};
use crate::introspect::{Declaration, Member, MemberKind, Signature, TypeArgument};
use crate::model::{FunctionArgument, ModelId, ReturnType, SchemaField, TypeRef};
use crate::registry::SealedRegistry;

/// Pass-2 output for a single declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub model: ModelId,
    pub schema: Vec<SchemaField>,
    pub dependencies: DependencySet,
}

/// Classify every `(declaration, model)` pair. Results keep input order.
pub fn classify_all(
    registry: &SealedRegistry,
    work: &[(&Declaration, ModelId)],
    parallel: bool,
) -> Vec<Classification> {
    let classifications: Vec<Classification> = if parallel {
        work.par_iter()
            .map(|(declaration, model)| classify_declaration(registry, *model, declaration))
            .collect()
    } else {
        work.iter()
            .map(|(declaration, model)| classify_declaration(registry, *model, declaration))
            .collect()
    };

    debug!(
        declarations = work.len(),
        fields = classifications
            .iter()
            .map(|classification| classification.schema.len())
            .sum::<usize>(),
        parallel,
        "classified declarations"
    );
    classifications
}

/// Classify the members of one declaration into the schema of `model`.
pub fn classify_declaration(
    registry: &SealedRegistry,
    model: ModelId,
    declaration: &Declaration,
) -> Classification {
    let mut classifier = Classifier {
        registry,
        dependencies: DependencySet::new(),
    };

    let schema = if is_degenerate_alias(declaration) {
        let text = declaration
            .aliased
            .as_ref()
            .map(|aliased| aliased.text().to_string())
            .unwrap_or_default();
        vec![SchemaField::Default {
            name: ALIAS_SENTINEL.to_string(),
            ty: TypeRef::Named(text),
        }]
    } else {
        let schema = declaration
            .members
            .iter()
            .map(|member| classifier.member(member))
            .collect();
        classifier.heritage(declaration);
        schema
    };

    Classification {
        model,
        schema,
        dependencies: classifier.dependencies,
    }
}

struct Classifier<'r> {
    registry: &'r SealedRegistry,
    dependencies: DependencySet,
}

impl Classifier<'_> {
    fn member(&mut self, member: &Member) -> SchemaField {
        let name = member.name.clone();
        match discriminate(&member.ty) {
            FieldShape::Function(signature) => self.function(name, signature),
            FieldShape::Array(element) => SchemaField::Array {
                name,
                element_type: self.resolve(element.text()),
            },
            FieldShape::Reference { symbol, arguments } => {
                self.reference(name, symbol, arguments)
            }
            FieldShape::Default => {
                // Property signatures keep the annotation as written.
                let text = match (member.kind, member.annotation.as_deref()) {
                    (MemberKind::PropertySignature, Some(annotation)) => annotation,
                    _ => member.ty.text(),
                };
                SchemaField::Default {
                    name,
                    ty: self.resolve(text),
                }
            }
        }
    }

    fn function(&mut self, name: String, signature: &Signature) -> SchemaField {
        let arguments = signature
            .parameters
            .iter()
            .map(|parameter| FunctionArgument {
                name: parameter.name.clone(),
                ty: self.resolve(parameter.ty.text()),
            })
            .collect();

        let returned = &signature.return_type;
        let return_type = match returned.array_element() {
            Some(element) => ReturnType::Sequence(self.resolve(element.text())),
            None => ReturnType::Single(self.resolve(returned.text())),
        };

        SchemaField::Function {
            name,
            arguments,
            return_type,
        }
    }

    fn reference(&mut self, name: String, symbol: &str, arguments: &[TypeArgument]) -> SchemaField {
        if let Some(id) = self.registry.lookup(symbol) {
            self.dependencies.insert(id);
        }
        let arguments = arguments
            .iter()
            .map(|argument| self.resolve(argument.name()))
            .collect();

        SchemaField::Reference {
            name,
            reference_name: symbol.to_string(),
            arguments,
        }
    }

    /// Re-resolves inheritance against the complete registry. Clauses that
    /// pass 1 left unresolved may point at a model by now.
    fn heritage(&mut self, declaration: &Declaration) {
        for clause in declaration.extends.iter().chain(&declaration.implements) {
            if let Some(id) = self.registry.lookup(&clause.name) {
                self.dependencies.insert(id);
            }
        }
    }

    fn resolve(&mut self, name: &str) -> TypeRef {
        let resolved = self.registry.resolve(name);
        match &resolved {
            TypeRef::Model(_) => {
                self.dependencies.record(&resolved);
            }
            TypeRef::Named(_) => trace!(name, "type reference left unresolved"),
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistrationOrder;
    use crate::introspect::{DeclarationSet, Parameter, TypeAtom, TypeExpr};
    use crate::registry::register_declarations;

    fn sealed(set: &DeclarationSet) -> SealedRegistry {
        register_declarations(set, RegistrationOrder::Categorical).seal()
    }

    #[test]
    fn sequence_return_type_is_wrapped() {
        let set = DeclarationSet::new()
            .with(Declaration::interface("User"))
            .with(Declaration::class("Repo").with_member(Member::method(
                "all",
                TypeExpr::function(
                    "() => User[]",
                    Signature::new(
                        Vec::new(),
                        TypeExpr::array("User[]", TypeExpr::named("User")),
                    ),
                ),
            )));
        let registry = sealed(&set);
        let user = registry.lookup("User").unwrap();
        let repo = registry.lookup("Repo").unwrap();

        let classification = classify_declaration(&registry, repo, &set.classes[0]);
        assert_eq!(
            classification.schema,
            vec![SchemaField::Function {
                name: "all".to_string(),
                arguments: Vec::new(),
                return_type: ReturnType::Sequence(TypeRef::Model(user)),
            }]
        );
        assert!(classification.dependencies.contains(user));
    }

    #[test]
    fn parameters_resolve_by_their_text() {
        let set = DeclarationSet::new()
            .with(Declaration::interface("User"))
            .with(Declaration::class("Repo").with_member(Member::method(
                "save",
                TypeExpr::function(
                    "(user: User, tags: string[]) => void",
                    Signature::new(
                        vec![
                            Parameter::new("user", TypeExpr::named("User")),
                            Parameter::new(
                                "tags",
                                TypeExpr::array(
                                    "string[]",
                                    TypeExpr::atom("string", TypeAtom::Primitive),
                                ),
                            ),
                        ],
                        TypeExpr::atom("void", TypeAtom::Primitive),
                    ),
                ),
            )));
        let registry = sealed(&set);
        let user = registry.lookup("User").unwrap();
        let repo = registry.lookup("Repo").unwrap();

        let classification = classify_declaration(&registry, repo, &set.classes[0]);
        let SchemaField::Function {
            arguments,
            return_type,
            ..
        } = &classification.schema[0]
        else {
            panic!("expected a function field");
        };
        assert_eq!(arguments[0].ty, TypeRef::Model(user));
        assert_eq!(arguments[1].ty, TypeRef::Named("string[]".to_string()));
        assert_eq!(
            return_type,
            &ReturnType::Single(TypeRef::Named("void".to_string()))
        );
    }

    #[test]
    fn property_signature_prefers_annotation() {
        let member = Member::new(
            "value",
            MemberKind::PropertySignature,
            TypeExpr::atom("string", TypeAtom::Primitive),
        )
        .with_annotation("T");
        let set = DeclarationSet::new().with(Declaration::interface("Holder").with_member(member));
        let registry = sealed(&set);
        let holder = registry.lookup("Holder").unwrap();

        let classification = classify_declaration(&registry, holder, &set.interfaces[0]);
        assert_eq!(
            classification.schema,
            vec![SchemaField::Default {
                name: "value".to_string(),
                ty: TypeRef::Named("T".to_string()),
            }]
        );
    }

    #[test]
    fn class_property_ignores_annotation() {
        let member = Member::property("value", TypeExpr::atom("string", TypeAtom::Primitive))
            .with_annotation("T");
        let set = DeclarationSet::new().with(Declaration::class("Holder").with_member(member));
        let registry = sealed(&set);
        let holder = registry.lookup("Holder").unwrap();

        let classification = classify_declaration(&registry, holder, &set.classes[0]);
        assert_eq!(
            classification.schema[0],
            SchemaField::Default {
                name: "value".to_string(),
                ty: TypeRef::Named("string".to_string()),
            }
        );
    }

    #[test]
    fn degenerate_alias_yields_sentinel_only() {
        let alias = Declaration::type_alias(
            "Status",
            TypeExpr::atom("\"on\" | \"off\"", TypeAtom::Union),
        )
        .with_member(Member::property_signature("ignored", TypeExpr::named("Status")));
        let set = DeclarationSet::new().with(alias);
        let registry = sealed(&set);
        let status = registry.lookup("Status").unwrap();

        let classification = classify_declaration(&registry, status, &set.type_aliases[0]);
        assert_eq!(
            classification.schema,
            vec![SchemaField::Default {
                name: ALIAS_SENTINEL.to_string(),
                ty: TypeRef::Named("\"on\" | \"off\"".to_string()),
            }]
        );
        assert!(classification.dependencies.is_empty());
    }

    #[test]
    fn reference_uses_written_argument_names() {
        let ty = TypeExpr::generic(
            "Map<Key, Item>",
            "Map",
            vec![
                TypeArgument::written(TypeExpr::atom("string | number", TypeAtom::Union), "Key"),
                TypeArgument::new(TypeExpr::named("Item")),
            ],
        );
        let set = DeclarationSet::new()
            .with(Declaration::interface("Item"))
            .with(Declaration::type_alias(
                "Key",
                TypeExpr::atom("string | number", TypeAtom::Union),
            ))
            .with(Declaration::class("Index").with_member(Member::property("entries", ty)));
        let registry = sealed(&set);
        let item = registry.lookup("Item").unwrap();
        let key = registry.lookup("Key").unwrap();
        let index = registry.lookup("Index").unwrap();

        let classification = classify_declaration(&registry, index, &set.classes[0]);
        assert_eq!(
            classification.schema[0],
            SchemaField::Reference {
                name: "entries".to_string(),
                reference_name: "Map".to_string(),
                arguments: vec![TypeRef::Model(key), TypeRef::Model(item)],
            }
        );
        assert_eq!(classification.dependencies.iter().collect::<Vec<_>>(), vec![key, item]);
    }

    #[test]
    fn inheritance_reresolves_against_complete_registry() {
        let set = DeclarationSet::new()
            .with(Declaration::class("Dog").with_extends("Animal"))
            .with(Declaration::class("Animal"));
        let registry = sealed(&set);
        let animal = registry.lookup("Animal").unwrap();
        let dog = registry.lookup("Dog").unwrap();

        let classification = classify_declaration(&registry, dog, &set.classes[0]);
        assert!(classification.dependencies.contains(animal));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let set = DeclarationSet::new()
            .with(
                Declaration::interface("A")
                    .with_member(Member::property_signature("b", TypeExpr::named("B"))),
            )
            .with(
                Declaration::interface("B")
                    .with_member(Member::property_signature("a", TypeExpr::named("A"))),
            );
        let registry = sealed(&set);
        let work: Vec<_> = set
            .iter()
            .zip(registry.assignments())
            .filter_map(|(declaration, slot)| slot.map(|id| (declaration, id)))
            .collect();

        assert_eq!(
            classify_all(&registry, &work, true),
            classify_all(&registry, &work, false)
        );
    }
}
