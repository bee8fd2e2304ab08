use chrono::Utc;
use serde::Serialize;

use crate::{
    error::{ModelsError, Result},
    model::{Heritage, Model, ModelGraph, ModelKind, ReturnType, SchemaField, TypeRef},
};

/// Pretty-printed JSON representation of the model graph including metadata.
///
/// Resolved references render as `{"$ref": "<model name>"}`, unresolved ones
/// as the raw type text.
pub fn render_json(graph: &ModelGraph) -> Result<String> {
    let payload = JsonPayload {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        models: graph.iter().map(|model| ModelView::new(graph, model)).collect(),
    };

    serde_json::to_string_pretty(&payload).map_err(|error| ModelsError::Other {
        message: error.to_string(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPayload<'g> {
    version: &'static str,
    generated_at: String,
    models: Vec<ModelView<'g>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelView<'g> {
    /// The declaration's identifier, the same value as `name`.
    id: &'g str,
    name: &'g str,
    kind: ModelKind,
    arguments: Vec<ArgumentView<'g>>,
    schema: Vec<FieldView<'g>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<ExtendsView<'g>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implements: Option<Vec<RefView<'g>>>,
    dependencies: Vec<&'g str>,
    dependants: Vec<&'g str>,
}

impl<'g> ModelView<'g> {
    fn new(graph: &'g ModelGraph, model: &'g Model) -> Self {
        let refs = |refs: &'g [TypeRef]| -> Vec<RefView<'g>> {
            refs.iter().map(|ty| RefView::new(graph, ty)).collect()
        };
        let (extends, implements) = match model.heritage() {
            Heritage::Interface { extends } => (Some(ExtendsView::Many(refs(extends))), None),
            Heritage::Class {
                extends,
                implements,
            } => (
                extends
                    .as_ref()
                    .map(|ty| ExtendsView::One(RefView::new(graph, ty))),
                Some(refs(implements)),
            ),
            Heritage::TypeAlias => (None, None),
        };

        Self {
            id: model.name(),
            name: model.name(),
            kind: model.kind(),
            arguments: model
                .arguments()
                .iter()
                .map(|argument| ArgumentView {
                    name: &argument.name,
                    bound_expression: argument.bound.as_deref(),
                })
                .collect(),
            schema: model
                .schema()
                .iter()
                .map(|field| FieldView::new(graph, field))
                .collect(),
            extends,
            implements,
            dependencies: graph.dependencies(model.id()).map(Model::name).collect(),
            dependants: graph.dependants(model.id()).map(Model::name).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArgumentView<'g> {
    name: &'g str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bound_expression: Option<&'g str>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ExtendsView<'g> {
    Many(Vec<RefView<'g>>),
    One(RefView<'g>),
}

#[derive(Serialize)]
#[serde(untagged)]
enum RefView<'g> {
    Model {
        #[serde(rename = "$ref")]
        reference: &'g str,
    },
    Named(&'g str),
}

impl<'g> RefView<'g> {
    fn new(graph: &'g ModelGraph, ty: &'g TypeRef) -> Self {
        match ty {
            TypeRef::Model(_) => Self::Model {
                reference: graph.ref_name(ty),
            },
            TypeRef::Named(name) => Self::Named(name),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum FieldView<'g> {
    Default {
        name: &'g str,
        #[serde(rename = "type")]
        ty: RefView<'g>,
    },
    Array {
        name: &'g str,
        #[serde(rename = "type")]
        tag: &'static str,
        #[serde(rename = "elementType")]
        element_type: RefView<'g>,
    },
    Reference {
        name: &'g str,
        #[serde(rename = "type")]
        tag: &'static str,
        #[serde(rename = "referenceName")]
        reference_name: &'g str,
        arguments: Vec<RefView<'g>>,
    },
    Function {
        name: &'g str,
        #[serde(rename = "type")]
        tag: &'static str,
        arguments: Vec<ParameterView<'g>>,
        #[serde(rename = "returnType")]
        return_type: ReturnView<'g>,
    },
}

impl<'g> FieldView<'g> {
    fn new(graph: &'g ModelGraph, field: &'g SchemaField) -> Self {
        match field {
            SchemaField::Default { name, ty } => Self::Default {
                name,
                ty: RefView::new(graph, ty),
            },
            SchemaField::Array { name, element_type } => Self::Array {
                name,
                tag: "array",
                element_type: RefView::new(graph, element_type),
            },
            SchemaField::Reference {
                name,
                reference_name,
                arguments,
            } => Self::Reference {
                name,
                tag: "reference",
                reference_name,
                arguments: arguments.iter().map(|ty| RefView::new(graph, ty)).collect(),
            },
            SchemaField::Function {
                name,
                arguments,
                return_type,
            } => Self::Function {
                name,
                tag: "function",
                arguments: arguments
                    .iter()
                    .map(|argument| ParameterView {
                        name: &argument.name,
                        ty: RefView::new(graph, &argument.ty),
                    })
                    .collect(),
                return_type: match return_type {
                    ReturnType::Single(ty) => ReturnView::Single(RefView::new(graph, ty)),
                    ReturnType::Sequence(ty) => ReturnView::Sequence([RefView::new(graph, ty)]),
                },
            },
        }
    }
}

#[derive(Serialize)]
struct ParameterView<'g> {
    name: &'g str,
    #[serde(rename = "type")]
    ty: RefView<'g>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ReturnView<'g> {
    Single(RefView<'g>),
    Sequence([RefView<'g>; 1]),
}
