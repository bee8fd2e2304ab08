use fob_models::{BuildOptions, ModelBuilder, OxcIntrospector, render_json};
use serde_json::{Value, json};

fn render(source: &str) -> Value {
    let introspector = OxcIntrospector::new().with_source("input.ts", source);
    let graph = ModelBuilder::new(BuildOptions::default())
        .build_from(&introspector)
        .expect("build should succeed");
    let output = render_json(&graph).expect("json rendering succeeds");
    serde_json::from_str(&output).expect("valid json")
}

#[test]
fn renders_models_with_metadata() {
    let value = render(
        r#"
            export interface Keyed<K extends string> { key: K }
            export class Store<T> extends Base implements Keyed<string> {
                items: Map<string, Item>;
                find(key: string): Item | undefined { return undefined; }
            }
            export class Item {}
        "#,
    );

    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert!(value["generatedAt"].as_str().is_some());

    let keyed = &value["models"][0];
    assert_eq!(keyed["name"], "Keyed");
    assert_eq!(keyed["arguments"], json!([{ "name": "K", "boundExpression": "string" }]));
    assert_eq!(keyed["schema"], json!([{ "name": "key", "type": "K" }]));
    assert_eq!(keyed["dependants"], json!(["Store"]));

    let store = &value["models"][1];
    assert_eq!(store["kind"], "class");
    assert_eq!(store["extends"], "Base");
    assert_eq!(store["implements"], json!([{ "$ref": "Keyed" }]));
    assert_eq!(
        store["schema"][0],
        json!({
            "name": "items",
            "type": "reference",
            "referenceName": "Map",
            "arguments": ["string", { "$ref": "Item" }],
        })
    );
    assert_eq!(
        store["schema"][1],
        json!({
            "name": "find",
            "type": "function",
            "arguments": [{ "name": "key", "type": "string" }],
            "returnType": "Item | undefined",
        })
    );
    assert_eq!(store["dependencies"], json!(["Item", "Keyed"]));
}

#[test]
fn renders_alias_sentinel() {
    let value = render(r#"export type Mode = "light" | "dark";"#);
    let mode = &value["models"][0];
    assert_eq!(mode["kind"], "typeAlias");
    assert!(mode.get("extends").is_none());
    assert_eq!(mode["schema"], json!([{ "name": "==>", "type": "\"light\" | \"dark\"" }]));
}

#[test]
fn model_ids_are_declaration_names() {
    let value = render(
        r#"
            interface User { id: string; friends: User[] }
            type Role = "admin" | "guest";
            class Session { user: User; role: Role }
        "#,
    );

    let models = value["models"].as_array().unwrap();
    assert_eq!(models.len(), 3);
    for model in models {
        assert!(model["id"].is_string());
        assert_eq!(model["id"], model["name"]);
    }
    assert_eq!(models[0]["id"], "User");
}
