use std::fs;

use fob_models::{
    DeclarationKind, MemberKind, ModelsError, OxcIntrospector, TypeAtom, TypeIntrospector,
};
use tempfile::tempdir;

#[test]
fn reads_sources_from_disk() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("shapes.ts");
    fs::write(
        &path,
        r#"
            export interface Shape { area(): number }
            export class Circle implements Shape {
                radius = 1;
                area(): number { return 3.14 * this.radius ** 2; }
            }
        "#,
    )
    .expect("write source");

    let mut introspector = OxcIntrospector::new();
    introspector.add_path(&path).expect("readable file");
    let set = introspector.declarations().expect("parses");

    assert_eq!(set.interfaces.len(), 1);
    assert_eq!(set.classes.len(), 1);

    let circle = &set.classes[0];
    assert_eq!(circle.kind, DeclarationKind::Class);
    assert_eq!(circle.implements[0].name, "Shape");
    assert_eq!(circle.members[0].kind, MemberKind::Property);
    assert_eq!(circle.members[0].ty.atom_kind(), Some(TypeAtom::Primitive));
    assert_eq!(circle.members[1].kind, MemberKind::Method);
    assert_eq!(circle.members[1].ty.text(), "() => number");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("missing.ts");

    let error = OxcIntrospector::new().add_path(&missing).unwrap_err();
    match error {
        ModelsError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn parse_failure_names_the_file() {
    let error = OxcIntrospector::new()
        .with_source("ok.ts", "interface Fine {}")
        .with_source("bad.ts", "class {")
        .declarations()
        .unwrap_err();

    assert!(error.to_string().contains("bad.ts"), "{error}");
}

#[test]
fn aliases_and_enums_resolve_across_files() {
    let set = OxcIntrospector::new()
        .with_source("types.ts", "export type Ids = readonly string[];\nexport enum Role { Admin }")
        .with_source(
            "user.ts",
            "export interface User { ids: Ids; role: Role; \
             handler(this: void, ...rest: number[]): void }",
        )
        .declarations()
        .expect("parses");

    let user = &set.interfaces[0];
    let ids = &user.members[0].ty;
    assert_eq!(ids.text(), "Ids");
    assert_eq!(ids.generic_symbol(), Some("Ids"));
    assert_eq!(ids.array_element().map(|element| element.text()), Some("string"));
    assert_eq!(user.members[0].annotation.as_deref(), Some("Ids"));

    assert_eq!(user.members[1].ty.atom_kind(), Some(TypeAtom::Enum));

    let handler = &user.members[2].ty.signatures()[0];
    let names: Vec<_> = handler
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["rest"]);
    assert_eq!(handler.parameters[0].ty.text(), "number[]");
}

#[test]
fn invocable_object_literals_report_signatures() {
    let set = OxcIntrospector::new()
        .with_source(
            "events.ts",
            r#"
                export interface Events {
                    listener: { (event: string): void };
                    overloaded: { (a: string): void; (a: number): void };
                    mixed: { (a: string): void; name: string };
                }
            "#,
        )
        .declarations()
        .expect("parses");

    let members = &set.interfaces[0].members;
    assert_eq!(members[0].ty.signatures().len(), 1);
    assert_eq!(members[1].ty.signatures().len(), 2);
    assert!(members[2].ty.signatures().is_empty());
}
