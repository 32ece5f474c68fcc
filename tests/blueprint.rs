//! Tests for blueprint parsing and structural validation.
mod common;
use common::*;
use tsunagi::prelude::*;

#[test]
fn parses_a_complete_document() {
    let blueprint = parse_blueprint(SIMPLE_BLUEPRINT_JSON).expect("Failed to parse blueprint");
    assert_eq!(blueprint.id, "order-sync");
    assert_eq!(blueprint.name, "Order Sync");
    assert_eq!(blueprint.version, "1.2.0");
    assert_eq!(blueprint.endpoints.len(), 1);

    let endpoint = &blueprint.endpoints[0];
    assert_eq!(endpoint.components.len(), 1);
    assert_eq!(endpoint.components[0].type_name, "groovyScript");
    assert_eq!(endpoint.sequence_flows.len(), 2);
}

#[test]
fn malformed_json_is_a_schema_error() {
    assert!(matches!(
        parse_blueprint("{not json"),
        Err(SchemaError::Json(_))
    ));
}

#[test]
fn missing_component_type_names_the_path() {
    let doc = r#"{
        "id": "bp", "name": "n", "version": "1",
        "endpoints": [{
            "id": "ep",
            "components": [{"id": "c1", "name": "x", "config": {}}],
            "sequence_flows": []
        }]
    }"#;
    match parse_blueprint(doc) {
        Err(SchemaError::MissingField { path }) => {
            assert_eq!(path, "endpoints[0].components[0].type");
        }
        other => panic!("Expected MissingField, got {other:?}"),
    }
}

#[test]
fn duplicate_component_id_names_the_second_occurrence() {
    let doc = r#"{
        "id": "bp", "name": "n", "version": "1",
        "endpoints": [{
            "id": "ep",
            "components": [
                {"type": "groovyScript", "id": "c1", "name": "a", "config": {}},
                {"type": "contentModifier", "id": "c1", "name": "b", "config": {}}
            ],
            "sequence_flows": []
        }]
    }"#;
    match parse_blueprint(doc) {
        Err(SchemaError::DuplicateIdentifier { path, id }) => {
            assert_eq!(path, "endpoints[0].components[1].id");
            assert_eq!(id, "c1");
        }
        other => panic!("Expected DuplicateIdentifier, got {other:?}"),
    }
}

#[test]
fn duplicate_endpoint_id_is_rejected() {
    let doc = r#"{
        "id": "bp", "name": "n", "version": "1",
        "endpoints": [
            {"id": "ep", "components": [{"type": "groovyScript", "id": "c1", "name": "a", "config": {}}], "sequence_flows": []},
            {"id": "ep", "components": [{"type": "groovyScript", "id": "c2", "name": "b", "config": {}}], "sequence_flows": []}
        ]
    }"#;
    match parse_blueprint(doc) {
        Err(SchemaError::DuplicateIdentifier { path, id }) => {
            assert_eq!(path, "endpoints[1].id");
            assert_eq!(id, "ep");
        }
        other => panic!("Expected DuplicateIdentifier, got {other:?}"),
    }
}

#[test]
fn conversion_trait_feeds_the_compiler() {
    struct Authored {
        name: String,
    }
    impl IntoBlueprint for Authored {
        fn into_blueprint(self) -> std::result::Result<Blueprint, SchemaError> {
            let mut bp = simple_blueprint();
            bp.name = self.name;
            Ok(bp)
        }
    }

    let bp = Authored {
        name: "Custom".to_string(),
    }
    .into_blueprint()
    .unwrap();
    assert_eq!(bp.name, "Custom");
    assert!(Compiler::builder(bp).build().compile().is_ok());
}
