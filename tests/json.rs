//! Tests for the JSON authoring format.
mod common;
use common::*;
use nagare::flowchart::{load_json, parse_json};
use nagare::prelude::*;
use std::fs;

const AGE_CHECK_JSON: &str = r#"{
    "nodes": [
        { "id": 1, "name": "start", "type": "start", "function": "greet",
          "augument": { "name": "Ada" }, "description": "Say hello" },
        { "id": 2, "name": "decision", "type": "decision", "function": "check_age" },
        { "id": 3, "name": "adult", "type": "process", "function": "adult_message" },
        { "id": 4, "name": "child", "type": "process", "function": "child_message" }
    ],
    "edges": [
        { "source": "start", "target": 2 },
        { "source": "decision", "target": 3, "condition": true },
        { "source": "decision", "target": "child", "condition": false }
    ],
    "variables": { "age": 20 }
}"#;

fn schema_message(result: std::result::Result<Flowchart, LoadError>) -> String {
    match result {
        Err(LoadError::MalformedSchema(message)) => message,
        other => panic!("Expected a schema error, got {:?}", other.map(|f| f.nodes.len())),
    }
}

#[test]
fn test_numeric_targets_resolve_to_node_names() {
    let flowchart = parse_json(AGE_CHECK_JSON).unwrap();

    let targets: Vec<_> = flowchart.edges.iter().map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["decision", "adult", "child"]);
    assert_eq!(flowchart.edges[1].condition, Some(true));
}

#[test]
fn test_legacy_argument_key_and_variables() {
    let flowchart = parse_json(AGE_CHECK_JSON).unwrap();

    let start = &flowchart.nodes[0];
    assert_eq!(
        start.argument.as_ref().and_then(|args| args.get("name")),
        Some(&Value::from("Ada"))
    );
    assert_eq!(start.description, "Say hello");
    assert_eq!(flowchart.nodes[1].argument, None);
    assert_eq!(flowchart.variables.get("age"), Some(&Value::Integer(20)));
}

#[test]
fn test_parsed_flowchart_runs_the_full_path() {
    let mut engine = loaded_engine(parse_json(AGE_CHECK_JSON).unwrap(), age_registry());

    engine.execute(None, None).unwrap();

    assert_eq!(engine.trace().node_names(), vec!["start", "decision", "adult"]);
}

#[test]
fn test_unknown_numeric_target_is_rejected() {
    let json = r#"{
        "nodes": [{ "id": 1, "name": "start" }],
        "edges": [{ "source": "start", "target": 9 }]
    }"#;

    let message = schema_message(parse_json(json));
    assert!(message.contains("targets id 9, which no node has"), "{}", message);
}

#[test]
fn test_shared_numeric_target_is_rejected() {
    let json = r#"{
        "nodes": [{ "name": "a" }, { "name": "b" }],
        "edges": [{ "source": "a", "target": 0 }]
    }"#;

    let message = schema_message(parse_json(json));
    assert!(message.contains("which several nodes share"), "{}", message);
}

#[test]
fn test_missing_fields_are_schema_errors() {
    let nameless = r#"{ "nodes": [{ "id": 7 }] }"#;
    assert!(schema_message(parse_json(nameless)).contains("node 7 has no name"));

    let targetless = r#"{ "nodes": [{ "name": "a" }], "edges": [{ "source": "a" }] }"#;
    assert!(schema_message(parse_json(targetless)).contains("has no target"));

    let bad_variables = r#"{ "nodes": [], "variables": [1, 2] }"#;
    assert!(schema_message(parse_json(bad_variables)).contains("variables must be an object"));

    let bad_argument = r#"{ "nodes": [{ "name": "a", "argument": 3 }] }"#;
    assert!(schema_message(parse_json(bad_argument)).contains("must be an object"));

    schema_message(parse_json("{ not json"));
}

#[test]
fn test_defaults_for_optional_fields() {
    let flowchart = parse_json(r#"{ "nodes": [{ "name": "a", "function": "" }] }"#).unwrap();

    let node = &flowchart.nodes[0];
    assert_eq!(node.node_type, "process");
    assert_eq!(node.function, None);
    assert!(flowchart.edges.is_empty());
    assert!(flowchart.variables.is_empty());
}

#[test]
fn test_load_json_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_json(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, LoadError::FileNotFound(_)));

    let empty = dir.path().join("empty.json");
    fs::write(&empty, "  \n").unwrap();
    assert!(matches!(load_json(&empty).unwrap_err(), LoadError::EmptyInput(_)));

    let good = dir.path().join("age.json");
    fs::write(&good, AGE_CHECK_JSON).unwrap();
    assert_eq!(load_json(&good).unwrap().nodes.len(), 4);
}
