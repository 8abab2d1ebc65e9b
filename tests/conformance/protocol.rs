//! Raw action protocol: pre-validation, error taxonomy, descriptor cache.

use std::sync::Arc;

use serde_json::json;
use suppledb::{DocRequest, Error, MemoryEngine, Output, Supple};

fn schema() -> serde_json::Value {
    json!({
        "title": "Ticket",
        "properties": {
            "subject": { "type": "string" },
            "open": { "type": "boolean" }
        },
        "required": ["subject"]
    })
}

fn request(body: serde_json::Value) -> DocRequest {
    serde_json::from_value(body).unwrap()
}

#[test]
fn key_actions_without_key_fail_before_touching_storage() {
    let engine = Arc::new(MemoryEngine::new());
    let db = Supple::with_engine(engine.clone());

    for action in ["getDoc", "deleteDoc", "existsDoc"] {
        let err = db
            .execute(request(json!({
                "namespace": "tickets",
                "action": action,
                "schema": schema()
            })))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }), "{action}");
    }

    // No partition was created and no storage operation ran
    assert_eq!(engine.partition_count(), 0);
    assert_eq!(engine.total_ops(), 0);
}

#[test]
fn data_actions_without_data_fail_before_touching_storage() {
    let engine = Arc::new(MemoryEngine::new());
    let db = Supple::with_engine(engine.clone());

    for action in ["putDoc", "mergeDoc", "findDocs"] {
        let err = db
            .execute(request(json!({
                "namespace": "tickets",
                "action": action,
                "schema": schema()
            })))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }), "{action}");
    }

    assert_eq!(engine.partition_count(), 0);
    assert_eq!(engine.total_ops(), 0);
}

#[test]
fn schema_errors_surface_before_touching_storage() {
    let engine = Arc::new(MemoryEngine::new());
    let db = Supple::with_engine(engine.clone());

    let err = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "putDoc",
            "schema": { "type": "string" },
            "data": { "subject": "hello" }
        })))
        .unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
    assert_eq!(engine.partition_count(), 0);
}

#[test]
fn payload_violations_are_invalid_request() {
    let db = Supple::ephemeral();

    // Missing required field
    let err = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "putDoc",
            "schema": schema(),
            "data": { "open": true }
        })))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));

    // Wrong field type
    let err = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "putDoc",
            "schema": schema(),
            "data": { "subject": 42 }
        })))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));

    // Undeclared field
    let err = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "putDoc",
            "schema": schema(),
            "data": { "subject": "x", "priority": "high" }
        })))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[test]
fn unknown_action_string_never_parses() {
    let result = serde_json::from_value::<DocRequest>(json!({
        "namespace": "tickets",
        "action": "purgeDocs",
        "schema": {}
    }));
    assert!(result.is_err());
}

#[test]
fn unknown_request_field_never_parses() {
    let result = serde_json::from_value::<DocRequest>(json!({
        "namespace": "tickets",
        "action": "countDocs",
        "schema": {},
        "mode": "fast"
    }));
    assert!(result.is_err());
}

#[test]
fn descriptor_cache_is_keyed_by_structural_shape() {
    let db = Supple::ephemeral();

    // Same shape, different property order: one cache entry
    let a = json!({
        "title": "T",
        "properties": { "x": { "type": "integer" }, "y": { "type": "string" } }
    });
    let b = json!({
        "title": "T",
        "properties": { "y": { "type": "string" }, "x": { "type": "integer" } }
    });

    db.put_doc("t", &a, json!({ "x": 1, "y": "a" }), None).unwrap();
    db.put_doc("t", &b, json!({ "x": 2, "y": "b" }), None).unwrap();
    assert_eq!(db.executor().compiler().cached_shapes(), 1);

    // A structurally different schema adds a second entry
    let c = json!({
        "title": "T",
        "properties": { "x": { "type": "string" } }
    });
    let err = db.put_doc("t", &c, json!({ "x": 3 }), None).unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));
    assert_eq!(db.executor().compiler().cached_shapes(), 2);
}

#[test]
fn error_taxonomy_round_trips_as_json() {
    let errors = [
        Error::schema("bad schema"),
        Error::invalid_request("bad request"),
        Error::not_found("tickets", "k1"),
        Error::storage("backend offline"),
    ];
    for err in errors {
        let json = serde_json::to_value(&err).unwrap();
        let back: Error = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}

#[test]
fn output_variants_match_actions() {
    let db = Supple::ephemeral();
    db.put_doc("tickets", &schema(), json!({ "subject": "s" }), Some("k"))
        .unwrap();

    let out = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "countDocs",
            "schema": schema()
        })))
        .unwrap();
    assert!(matches!(out, Output::Count(1)));

    let out = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "existsDoc",
            "key": "k",
            "schema": schema()
        })))
        .unwrap();
    assert!(matches!(out, Output::Bool(true)));

    let out = db
        .execute(request(json!({
            "namespace": "tickets",
            "action": "scanDocs",
            "schema": schema()
        })))
        .unwrap();
    match out {
        Output::Records(records) => assert_eq!(records.len(), 1),
        other => panic!("unexpected output: {other:?}"),
    }
}
