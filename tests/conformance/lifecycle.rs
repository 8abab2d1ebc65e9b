//! Document lifecycle: put, get, merge, delete.

use serde_json::json;
use suppledb::{Supple, Value};

fn schema() -> serde_json::Value {
    json!({
        "title": "Profile",
        "properties": {
            "name": { "type": "string" },
            "bio": { "type": "string" },
            "settings": {
                "type": "object",
                "properties": {
                    "theme": { "type": "string" },
                    "compact": { "type": "boolean" }
                }
            }
        },
        "required": []
    })
}

#[test]
fn put_assigns_key_and_get_returns_stored_values() {
    let db = Supple::ephemeral();
    let status = db
        .put_doc("profiles", &schema(), json!({ "name": "Ada" }), None)
        .unwrap();
    assert_eq!(status.code, 201);
    let key = status.key.expect("put returns the assigned key");
    assert_eq!(key.len(), 36); // canonical UUID form

    let record = db.get_doc("profiles", &schema(), &key).unwrap().unwrap();
    assert_eq!(record.key, key);
    assert_eq!(record.values.get("name"), Some(&Value::String("Ada".into())));
}

#[test]
fn get_of_absent_key_is_none_not_an_error() {
    let db = Supple::ephemeral();
    assert!(db.get_doc("profiles", &schema(), "nope").unwrap().is_none());
}

#[test]
fn put_on_existing_key_merges_rather_than_overwrites() {
    let db = Supple::ephemeral();
    db.put_doc(
        "profiles",
        &schema(),
        json!({ "name": "Ada", "bio": "mathematician" }),
        Some("ada"),
    )
    .unwrap();

    // Second put on the same key carries only one field; the other
    // survives, and the code is still 201
    let status = db
        .put_doc("profiles", &schema(), json!({ "bio": "engineer" }), Some("ada"))
        .unwrap();
    assert_eq!(status.code, 201);

    let record = db.get_doc("profiles", &schema(), "ada").unwrap().unwrap();
    assert_eq!(record.values.get("name"), Some(&Value::String("Ada".into())));
    assert_eq!(
        record.values.get("bio"),
        Some(&Value::String("engineer".into()))
    );
}

#[test]
fn merge_recurses_into_nested_objects() {
    let db = Supple::ephemeral();
    db.put_doc(
        "profiles",
        &schema(),
        json!({ "name": "Ada", "settings": { "theme": "dark", "compact": true } }),
        Some("ada"),
    )
    .unwrap();

    let status = db
        .merge_doc(
            "profiles",
            &schema(),
            "ada",
            json!({ "settings": { "theme": "light" } }),
        )
        .unwrap();
    assert_eq!(status.code, 200);

    let record = db.get_doc("profiles", &schema(), "ada").unwrap().unwrap();
    let settings = match record.values.get("settings") {
        Some(Value::Object(map)) => map,
        other => panic!("settings should be an object, got {other:?}"),
    };
    assert_eq!(settings.get("theme"), Some(&Value::String("light".into())));
    assert_eq!(settings.get("compact"), Some(&Value::Bool(true)));
}

#[test]
fn merge_against_absent_key_is_not_found() {
    let db = Supple::ephemeral();
    let err = db
        .merge_doc("profiles", &schema(), "ghost", json!({ "name": "x" }))
        .unwrap_err();
    assert!(matches!(err, suppledb::Error::NotFound { .. }));
}

#[test]
fn delete_is_idempotent() {
    let db = Supple::ephemeral();
    db.put_doc("profiles", &schema(), json!({ "name": "Ada" }), Some("ada"))
        .unwrap();

    assert_eq!(db.delete_doc("profiles", &schema(), "ada").unwrap().code, 204);
    assert!(!db.exists_doc("profiles", &schema(), "ada").unwrap());
    // Second delete of the same key succeeds with the same code
    assert_eq!(db.delete_doc("profiles", &schema(), "ada").unwrap().code, 204);
}

#[test]
fn count_and_exists_track_mutations() {
    let db = Supple::ephemeral();
    assert_eq!(db.count_docs("profiles", &schema()).unwrap(), 0);

    for key in ["a", "b", "c"] {
        db.put_doc("profiles", &schema(), json!({ "name": key }), Some(key))
            .unwrap();
    }
    assert_eq!(db.count_docs("profiles", &schema()).unwrap(), 3);
    assert!(db.exists_doc("profiles", &schema(), "b").unwrap());

    db.delete_doc("profiles", &schema(), "b").unwrap();
    assert_eq!(db.count_docs("profiles", &schema()).unwrap(), 2);
    assert!(!db.exists_doc("profiles", &schema(), "b").unwrap());
}

#[test]
fn namespaces_are_isolated() {
    let db = Supple::ephemeral();
    db.put_doc("alpha", &schema(), json!({ "name": "a" }), Some("shared"))
        .unwrap();
    db.put_doc("beta", &schema(), json!({ "name": "b" }), Some("shared"))
        .unwrap();

    let alpha = db.get_doc("alpha", &schema(), "shared").unwrap().unwrap();
    let beta = db.get_doc("beta", &schema(), "shared").unwrap().unwrap();
    assert_eq!(alpha.values.get("name"), Some(&Value::String("a".into())));
    assert_eq!(beta.values.get("name"), Some(&Value::String("b".into())));

    db.delete_doc("alpha", &schema(), "shared").unwrap();
    assert!(db.exists_doc("beta", &schema(), "shared").unwrap());
    assert_eq!(db.count_docs("alpha", &schema()).unwrap(), 0);
    assert_eq!(db.count_docs("beta", &schema()).unwrap(), 1);
}
