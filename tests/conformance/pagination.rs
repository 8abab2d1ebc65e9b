//! Scan and find: ordering, pagination, and filtering.

use serde_json::json;
use suppledb::{Supple, Value};

fn schema() -> serde_json::Value {
    json!({
        "title": "Item",
        "properties": {
            "seq": { "type": "integer" },
            "parity": { "type": "string" }
        },
        "required": ["seq"]
    })
}

/// Zero-padded keys so lexicographic key order matches numeric order.
fn seed(db: &Supple, n: i64) {
    for i in 0..n {
        let parity = if i % 2 == 0 { "even" } else { "odd" };
        db.put_doc(
            "items",
            &schema(),
            json!({ "seq": i, "parity": parity }),
            Some(&format!("{i:06}")),
        )
        .unwrap();
    }
}

#[test]
fn scan_returns_key_order() {
    let db = Supple::ephemeral();
    seed(&db, 20);
    let records = db.scan_docs("items", &schema(), None, None).unwrap();
    assert_eq!(records.len(), 20);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.key, format!("{i:06}"));
    }
}

#[test]
fn scan_default_limit_is_one_thousand() {
    let db = Supple::ephemeral();
    seed(&db, 1200);
    let records = db.scan_docs("items", &schema(), None, None).unwrap();
    assert_eq!(records.len(), 1000);
    assert_eq!(records[0].key, "000000");
}

#[test]
fn paged_scans_concatenate_to_the_full_result() {
    let db = Supple::ephemeral();
    seed(&db, 2500);

    let mut paged = Vec::new();
    for offset in [0u64, 1000, 2000] {
        let page = db
            .scan_docs("items", &schema(), Some(1000), Some(offset))
            .unwrap();
        if offset == 2000 {
            assert_eq!(page.len(), 500); // last partial page
        } else {
            assert_eq!(page.len(), 1000);
        }
        paged.extend(page);
    }

    let whole = db
        .scan_docs("items", &schema(), Some(3000), Some(0))
        .unwrap();
    assert_eq!(paged, whole);
}

#[test]
fn scan_offset_beyond_end_is_empty() {
    let db = Supple::ephemeral();
    seed(&db, 10);
    let records = db
        .scan_docs("items", &schema(), Some(5), Some(100))
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn find_filters_before_pagination() {
    let db = Supple::ephemeral();
    seed(&db, 20);

    // Offset counts matching records, not scanned ones: skipping 2
    // evens lands on the 3rd and 4th even (seq 4 and 6)
    let page = db
        .find_docs(
            "items",
            &schema(),
            json!({ "parity": "even" }),
            Some(2),
            Some(2),
        )
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].values.get("seq"), Some(&Value::Int(4)));
    assert_eq!(page[1].values.get("seq"), Some(&Value::Int(6)));
}

#[test]
fn find_matches_all_filter_fields_conjunctively() {
    let db = Supple::ephemeral();
    seed(&db, 10);

    let records = db
        .find_docs(
            "items",
            &schema(),
            json!({ "parity": "even", "seq": 4 }),
            None,
            None,
        )
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "000004");

    let none = db
        .find_docs(
            "items",
            &schema(),
            json!({ "parity": "odd", "seq": 4 }),
            None,
            None,
        )
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn find_with_empty_filter_behaves_like_scan() {
    let db = Supple::ephemeral();
    seed(&db, 15);
    let found = db
        .find_docs("items", &schema(), json!({}), Some(10), Some(5))
        .unwrap();
    let scanned = db.scan_docs("items", &schema(), Some(10), Some(5)).unwrap();
    assert_eq!(found, scanned);
}
