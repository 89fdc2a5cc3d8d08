//! Persistence round-trip and schema back-compat tests for the task file.

use pretty_assertions::assert_eq;
use sprig::io::forest_io::{ForestIoError, load_forest, save_forest};
use sprig::model::task::{Priority, TaskNode};
use sprig::ops::store::TaskStore;
use std::fs;
use tempfile::TempDir;

fn node(text: &str, priority: Priority, due: &str, created: &str) -> TaskNode {
    let mut n = TaskNode::new(text.into(), priority, due.into());
    n.create_date = created.into();
    n
}

fn sample_forest() -> Vec<TaskNode> {
    let mut groceries = node("groceries", Priority::Medium, "", "2026-01-01 09:00:00");
    groceries.children = vec![
        node("milk", Priority::Low, "", "2026-01-01 09:05:00"),
        node("eggs", Priority::High, "2026-01-10", "2026-01-01 09:06:00"),
    ];
    groceries.children[0].completed = true;
    vec![
        groceries,
        node("taxes", Priority::Critical, "2026-04-15", "2026-01-02 09:00:00"),
    ]
}

#[test]
fn save_load_round_trip_field_for_field() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");
    let forest = sample_forest();

    save_forest(&path, &forest).unwrap();
    let loaded = load_forest(&path).unwrap();
    assert_eq!(loaded, forest);
}

#[test]
fn persisted_document_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");
    save_forest(&path, &sample_forest()).unwrap();

    // Every field written explicitly, children nested, no id field
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let root = &raw[0];
    assert_eq!(root["text"], "groceries");
    assert_eq!(root["completed"], false);
    assert_eq!(root["priority"], "Medium");
    assert_eq!(root["due_date"], "");
    assert_eq!(root["create_date"], "2026-01-01 09:00:00");
    assert!(root["id"].is_null());
    let child = &root["children"][0];
    assert_eq!(child["text"], "milk");
    assert_eq!(child["completed"], true);
    assert!(child["children"].as_array().unwrap().is_empty());
}

#[test]
fn legacy_document_normalizes_at_every_depth() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");
    // A pre-priority, pre-due-date document: bare text nodes, one of them
    // with nested children that also miss everything
    fs::write(
        &path,
        r#"[
          { "text": "ancient", "completed": true },
          {
            "text": "old parent",
            "children": [
              { "text": "old child", "children": [ { "text": "old grandchild" } ] }
            ]
          }
        ]"#,
    )
    .unwrap();

    let loaded = load_forest(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded[0].completed);
    assert_eq!(loaded[0].priority, Priority::Medium);
    assert_eq!(loaded[0].due_date, "");
    assert!(loaded[0].children.is_empty());

    let grandchild = &loaded[1].children[0].children[0];
    assert!(!grandchild.completed);
    assert_eq!(grandchild.priority, Priority::Medium);
    assert_eq!(grandchild.due_date, "");
    assert!(grandchild.children.is_empty());
    assert_eq!(grandchild.create_date.len(), 19);
}

#[test]
fn corrupt_document_leaves_store_state_alone() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");

    let mut store = TaskStore::new();
    store.load_forest(sample_forest());

    fs::write(&path, "[ {").unwrap();
    let err = load_forest(&path).unwrap_err();
    assert!(matches!(err, ForestIoError::Corrupt { .. }));

    // The failed load never reached the store
    assert_eq!(store.stats().total, 4);
}

#[test]
fn first_run_bootstrap_writes_empty_document() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");

    assert!(load_forest(&path).unwrap().is_empty());
    assert!(path.exists());
    // A second load now reads the bootstrapped document
    assert!(load_forest(&path).unwrap().is_empty());
}

#[test]
fn store_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("todos.json");

    let mut store = TaskStore::new();
    let root = store.add_root("write report", Priority::High, "2026-02-01").unwrap();
    store.add_child(root, "outline", Priority::Medium, "").unwrap();
    store.set_completed(root, true);

    save_forest(&path, store.roots()).unwrap();

    let mut reloaded = TaskStore::new();
    reloaded.load_forest(load_forest(&path).unwrap());
    assert_eq!(reloaded.roots(), store.roots());
    assert_eq!(reloaded.stats().total, 2);
    assert_eq!(reloaded.stats().completed, 2);
}
