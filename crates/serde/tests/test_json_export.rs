//! Shape of the one-way JSON export.

use chroma_serde::json::{to_json_string_pretty, to_json_value};
use chroma_store::{Color, Registry, Store};
use serde_json::json;

#[test]
fn test_scalars() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32("zoom", 120).unwrap();
    store.set_bool("expanded", true).unwrap();
    store.set_string("title", "untitled").unwrap();
    assert_eq!(
        to_json_value(&store),
        json!({
            "zoom": 120,
            "expanded": true,
            "title": "untitled",
        })
    );
}

#[test]
fn test_color_becomes_component_array() {
    let mut store = Store::new(Registry::with_defaults());
    store
        .set_color("accent", Color::new(0.25, 0.5, 0.75, 1.0))
        .unwrap();
    assert_eq!(
        to_json_value(&store),
        json!({ "accent": [0.25, 0.5, 0.75, 1.0] })
    );
}

#[test]
fn test_list_becomes_array() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32_list("sizes", [8, 16, 32]).unwrap();
    assert_eq!(to_json_value(&store), json!({ "sizes": [8, 16, 32] }));
}

#[test]
fn test_single_element_list_stays_scalar() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32_list("sizes", [8]).unwrap();
    assert_eq!(to_json_value(&store), json!({ "sizes": 8 }));
}

#[test]
fn test_nested_store_becomes_object() {
    let mut store = Store::new(Registry::with_defaults());
    let view = store.get_or_create_store("view").unwrap();
    view.set_i32("columns", 8).unwrap();
    assert_eq!(to_json_value(&store), json!({ "view": { "columns": 8 } }));
}

#[test]
fn test_no_save_entries_are_excluded() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32("kept", 1).unwrap();
    store.set_i32("transient", 2).unwrap();
    store.set_no_save("transient", true);
    assert_eq!(to_json_value(&store), json!({ "kept": 1 }));
}

#[test]
fn test_pretty_output_parses_back() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32("zoom", 120).unwrap();
    let text = to_json_string_pretty(&store).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({ "zoom": 120 }));
}
