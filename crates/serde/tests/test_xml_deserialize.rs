//! Parsing behavior, including leniency toward foreign input.

use std::sync::Arc;

use chroma_serde::xml::{from_xml_reader, from_xml_str};
use chroma_store::handler::{Int32Handler, StringHandler};
use chroma_store::{Handler, Registry, Store, Value};

fn parse(xml: &str) -> Store {
    let mut store = Store::new(Registry::with_defaults());
    from_xml_str(&mut store, xml).unwrap();
    store
}

#[test]
fn test_scalars() {
    let store = parse(
        "<root><zoom type=\"int32\">120</zoom>\
         <expanded type=\"bool\">true</expanded>\
         <scale type=\"float\">1.5</scale>\
         <title type=\"string\">untitled</title>\
         <accent type=\"color\">0.25 0.5 0.75 1</accent></root>",
    );
    assert_eq!(store.get_i32("zoom"), Some(120));
    assert_eq!(store.get_bool("expanded"), Some(true));
    assert_eq!(store.get_f32("scale"), Some(1.5));
    assert_eq!(store.get_str("title"), Some("untitled"));
    let accent = store.get_color("accent").unwrap();
    assert_eq!(
        (accent.red, accent.green, accent.blue, accent.alpha),
        (0.25, 0.5, 0.75, 1.0)
    );
}

#[test]
fn test_list() {
    let store = parse(
        "<root><recent_sizes type=\"int32\" list=\"true\">\
         <li>8</li><li>16</li><li>32</li></recent_sizes></root>",
    );
    assert_eq!(store.get_i32_list("recent_sizes"), Some(vec![8, 16, 32]));
    assert!(store.get("recent_sizes").unwrap().is_list());
}

#[test]
fn test_empty_list_leaves_no_entry() {
    let store = parse("<root><recent_sizes type=\"int32\" list=\"true\"></recent_sizes></root>");
    assert!(!store.contains("recent_sizes"));
}

#[test]
fn test_whitespace_between_list_items_is_ignored() {
    let store = parse(
        "<root><sizes type=\"int32\" list=\"true\">\n  <li>8</li>\n  <li>16</li>\n</sizes></root>",
    );
    assert_eq!(store.get_i32_list("sizes"), Some(vec![8, 16]));
}

#[test]
fn test_unknown_type_is_skipped_with_siblings_intact() {
    let store = parse(
        "<root><a type=\"int32\">1</a>\
         <weird type=\"gradient\"><inner type=\"int32\">9</inner></weird>\
         <b type=\"int32\">2</b></root>",
    );
    assert_eq!(store.get_i32("a"), Some(1));
    assert_eq!(store.get_i32("b"), Some(2));
    assert!(!store.contains("weird"));
    assert!(!store.contains("inner"));
}

#[test]
fn test_missing_type_attribute_is_skipped() {
    let store = parse("<root><untyped>9</untyped><b type=\"int32\">2</b></root>");
    assert!(!store.contains("untyped"));
    assert_eq!(store.get_i32("b"), Some(2));
}

#[test]
fn test_duplicate_name_keeps_first_entry() {
    let store = parse("<root><a type=\"int32\">1</a><a type=\"int32\">2</a></root>");
    assert_eq!(store.get_i32("a"), Some(1));
}

#[test]
fn test_unparseable_text_keeps_default() {
    let store = parse("<root><n type=\"int32\">not a number</n></root>");
    assert_eq!(store.get_i32("n"), Some(0));
}

#[test]
fn test_stray_element_inside_list_is_discarded() {
    let store = parse(
        "<root><sizes type=\"int32\" list=\"true\">\
         <li>1</li><junk>9</junk><li>2</li></sizes></root>",
    );
    assert_eq!(store.get_i32_list("sizes"), Some(vec![1, 2]));
}

#[test]
fn test_nested_stores() {
    let store = parse(
        "<root><view type=\"store\">\
         <columns type=\"int32\">8</columns>\
         <inner type=\"store\"><deep type=\"bool\">true</deep></inner>\
         </view></root>",
    );
    let view = store.get_store("view").unwrap();
    assert_eq!(view.get_i32("columns"), Some(8));
    assert_eq!(view.get_store("inner").unwrap().get_bool("deep"), Some(true));
}

#[test]
fn test_list_of_nested_stores() {
    let store = parse(
        "<root><palettes type=\"store\" list=\"true\">\
         <li><name type=\"string\">warm</name></li>\
         <li><name type=\"string\">cold</name></li>\
         </palettes></root>",
    );
    let variable = store.get("palettes").unwrap();
    assert_eq!(variable.len(), 2);
    let names: Vec<&str> = variable
        .values()
        .iter()
        .map(|value| match value {
            Value::Store(child) => child.get_str("name").unwrap(),
            _ => panic!("expected a nested store"),
        })
        .collect();
    assert_eq!(names, ["warm", "cold"]);
}

#[test]
fn test_entity_references_in_text() {
    let store = parse("<root><expr type=\"string\">a &amp; b &lt; c &#65;</expr></root>");
    assert_eq!(store.get_str("expr"), Some("a & b < c A"));
}

#[test]
fn test_cdata_is_taken_verbatim() {
    let store = parse("<root><raw type=\"string\"><![CDATA[<not><parsed>]]></raw></root>");
    assert_eq!(store.get_str("raw"), Some("<not><parsed>"));
}

#[test]
fn test_content_outside_root_is_ignored() {
    let store = parse("<other><a type=\"int32\">1</a></other>");
    assert!(store.is_empty());
}

#[test]
fn test_existing_entries_keep_priority() {
    let mut store = Store::new(Registry::with_defaults());
    store.set_i32("zoom", 100).unwrap();
    from_xml_str(&mut store, "<root><zoom type=\"int32\">120</zoom></root>").unwrap();
    assert_eq!(store.get_i32("zoom"), Some(100));
}

#[test]
fn test_truncated_input_is_an_error() {
    let mut store = Store::new(Registry::with_defaults());
    let result = from_xml_str(
        &mut store,
        "<root><a type=\"int32\">1</a><b type=\"bool\">",
    );
    assert!(result.is_err());
    // entries completed before the error survive
    assert_eq!(store.get_i32("a"), Some(1));
}

#[test]
fn test_content_after_root_is_an_error() {
    let mut store = Store::new(Registry::with_defaults());
    let result = from_xml_str(
        &mut store,
        "<root><a type=\"int32\">1</a></root><extra type=\"int32\">7</extra>",
    );
    assert!(result.is_err());
    // the document element's entries survive, the trailing junk does not
    assert_eq!(store.get_i32("a"), Some(1));
    assert!(!store.contains("extra"));
}

#[test]
fn test_mismatched_tags_are_an_error() {
    let mut store = Store::new(Registry::with_defaults());
    let result = from_xml_str(&mut store, "<root><a type=\"int32\">1</b></root>");
    assert!(result.is_err());
}

#[test]
fn test_reading_from_a_buffered_reader() {
    let mut store = Store::new(Registry::with_defaults());
    let xml: &[u8] = b"<root><zoom type=\"int32\">120</zoom></root>";
    from_xml_reader(&mut store, xml).unwrap();
    assert_eq!(store.get_i32("zoom"), Some(120));
}

/// Serialize-only type: writes fine, never reads back.
struct SnapshotHandler;

impl Handler for SnapshotHandler {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::Int(0)
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value.as_i32().map(|value| value.to_string())
    }

    fn deserialize(&self, _text: &str) -> Option<Value> {
        None
    }

    fn deserializable(&self) -> bool {
        false
    }
}

#[test]
fn test_serialize_only_type_is_skipped_on_input() {
    let registry = Registry::builder()
        .register(Int32Handler)
        .register(StringHandler)
        .register(SnapshotHandler)
        .build();
    let mut store = Store::new(registry);
    from_xml_str(
        &mut store,
        "<root><snap type=\"snapshot\">5</snap><b type=\"int32\">2</b></root>",
    )
    .unwrap();
    assert!(!store.contains("snap"));
    assert_eq!(store.get_i32("b"), Some(2));
}
