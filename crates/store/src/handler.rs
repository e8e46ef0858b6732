//! Type handlers: the pluggable behavior behind every stored value.

use std::sync::Arc;

use crate::registry::{Registry, STORE_TYPE};
use crate::store::Store;
use crate::value::{Color, Value};

/// Type-specific behavior for one kind of stored value.
///
/// A handler is identified by a unique type name, which is also what
/// the serialized form writes into the `type` attribute. Handlers are
/// registered once per [`Registry`] and never mutated afterwards.
/// Payload destruction and duplication fall out of `Drop` and `Clone`
/// on [`Value`]; the remaining capabilities live here.
pub trait Handler: Send + Sync {
    /// Unique type name.
    fn name(&self) -> &'static str;

    /// Default payload for a freshly created variable.
    fn construct(&self, registry: &Arc<Registry>) -> Value;

    /// Text encoding of a payload.
    ///
    /// `None` marks the payload as unserializable (a transient type, or
    /// a payload variant this handler does not own); the whole chain is
    /// then excluded from the serialized form. Nested stores never take
    /// this path, the serializer recurses into them instead.
    fn serialize(&self, value: &Value) -> Option<String>;

    /// Decodes a payload from its text encoding.
    ///
    /// `None` when the text does not parse; the caller keeps the
    /// default-constructed payload in that case.
    fn deserialize(&self, text: &str) -> Option<Value>;

    /// Whether [`deserialize`](Handler::deserialize) can ever succeed.
    ///
    /// Serialize-only handlers return `false`; elements of their type
    /// found in serialized input are skipped entirely.
    fn deserializable(&self) -> bool {
        true
    }
}

/// Handler for `bool` payloads, encoded as `true`/`false`.
pub struct BoolHandler;

impl Handler for BoolHandler {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::Bool(false)
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value
            .as_bool()
            .map(|value| if value { "true" } else { "false" }.to_string())
    }

    fn deserialize(&self, text: &str) -> Option<Value> {
        match text.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        }
    }
}

/// Handler for 32-bit signed integer payloads.
pub struct Int32Handler;

impl Handler for Int32Handler {
    fn name(&self) -> &'static str {
        "int32"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::Int(0)
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value.as_i32().map(|value| value.to_string())
    }

    fn deserialize(&self, text: &str) -> Option<Value> {
        text.trim().parse().ok().map(Value::Int)
    }
}

/// Handler for `f32` payloads.
///
/// The encoding is Rust's shortest round-trip float formatting, so
/// every finite value survives a save/load cycle exactly.
pub struct FloatHandler;

impl Handler for FloatHandler {
    fn name(&self) -> &'static str {
        "float"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::Float(0.0)
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value.as_f32().map(|value| value.to_string())
    }

    fn deserialize(&self, text: &str) -> Option<Value> {
        text.trim().parse().ok().map(Value::Float)
    }
}

/// Handler for string payloads, stored verbatim.
///
/// Whitespace is significant: the text is taken exactly as written,
/// with no trimming on either side.
pub struct StringHandler;

impl Handler for StringHandler {
    fn name(&self) -> &'static str {
        "string"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::String(String::new())
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value.as_str().map(str::to_string)
    }

    fn deserialize(&self, text: &str) -> Option<Value> {
        Some(Value::String(text.to_string()))
    }
}

/// Handler for [`Color`] payloads, encoded as four space-separated
/// float components.
pub struct ColorHandler;

impl Handler for ColorHandler {
    fn name(&self) -> &'static str {
        "color"
    }

    fn construct(&self, _registry: &Arc<Registry>) -> Value {
        Value::Color(Color::default())
    }

    fn serialize(&self, value: &Value) -> Option<String> {
        value
            .as_color()
            .map(|c| format!("{} {} {} {}", c.red, c.green, c.blue, c.alpha))
    }

    fn deserialize(&self, text: &str) -> Option<Value> {
        let mut parts = text.split_whitespace();
        let red = parts.next()?.parse().ok()?;
        let green = parts.next()?.parse().ok()?;
        let blue = parts.next()?.parse().ok()?;
        let alpha = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Value::Color(Color::new(red, green, blue, alpha)))
    }
}

/// Handler for nested stores, registered under [`STORE_TYPE`].
///
/// Nested stores have no text encoding; the serializer recurses into
/// them and the deserializer populates them element by element, so
/// both text paths report "not capable" here.
pub struct StoreHandler;

impl Handler for StoreHandler {
    fn name(&self) -> &'static str {
        STORE_TYPE
    }

    fn construct(&self, registry: &Arc<Registry>) -> Value {
        Value::Store(Store::new(registry.clone()))
    }

    fn serialize(&self, _value: &Value) -> Option<String> {
        None
    }

    fn deserialize(&self, _text: &str) -> Option<Value> {
        None
    }

    fn deserializable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<Registry> {
        Registry::with_defaults()
    }

    #[test]
    fn test_bool_encoding() {
        let registry = registry();
        let handler = BoolHandler;
        assert_eq!(handler.construct(&registry), Value::Bool(false));
        assert_eq!(handler.serialize(&Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(handler.deserialize("true"), Some(Value::Bool(true)));
        assert_eq!(handler.deserialize(" false "), Some(Value::Bool(false)));
        assert_eq!(handler.deserialize("yes"), None);
    }

    #[test]
    fn test_int32_encoding() {
        let handler = Int32Handler;
        assert_eq!(handler.serialize(&Value::Int(-42)).as_deref(), Some("-42"));
        assert_eq!(handler.deserialize("-42"), Some(Value::Int(-42)));
        assert_eq!(handler.deserialize("12.5"), None);
    }

    #[test]
    fn test_float_round_trip() {
        let handler = FloatHandler;
        for value in [0.0f32, 0.1, -1.5, 1e-7, 12345.678] {
            let text = handler.serialize(&Value::Float(value)).unwrap();
            assert_eq!(handler.deserialize(&text), Some(Value::Float(value)));
        }
    }

    #[test]
    fn test_string_keeps_whitespace() {
        let handler = StringHandler;
        assert_eq!(
            handler.deserialize("  padded  "),
            Some(Value::String("  padded  ".to_string()))
        );
    }

    #[test]
    fn test_color_encoding() {
        let handler = ColorHandler;
        let color = Color::new(0.25, 0.5, 0.75, 1.0);
        let text = handler.serialize(&Value::Color(color)).unwrap();
        assert_eq!(text, "0.25 0.5 0.75 1");
        assert_eq!(handler.deserialize(&text), Some(Value::Color(color)));
        assert_eq!(handler.deserialize("0.25 0.5"), None);
        assert_eq!(handler.deserialize("0.25 0.5 0.75 1 9"), None);
    }

    #[test]
    fn test_store_handler_has_no_text_form() {
        let registry = registry();
        let handler = StoreHandler;
        assert!(!handler.deserializable());
        assert_eq!(handler.deserialize("anything"), None);
        assert!(matches!(handler.construct(&registry), Value::Store(_)));
    }
}
