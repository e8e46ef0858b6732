//! Helpers shared by the XML serializer and deserializer.

use std::borrow::Cow;

use quick_xml::escape::partial_escape;
use quick_xml::events::BytesStart;

/// Escapes the XML-reserved characters `&`, `<` and `>` in character
/// data, leaving everything else untouched.
///
/// Quotes stay literal: values are only ever written as element
/// content, never as attribute values.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Returns the value of the named attribute, if present.
///
/// Malformed attributes are skipped rather than reported; the
/// deserializer tolerates foreign input wherever it can.
pub(crate) fn attribute(start: &BytesStart<'_>, name: &str) -> Option<String> {
    for attr in start.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Resolves a general entity reference to its replacement text.
///
/// Handles the predefined XML entities and numeric character
/// references; anything else is unknown and yields `None`.
pub(crate) fn resolve_reference(name: &str) -> Option<String> {
    match name {
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "amp" => Some("&".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code).map(|c| c.to_string())
        }
    }
}
