//! XML serialization and deserialization for the settings store.
//!
//! ## Document shape
//!
//! A store serializes to a single `<root>` element, one child element
//! per variable in insertion order, without an XML declaration:
//!
//! ```xml
//! <root><zoom type="int32">120</zoom>
//! <expanded type="bool">true</expanded>
//! <recent_sizes type="int32" list="true"><li>8</li><li>16</li></recent_sizes>
//! <view type="store"><columns type="int32">8</columns>
//! </view>
//! </root>
//! ```
//!
//! The `type` attribute names the handler in the store's registry; a
//! `list="true"` attribute wraps each chain node in an `<li>` element.
//! A chain of length 1 is written without the list marker, so scalars
//! and one-element lists are the same thing on disk. Nested stores
//! serialize their variables directly as element content.
//!
//! ## Leniency
//!
//! Deserialization tolerates foreign input: elements with unknown or
//! serialize-only types, colliding names or stray tags are consumed
//! structurally and dropped, leaving every recognized sibling intact.
//! This keeps settings files portable across application versions in
//! both directions. Structurally malformed XML, by contrast, is
//! reported as an error, with everything parsed up to that point
//! already in the store.

pub mod de;
pub mod ser;
mod utils;

pub use de::{from_xml_reader, from_xml_str};
pub use ser::{to_xml_string, to_xml_writer};
