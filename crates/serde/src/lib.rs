//! Persistence for the chroma settings store.
//!
//! This crate turns a [`chroma_store::Store`] into text and back:
//!
//! - **XML**: the persistence format. A single `<root>` document, one
//!   element per variable, streamed in both directions through
//!   `quick-xml` so memory use stays bounded by nesting depth and the
//!   largest single value, not the document size.
//! - **JSON**: a one-way diagnostic export for debugging and external
//!   tooling. Settings are never read back from JSON.
//!
//! Deserialization is deliberately lenient: entries with unknown
//! types, serialize-only types or colliding names are skipped without
//! failing the load, so settings written by other versions of the
//! application still come up with everything this build recognizes.
//! Only structurally malformed XML is reported as an error.
//!
//! ```
//! use chroma_store::{Registry, Store};
//! use chroma_serde::xml;
//!
//! let mut store = Store::new(Registry::with_defaults());
//! store.set_string("name", "untitled palette")?;
//! let text = xml::to_xml_string(&store)?;
//!
//! let mut restored = Store::new(Registry::with_defaults());
//! xml::from_xml_str(&mut restored, &text)?;
//! assert_eq!(restored.get_str("name"), Some("untitled palette"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod json;
pub mod xml;

pub use error::{Result, SerdeError};

pub use json::{to_json_string, to_json_string_pretty, to_json_value};
pub use xml::{from_xml_reader, from_xml_str, to_xml_string, to_xml_writer};
