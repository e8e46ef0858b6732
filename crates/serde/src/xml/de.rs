//! Streaming XML deserialization of a store.
//!
//! The parser is a flat event loop over quick-xml driving an explicit
//! frame stack, one frame per open element. Anything it cannot place
//! in the store (unknown types, serialize-only types, colliding names,
//! stray elements) becomes a [`Frame::Discard`] whose whole subtree is
//! consumed structurally but never touches the store, so settings
//! written by other versions of the application still load.

use std::io::BufRead;
use std::sync::Arc;

use chroma_store::{Handler, Registry, Store, Value};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{Result, SerdeError};
use crate::xml::utils;

/// Deserializes XML text into `store`.
///
/// The store must already carry the registry the document's type names
/// resolve against; it may also already contain entries, which keep
/// priority over same-named entries in the input.
pub fn from_xml_str(store: &mut Store, xml: &str) -> Result<()> {
    from_xml_reader(store, xml.as_bytes())
}

/// Deserializes XML from a buffered reader into `store`.
///
/// Input is consumed incrementally, so memory use is bounded by the
/// nesting depth and the largest single value rather than the document
/// size. On a structural error, entries recognized before the error
/// remain in the store.
pub fn from_xml_reader<R: BufRead>(store: &mut Store, reader: R) -> Result<()> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().check_end_names = true;

    let mut parser = Parser::new(store);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open_element(&e)?,
            Event::Empty(e) => {
                parser.open_element(&e)?;
                parser.close_element();
            }
            Event::End(_) => parser.close_element(),
            Event::Text(t) => {
                let text = t.decode().map_err(|e| {
                    SerdeError::Custom(format!("failed to decode character data: {}", e))
                })?;
                parser.character_data(&text);
            }
            Event::CData(t) => parser.character_data(&String::from_utf8_lossy(&t)),
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(&e).to_string();
                match utils::resolve_reference(&name) {
                    Some(replacement) => parser.character_data(&replacement),
                    None => debug!(reference = %name, "unknown entity reference, dropping"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    parser.finish()
}

/// One stack entry per open XML element.
enum Frame {
    /// Subtree is parsed structurally but never touches the store.
    Discard,
    /// A scalar element, or one `<li>` of a scalar list; `index` is
    /// the node's position in its chain.
    Scalar {
        name: String,
        index: usize,
        text: String,
    },
    /// A `list="true"` header whose `<li>` items share `handler`.
    List {
        name: String,
        handler: Arc<dyn Handler>,
        items: usize,
    },
    /// An open nested store; the target path gained one segment.
    Nested,
    /// A `list="true"` header of nested stores.
    NestedList { name: String, items: usize },
}

struct Parser<'a> {
    root: &'a mut Store,
    registry: Arc<Registry>,
    frames: Vec<Frame>,
    /// Segments of (variable name, chain index) leading from the root
    /// store to the nested store currently receiving variables.
    path: Vec<(String, usize)>,
    root_found: bool,
    root_closed: bool,
}

impl<'a> Parser<'a> {
    fn new(root: &'a mut Store) -> Self {
        let registry = root.registry().clone();
        Self {
            root,
            registry,
            frames: Vec::new(),
            path: Vec::new(),
            root_found: false,
            root_closed: false,
        }
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.root_closed {
            return Err(SerdeError::Custom(
                "content after the document element".to_string(),
            ));
        }
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        if !self.root_found {
            // everything before the top-level <root> is ignored
            if name == "root" {
                self.root_found = true;
            }
            return Ok(());
        }
        match self.frames.last() {
            Some(Frame::Discard) => self.frames.push(Frame::Discard),
            Some(Frame::List { .. }) | Some(Frame::NestedList { .. }) => {
                self.open_list_item(&name)
            }
            _ => self.open_variable(name, start),
        }
        Ok(())
    }

    /// A child element of a store: resolve its type and create the
    /// variable, or discard the subtree.
    fn open_variable(&mut self, name: String, start: &BytesStart<'_>) {
        let Some(type_name) = utils::attribute(start, "type") else {
            debug!(element = %name, "element without a type attribute, skipping");
            self.frames.push(Frame::Discard);
            return;
        };
        let Some(handler) = self.registry.lookup(&type_name) else {
            debug!(element = %name, type_name = %type_name, "unknown type, skipping");
            self.frames.push(Frame::Discard);
            return;
        };
        let nested = Registry::is_store_handler(handler.as_ref());
        if !nested && !handler.deserializable() {
            debug!(element = %name, type_name = %type_name, "type is serialize-only, skipping");
            self.frames.push(Frame::Discard);
            return;
        }
        let list = utils::attribute(start, "list").as_deref() == Some("true");

        match target(self.root, &self.path) {
            Some(store) => {
                if let Err(err) = store.add_empty(&handler, &name) {
                    debug!(element = %name, error = %err, "could not create variable, skipping");
                    self.frames.push(Frame::Discard);
                    return;
                }
            }
            None => {
                self.frames.push(Frame::Discard);
                return;
            }
        }

        let frame = if nested {
            if list {
                Frame::NestedList { name, items: 0 }
            } else {
                self.path.push((name, 0));
                Frame::Nested
            }
        } else if list {
            Frame::List {
                name,
                handler,
                items: 0,
            }
        } else {
            Frame::Scalar {
                name,
                index: 0,
                text: String::new(),
            }
        };
        self.frames.push(frame);
    }

    /// A child of a `list="true"` element. Only `<li>` is meaningful;
    /// the first item reuses the chain head created with the header,
    /// later items are appended to the chain.
    fn open_list_item(&mut self, name: &str) {
        enum Item {
            ScalarHead(String),
            ScalarTail(String, Arc<dyn Handler>, usize),
            NestedHead(String),
            NestedTail(String, usize),
            Stray,
        }

        let item = if name != "li" {
            Item::Stray
        } else {
            match self.frames.last_mut() {
                Some(Frame::List {
                    name,
                    handler,
                    items,
                }) => {
                    let index = *items;
                    *items += 1;
                    if index == 0 {
                        Item::ScalarHead(name.clone())
                    } else {
                        Item::ScalarTail(name.clone(), handler.clone(), index)
                    }
                }
                Some(Frame::NestedList { name, items }) => {
                    let index = *items;
                    *items += 1;
                    if index == 0 {
                        Item::NestedHead(name.clone())
                    } else {
                        Item::NestedTail(name.clone(), index)
                    }
                }
                _ => Item::Stray,
            }
        };

        match item {
            Item::ScalarHead(name) => self.frames.push(Frame::Scalar {
                name,
                index: 0,
                text: String::new(),
            }),
            Item::ScalarTail(name, handler, index) => {
                let value = handler.construct(&self.registry);
                if let Some(variable) =
                    target(self.root, &self.path).and_then(|store| store.get_mut(&name))
                {
                    variable.push(value);
                }
                self.frames.push(Frame::Scalar {
                    name,
                    index,
                    text: String::new(),
                });
            }
            Item::NestedHead(name) => {
                self.path.push((name, 0));
                self.frames.push(Frame::Nested);
            }
            Item::NestedTail(name, index) => {
                let value = Value::Store(Store::new(self.registry.clone()));
                if let Some(variable) =
                    target(self.root, &self.path).and_then(|store| store.get_mut(&name))
                {
                    variable.push(value);
                }
                self.path.push((name, index));
                self.frames.push(Frame::Nested);
            }
            Item::Stray => self.frames.push(Frame::Discard),
        }
    }

    fn character_data(&mut self, text: &str) {
        if let Some(Frame::Scalar { text: buffer, .. }) = self.frames.last_mut() {
            buffer.push_str(text);
        }
    }

    fn close_element(&mut self) {
        if !self.root_found {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            // the matching </root>: the document element is done
            self.root_closed = true;
            return;
        };
        match frame {
            Frame::Discard => {}
            Frame::Nested => {
                self.path.pop();
            }
            Frame::Scalar { name, index, text } => {
                if let Some(variable) =
                    target(self.root, &self.path).and_then(|store| store.get_mut(&name))
                {
                    let handler = variable.handler().clone();
                    match handler.deserialize(&text) {
                        Some(value) => {
                            if let Some(slot) = variable.values_mut().get_mut(index) {
                                *slot = value;
                            }
                        }
                        None => {
                            debug!(element = %name, "value text did not parse, keeping default")
                        }
                    }
                }
            }
            Frame::List { name, items, .. } | Frame::NestedList { name, items } => {
                // declared as a list, but no <li> followed: drop the
                // head created with the header
                if items == 0 {
                    if let Some(store) = target(self.root, &self.path) {
                        store.remove(&name);
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<()> {
        if self.root_found && !self.frames.is_empty() {
            return Err(SerdeError::Custom(
                "unexpected end of input inside an open element".to_string(),
            ));
        }
        Ok(())
    }
}

/// Walks from the root store along `path` to the nested store
/// currently being populated.
fn target<'s>(store: &'s mut Store, path: &[(String, usize)]) -> Option<&'s mut Store> {
    match path.split_first() {
        None => Some(store),
        Some(((name, index), rest)) => {
            let child = store
                .get_mut(name)?
                .values_mut()
                .get_mut(*index)?
                .as_store_mut()?;
            target(child, rest)
        }
    }
}
