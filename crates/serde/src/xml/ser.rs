//! XML serialization of a store.
//!
//! The serializer walks the store's variables in insertion order and
//! writes quick-xml events directly; handlers only produce the text
//! encoding of their payloads. Nested stores are written by recursing
//! into them rather than through their handler, which has no text
//! form.

use std::io::Write;

use chroma_store::{Registry, Store, Value, Variable};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Result, SerdeError};
use crate::xml::utils;

/// Serializes a store to an XML string.
pub fn to_xml_string(store: &Store) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(store, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serializes a store to a writer as one `<root>…</root>` document,
/// without an XML declaration or DOCTYPE.
///
/// Variables flagged `no_save` and chains whose handler has no text
/// encoding are omitted.
pub fn to_xml_writer<W: Write>(store: &Store, writer: W) -> Result<()> {
    let mut writer = Writer::new(writer);
    writer.write_event(Event::Start(BytesStart::new("root")))?;
    write_store(&mut writer, store)?;
    writer.write_event(Event::End(BytesEnd::new("root")))?;
    Ok(())
}

fn write_store<W: Write>(writer: &mut Writer<W>, store: &Store) -> Result<()> {
    for variable in store.iter() {
        if variable.no_save() {
            continue;
        }
        if Registry::is_store_handler(variable.handler().as_ref()) {
            write_store_variable(writer, variable)?;
        } else {
            write_scalar_variable(writer, variable)?;
        }
    }
    Ok(())
}

fn write_scalar_variable<W: Write>(writer: &mut Writer<W>, variable: &Variable) -> Result<()> {
    let handler = variable.handler();
    // one text per chain node; a handler without a text encoding drops
    // the whole chain from the document
    let texts: Option<Vec<String>> = variable
        .values()
        .iter()
        .map(|value| handler.serialize(value))
        .collect();
    let Some(texts) = texts else {
        return Ok(());
    };

    let mut start = BytesStart::new(variable.name());
    start.push_attribute(("type", handler.name()));
    if variable.is_list() {
        start.push_attribute(("list", "true"));
        writer.write_event(Event::Start(start))?;
        for text in &texts {
            writer.write_event(Event::Start(BytesStart::new("li")))?;
            write_text(writer, text)?;
            writer.write_event(Event::End(BytesEnd::new("li")))?;
        }
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = texts.first() {
            write_text(writer, text)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(variable.name())))?;
    newline(writer)
}

fn write_store_variable<W: Write>(writer: &mut Writer<W>, variable: &Variable) -> Result<()> {
    let mut start = BytesStart::new(variable.name());
    start.push_attribute(("type", variable.handler().name()));
    if variable.is_list() {
        start.push_attribute(("list", "true"));
        writer.write_event(Event::Start(start))?;
        for value in variable.values() {
            writer.write_event(Event::Start(BytesStart::new("li")))?;
            if let Value::Store(child) = value {
                write_store(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new("li")))?;
        }
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(Value::Store(child)) = variable.values().first() {
            write_store(writer, child)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(variable.name())))?;
    newline(writer)
}

fn write_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped(utils::escape_text(
        text,
    ))))?;
    Ok(())
}

/// One variable per line keeps saved settings files readable and
/// diffable; the whitespace lands between elements, where the parser
/// ignores it.
fn newline<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}
