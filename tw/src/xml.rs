//! Event-driven reader for WatchMe documents
//!
//! Every record in a WatchMe file is a flat element whose children hold one
//! string each. Text is taken exactly as written, surrounding whitespace
//! included, and each record is turned into its typed struct through serde.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::de::DeserializeOwned;
use serde::de::value::{self, MapDeserializer};

use crate::error::ParseError;

/// Child element name and text of one record, in document order
pub(crate) type Fields = Vec<(String, String)>;

/// A root element with its `xmlns` attribute and its records
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub xmlns: Option<String>,
    pub records: Vec<(String, Fields)>,
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Build `T` from a record's fields, matching names through its serde renames
pub(crate) fn from_fields<T: DeserializeOwned>(fields: Fields) -> Result<T, ParseError> {
    let result: Result<T, value::Error> = T::deserialize(MapDeserializer::new(fields.into_iter()));
    Ok(result?)
}

/// Read a document whose root `root` contains a list of records
pub(crate) fn read_document(xml: &str, root: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(xml);
    let (start, empty) = open_root(&mut reader, root)?;

    let mut doc = Document::default();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == b"xmlns" {
            doc.xmlns = Some(attr.unescape_value()?.into_owned());
        }
    }
    if empty {
        return Ok(doc);
    }

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e);
                let fields = read_record(&mut reader, &name)?;
                doc.records.push((name, fields));
            }
            Event::Empty(e) => doc.records.push((element_name(&e), Vec::new())),
            Event::End(_) => return Ok(doc),
            Event::Eof => return Err(ParseError::UnexpectedEof(root.to_string())),
            _ => {}
        }
    }
}

/// Read a document whose root `root` is itself a single record
pub(crate) fn read_single_record(xml: &str, root: &str) -> Result<Fields, ParseError> {
    let mut reader = Reader::from_str(xml);
    let (_, empty) = open_root(&mut reader, root)?;
    if empty {
        return Ok(Vec::new());
    }
    read_record(&mut reader, root)
}

fn open_root<'a>(reader: &mut Reader<&'a [u8]>, root: &str) -> Result<(BytesStart<'a>, bool), ParseError> {
    loop {
        let (start, empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
            Event::Text(_) | Event::CData(_) => return Err(ParseError::TextOutsideRoot),
            Event::Eof => return Err(ParseError::MissingRoot),
            _ => continue,
        };

        let found = element_name(&start);
        if found != root {
            return Err(ParseError::UnexpectedRoot {
                expected: root.to_string(),
                found,
            });
        }
        return Ok((start, empty));
    }
}

fn read_record(reader: &mut Reader<&[u8]>, record: &str) -> Result<Fields, ParseError> {
    let mut fields = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e);
                let text = read_text(reader, &name)?;
                fields.push((name, text));
            }
            Event::Empty(e) => fields.push((element_name(&e), String::new())),
            Event::End(_) => return Ok(fields),
            Event::Eof => return Err(ParseError::UnexpectedEof(record.to_string())),
            _ => {}
        }
    }
}

/// Collect the character data of a field; nested elements are skipped
fn read_text(reader: &mut Reader<&[u8]>, field: &str) -> Result<String, ParseError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&c.decode().map_err(quick_xml::Error::from)?),
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(ParseError::UnexpectedEof(field.to_string())),
            _ => {}
        }
    }
}
