//! Flatten web service XML into nested `serde_json::Value` maps.
//!
//! Conventions:
//! - the root element becomes a single top-level key, camelized (`lfm` -> `Lfm`)
//! - attributes become string entries of their element's map
//! - a child holding only text keeps its raw tag name and becomes a string, or
//!   `{"value": text, ...attributes}` when it carries attributes
//! - a child holding elements (or nothing) is keyed by its camelized tag
//! - repeated siblings under the same key collapse into an array

use crate::inflector::camelize;
use crate::{LastFmError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

#[derive(Debug, Default)]
struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| LastFmError::Parse(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| LastFmError::Parse(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn is_text_leaf(&self) -> bool {
        self.children.is_empty() && !self.text.is_empty()
    }

    fn attribute_map(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    fn into_value(self) -> Value {
        let mut map = self.attribute_map();
        if !self.text.is_empty() {
            map.insert("value".to_string(), Value::String(self.text));
        }
        for child in self.children {
            let (key, value) = if child.is_text_leaf() {
                let value = if child.attributes.is_empty() {
                    Value::String(child.text)
                } else {
                    let mut leaf = Map::new();
                    leaf.insert("value".to_string(), Value::String(child.text.clone()));
                    leaf.extend(child.attribute_map());
                    Value::Object(leaf)
                };
                (child.name, value)
            } else {
                (camelize(&child.name), child.into_value())
            };
            insert_collapsing(&mut map, key, value);
        }
        Value::Object(map)
    }
}

fn insert_collapsing(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(LastFmError::Parse(
                "XML document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Attributes of the root element, read without flattening the document.
pub fn root_attributes(xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                return Ok(Node::from_start(&start)?.attributes)
            }
            Ok(Event::Eof) => {
                return Err(LastFmError::Parse("XML document is empty".to_string()))
            }
            Ok(_) => {}
            Err(e) => {
                return Err(LastFmError::Parse(format!(
                    "Invalid XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }
}

/// Parse an XML document into nested structured data.
pub fn parse(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Node::from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let node = Node::from_start(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    LastFmError::Parse("Unbalanced closing tag in XML".to_string())
                })?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| LastFmError::Parse(e.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(LastFmError::Parse(format!(
                    "Invalid XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    if !stack.is_empty() {
        return Err(LastFmError::Parse("Unclosed element in XML".to_string()));
    }

    let root = root.ok_or_else(|| LastFmError::Parse("XML document is empty".to_string()))?;
    let mut document = Map::new();
    document.insert(camelize(&root.name), root.into_value());
    Ok(Value::Object(document))
}
