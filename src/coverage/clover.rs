//! Clover XML report loader and aggregate metrics extractor

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use super::{get_percent, MetricFamily, MetricsSnapshot};
use crate::error::{GateError, Result};

const METRICS_TAG: &str = "metrics";

/// An element of a parsed report: its names and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified name, e.g. `cl:metrics`
    pub name: String,
    /// Name without its namespace prefix, e.g. `metrics`
    pub local_name: String,
    pub attributes: Vec<(String, String)>,
}

impl XmlElement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A well-formed Clover document, flattened to its elements in document order
#[derive(Debug, Clone, Default)]
pub struct CloverDocument {
    elements: Vec<XmlElement>,
}

impl CloverDocument {
    /// All elements whose local or qualified name is `name`, in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements
            .iter()
            .filter(move |e| e.local_name == name || e.name == name)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Read and parse a Clover XML file
pub fn load_clover(path: &Path) -> Result<CloverDocument> {
    let content = fs::read_to_string(path).map_err(|source| GateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_clover_string(&content)
}

/// Parse Clover XML content from a string
pub fn parse_clover_string(content: &str) -> Result<CloverDocument> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if root_closed {
                    return Err(malformed(position, "extra content after the root element"));
                }
                elements.push(read_element(e, position)?);
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if root_closed {
                    return Err(malformed(position, "extra content after the root element"));
                }
                elements.push(read_element(e, position)?);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Ok(Event::End(_)) => {
                // quick-xml already rejects mismatched names
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(position, "closing tag without an opening tag"))?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Ok(Event::Text(ref e)) if depth == 0 => {
                let text = e
                    .unescape()
                    .map_err(|err| malformed(position, &err.to_string()))?;
                if !text.trim().is_empty() {
                    return Err(malformed(position, "text outside the root element"));
                }
            }
            Ok(Event::CData(_)) if depth == 0 => {
                return Err(malformed(position, "CDATA outside the root element"));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(reader.buffer_position(), &e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if depth > 0 {
        return Err(malformed(content.len(), "unclosed element at end of document"));
    }
    if elements.is_empty() {
        return Err(malformed(0, "document has no root element"));
    }

    Ok(CloverDocument { elements })
}

fn read_element(e: &BytesStart, position: usize) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let local_name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(position, &err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(position, &err.to_string()))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        local_name,
        attributes,
    })
}

fn malformed(position: usize, message: &str) -> GateError {
    GateError::MalformedXml {
        position,
        message: message.to_string(),
    }
}

/// Extract the aggregate metrics from a parsed report.
///
/// Clover writes one `<metrics>` per file, class and package, and the
/// project-level one last. The last element in document order is taken as
/// the aggregate; nothing else about its position is checked.
pub fn get_metrics(document: &CloverDocument) -> Result<MetricsSnapshot> {
    let aggregate = document
        .find_all(METRICS_TAG)
        .last()
        .ok_or(GateError::MetricsNotFound)?;

    let mut snapshot = MetricsSnapshot::default();
    for family in MetricFamily::ALL {
        let total = required_attribute(aggregate, family.total_key())?;
        let covered = required_attribute(aggregate, family.covered_key())?;
        let percent = get_percent(covered, total, family)?;

        snapshot.insert(family.total_key(), total.to_string());
        snapshot.insert(family.covered_key(), covered.to_string());
        snapshot.insert(family.percent_key(), percent);
    }

    Ok(snapshot)
}

fn required_attribute<'a>(element: &'a XmlElement, key: &str) -> Result<&'a str> {
    element
        .attribute(key)
        .ok_or_else(|| GateError::MissingAttribute(key.to_string()))
}
