//! Strict decoding: content the target type does not declare is an error.
//!
//! serde has no runtime switch for `deny_unknown_fields`, so the decode runs
//! through `serde_ignored`, which reports every key the derived visitor
//! skipped. Aliases, skipped-on-write fields and prefixed names are all
//! resolved by serde and quick-xml themselves, so only truly undeclared
//! content shows up.
//!
//! Before decoding, the document is scanned once with a namespace-aware
//! reader. The scan rejects a second top-level element or stray top-level
//! text, and records which attributes live in the XML Schema instance or
//! `xml:` namespaces; those describe the document, not the value, and are
//! never undeclared content.

use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use serde::de::DeserializeOwned;
use serde_ignored::Path;

use crate::error::ConversionError;

const XSI_NAMESPACE: &[u8] = b"http://www.w3.org/2001/XMLSchema-instance";
const XML_NAMESPACE: &[u8] = b"http://www.w3.org/XML/1998/namespace";

/// What the pre-decode scan learned about a document.
#[derive(Debug, Default)]
pub(crate) struct DocumentScan {
    /// Local names of attributes bound to the XSI or `xml:` namespaces.
    instance_attributes: HashSet<String>,
}

/// Check that `xml` has exactly one root element and collect its
/// schema-instance attribute names.
pub(crate) fn scan(xml: &str) -> Result<DocumentScan, ConversionError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut scan = DocumentScan::default();
    let mut depth: usize = 0;
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                enter(&reader, &e, depth, &mut root_seen, &mut scan)?;
                depth += 1;
            }
            Event::Empty(e) => {
                enter(&reader, &e, depth, &mut root_seen, &mut scan)?;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(ConversionError::Syntax("text outside the root element".to_string()));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(scan)
}

fn enter(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    depth: usize,
    root_seen: &mut bool,
    scan: &mut DocumentScan,
) -> Result<(), ConversionError> {
    if depth == 0 {
        if *root_seen {
            let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
            return Err(ConversionError::Syntax(format!(
                "second top-level element `{name}` after the root"
            )));
        }
        *root_seen = true;
    }
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ConversionError::Syntax(e.to_string()))?;
        if let Some(local) = attr.key.as_ref().strip_prefix(b"xml:") {
            scan.instance_attributes
                .insert(String::from_utf8_lossy(local).into_owned());
            continue;
        }
        if let (ResolveResult::Bound(Namespace(ns)), local) = reader.resolve_attribute(attr.key) {
            if ns == XSI_NAMESPACE || ns == XML_NAMESPACE {
                scan.instance_attributes
                    .insert(String::from_utf8_lossy(local.as_ref()).into_owned());
            }
        }
    }
    Ok(())
}

/// Decode `xml` into `T`, failing on the first key serde had to skip.
pub(crate) fn decode<T>(xml: &str, scan: &DocumentScan) -> Result<T, ConversionError>
where
    T: DeserializeOwned,
{
    let mut ignored = Vec::new();
    let mut de = quick_xml::de::Deserializer::from_str(xml);
    let value: T = serde_ignored::deserialize(&mut de, |path| ignored.push(render(&path)))?;

    match ignored.into_iter().find(|path| !scan.is_document_metadata(path)) {
        Some(path) => Err(ConversionError::UnexpectedElement { path }),
        None => Ok(value),
    }
}

impl DocumentScan {
    /// Namespace declarations and schema-instance attributes are not content.
    fn is_document_metadata(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or(path);
        let Some(key) = last.strip_prefix('@') else {
            return false;
        };
        if key == "xmlns" || key.starts_with("xmlns:") {
            return true;
        }
        let local = key.rsplit(':').next().unwrap_or(key);
        self.instance_attributes.contains(local)
    }
}

/// `child/grandchild` style path; sequence indices and wrapper layers
/// (`Option`, newtypes) add no segment.
fn render(path: &Path<'_>) -> String {
    let mut segments = Vec::new();
    let mut current = path;
    loop {
        match current {
            Path::Root => break,
            Path::Map { parent, key } => {
                segments.push(key.to_string());
                current = *parent;
            }
            Path::Seq { parent, .. }
            | Path::Some { parent }
            | Path::NewtypeStruct { parent }
            | Path::NewtypeVariant { parent } => current = *parent,
        }
    }
    segments.reverse();
    segments.join("/")
}
