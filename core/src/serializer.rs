//! The XML engine seam.
//!
//! `XmlConverter` never touches XML itself; it hands streams and values to an
//! `XmlSerializer`. `QuickXmlSerializer` is the default engine, built on
//! quick-xml's serde support.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConversionError;
use crate::strict;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Reads typed values from XML streams and writes them back out.
pub trait XmlSerializer: Send + Sync {
    /// Decode one document from `input`. With `strict`, content the target
    /// type does not declare is an error instead of being skipped.
    ///
    /// # Errors
    ///
    /// `Io` when the stream fails, otherwise one of the decode variants of
    /// `ConversionError`.
    fn read<T, R>(&self, input: R, strict: bool) -> Result<T, ConversionError>
    where
        T: DeserializeOwned,
        R: Read;

    /// Append the UTF-8 XML form of `value` to `sink`.
    ///
    /// # Errors
    ///
    /// `Serialize` when the value has a shape XML cannot express.
    fn write<T>(&self, value: &T, sink: &mut Vec<u8>) -> Result<(), ConversionError>
    where
        T: Serialize + ?Sized;
}

/// Default serializer backed by `quick_xml::de` and `quick_xml::se`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlSerializer {
    declaration: bool,
}

impl QuickXmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix written documents with an `<?xml ...?>` declaration.
    pub fn with_declaration(declaration: bool) -> Self {
        Self { declaration }
    }

    pub fn writes_declaration(&self) -> bool {
        self.declaration
    }
}

impl XmlSerializer for QuickXmlSerializer {
    fn read<T, R>(&self, mut input: R, strict: bool) -> Result<T, ConversionError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut raw = Vec::new();
        input.read_to_end(&mut raw)?;
        let text = std::str::from_utf8(&raw).map_err(|e| ConversionError::Syntax(e.to_string()))?;

        let scan = strict::scan(text)?;
        if strict {
            return strict::decode(text, &scan);
        }
        Ok(quick_xml::de::from_str(text)?)
    }

    fn write<T>(&self, value: &T, sink: &mut Vec<u8>) -> Result<(), ConversionError>
    where
        T: Serialize + ?Sized,
    {
        let xml = quick_xml::se::to_string(value)?;
        if self.declaration {
            sink.extend_from_slice(XML_DECLARATION.as_bytes());
        }
        sink.extend_from_slice(xml.as_bytes());
        Ok(())
    }
}
