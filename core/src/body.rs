//! HTTP bodies as seen by a converter.
//!
//! `RequestBody` is fully buffered bytes tagged with a content type.
//! `ResponseBody` owns the incoming byte stream; decoding takes it by value,
//! so the stream is released when the decode call returns, on every path.

use std::fmt;
use std::io::{self, Cursor, Read};

/// Content type of every body produced by `XmlConverter`.
pub const APPLICATION_XML_UTF8: &str = "application/xml; charset=UTF-8";

/// An outgoing request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    content_type: String,
    bytes: Vec<u8>,
}

impl RequestBody {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// An incoming response body: a readable stream plus the metadata the
/// transport knew about it.
pub struct ResponseBody {
    stream: Box<dyn Read + Send>,
    content_type: Option<String>,
    content_length: Option<u64>,
}

impl ResponseBody {
    /// Wrap a stream whose length is not known up front.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            stream: Box::new(reader),
            content_type: None,
            content_length: None,
        }
    }

    /// Wrap an already buffered body.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        Self {
            stream: Box::new(Cursor::new(bytes)),
            content_type: None,
            content_length: Some(len),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Hand the stream to a reader. Used by converters; the stream is dropped
    /// together with whatever consumes it.
    pub fn into_stream(self) -> Box<dyn Read + Send> {
        self.stream
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
