//! Request/response body conversion.
//!
//! # Design
//! `Converter` is the capability an HTTP client core calls once per outgoing
//! request body and once per incoming response body. `XmlConverter` is the
//! XML implementation: it owns a serializer and a `strict` flag, both fixed at
//! construction, and holds no per-call state, so one instance can be shared
//! across threads.
//!
//! Decode takes the `ResponseBody` by value. The stream is moved into the
//! serializer and dropped before `decode` returns, whether decoding
//! succeeded or not.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::body::{RequestBody, ResponseBody, APPLICATION_XML_UTF8};
use crate::config::ConverterConfig;
use crate::error::ConversionError;
use crate::serializer::{QuickXmlSerializer, XmlSerializer};

/// Translates between typed values and HTTP bodies.
pub trait Converter {
    /// Decode a response body into `T`, consuming the body.
    fn decode<T>(&self, body: ResponseBody) -> Result<T, ConversionError>
    where
        T: DeserializeOwned;

    /// Encode `value` as a request body.
    fn encode<T>(&self, value: &T) -> Result<RequestBody, ConversionError>
    where
        T: Serialize + ?Sized;
}

/// `Converter` for `application/xml; charset=UTF-8` bodies.
#[derive(Debug, Clone)]
pub struct XmlConverter<S = QuickXmlSerializer> {
    serializer: S,
    strict: bool,
}

impl XmlConverter<QuickXmlSerializer> {
    /// Strict converter over the default serializer.
    pub fn new() -> Self {
        Self::from_parts(QuickXmlSerializer::new(), true)
    }

    pub fn with_strict(strict: bool) -> Self {
        Self::from_parts(QuickXmlSerializer::new(), strict)
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::from_parts(
            QuickXmlSerializer::with_declaration(config.xml_declaration),
            config.strict,
        )
    }
}

impl Default for XmlConverter<QuickXmlSerializer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: XmlSerializer> XmlConverter<S> {
    /// Strict converter over a caller-supplied serializer.
    pub fn with_serializer(serializer: S) -> Self {
        Self::from_parts(serializer, true)
    }

    pub fn from_parts(serializer: S, strict: bool) -> Self {
        Self { serializer, strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    pub fn media_type(&self) -> &'static str {
        APPLICATION_XML_UTF8
    }
}

impl<S: XmlSerializer> Converter for XmlConverter<S> {
    fn decode<T>(&self, body: ResponseBody) -> Result<T, ConversionError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            strict = self.strict,
            content_type = body.content_type(),
            content_length = body.content_length(),
            "decoding XML body"
        );
        let stream = body.into_stream();
        let result = self.serializer.read(stream, self.strict);
        tracing::trace!("response body released");

        if let Err(ConversionError::UnexpectedElement { path }) = &result {
            tracing::warn!(%path, "strict decode rejected undeclared XML content");
        }
        result
    }

    fn encode<T>(&self, value: &T) -> Result<RequestBody, ConversionError>
    where
        T: Serialize + ?Sized,
    {
        let mut bytes = Vec::new();
        self.serializer.write(value, &mut bytes)?;
        tracing::debug!(len = bytes.len(), "encoded XML body");
        Ok(RequestBody::new(APPLICATION_XML_UTF8, bytes))
    }
}
