//! XML request/response body conversion for HTTP clients.
//!
//! # Overview
//! `XmlConverter` turns typed values into `application/xml; charset=UTF-8`
//! request bodies and decodes XML response bodies back into typed values.
//! The XML work itself is delegated to an `XmlSerializer`; the default one
//! is built on quick-xml's serde support.
//!
//! # Design
//! - The converter is immutable after construction and shareable across
//!   threads; the target type of a decode is a compile-time parameter.
//! - `strict` (default on) rejects XML content the target type does not
//!   declare. With it off, such content is skipped.
//! - Decoding consumes the `ResponseBody`, so the stream is released on
//!   every exit path.
//! - `RestClient` is a host-does-IO client core that builds `HttpRequest`
//!   values and parses `HttpResponse` values through any `Converter`.

pub mod body;
pub mod client;
pub mod config;
pub mod converter;
pub mod error;
pub mod http;
pub mod serializer;
mod strict;

pub use body::{RequestBody, ResponseBody, APPLICATION_XML_UTF8};
pub use client::RestClient;
pub use config::ConverterConfig;
pub use converter::{Converter, XmlConverter};
pub use error::{ApiError, ConversionError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use serializer::{QuickXmlSerializer, XmlSerializer};
