//! Stateless HTTP request builder and response parser over a `Converter`.
//!
//! # Design
//! `RestClient` holds a `base_url` and a converter and carries no mutable
//! state between calls. Requests are produced by `build*` and responses are
//! consumed by `parse*`; the caller executes the round-trip in between, so
//! the core stays deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::converter::{Converter, XmlConverter};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless client core.
#[derive(Debug, Clone)]
pub struct RestClient<C = XmlConverter> {
    base_url: String,
    converter: C,
}

impl RestClient<XmlConverter> {
    /// Client using a strict `XmlConverter`.
    pub fn new(base_url: &str) -> Self {
        Self::with_converter(base_url, XmlConverter::new())
    }
}

impl<C: Converter> RestClient<C> {
    pub fn with_converter(base_url: &str, converter: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            converter,
        }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// A bodiless request to `path`, which is appended to the base URL.
    pub fn build(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request whose body is `input` encoded by the converter.
    pub fn build_with_body<T>(&self, method: HttpMethod, path: &str, input: &T) -> Result<HttpRequest, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let body = self.converter.encode(input)?;
        let mut request = self.build(method, path);
        request
            .headers
            .push(("content-type".to_string(), body.content_type().to_string()));
        request.body = Some(body);
        Ok(request)
    }

    /// Check the status, then decode the body into `T`.
    pub fn parse<T>(&self, response: HttpResponse, expected: u16) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        check_status(&response, expected)?;
        Ok(self.converter.decode(response.into_body())?)
    }

    /// Check the status of a response whose body carries nothing of interest.
    pub fn parse_empty(&self, response: HttpResponse, expected: u16) -> Result<(), ApiError> {
        check_status(&response, expected)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
