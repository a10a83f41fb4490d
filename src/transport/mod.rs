//
//  kibana-api
//  transport/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Layer
//!
//! The transport is the collaborator that actually performs an HTTP exchange.
//! The API layer builds a fully-formed [`TransportRequest`], hands it to a
//! [`Transport`], and interprets the [`TransportResponse`] it gets back.
//!
//! ## Provided Transports
//!
//! - [`HttpTransport`]: a `reqwest`-backed transport used by
//!   [`ApiClient::from_config`](crate::api::ApiClient::from_config)
//!
//! Callers that need pooling, proxies, retries, or a test double implement
//! [`Transport`] themselves and pass it to
//! [`ApiClient::new`](crate::api::ApiClient::new).
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use kibana_api::transport::{Transport, TransportError, TransportRequest, TransportResponse};
//! use reqwest::{header::HeaderMap, StatusCode};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn perform(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
//!         Ok(TransportResponse {
//!             status: StatusCode::OK,
//!             headers: HeaderMap::new(),
//!             body: Bytes::from_static(b"{}"),
//!         })
//!     }
//! }
//! ```

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

/// Error produced by a [`Transport`] implementation.
///
/// Transport errors are returned to the caller untouched; the API layer
/// never retries or reclassifies them.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Performs a single HTTP exchange.
///
/// Implementations must send the request exactly as given. Concurrency safety
/// of the implementation is the implementor's responsibility; the API layer
/// shares one transport across all calls made through a client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the complete response.
    ///
    /// Non-2xx statuses are *not* errors at this level; only failures to
    /// complete the exchange (connection refused, TLS, timeouts) are.
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// A fully-built outgoing request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl TransportRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A byte payload, typically JSON.
    Bytes(Bytes),
    /// A `multipart/form-data` payload.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns the byte payload, if this is not a multipart body.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Multipart(_) => None,
        }
    }
}

/// A `multipart/form-data` body described as a list of parts.
///
/// The boundary and wire encoding are chosen by the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    /// Parts in the order they will be sent.
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.parts.push(FormPart {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: Bytes::from(value),
        });
        self
    }

    /// Appends a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data,
        });
        self
    }

    /// Returns the first part with the given field name.
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// A single part of a [`MultipartForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// File name, for file parts.
    pub file_name: Option<String>,
    /// MIME type of the part, when set.
    pub content_type: Option<String>,
    /// Part content.
    pub data: Bytes,
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The complete response body.
    pub body: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_builder_keeps_order() {
        let form = MultipartForm::new()
            .text("overwrite", "true")
            .file("file", "lists.ndjson", "application/ndjson", Bytes::from_static(b"{}"));

        assert_eq!(form.parts.len(), 2);
        assert_eq!(form.parts[0].name, "overwrite");
        assert_eq!(form.part("file").unwrap().file_name.as_deref(), Some("lists.ndjson"));
    }

    #[test]
    fn test_request_body_as_bytes() {
        let body = RequestBody::Bytes(Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(body.as_bytes().unwrap().as_ref(), b"{\"a\":1}");
        assert!(RequestBody::Multipart(MultipartForm::new()).as_bytes().is_none());
    }
}
