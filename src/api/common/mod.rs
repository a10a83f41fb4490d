//
//  kibana-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Kibana endpoint bindings
//!
//! This module provides shared types and utilities used by every endpoint
//! binding: the error type, the response envelope, query-string construction,
//! polymorphic payload decoding, and NDJSON record handling.
//!
//! # Overview
//!
//! - [`Error`] - Unified error type for all API operations
//! - [`ErrorBody`] - Parsed (or raw) body of a non-success response
//! - [`Response`] - Envelope returned by every successful call
//! - [`FindResponse`] - Page of results from a `_find` style endpoint
//! - [`Query`] - Query-string builder (re-exported from [`query`])
//! - [`RawPayload`] / [`Tagged`] - Decode-by-discriminator helpers
//! - [`NdjsonRecords`] - Newline-delimited JSON records
//! - [`OneOrMany`] - Single value or list
//!
//! # Example
//!
//! ```rust
//! use kibana_api::api::common::{Error, ErrorBody};
//! use reqwest::StatusCode;
//!
//! fn describe(err: &Error) -> String {
//!     match err {
//!         Error::Status { status_code, error: ErrorBody::Json(value) } => {
//!             format!("{} with structured body {}", status_code, value)
//!         }
//!         Error::Status { status_code, error: ErrorBody::Text(text) } => {
//!             format!("{} with text body {}", status_code, text)
//!         }
//!         other => other.to_string(),
//!     }
//! }
//!
//! let err = Error::Status {
//!     status_code: StatusCode::NOT_FOUND,
//!     error: ErrorBody::Text("Not Found".into()),
//! };
//! assert!(describe(&err).contains("Not Found"));
//! ```

use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::TransportError;

mod ndjson;
mod query;
mod tagged;

pub use ndjson::*;
pub use query::*;
pub use tagged::*;

/// Result alias used by every endpoint binding.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for all Kibana API operations.
///
/// # Variants
///
/// | Variant | Raised | I/O attempted |
/// |---------|--------|---------------|
/// | `NilArgument` | A required request was not supplied | No |
/// | `InvalidArgument` | A required field is empty | No |
/// | `Url` | The request URL could not be built | No |
/// | `Encode` | The body or a query value could not be marshaled | No |
/// | `RequestOption` | A request option rejected the request | No |
/// | `Transport` | The transport failed to complete the exchange | Yes |
/// | `Status` | The server answered with a non-success status | Yes |
/// | `Decode` | A success body did not match the expected shape | Yes |
/// | `Io` | Writing exported records failed | - |
/// | `Yaml` | A YAML document could not be parsed | - |
///
/// # Notes
///
/// - `Transport` is transparent: its `Display` and `source` are the transport's own
/// - `Status` keeps the parsed error body so callers can inspect it structurally
#[derive(Error, Debug)]
pub enum Error {
    /// A required request argument was not provided.
    #[error("{endpoint}: {argument} cannot be nil")]
    NilArgument {
        /// Endpoint name, e.g. `cases.create_case`.
        endpoint: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A required field was present but empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request URL could not be constructed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A request body or query value could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request option failed while being applied.
    #[error("request option failed: {0}")]
    RequestOption(String),

    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(TransportError),

    /// The server returned a non-success status code.
    #[error("status: {status_code}, error: {error}")]
    Status {
        /// HTTP status code returned by the server.
        status_code: StatusCode,
        /// The error body, parsed as JSON when possible.
        error: ErrorBody,
    },

    /// A success body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// An I/O error while writing exported data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document could not be parsed.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns the HTTP status code for `Status` errors.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns the error body for `Status` errors.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Status { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns `true` when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}

/// Body of a non-success response.
///
/// The body is parsed as JSON when it can be; otherwise the raw text is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body was not valid JSON.
    Text(String),
}

impl ErrorBody {
    /// Classifies a raw error body.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kibana_api::api::common::ErrorBody;
    ///
    /// assert!(matches!(ErrorBody::parse(br#"{"error":"Bad"}"#), ErrorBody::Json(_)));
    /// assert_eq!(ErrorBody::parse(b"Not Found"), ErrorBody::Text("Not Found".into()));
    /// ```
    pub fn parse(raw: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(raw).into_owned()),
        }
    }

    /// Returns the `message` field of a JSON error body, when present.
    ///
    /// Kibana errors usually look like
    /// `{"statusCode":400,"error":"Bad Request","message":"..."}`.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("message").and_then(|m| m.as_str()),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Envelope returned by every successful call.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `status_code` | Status code of the response |
/// | `headers` | Response headers |
/// | `body` | Decoded success body |
/// | `raw_body` | The body bytes exactly as received |
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// HTTP status code.
    pub status_code: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// The decoded body.
    pub body: T,

    /// The undecoded body, kept for callers that need the original bytes.
    pub raw_body: Bytes,
}

impl<T> Response<T> {
    /// Consumes the envelope and returns the decoded body.
    pub fn into_body(self) -> T {
        self.body
    }
}

/// A page of results from a `_find` endpoint.
///
/// Kibana's find endpoints wrap results as
/// `{"page": 1, "per_page": 20, "total": 42, "data": [...]}`. The detection
/// engine spells the page size `perPage`, which is accepted as an alias.
///
/// # Example
///
/// ```rust
/// use kibana_api::api::common::FindResponse;
///
/// let json = r#"{"page": 1, "perPage": 2, "total": 5, "data": [1, 2]}"#;
/// let page: FindResponse<u32> = serde_json::from_str(json).unwrap();
/// assert!(page.has_next());
/// assert_eq!(page.next_page(), Some(2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResponse<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: u32,

    /// Page size used for this request.
    #[serde(default, alias = "perPage")]
    pub per_page: u32,

    /// Total number of matching items.
    #[serde(default)]
    pub total: u64,
}

impl<T> FindResponse<T> {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }

    /// Returns the page number to request next, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// Reference to a Kibana user as embedded in cases and rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,

    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// User profile id, when profiles are enabled.
    #[serde(default)]
    pub profile_uid: Option<String>,
}

/// A JSON value that may be a single item or a list of items.
///
/// Kibana accepts both forms in a few places, e.g. `alertId` on alert
/// comments and `machine_learning_job_id` on ML rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// A list of values.
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    /// Flattens into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_embeds_json() {
        let err = Error::Status {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error: ErrorBody::parse(br#"{"error":"Internal Server Error"}"#),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains(r#"{"error":"Internal Server Error"}"#));
    }

    #[test]
    fn test_status_error_embeds_text() {
        let err = Error::Status {
            status_code: StatusCode::NOT_FOUND,
            error: ErrorBody::parse(b"Not Found"),
        };
        assert!(err.to_string().contains("Not Found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_body_message() {
        let body = ErrorBody::parse(br#"{"statusCode":400,"message":"bad field"}"#);
        assert_eq!(body.message(), Some("bad field"));
        assert_eq!(ErrorBody::Text("x".into()).message(), None);
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany<String> = serde_json::from_str(r#""a""#).unwrap();
        let many: OneOrMany<String> = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(one.into_vec(), vec!["a"]);
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_find_response_last_page() {
        let page: FindResponse<u32> =
            serde_json::from_str(r#"{"page": 3, "per_page": 2, "total": 5, "data": [5]}"#).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_page(), None);
    }
}
