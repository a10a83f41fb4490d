//
//  kibana-api
//  api/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Endpoint`] trait and the helpers endpoint bindings share.
//!
//! Every binding is a request struct implementing [`Endpoint`]. The trait
//! describes one REST operation (method, path, query, body, response decoding);
//! [`ApiClient::execute`](super::ApiClient::execute) runs the call.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use kibana_api::api::common::{Query, Result};
//! use kibana_api::api::endpoint::{decode_json, Endpoint};
//! use reqwest::Method;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Features(Vec<serde_json::Value>);
//!
//! #[derive(Debug, Default)]
//! struct GetFeatures {
//!     ignore_valid_licenses: Option<bool>,
//! }
//!
//! impl Endpoint for GetFeatures {
//!     type Response = Features;
//!     const NAME: &'static str = "features.get_features";
//!     const METHOD: Method = Method::GET;
//!
//!     fn path(&self) -> String {
//!         "/api/features".to_string()
//!     }
//!
//!     fn query(&self, query: &mut Query) -> Result<()> {
//!         query.opt("ignoreValidLicenses", self.ignore_valid_licenses);
//!         Ok(())
//!     }
//!
//!     fn empty() -> Option<Self> {
//!         Some(Self::default())
//!     }
//!
//!     fn decode(raw: &Bytes) -> Result<Self::Response> {
//!         decode_json(raw)
//!     }
//! }
//! ```

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::{Error, Query, Result};
use crate::transport::RequestBody;

/// One REST operation of the API.
pub trait Endpoint: Send + Sync + Sized {
    /// Decoded success body.
    type Response: Send;

    /// Name used for instrumentation, `"<domain>.<action>"`.
    const NAME: &'static str;

    /// HTTP method.
    const METHOD: Method;

    /// Path relative to the API root, with path parameters interpolated.
    fn path(&self) -> String;

    /// Adds query parameters. Only parameters that are set are emitted.
    fn query(&self, _query: &mut Query) -> Result<()> {
        Ok(())
    }

    /// Builds the request body, if the operation has one.
    fn body(&self) -> Result<Option<RequestBody>> {
        Ok(None)
    }

    /// Checks required fields before any I/O.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Request used when the caller passes none. Operations with required
    /// input return `None`, which makes a missing request an error.
    fn empty() -> Option<Self> {
        None
    }

    /// Whether `status` is a success for this operation.
    fn is_success(status: StatusCode) -> bool {
        status.is_success()
    }

    /// Decodes a success body.
    fn decode(raw: &Bytes) -> Result<Self::Response>;
}

/// Decodes a JSON success body.
pub fn decode_json<T: DeserializeOwned>(raw: &Bytes) -> Result<T> {
    serde_json::from_slice(raw).map_err(Error::Decode)
}

/// Passes a text body (e.g. YAML) through unchanged.
///
/// Fails with [`Error::Decode`] when the body is not valid UTF-8.
pub fn decode_text(raw: &Bytes) -> Result<String> {
    String::from_utf8(raw.to_vec())
        .map_err(|e| Error::Decode(serde::de::Error::custom(format!("body is not UTF-8: {}", e))))
}

/// Ignores the success body.
pub fn decode_unit(_raw: &Bytes) -> Result<()> {
    Ok(())
}

/// Serializes `body` as a JSON request body.
pub fn json_body<T: Serialize + ?Sized>(body: &T) -> Result<Option<RequestBody>> {
    let bytes = serde_json::to_vec(body).map_err(Error::Encode)?;
    Ok(Some(RequestBody::Bytes(Bytes::from(bytes))))
}

/// Fails with [`Error::InvalidArgument`] when `value` is empty.
pub fn require(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{} cannot be empty", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("abc", "case_id").is_ok());
        let err = require("  ", "case_id").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: case_id cannot be empty");
    }

    #[test]
    fn test_json_body_bytes() {
        let body = json_body(&serde_json::json!({"name": "x"})).unwrap().unwrap();
        assert_eq!(body.as_bytes().unwrap().as_ref(), br#"{"name":"x"}"#);
    }

    #[test]
    fn test_decode_text_is_lossless_for_utf8() {
        let raw = Bytes::from_static(b"id: policy\noutputs: {}\n");
        assert_eq!(decode_text(&raw).unwrap(), "id: policy\noutputs: {}\n");
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        let raw = Bytes::from_static(b"id: \xff\n");
        assert!(matches!(decode_text(&raw), Err(Error::Decode(_))));
    }
}
