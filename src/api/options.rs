//
//  kibana-api
//  api/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-call request options.
//!
//! Options are applied to the outgoing [`TransportRequest`] in the order given,
//! after the client's own defaults. The first option that fails aborts the
//! call before anything is sent.
//!
//! # Example
//!
//! ```rust
//! use kibana_api::api::options::{with_header, with_opaque_id};
//!
//! let options = [with_opaque_id("nightly-sync"), with_header("x-team", "platform")];
//! assert_eq!(options.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};

use super::common::{Error, Result};
use crate::transport::TransportRequest;

type ApplyFn = dyn Fn(&mut TransportRequest) -> Result<()> + Send + Sync;

/// A caller-supplied modification of the outgoing request.
#[derive(Clone)]
pub struct RequestOption {
    apply: Arc<ApplyFn>,
}

impl RequestOption {
    /// Wraps an arbitrary modification.
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut TransportRequest) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            apply: Arc::new(apply),
        }
    }

    /// Applies the option to `request`.
    pub fn apply(&self, request: &mut TransportRequest) -> Result<()> {
        (self.apply)(request)
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption(..)")
    }
}

/// Sets (replacing) a header.
pub fn with_header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let name = name.into();
    let value = value.into();
    RequestOption::new(move |request| {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::RequestOption(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(&value)
            .map_err(|e| Error::RequestOption(format!("invalid value for header {}: {}", name, e)))?;
        request.headers.insert(header, value);
        Ok(())
    })
}

/// Appends a query parameter.
pub fn with_query(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let key = key.into();
    let value = value.into();
    RequestOption::new(move |request| {
        request.url.query_pairs_mut().append_pair(&key, &value);
        Ok(())
    })
}

/// Sets `X-Opaque-Id`, which Kibana forwards to Elasticsearch for tracing.
pub fn with_opaque_id(id: impl Into<String>) -> RequestOption {
    with_header("x-opaque-id", id)
}

/// Pins the `Elastic-Api-Version` of a versioned endpoint.
pub fn with_api_version(version: impl Into<String>) -> RequestOption {
    with_header("elastic-api-version", version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn request() -> TransportRequest {
        TransportRequest::new(
            Method::GET,
            Url::parse("http://localhost:5601/api/status").unwrap(),
        )
    }

    #[test]
    fn test_with_header_sets_value() {
        let mut req = request();
        with_opaque_id("abc").apply(&mut req).unwrap();
        assert_eq!(req.headers.get("x-opaque-id").unwrap(), "abc");
    }

    #[test]
    fn test_invalid_header_name_fails() {
        let mut req = request();
        let err = with_header("bad header", "v").apply(&mut req).unwrap_err();
        assert!(matches!(err, Error::RequestOption(_)));
    }

    #[test]
    fn test_with_query_appends() {
        let mut req = request();
        with_query("v8format", "true").apply(&mut req).unwrap();
        assert_eq!(req.url.query(), Some("v8format=true"));
    }
}
