//
//  kibana-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Static credentials attached to every request made by an
//! [`ApiClient`](crate::api::ApiClient). No login, refresh, or token exchange
//! happens here; callers obtain credentials however they like and hand them over.
//!
//! ## Supported Methods
//!
//! - **API key**: `Authorization: ApiKey <base64(id:api_key)>`
//! - **Basic**: username and password
//! - **Bearer**: a service account or OAuth access token
//!
//! ## Example
//!
//! ```rust
//! use kibana_api::auth::Credentials;
//!
//! let key = Credentials::api_key_from_parts("VuaCfGcBCdbkQm-e5aOx", "ui2lp2axTNmsyakw9tvNnw");
//! assert!(matches!(key, Credentials::ApiKey { .. }));
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::api::common::{Error, Result};

/// Credentials for the Kibana API.
///
/// # Variants
///
/// - `ApiKey`: an Elasticsearch API key, already base64-encoded
/// - `Basic`: HTTP Basic authentication
/// - `Bearer`: a bearer token
///
/// # Notes
///
/// - `Debug` output redacts secrets.
#[derive(Clone, PartialEq)]
pub enum Credentials {
    /// Encoded API key (the `encoded` value returned when a key is created).
    ApiKey {
        /// Base64 of `id:api_key`.
        encoded: String,
    },
    /// Basic HTTP authentication with username and password.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password for authentication.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The token string.
        token: String,
    },
}

impl Credentials {
    /// Uses an already encoded API key.
    pub fn api_key(encoded: impl Into<String>) -> Self {
        Self::ApiKey {
            encoded: encoded.into(),
        }
    }

    /// Encodes an API key from its id and secret.
    pub fn api_key_from_parts(id: &str, api_key: &str) -> Self {
        Self::ApiKey {
            encoded: STANDARD.encode(format!("{}:{}", id, api_key)),
        }
    }

    /// Basic authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer token authentication.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the `Authorization` header value for these credentials.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let value = match self {
            Self::ApiKey { encoded } => format!("ApiKey {}", encoded),
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
            }
            Self::Bearer { token } => format!("Bearer {}", token),
        };
        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| Error::InvalidArgument("credentials contain invalid header characters".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Sets the `Authorization` header on `headers`.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey { .. } => f.write_str("ApiKey(**redacted**)"),
            Self::Basic { username, .. } => write!(f, "Basic({}:**redacted**)", username),
            Self::Bearer { .. } => f.write_str("Bearer(**redacted**)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_parts() {
        let creds = Credentials::api_key_from_parts("id", "secret");
        assert_eq!(creds.header_value().unwrap(), "ApiKey aWQ6c2VjcmV0");
    }

    #[test]
    fn test_basic_header() {
        let creds = Credentials::basic("elastic", "changeme");
        assert_eq!(creds.header_value().unwrap(), "Basic ZWxhc3RpYzpjaGFuZ2VtZQ==");
    }

    #[test]
    fn test_debug_redacts() {
        let creds = Credentials::bearer("top-secret");
        assert!(!format!("{:?}", creds).contains("top-secret"));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        let creds = Credentials::bearer("line\nbreak");
        assert!(creds.header_value().is_err());
    }
}
