//
//  kibana-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Kibana API Client
//!
//! This module provides [`ApiClient`], the handle every endpoint binding runs
//! through. It owns the base URL, the optional space, the credentials, the
//! [`Transport`] and the [`Instrumentation`], and implements the call contract
//! shared by all endpoints in [`ApiClient::execute`].
//!
//! ## Features
//!
//! - Pluggable transport (the `reqwest`-backed [`HttpTransport`] by default)
//! - Space scoping through the `/s/{space}` path prefix
//! - Authentication header injection
//! - Per-call [`RequestOption`]s
//! - Optional instrumentation around every call
//!
//! ## Call Contract
//!
//! | Step | Failure | I/O attempted |
//! |------|---------|---------------|
//! | Missing request / validation | `NilArgument`, `InvalidArgument` | No |
//! | URL, query and body construction | `Url`, `Encode` | No |
//! | Request options, in order | `RequestOption` | No |
//! | One transport exchange | `Transport` | Yes |
//! | Status branch | `Status` | Yes |
//! | Success decoding | `Decode` | Yes |

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use url::Url;

use super::common::{Error, ErrorBody, Query, Response, Result};
use super::endpoint::Endpoint;
use super::options::RequestOption;
use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::instrument::{Instrumentation, NoopInstrumentation, SpanGuard};
use crate::transport::{HttpTransport, RequestBody, Transport, TransportRequest};

/// Header Kibana requires on every state-changing request.
const KBN_XSRF: HeaderName = HeaderName::from_static("kbn-xsrf");

/// The handle for calling the Kibana API.
///
/// Cloning is cheap; clones share the transport and instrumentation.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use kibana_api::api::ApiClient;
/// use kibana_api::auth::Credentials;
/// use kibana_api::transport::HttpTransport;
///
/// let client = ApiClient::new("https://kibana.example.com", HttpTransport::new()?)?
///     .with_auth(Credentials::api_key("VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw=="))
///     .with_space("security");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Calling Endpoints
///
/// Endpoints are grouped by domain:
///
/// ```rust,no_run
/// use kibana_api::api::ApiClient;
/// use kibana_api::api::cases::GetCaseRequest;
/// use kibana_api::transport::HttpTransport;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
/// let case = client.cases().get_case(&GetCaseRequest::new("a1b2c3"), &[]).await?;
/// println!("{}", case.body.title);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// Kibana base URL, possibly with a base path
    base_url: Url,
    /// Space all requests are scoped to
    space: Option<String>,
    /// Optional authentication credentials
    auth: Option<Credentials>,
    transport: Arc<dyn Transport>,
    instrumentation: Arc<dyn Instrumentation>,
}

impl ApiClient {
    /// Creates a client for the Kibana instance at `base_url`.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Kibana URL; a missing scheme defaults to `http://`
    /// * `transport` - The collaborator performing HTTP exchanges
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str, transport: impl Transport + 'static) -> Result<Self> {
        Self::from_shared(base_url, Arc::new(transport))
    }

    /// Creates a client around a transport that is already shared.
    pub fn from_shared(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = Url::parse(&crate::config::normalize_url(base_url))?;
        Ok(Self {
            base_url,
            space: None,
            auth: None,
            transport,
            instrumentation: Arc::new(NoopInstrumentation),
        })
    }

    /// Creates a client, with an [`HttpTransport`], from connection settings.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kibana_api::api::ApiClient;
    /// use kibana_api::config::ClientConfig;
    ///
    /// let client = ApiClient::from_config(&ClientConfig::from_env())?;
    /// # Ok::<(), kibana_api::api::Error>(())
    /// ```
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = HttpTransport::builder().accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let transport = builder.build().map_err(|e| Error::Transport(Box::new(e)))?;

        let mut client = Self::new(&config.url, transport)?;
        client.auth = config.credentials();
        if let Some(space) = &config.space {
            client = client.with_space(space.clone());
        }
        Ok(client)
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: Credentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Scopes every request to the given space.
    ///
    /// The default space needs no prefix, so `"default"` clears the scope.
    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        let space = space.into();
        self.space = match space.trim() {
            "" | "default" => None,
            trimmed => Some(trimmed.to_string()),
        };
        self
    }

    /// Replaces the instrumentation (a no-op by default).
    pub fn with_instrumentation(mut self, instrumentation: impl Instrumentation + 'static) -> Self {
        self.instrumentation = Arc::new(instrumentation);
        self
    }

    /// The Kibana base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The space requests are scoped to, if any.
    pub fn space(&self) -> Option<&str> {
        self.space.as_deref()
    }

    /// Builds the absolute URL for `path`, including the space prefix.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let mut full = url.path().trim_end_matches('/').to_string();
        if let Some(space) = &self.space {
            full.push_str("/s/");
            full.push_str(space);
        }
        full.push_str(path);
        url.set_path(&full);
        url.set_query(None);
        url
    }

    /// Runs one endpoint call.
    ///
    /// `request` may be `None` only for endpoints with no required input;
    /// otherwise the call fails with [`Error::NilArgument`] before any I/O.
    ///
    /// # Errors
    ///
    /// See the module documentation. Every error after the span opens is also
    /// reported to the instrumentation.
    pub async fn execute<E: Endpoint>(
        &self,
        request: Option<&E>,
        options: &[RequestOption],
    ) -> Result<Response<E::Response>> {
        let fallback;
        let endpoint = match request {
            Some(endpoint) => endpoint,
            None => {
                fallback = E::empty().ok_or(Error::NilArgument {
                    endpoint: E::NAME,
                    argument: "request",
                })?;
                &fallback
            }
        };
        endpoint.validate()?;

        let mut guard = SpanGuard::new(self.instrumentation.start(E::NAME));
        let result = self.run(endpoint, options, &mut guard).await;
        if let Err(err) = &result {
            guard.span().record_error(err);
        }
        result
    }

    async fn run<E: Endpoint>(
        &self,
        endpoint: &E,
        options: &[RequestOption],
        guard: &mut SpanGuard,
    ) -> Result<Response<E::Response>> {
        let mut url = self.url_for(&endpoint.path());
        let mut query = Query::new();
        endpoint.query(&mut query)?;
        query.apply_to(&mut url);

        let mut request = TransportRequest::new(E::METHOD, url);
        request.body = endpoint.body()?;
        if let Some(RequestBody::Bytes(_)) = &request.body {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        request.headers.insert(KBN_XSRF, HeaderValue::from_static("true"));
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth {
            auth.apply_to_headers(&mut request.headers)?;
        }

        for option in options {
            option.apply(&mut request)?;
        }

        let span = guard.span();
        span.before_request(&request);
        request.body = match request.body.take() {
            Some(RequestBody::Bytes(bytes)) => Some(RequestBody::Bytes(span.record_request_body(bytes))),
            other => other,
        };

        tracing::debug!(endpoint = E::NAME, method = %request.method, url = %request.url, "Dispatching request");
        let outcome = self.transport.perform(request).await;
        guard
            .span()
            .after_request(outcome.as_ref().ok().map(|response| response.status));
        let response = outcome.map_err(Error::Transport)?;

        tracing::debug!(endpoint = E::NAME, status = %response.status, "Received response");

        if !E::is_success(response.status) {
            let error = ErrorBody::parse(&response.body);
            tracing::warn!(endpoint = E::NAME, status = %response.status, "Request failed");
            return Err(Error::Status {
                status_code: response.status,
                error,
            });
        }

        let body = E::decode(&response.body)?;
        Ok(Response {
            status_code: response.status,
            headers: response.headers,
            body,
            raw_body: response.body,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("space", &self.space)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let transport = HttpTransport::new().unwrap();
        ApiClient::new(base, transport).unwrap()
    }

    #[test]
    fn test_url_for_plain() {
        let url = client("http://localhost:5601").url_for("/api/status");
        assert_eq!(url.as_str(), "http://localhost:5601/api/status");
    }

    #[test]
    fn test_url_for_space_and_base_path() {
        let url = client("https://proxy.example.com/kibana/")
            .with_space("ops")
            .url_for("/api/cases/_find");
        assert_eq!(url.as_str(), "https://proxy.example.com/kibana/s/ops/api/cases/_find");
    }

    #[test]
    fn test_default_space_has_no_prefix() {
        let client = client("localhost:5601").with_space("default");
        assert_eq!(client.space(), None);
        assert_eq!(client.url_for("/api/spaces/space").path(), "/api/spaces/space");
    }

    #[test]
    fn test_space_is_trimmed() {
        let client = client("http://localhost:5601").with_space(" ops ");
        assert_eq!(client.space(), Some("ops"));
        assert_eq!(client.url_for("/api/status").path(), "/s/ops/api/status");
    }

    #[test]
    fn test_path_is_encoded() {
        let url = client("http://localhost:5601").url_for("/api/cases/a b");
        assert_eq!(url.path(), "/api/cases/a%20b");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = client("http://localhost:5601").with_auth(Credentials::bearer("secret-token"));
        assert!(!format!("{:?}", client).contains("secret-token"));
    }
}
