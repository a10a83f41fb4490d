//
//  kibana-api
//  transport/http.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `reqwest`-backed [`Transport`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::{RequestBody, Transport, TransportError, TransportRequest, TransportResponse};

/// HTTP transport built on a shared [`reqwest::Client`].
///
/// The whole response body is buffered before returning, so callers never
/// hold a live connection after [`Transport::perform`] completes.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use kibana_api::transport::HttpTransport;
///
/// let transport = HttpTransport::builder()
///     .timeout(Duration::from_secs(30))
///     .user_agent("my-tool/1.0")
///     .build()?;
/// # Ok::<(), reqwest::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    /// Returns a builder for customizing the underlying client.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Wraps an already configured `reqwest` client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl HttpTransportBuilder {
    /// Sets a whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Disables TLS certificate verification. Intended for local clusters
    /// running with self-signed certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<HttpTransport, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kibana-api/{}", crate::VERSION));

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        match request.body {
            Some(RequestBody::Bytes(bytes)) => builder = builder.body(bytes),
            Some(RequestBody::Multipart(form)) => {
                let mut multipart = Form::new();
                for part in form.parts {
                    let mut p = Part::bytes(part.data.to_vec());
                    if let Some(file_name) = part.file_name {
                        p = p.file_name(file_name);
                    }
                    if let Some(content_type) = part.content_type {
                        p = p.mime_str(&content_type)?;
                    }
                    multipart = multipart.part(part.name, p);
                }
                builder = builder.multipart(multipart);
            }
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
