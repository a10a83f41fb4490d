//
//  kibana-api
//  instrument/logging.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `tracing`-backed instrumentation.

use std::time::Instant;

use bytes::Bytes;
use reqwest::StatusCode;
use tracing::field::Empty;

use super::{Instrumentation, Span};
use crate::api::common::Error;
use crate::transport::TransportRequest;

/// Emits one `kibana.request` span per call.
///
/// The span carries the endpoint name, method, URL, and final status. Request
/// bodies are logged at `TRACE` when enabled with
/// [`with_request_bodies`](Self::with_request_bodies).
///
/// # Example
///
/// ```rust,no_run
/// use kibana_api::api::ApiClient;
/// use kibana_api::instrument::TracingInstrumentation;
/// use kibana_api::transport::HttpTransport;
///
/// let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?
///     .with_instrumentation(TracingInstrumentation::new().with_request_bodies(true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation {
    request_bodies: bool,
}

impl TracingInstrumentation {
    /// Creates instrumentation that does not log request bodies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `TRACE` logging of request bodies.
    pub fn with_request_bodies(mut self, enabled: bool) -> Self {
        self.request_bodies = enabled;
        self
    }
}

impl Instrumentation for TracingInstrumentation {
    fn start(&self, endpoint: &'static str) -> Box<dyn Span> {
        let span = tracing::info_span!(
            "kibana.request",
            endpoint,
            method = Empty,
            url = Empty,
            status = Empty,
        );
        Box::new(TracingSpan {
            span,
            started: Instant::now(),
            request_bodies: self.request_bodies,
        })
    }
}

struct TracingSpan {
    span: tracing::Span,
    started: Instant,
    request_bodies: bool,
}

impl Span for TracingSpan {
    fn before_request(&mut self, request: &TransportRequest) {
        self.span.record("method", request.method.as_str());
        self.span.record("url", request.url.as_str());
    }

    fn record_request_body(&mut self, body: Bytes) -> Bytes {
        if self.request_bodies {
            self.span.in_scope(|| {
                tracing::trace!(body = %String::from_utf8_lossy(&body), "request body");
            });
        }
        body
    }

    fn after_request(&mut self, status: Option<StatusCode>) {
        if let Some(status) = status {
            self.span.record("status", status.as_u16());
        }
    }

    fn record_error(&mut self, error: &Error) {
        self.span.in_scope(|| {
            tracing::warn!(error = %error, "request failed");
        });
    }

    fn close(&mut self) {
        let elapsed = self.started.elapsed();
        self.span.in_scope(|| {
            tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "request finished");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    #[test]
    fn test_span_hooks_do_not_alter_body() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .try_init();

        let instrumentation = TracingInstrumentation::new().with_request_bodies(true);
        let mut span = instrumentation.start("spaces.get_space");

        let request = TransportRequest::new(
            Method::GET,
            Url::parse("http://localhost:5601/api/spaces/space/default").unwrap(),
        );
        span.before_request(&request);
        let body = span.record_request_body(Bytes::from_static(b"{\"a\":1}"));
        span.after_request(Some(StatusCode::OK));
        span.close();

        assert_eq!(body.as_ref(), b"{\"a\":1}");
    }
}
