//
//  kibana-api
//  instrument/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Call Instrumentation
//!
//! Optional observability hooks invoked around every API call. Instrumentation
//! is purely observational: hooks cannot fail a call or change its outcome.
//!
//! An [`ApiClient`](crate::api::ApiClient) holds exactly one [`Instrumentation`],
//! [`NoopInstrumentation`] unless another is supplied with
//! [`ApiClient::with_instrumentation`](crate::api::ApiClient::with_instrumentation).
//!
//! ## Call Sequence
//!
//! For each call the client opens a [`Span`] and drives it as follows:
//!
//! ```text
//! start(endpoint)
//!   -> before_request(request)
//!   -> record_request_body(body)     (byte bodies only)
//!   -> after_request(status)         (status is None on transport failure)
//!   -> record_error(error)           (any failure after start)
//! close()                            (always, on every exit path)
//! ```
//!
//! ## Provided Implementations
//!
//! - [`NoopInstrumentation`]: does nothing
//! - [`TracingInstrumentation`]: emits `tracing` spans and events

mod logging;

pub use logging::TracingInstrumentation;

use bytes::Bytes;
use reqwest::StatusCode;

use crate::api::common::Error;
use crate::transport::TransportRequest;

/// Factory for per-call [`Span`]s.
pub trait Instrumentation: Send + Sync {
    /// Opens a span for one call to `endpoint` (e.g. `cases.get_case`).
    fn start(&self, endpoint: &'static str) -> Box<dyn Span>;
}

/// Hooks for a single call. Every method has a no-op default.
pub trait Span: Send {
    /// Called with the fully built request, just before dispatch.
    fn before_request(&mut self, _request: &TransportRequest) {}

    /// Called with the request body before dispatch. The returned bytes are
    /// what gets sent, so implementations that capture the body must return it
    /// unchanged.
    fn record_request_body(&mut self, body: Bytes) -> Bytes {
        body
    }

    /// Called once the transport returns. `status` is `None` when the
    /// transport failed.
    fn after_request(&mut self, _status: Option<StatusCode>) {}

    /// Called with any error the call is about to return.
    fn record_error(&mut self, _error: &Error) {}

    /// Called exactly once when the call finishes.
    fn close(&mut self) {}
}

/// Instrumentation that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

struct NoopSpan;

impl Span for NoopSpan {}

impl Instrumentation for NoopInstrumentation {
    fn start(&self, _endpoint: &'static str) -> Box<dyn Span> {
        Box::new(NoopSpan)
    }
}

/// Closes the wrapped span when dropped.
pub(crate) struct SpanGuard {
    span: Box<dyn Span>,
}

impl SpanGuard {
    pub(crate) fn new(span: Box<dyn Span>) -> Self {
        Self { span }
    }

    pub(crate) fn span(&mut self) -> &mut dyn Span {
        self.span.as_mut()
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        self.span.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct CountingSpan {
        closes: Arc<Mutex<u32>>,
    }

    impl Span for CountingSpan {
        fn close(&mut self) {
            *self.closes.lock().unwrap() += 1;
        }
    }

    #[test]
    fn test_guard_closes_once_on_drop() {
        let closes = Arc::new(Mutex::new(0));
        {
            let mut guard = SpanGuard::new(Box::new(CountingSpan {
                closes: closes.clone(),
            }));
            guard.span().after_request(Some(StatusCode::OK));
        }
        assert_eq!(*closes.lock().unwrap(), 1);
    }

    #[test]
    fn test_noop_span_passes_body_through() {
        let mut span = NoopInstrumentation.start("status.get_status");
        let body = span.record_request_body(Bytes::from_static(b"{}"));
        assert_eq!(body.as_ref(), b"{}");
    }
}
