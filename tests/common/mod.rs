//
//  kibana-api
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use kibana_api::api::{ApiClient, Error};
use kibana_api::instrument::{Instrumentation, Span};
use kibana_api::transport::{Transport, TransportError, TransportRequest, TransportResponse};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Transport that records requests and answers with a canned response.
pub struct RecordingTransport {
    status: StatusCode,
    body: Bytes,
    fail: bool,
    pub requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::from_static(body.as_bytes()),
            fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A transport whose every exchange fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::OK,
            body: Bytes::new(),
            fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err("connection refused".into());
        }
        Ok(TransportResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
        })
    }
}

/// Instrumentation that logs every hook as a line of text.
#[derive(Clone, Default)]
pub struct RecordingInstrumentation {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingInstrumentation {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct RecordingSpan {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpan {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Instrumentation for RecordingInstrumentation {
    fn start(&self, endpoint: &'static str) -> Box<dyn Span> {
        self.events.lock().unwrap().push(format!("start {}", endpoint));
        Box::new(RecordingSpan {
            events: self.events.clone(),
        })
    }
}

impl Span for RecordingSpan {
    fn before_request(&mut self, request: &TransportRequest) {
        self.push(format!("before {} {}", request.method, request.url.path()));
    }

    fn record_request_body(&mut self, body: Bytes) -> Bytes {
        self.push(format!("body {}", String::from_utf8_lossy(&body)));
        body
    }

    fn after_request(&mut self, status: Option<StatusCode>) {
        match status {
            Some(status) => self.push(format!("after {}", status.as_u16())),
            None => self.push("after none".to_string()),
        }
    }

    fn record_error(&mut self, error: &Error) {
        let kind = match error {
            Error::Status { .. } => "status",
            Error::Transport(_) => "transport",
            Error::Decode(_) => "decode",
            Error::RequestOption(_) => "option",
            _ => "other",
        };
        self.push(format!("error {}", kind));
    }

    fn close(&mut self) {
        self.push("close".to_string());
    }
}

/// A client over `transport` that records instrumentation events.
pub fn recording_client(transport: Arc<RecordingTransport>) -> (ApiClient, RecordingInstrumentation) {
    let instrumentation = RecordingInstrumentation::default();
    let client = ApiClient::from_shared("http://kibana.test:5601", transport)
        .unwrap()
        .with_instrumentation(instrumentation.clone());
    (client, instrumentation)
}
