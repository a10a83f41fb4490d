//
//  kibana-api
//  tests/call_contract.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use common::{recording_client, RecordingTransport};
use kibana_api::api::cases::{CaseComment, GetCaseRequest, GetCommentRequest};
use kibana_api::api::detection_engine::ReadRuleRequest;
use kibana_api::api::options::{with_header, with_query, RequestOption};
use kibana_api::api::spaces::{CreateSpaceRequest, Space};
use kibana_api::api::Error;
use kibana_api::auth::Credentials;
use reqwest::Method;

#[tokio::test]
async fn test_missing_required_request_never_reaches_transport() {
    let transport = RecordingTransport::new(200, "{}");
    let (client, instrumentation) = recording_client(transport.clone());

    let err = client.execute::<ReadRuleRequest>(None, &[]).await.unwrap_err();

    assert!(matches!(
        err,
        Error::NilArgument {
            endpoint: "detection_engine.read_rule",
            ..
        }
    ));
    assert_eq!(transport.calls(), 0);
    assert!(instrumentation.events().is_empty());
}

#[tokio::test]
async fn test_empty_path_parameter_is_rejected_before_io() {
    let transport = RecordingTransport::new(200, "{}");
    let (client, _) = recording_client(transport.clone());

    let err = client
        .cases()
        .get_case(&GetCaseRequest::new(""), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_failing_option_aborts_call() {
    let transport = RecordingTransport::new(200, "{}");
    let (client, instrumentation) = recording_client(transport.clone());
    let reject = RequestOption::new(|_| Err(Error::RequestOption("rejected".into())));

    let err = client
        .status()
        .get_status(None, &[with_header("x-first", "1"), reject])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RequestOption(_)));
    assert_eq!(transport.calls(), 0);
    assert_eq!(
        instrumentation.events(),
        vec!["start status.get_status", "error option", "close"]
    );
}

#[tokio::test]
async fn test_instrumentation_sequence_on_success() {
    let transport = RecordingTransport::new(200, r#"{"id":"ops","name":"Ops"}"#);
    let (client, instrumentation) = recording_client(transport.clone());
    let request = CreateSpaceRequest {
        space: Space::new("ops", "Ops"),
    };

    let space = client.spaces().create_space(&request, &[]).await.unwrap();

    assert_eq!(space.body.id, "ops");
    let events = instrumentation.events();
    assert_eq!(events[0], "start spaces.create_space");
    assert_eq!(events[1], "before POST /api/spaces/space");
    assert!(events[2].starts_with("body {"));
    assert_eq!(events[3], "after 200");
    assert_eq!(events[4], "close");
    assert_eq!(events.len(), 5);
}

#[tokio::test]
async fn test_instrumentation_records_status_error() {
    let transport = RecordingTransport::new(404, r#"{"statusCode":404,"error":"Not Found","message":"Saved object [cases/x] not found"}"#);
    let (client, instrumentation) = recording_client(transport.clone());

    let err = client
        .cases()
        .get_case(&GetCaseRequest::new("x"), &[])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.error_body().and_then(|body| body.message()),
        Some("Saved object [cases/x] not found")
    );
    assert_eq!(
        instrumentation.events(),
        vec!["start cases.get_case", "before GET /api/cases/x", "after 404", "error status", "close"]
    );
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let transport = RecordingTransport::failing();
    let (client, instrumentation) = recording_client(transport.clone());

    let err = client.status().get_status(None, &[]).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(transport.calls(), 1);
    assert!(instrumentation.events().contains(&"after none".to_string()));
    assert!(instrumentation.events().contains(&"error transport".to_string()));
}

#[tokio::test]
async fn test_decode_failure_keeps_status_out_of_error() {
    let transport = RecordingTransport::new(200, "not json");
    let (client, instrumentation) = recording_client(transport);

    let err = client.status().get_status(None, &[]).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert!(instrumentation.events().contains(&"error decode".to_string()));
}

#[tokio::test]
async fn test_default_headers_then_options() {
    let transport = RecordingTransport::new(200, r#"{"name":"kb","uuid":"u","version":{"number":"8.15.0"},"status":{"overall":{"level":"available"}}}"#);
    let (client, _) = recording_client(transport.clone());
    let client = client.with_auth(Credentials::bearer("tok"));

    client
        .status()
        .get_status(None, &[with_header("kbn-xsrf", "custom"), with_query("trace", "1")])
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.headers["kbn-xsrf"], "custom");
    assert_eq!(request.headers["authorization"], "Bearer tok");
    assert_eq!(request.url.query(), Some("trace=1"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_polymorphic_response_resolves_by_tag() {
    let transport = RecordingTransport::new(
        200,
        r#"{"id":"c1","version":"WzEsMV0=","type":"alert","alertId":["a1","a2"],"index":"logs",
            "rule":{"id":"r1","name":"Rule"},"owner":"securitySolution"}"#,
    );
    let (client, _) = recording_client(transport.clone());
    let request = GetCommentRequest {
        case_id: "case-1".into(),
        comment_id: "c1".into(),
    };

    let comment = client.cases().get_comment(&request, &[]).await.unwrap().into_body();

    assert_eq!(transport.last().url.path(), "/api/cases/case-1/comments/c1");
    match comment.resolve().unwrap() {
        CaseComment::Alert(alert) => assert_eq!(alert.alert_id.into_vec(), vec!["a1", "a2"]),
        other => panic!("unexpected {:?}", other),
    }
}
