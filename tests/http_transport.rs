//
//  kibana-api
//  tests/http_transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use kibana_api::api::alerting::FindRulesRequest;
use kibana_api::api::cases::{CaseConnector, GetCaseRequest};
use kibana_api::api::common::ErrorBody;
use kibana_api::api::exception_lists::{ExportListRequest, ImportListsRequest, NamespaceType};
use kibana_api::api::fleet::DownloadAgentPolicyRequest;
use kibana_api::api::{ApiClient, Error};
use kibana_api::auth::Credentials;
use kibana_api::transport::HttpTransport;
use mockito::Matcher;
use reqwest::StatusCode;

fn client(url: &str) -> ApiClient {
    ApiClient::new(url, HttpTransport::new().unwrap()).unwrap()
}

const CASE: &str = r#"{
    "id": "a1b2c3",
    "version": "WzQ3LDFd",
    "title": "Suspicious login",
    "description": "Multiple failed logins",
    "owner": "securitySolution",
    "status": "open",
    "severity": "low",
    "tags": ["auth"],
    "totalComment": 0,
    "totalAlerts": 0,
    "comments": [],
    "connector": {"id": "none", "name": "none", "type": ".none", "fields": null},
    "settings": {"syncAlerts": true},
    "created_at": "2024-03-01T09:00:00.000Z",
    "created_by": {"username": "elastic", "full_name": null, "email": null}
}"#;

#[tokio::test]
async fn test_success_decodes_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cases/a1b2c3")
        .match_header("kbn-xsrf", "true")
        .match_header("authorization", "ApiKey a2V5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CASE)
        .create_async()
        .await;

    let client = client(&server.url()).with_auth(Credentials::api_key("a2V5"));
    let response = client
        .cases()
        .get_case(&GetCaseRequest::new("a1b2c3"), &[])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status_code, StatusCode::OK);
    assert_eq!(response.body.title, "Suspicious login");
    assert!(matches!(response.body.connector.resolve().unwrap(), CaseConnector::None(_)));
    assert_eq!(&response.raw_body[..], CASE.as_bytes());
}

#[tokio::test]
async fn test_json_error_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(500)
        .with_body(r#"{"error":"Internal Server Error"}"#)
        .create_async()
        .await;

    let err = client(&server.url()).status().get_status(None, &[]).await.unwrap_err();

    assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(
        err.error_body(),
        Some(&ErrorBody::Json(serde_json::json!({"error": "Internal Server Error"})))
    );
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains(r#"{"error":"Internal Server Error"}"#));
}

#[tokio::test]
async fn test_text_error_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/cases/missing")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let err = client(&server.url())
        .cases()
        .get_case(&GetCaseRequest::new("missing"), &[])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::Status { error: ErrorBody::Text(ref text), .. } if text == "Not Found"));
}

#[tokio::test]
async fn test_only_set_query_parameters_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/alerting/rules/_find")
        .match_query(Matcher::Exact("page=5".into()))
        .with_status(200)
        .with_body(r#"{"page":5,"per_page":10,"total":41,"data":[]}"#)
        .create_async()
        .await;

    let request = FindRulesRequest {
        page: Some(5),
        ..Default::default()
    };
    let page = client(&server.url())
        .alerting()
        .find_rules(Some(&request), &[])
        .await
        .unwrap()
        .into_body();

    mock.assert_async().await;
    assert_eq!(page.page, 5);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_space_prefix() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/s/security/api/cases/a1b2c3")
        .with_status(200)
        .with_body(CASE)
        .create_async()
        .await;

    client(&server.url())
        .with_space("security")
        .cases()
        .get_case(&GetCaseRequest::new("a1b2c3"), &[])
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_export_writes_ndjson_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/exception_lists/_export")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "so-1".into()),
            Matcher::UrlEncoded("list_id".into(), "trusted".into()),
            Matcher::UrlEncoded("namespace_type".into(), "single".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/ndjson")
        .with_body("{\"list_id\":\"trusted\"}\n,{\"item_id\":\"a\"}\n\n{\"exported_exception_list_count\":1}\n")
        .create_async()
        .await;

    let request = ExportListRequest::new("so-1", "trusted", NamespaceType::Single);
    let records = client(&server.url())
        .exception_lists()
        .export(&request, &[])
        .await
        .unwrap()
        .into_body();
    mock.assert_async().await;
    assert_eq!(records.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trusted.ndjson");
    records.write_to(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\"list_id\":\"trusted\"}\n{\"item_id\":\"a\"}\n{\"exported_exception_list_count\":1}\n"
    );
}

#[tokio::test]
async fn test_import_uploads_multipart_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/exception_lists/_import")
        .match_query(Matcher::UrlEncoded("overwrite".into(), "true".into()))
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="lists.ndjson""#.into()),
            Matcher::Regex("application/ndjson".into()),
            Matcher::Regex(r#"\{"list_id":"trusted"\}"#.into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"errors":[],"success":true,"success_count":1,"success_exception_lists":true,
                "success_count_exception_lists":1,"success_exception_list_items":true,
                "success_count_exception_list_items":0}"#,
        )
        .create_async()
        .await;

    let request = ImportListsRequest::new("lists.ndjson", "{\"list_id\":\"trusted\"}\n").overwrite(true);
    let summary = client(&server.url())
        .exception_lists()
        .import(&request, &[])
        .await
        .unwrap()
        .into_body();

    mock.assert_async().await;
    assert!(summary.success);
    assert_eq!(summary.success_count_exception_lists, 1);
}

#[tokio::test]
async fn test_yaml_download_passthrough() {
    let yaml = "id: p1\nrevision: 2\noutputs:\n  default:\n    type: elasticsearch\n";
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/fleet/agent_policies/p1/download")
        .with_status(200)
        .with_header("content-type", "text/x-yaml")
        .with_body(yaml)
        .create_async()
        .await;

    let policy = client(&server.url())
        .fleet()
        .download_agent_policy(&DownloadAgentPolicyRequest::new("p1"), &[])
        .await
        .unwrap()
        .into_body();

    assert_eq!(policy.as_str(), yaml);
    assert_eq!(policy.to_yaml().unwrap()["revision"].as_u64(), Some(2));
}
