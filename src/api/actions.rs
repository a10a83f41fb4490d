//
//  kibana-api
//  api/actions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Connector endpoints (`/api/actions`).
//!
//! Connectors are the integrations (email, Slack, Jira, webhooks, ...) that
//! rules and cases use to reach external systems. `config` and `secrets` are
//! connector-type specific and are passed through as JSON values.

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Query, Response, Result};
use super::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use super::options::RequestOption;
use crate::transport::RequestBody;

/// A configured connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
    pub connector_type_id: String,

    #[serde(default)]
    pub config: Option<serde_json::Value>,

    #[serde(default)]
    pub is_preconfigured: bool,

    #[serde(default)]
    pub is_deprecated: bool,

    #[serde(default)]
    pub is_missing_secrets: Option<bool>,

    #[serde(default)]
    pub is_system_action: bool,

    /// Number of rules and cases using the connector (list endpoint only).
    #[serde(default)]
    pub referenced_by_count: Option<u64>,
}

/// A connector type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorType {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub enabled_in_config: bool,

    #[serde(default)]
    pub enabled_in_license: bool,

    #[serde(default)]
    pub minimum_license_required: Option<String>,

    #[serde(default)]
    pub supported_feature_ids: Vec<String>,
}

/// Result of running a connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorRunResult {
    pub connector_id: String,

    /// `ok` or `error`.
    pub status: String,

    #[serde(default)]
    pub data: Option<serde_json::Value>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub service_message: Option<String>,
}

impl ConnectorRunResult {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Request for `GET /api/actions/connector/{id}`.
#[derive(Debug, Clone)]
pub struct GetConnectorRequest {
    pub id: String,
}

impl Endpoint for GetConnectorRequest {
    type Response = Connector;
    const NAME: &'static str = "actions.get_connector";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/actions/connector/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/actions/connectors`.
#[derive(Debug, Clone, Default)]
pub struct GetConnectorsRequest;

impl Endpoint for GetConnectorsRequest {
    type Response = Vec<Connector>;
    const NAME: &'static str = "actions.get_connectors";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/actions/connectors".to_string()
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Body for creating a connector.
#[derive(Debug, Clone, Serialize)]
pub struct CreateConnectorBody {
    pub name: String,
    pub connector_type_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<serde_json::Value>,
}

/// Request for `POST /api/actions/connector[/{id}]`.
#[derive(Debug, Clone)]
pub struct CreateConnectorRequest {
    pub id: Option<String>,
    pub body: CreateConnectorBody,
}

impl Endpoint for CreateConnectorRequest {
    type Response = Connector;
    const NAME: &'static str = "actions.create_connector";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("/api/actions/connector/{}", id),
            None => "/api/actions/connector".to_string(),
        }
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.body.name, "body.name")?;
        require(&self.body.connector_type_id, "body.connector_type_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Body for updating a connector.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateConnectorBody {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<serde_json::Value>,
}

/// Request for `PUT /api/actions/connector/{id}`.
#[derive(Debug, Clone)]
pub struct UpdateConnectorRequest {
    pub id: String,
    pub body: UpdateConnectorBody,
}

impl Endpoint for UpdateConnectorRequest {
    type Response = Connector;
    const NAME: &'static str = "actions.update_connector";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/api/actions/connector/{}", self.id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/actions/connector/{id}`.
#[derive(Debug, Clone)]
pub struct DeleteConnectorRequest {
    pub id: String,
}

impl Endpoint for DeleteConnectorRequest {
    type Response = ();
    const NAME: &'static str = "actions.delete_connector";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/actions/connector/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Request for `GET /api/actions/connector_types`.
#[derive(Debug, Clone, Default)]
pub struct GetConnectorTypesRequest {
    /// Only types supporting this feature (`alerting`, `cases`, `siem`, ...).
    pub feature_id: Option<String>,
}

impl Endpoint for GetConnectorTypesRequest {
    type Response = Vec<ConnectorType>;
    const NAME: &'static str = "actions.get_connector_types";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/actions/connector_types".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("feature_id", self.feature_id.as_deref());
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/actions/connector/{id}/_execute`.
#[derive(Debug, Clone)]
pub struct RunConnectorRequest {
    pub id: String,
    /// Connector-type specific parameters.
    pub params: serde_json::Value,
}

impl Endpoint for RunConnectorRequest {
    type Response = ConnectorRunResult;
    const NAME: &'static str = "actions.run_connector";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/api/actions/connector/{}/_execute", self.id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&serde_json::json!({ "params": self.params }))
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Connector endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ActionsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Connector endpoints.
    pub fn actions(&self) -> ActionsApi<'_> {
        ActionsApi { client: self }
    }
}

impl ActionsApi<'_> {
    pub async fn get_connector(
        &self,
        request: &GetConnectorRequest,
        options: &[RequestOption],
    ) -> Result<Response<Connector>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_connectors(&self, options: &[RequestOption]) -> Result<Response<Vec<Connector>>> {
        self.client.execute::<GetConnectorsRequest>(None, options).await
    }

    pub async fn create_connector(
        &self,
        request: &CreateConnectorRequest,
        options: &[RequestOption],
    ) -> Result<Response<Connector>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_connector(
        &self,
        request: &UpdateConnectorRequest,
        options: &[RequestOption],
    ) -> Result<Response<Connector>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_connector(
        &self,
        request: &DeleteConnectorRequest,
        options: &[RequestOption],
    ) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_connector_types(
        &self,
        request: Option<&GetConnectorTypesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<Vec<ConnectorType>>> {
        self.client.execute(request, options).await
    }

    /// Runs a connector once with the given parameters.
    pub async fn run_connector(
        &self,
        request: &RunConnectorRequest,
        options: &[RequestOption],
    ) -> Result<Response<ConnectorRunResult>> {
        self.client.execute(Some(request), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_body_wraps_params() {
        let request = RunConnectorRequest {
            id: "c1".into(),
            params: serde_json::json!({"message": "hello"}),
        };
        let body = request.body().unwrap().unwrap();
        assert_eq!(body.as_bytes().unwrap().as_ref(), br#"{"params":{"message":"hello"}}"#);
    }

    #[test]
    fn test_decode_run_result() {
        let raw = Bytes::from_static(br#"{"connector_id":"c1","status":"error","message":"boom"}"#);
        let result = RunConnectorRequest::decode(&raw).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.message.as_deref(), Some("boom"));
    }
}
