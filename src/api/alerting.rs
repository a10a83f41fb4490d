//
//  kibana-api
//  api/alerting.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Alerting rule endpoints (`/api/alerting`).
//!
//! Rule `params` depend on the rule type and are kept as raw JSON values.
//!
//! # Example
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::alerting::FindRulesRequest;
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
//! let request = FindRulesRequest {
//!     search: Some("cpu".into()),
//!     per_page: Some(50),
//!     ..Default::default()
//! };
//! let page = client.alerting().find_rules(Some(&request), &[]).await?.into_body();
//! for rule in &page.data {
//!     println!("{} ({})", rule.name, rule.rule_type_id);
//! }
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{FindResponse, Query, Response, Result};
use super::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use super::options::RequestOption;
use crate::transport::RequestBody;

/// How often a rule runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Interval such as `1m` or `1h`.
    pub interval: String,
}

/// An action fired by a rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    /// Connector id.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default)]
    pub params: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<serde_json::Value>,

    /// Filled in by Kibana.
    #[serde(default, skip_serializing)]
    pub connector_type_id: Option<String>,
}

/// Status of the last rule run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatus {
    /// `ok`, `active`, `error`, `pending`, `unknown` or `warning`.
    pub status: String,

    #[serde(default)]
    pub last_execution_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_duration: Option<u64>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// An alerting rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub rule_type_id: String,
    pub consumer: String,
    pub enabled: bool,
    pub schedule: Schedule,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub params: serde_json::Value,

    #[serde(default)]
    pub actions: Vec<RuleAction>,

    #[serde(default)]
    pub notify_when: Option<String>,

    #[serde(default)]
    pub throttle: Option<String>,

    #[serde(default)]
    pub mute_all: bool,

    #[serde(default)]
    pub muted_alert_ids: Vec<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub updated_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub execution_status: Option<ExecutionStatus>,

    #[serde(default)]
    pub revision: Option<u64>,
}

/// Body for creating a rule.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRuleBody {
    pub name: String,
    pub rule_type_id: String,
    pub consumer: String,
    pub schedule: Schedule,
    pub params: serde_json::Value,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<RuleAction>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_when: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle: Option<String>,
}

/// Body for updating a rule. Type and consumer cannot change.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRuleBody {
    pub name: String,
    pub schedule: Schedule,
    pub params: serde_json::Value,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<RuleAction>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_when: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle: Option<String>,
}

/// Request for `GET /api/alerting/rule/{id}`.
#[derive(Debug, Clone)]
pub struct GetRuleRequest {
    pub id: String,
}

impl Endpoint for GetRuleRequest {
    type Response = Rule;
    const NAME: &'static str = "alerting.get_rule";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/alerting/rule/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/alerting/rule[/{id}]`.
#[derive(Debug, Clone)]
pub struct CreateRuleRequest {
    /// Optional id to create the rule with.
    pub id: Option<String>,
    pub body: CreateRuleBody,
}

impl Endpoint for CreateRuleRequest {
    type Response = Rule;
    const NAME: &'static str = "alerting.create_rule";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("/api/alerting/rule/{}", id),
            None => "/api/alerting/rule".to_string(),
        }
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.body.name, "body.name")?;
        require(&self.body.rule_type_id, "body.rule_type_id")?;
        require(&self.body.consumer, "body.consumer")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PUT /api/alerting/rule/{id}`.
#[derive(Debug, Clone)]
pub struct UpdateRuleRequest {
    pub id: String,
    pub body: UpdateRuleBody,
}

impl Endpoint for UpdateRuleRequest {
    type Response = Rule;
    const NAME: &'static str = "alerting.update_rule";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/api/alerting/rule/{}", self.id)
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

/// Request for `DELETE /api/alerting/rule/{id}`.
#[derive(Debug, Clone)]
pub struct DeleteRuleRequest {
    pub id: String,
}

impl Endpoint for DeleteRuleRequest {
    type Response = ();
    const NAME: &'static str = "alerting.delete_rule";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/alerting/rule/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Request for `GET /api/alerting/rules/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindRulesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    /// `AND` or `OR`.
    pub default_search_operator: Option<String>,
    pub search_fields: Vec<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    /// KQL filter, e.g. `alert.attributes.tags:"prod"`.
    pub filter: Option<String>,
    pub fields: Vec<String>,
}

impl Endpoint for FindRulesRequest {
    type Response = FindResponse<Rule>;
    const NAME: &'static str = "alerting.find_rules";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/alerting/rules/_find".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("per_page", self.per_page)
            .opt("search", self.search.as_deref())
            .opt("default_search_operator", self.default_search_operator.as_deref())
            .list("search_fields", &self.search_fields)
            .opt("sort_field", self.sort_field.as_deref())
            .opt("sort_order", self.sort_order.as_deref())
            .opt("filter", self.filter.as_deref())
            .list("fields", &self.fields);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/alerting/rule/{id}/_enable`.
#[derive(Debug, Clone)]
pub struct EnableRuleRequest {
    pub id: String,
}

impl Endpoint for EnableRuleRequest {
    type Response = ();
    const NAME: &'static str = "alerting.enable_rule";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/api/alerting/rule/{}/_enable", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Request for `POST /api/alerting/rule/{id}/_disable`.
#[derive(Debug, Clone)]
pub struct DisableRuleRequest {
    pub id: String,
    /// Mark active alerts as untracked.
    pub untrack: Option<bool>,
}

impl Endpoint for DisableRuleRequest {
    type Response = ();
    const NAME: &'static str = "alerting.disable_rule";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/api/alerting/rule/{}/_disable", self.id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        match self.untrack {
            Some(untrack) => json_body(&serde_json::json!({ "untrack": untrack })),
            None => Ok(None),
        }
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Health of the alerting framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingHealth {
    pub is_sufficiently_secure: bool,
    pub has_permanent_encryption_key: bool,

    #[serde(default)]
    pub alerting_framework_health: serde_json::Value,
}

/// Request for `GET /api/alerting/_health`.
#[derive(Debug, Clone, Default)]
pub struct GetHealthRequest;

impl Endpoint for GetHealthRequest {
    type Response = AlertingHealth;
    const NAME: &'static str = "alerting.get_health";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/alerting/_health".to_string()
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Alerting endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AlertingApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Alerting endpoints.
    pub fn alerting(&self) -> AlertingApi<'_> {
        AlertingApi { client: self }
    }
}

impl AlertingApi<'_> {
    pub async fn get_rule(&self, request: &GetRuleRequest, options: &[RequestOption]) -> Result<Response<Rule>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn create_rule(&self, request: &CreateRuleRequest, options: &[RequestOption]) -> Result<Response<Rule>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_rule(&self, request: &UpdateRuleRequest, options: &[RequestOption]) -> Result<Response<Rule>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_rule(&self, request: &DeleteRuleRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    /// Searches rules. `None` returns the first page with server defaults.
    pub async fn find_rules(
        &self,
        request: Option<&FindRulesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<FindResponse<Rule>>> {
        self.client.execute(request, options).await
    }

    pub async fn enable_rule(&self, request: &EnableRuleRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn disable_rule(&self, request: &DisableRuleRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_health(&self, options: &[RequestOption]) -> Result<Response<AlertingHealth>> {
        self.client.execute::<GetHealthRequest>(None, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_query_comma_joins_lists() {
        let request = FindRulesRequest {
            page: Some(2),
            search_fields: vec!["name".into(), "tags".into()],
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(
            query.pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("search_fields".to_string(), "name,tags".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_path_with_and_without_id() {
        let body = CreateRuleBody {
            name: "cpu".into(),
            rule_type_id: ".index-threshold".into(),
            consumer: "alerts".into(),
            schedule: Schedule { interval: "1m".into() },
            params: serde_json::json!({}),
            actions: vec![],
            tags: vec![],
            enabled: None,
            notify_when: None,
            throttle: None,
        };
        let mut request = CreateRuleRequest { id: None, body };
        assert_eq!(request.path(), "/api/alerting/rule");
        request.id = Some("r1".into());
        assert_eq!(request.path(), "/api/alerting/rule/r1");
    }

    #[test]
    fn test_decode_rule() {
        let raw = Bytes::from_static(
            br#"{"id":"r1","name":"cpu","rule_type_id":".index-threshold","consumer":"alerts",
                "enabled":true,"schedule":{"interval":"1m"},"params":{"threshold":[10]},
                "execution_status":{"status":"ok","last_execution_date":"2024-01-01T00:00:00.000Z"}}"#,
        );
        let rule = GetRuleRequest::decode(&raw).unwrap();
        assert_eq!(rule.schedule.interval, "1m");
        assert_eq!(rule.execution_status.unwrap().status, "ok");
    }

    #[test]
    fn test_disable_body_only_when_untrack_set() {
        let request = DisableRuleRequest { id: "r1".into(), untrack: None };
        assert!(request.body().unwrap().is_none());
    }
}
