//
//  kibana-api
//  api/cases/case.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Case resource types and the case-level endpoints.
//!
//! # Case Statuses
//!
//! * `open` - Newly created or reopened
//! * `in-progress` - Being worked on
//! * `closed` - Resolved
//!
//! # Severities
//!
//! * `low`, `medium`, `high`, `critical`

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::comments::CaseComment;
use super::connectors::{CaseConnector, ConnectorBase};
use super::user_actions::Assignee;
use crate::api::common::{Error, Query, RawPayload, Result, UserRef};
use crate::api::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use crate::transport::RequestBody;

/// Case settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseSettings {
    /// Sync the status of attached alerts with the case status.
    #[serde(rename = "syncAlerts")]
    pub sync_alerts: bool,
}

impl Default for CaseSettings {
    fn default() -> Self {
        Self { sync_alerts: true }
    }
}

/// Where and when a case was last pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalService {
    pub connector_id: String,
    pub connector_name: String,
    pub external_id: String,
    pub external_title: String,
    pub external_url: String,
    pub pushed_at: DateTime<Utc>,
    #[serde(default)]
    pub pushed_by: Option<UserRef>,
}

/// A case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: String,

    /// Optimistic concurrency token; required when updating.
    pub version: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: String,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub owner: String,

    /// External connector, resolved on demand.
    pub connector: RawPayload<CaseConnector>,

    #[serde(default)]
    pub settings: CaseSettings,

    #[serde(default)]
    pub assignees: Vec<Assignee>,

    #[serde(default)]
    pub category: Option<String>,

    /// Comments, present when requested or after adding one.
    #[serde(default)]
    pub comments: Vec<RawPayload<CaseComment>>,

    #[serde(default, rename = "totalComment")]
    pub total_comment: u64,

    #[serde(default, rename = "totalAlerts")]
    pub total_alerts: u64,

    pub created_at: DateTime<Utc>,
    pub created_by: UserRef,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<UserRef>,

    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_by: Option<UserRef>,

    /// Seconds from creation to closing.
    #[serde(default)]
    pub duration: Option<u64>,

    #[serde(default)]
    pub external_service: Option<ExternalService>,
}

impl Case {
    /// Returns `true` when the case is closed.
    pub fn is_closed(&self) -> bool {
        self.status == "closed"
    }
}

/// Body for creating a case.
#[derive(Debug, Clone, Serialize)]
pub struct NewCase {
    pub title: String,
    pub description: String,
    pub owner: String,
    pub tags: Vec<String>,
    pub connector: RawPayload<CaseConnector>,
    pub settings: CaseSettings,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Assignee>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewCase {
    /// A case with no tags and no external connector.
    pub fn new(title: impl Into<String>, description: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            description: description.into(),
            owner: owner.into(),
            tags: Vec::new(),
            connector: none_connector()?,
            settings: CaseSettings::default(),
            severity: None,
            assignees: Vec::new(),
            category: None,
        })
    }
}

fn none_connector() -> Result<RawPayload<CaseConnector>> {
    let base = ConnectorBase::none();
    RawPayload::from_value(&serde_json::json!({
        "id": base.id,
        "name": base.name,
        "type": base.connector_type,
        "fields": null,
    }))
}

/// Request for `POST /api/cases`.
#[derive(Debug, Clone)]
pub struct CreateCaseRequest {
    pub body: NewCase,
}

impl Endpoint for CreateCaseRequest {
    type Response = Case;
    const NAME: &'static str = "cases.create_case";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/api/cases".to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.body.title, "body.title")?;
        require(&self.body.owner, "body.owner")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/cases/{case_id}`.
#[derive(Debug, Clone)]
pub struct GetCaseRequest {
    pub case_id: String,
    /// Deprecated by Kibana but still honored.
    pub include_comments: Option<bool>,
}

impl GetCaseRequest {
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            include_comments: None,
        }
    }
}

impl Endpoint for GetCaseRequest {
    type Response = Case;
    const NAME: &'static str = "cases.get_case";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}", self.case_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("includeComments", self.include_comments);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// One case's changes in a bulk update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CasePatch {
    pub id: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<RawPayload<CaseConnector>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CaseSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<Assignee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request for `PATCH /api/cases`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCasesRequest {
    pub cases: Vec<CasePatch>,
}

impl Endpoint for UpdateCasesRequest {
    type Response = Vec<Case>;
    const NAME: &'static str = "cases.update_cases";
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        "/api/cases".to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(self)
    }

    fn validate(&self) -> Result<()> {
        if self.cases.is_empty() {
            return Err(Error::InvalidArgument("cases cannot be empty".into()));
        }
        for patch in &self.cases {
            require(&patch.id, "cases[].id")?;
            require(&patch.version, "cases[].version")?;
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/cases?ids=[...]`.
#[derive(Debug, Clone)]
pub struct DeleteCasesRequest {
    pub ids: Vec<String>,
}

impl Endpoint for DeleteCasesRequest {
    type Response = ();
    const NAME: &'static str = "cases.delete_cases";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        "/api/cases".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.json("ids", Some(&self.ids))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.ids.is_empty() {
            return Err(Error::InvalidArgument("ids cannot be empty".into()));
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Result of a case search, with counts by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasesPage {
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count_open_cases: u64,
    #[serde(default)]
    pub count_in_progress_cases: u64,
    #[serde(default)]
    pub count_closed_cases: u64,
}

impl CasesPage {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }
}

/// Request for `GET /api/cases/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindCasesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub search_fields: Vec<String>,
    /// `AND` or `OR`.
    pub default_search_operator: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub tags: Vec<String>,
    pub owner: Vec<String>,
    pub reporters: Vec<String>,
    /// User profile uids.
    pub assignees: Vec<String>,
    pub category: Vec<String>,
    /// `createdAt`, `updatedAt`, `closedAt`, `title`, `status`, `severity`, ...
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    /// Lower bound of `created_at`, date math allowed (`now-1d`).
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Endpoint for FindCasesRequest {
    type Response = CasesPage;
    const NAME: &'static str = "cases.find_cases";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/cases/_find".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("perPage", self.per_page)
            .opt("search", self.search.as_deref())
            .list("searchFields", &self.search_fields)
            .opt("defaultSearchOperator", self.default_search_operator.as_deref())
            .opt("status", self.status.as_deref())
            .opt("severity", self.severity.as_deref())
            .list("tags", &self.tags)
            .list("owner", &self.owner)
            .list("reporters", &self.reporters)
            .list("assignees", &self.assignees)
            .list("category", &self.category)
            .opt("sortField", self.sort_field.as_deref())
            .opt("sortOrder", self.sort_order.as_deref())
            .opt("from", self.from.as_deref())
            .opt("to", self.to.as_deref());
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// An alert attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAlert {
    pub id: String,
    pub index: String,
    #[serde(default)]
    pub attached_at: Option<DateTime<Utc>>,
}

/// Request for `GET /api/cases/{case_id}/alerts`.
#[derive(Debug, Clone)]
pub struct GetCaseAlertsRequest {
    pub case_id: String,
}

impl Endpoint for GetCaseAlertsRequest {
    type Response = Vec<CaseAlert>;
    const NAME: &'static str = "cases.get_case_alerts";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}/alerts", self.case_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Short form of a case an alert is attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedCase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub totals: Option<serde_json::Value>,
}

/// Request for `GET /api/cases/alerts/{alert_id}`.
#[derive(Debug, Clone)]
pub struct GetCasesByAlertRequest {
    pub alert_id: String,
    pub owner: Option<String>,
}

impl Endpoint for GetCasesByAlertRequest {
    type Response = Vec<RelatedCase>;
    const NAME: &'static str = "cases.get_cases_by_alert";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/alerts/{}", self.alert_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("owner", self.owner.as_deref());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.alert_id, "alert_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/cases/{case_id}/connector/{connector_id}/_push`.
#[derive(Debug, Clone)]
pub struct PushCaseRequest {
    pub case_id: String,
    pub connector_id: String,
}

impl Endpoint for PushCaseRequest {
    type Response = Case;
    const NAME: &'static str = "cases.push_case";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/api/cases/{}/connector/{}/_push", self.case_id, self.connector_id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&serde_json::json!({}))
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")?;
        require(&self.connector_id, "connector_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/cases/tags`.
#[derive(Debug, Clone, Default)]
pub struct GetTagsRequest {
    pub owner: Vec<String>,
}

impl Endpoint for GetTagsRequest {
    type Response = Vec<String>;
    const NAME: &'static str = "cases.get_tags";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/cases/tags".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.list("owner", &self.owner);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/cases/reporters`.
#[derive(Debug, Clone, Default)]
pub struct GetReportersRequest {
    pub owner: Vec<String>,
}

impl Endpoint for GetReportersRequest {
    type Response = Vec<UserRef>;
    const NAME: &'static str = "cases.get_reporters";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/cases/reporters".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.list("owner", &self.owner);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE: &[u8] = br#"{
        "id": "c1", "version": "WzIsMV0=", "title": "Phishing", "description": "mail",
        "status": "open", "severity": "high", "tags": ["phish"], "owner": "securitySolution",
        "connector": {"id": "none", "name": "none", "type": ".none", "fields": null},
        "settings": {"syncAlerts": false},
        "comments": [{"type": "user", "id": "k1", "comment": "on it", "owner": "securitySolution"}],
        "totalComment": 1, "totalAlerts": 0,
        "created_at": "2024-03-01T12:00:00.000Z", "created_by": {"username": "elastic", "full_name": null, "email": null},
        "updated_at": null, "updated_by": null, "closed_at": null, "closed_by": null,
        "external_service": null, "duration": null
    }"#;

    #[test]
    fn test_decode_case() {
        let case = GetCaseRequest::decode(&Bytes::from_static(CASE)).unwrap();
        assert_eq!(case.title, "Phishing");
        assert!(!case.settings.sync_alerts);
        assert!(!case.is_closed());
        assert!(matches!(case.connector.resolve().unwrap(), CaseConnector::None(_)));
        assert!(matches!(case.comments[0].resolve().unwrap(), CaseComment::User(_)));
    }

    #[test]
    fn test_new_case_uses_none_connector() {
        let body = CreateCaseRequest {
            body: NewCase::new("t", "d", "cases").unwrap(),
        }
        .body()
        .unwrap()
        .unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert_eq!(json["connector"]["type"], ".none");
        assert_eq!(json["settings"]["syncAlerts"], true);
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn test_delete_cases_ids_are_json() {
        let request = DeleteCasesRequest {
            ids: vec!["a".into(), "b".into()],
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs(), &[("ids".to_string(), r#"["a","b"]"#.to_string())]);
    }

    #[test]
    fn test_update_requires_version() {
        let request = UpdateCasesRequest {
            cases: vec![CasePatch {
                id: "c1".into(),
                ..Default::default()
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_find_query_omits_unset() {
        let request = FindCasesRequest {
            page: Some(5),
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs(), &[("page".to_string(), "5".to_string())]);
    }
}
