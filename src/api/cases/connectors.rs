//
//  kibana-api
//  api/cases/connectors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! External connectors attached to a case.
//!
//! A case's `connector` names the external system the case is pushed to. Its
//! `fields` depend on the connector `type`:
//!
//! | `type` | Variant |
//! |--------|---------|
//! | `.none` | [`CaseConnector::None`] |
//! | `.jira` | [`CaseConnector::Jira`] |
//! | `.servicenow` | [`CaseConnector::ServiceNow`] |
//! | `.servicenow-sir` | [`CaseConnector::ServiceNowSir`] |
//! | `.resilient` | [`CaseConnector::Resilient`] |
//! | `.swimlane` | [`CaseConnector::Swimlane`] |
//! | `.cases-webhook` | [`CaseConnector::CasesWebhook`] |
//! | anything else | [`CaseConnector::Other`] |

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{Query, RawPayload, Result, Tagged};
use crate::api::endpoint::{decode_json, Endpoint};

/// Fields shared by every connector type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorBase {
    /// Connector id, `none` for the `.none` connector.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// The raw `type` value.
    #[serde(default, rename = "type")]
    pub connector_type: String,
}

impl ConnectorBase {
    /// The connector used by cases that are not pushed anywhere.
    pub fn none() -> Self {
        Self {
            id: "none".to_string(),
            name: "none".to_string(),
            connector_type: ".none".to_string(),
        }
    }
}

/// Jira issue fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JiraFields {
    #[serde(default, rename = "issueType")]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// ServiceNow ITSM incident fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceNowFields {
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// ServiceNow SecOps incident fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceNowSirFields {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "destIp")]
    pub dest_ip: Option<bool>,
    #[serde(default, rename = "malwareHash")]
    pub malware_hash: Option<bool>,
    #[serde(default, rename = "malwareUrl")]
    pub malware_url: Option<bool>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, rename = "sourceIp")]
    pub source_ip: Option<bool>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// IBM Resilient fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResilientFields {
    #[serde(default, rename = "issueTypes")]
    pub issue_types: Option<Vec<String>>,
    #[serde(default, rename = "severityCode")]
    pub severity_code: Option<String>,
}

/// Swimlane fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwimlaneFields {
    #[serde(default, rename = "caseId")]
    pub case_id: Option<String>,
}

/// A connector together with its type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedConnector<F> {
    #[serde(flatten)]
    pub base: ConnectorBase,

    /// `null` when no fields are set.
    #[serde(default)]
    pub fields: Option<F>,
}

/// A case connector, resolved by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseConnector {
    None(ConnectorBase),
    Jira(TypedConnector<JiraFields>),
    ServiceNow(TypedConnector<ServiceNowFields>),
    ServiceNowSir(TypedConnector<ServiceNowSirFields>),
    Resilient(TypedConnector<ResilientFields>),
    Swimlane(TypedConnector<SwimlaneFields>),
    /// Webhook connectors carry no fields.
    CasesWebhook(ConnectorBase),
    Other(ConnectorBase),
}

impl CaseConnector {
    /// Fields shared by every connector type.
    pub fn base(&self) -> &ConnectorBase {
        match self {
            Self::None(base) | Self::CasesWebhook(base) | Self::Other(base) => base,
            Self::Jira(c) => &c.base,
            Self::ServiceNow(c) => &c.base,
            Self::ServiceNowSir(c) => &c.base,
            Self::Resilient(c) => &c.base,
            Self::Swimlane(c) => &c.base,
        }
    }
}

impl Tagged for CaseConnector {
    fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
        match tag {
            Some(".none") => serde_json::from_str(raw).map(Self::None),
            Some(".jira") => serde_json::from_str(raw).map(Self::Jira),
            Some(".servicenow") => serde_json::from_str(raw).map(Self::ServiceNow),
            Some(".servicenow-sir") => serde_json::from_str(raw).map(Self::ServiceNowSir),
            Some(".resilient") => serde_json::from_str(raw).map(Self::Resilient),
            Some(".swimlane") => serde_json::from_str(raw).map(Self::Swimlane),
            Some(".cases-webhook") => serde_json::from_str(raw).map(Self::CasesWebhook),
            _ => serde_json::from_str(raw).map(Self::Other),
        }
    }
}

/// Connector returned by the case connectors search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableConnector {
    pub id: String,
    pub name: String,
    #[serde(rename = "actionTypeId")]
    pub action_type_id: String,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
    #[serde(default, rename = "isPreconfigured")]
    pub is_preconfigured: bool,
    #[serde(default, rename = "isDeprecated")]
    pub is_deprecated: bool,
}

/// Request for `GET /api/cases/configure/connectors/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindCaseConnectorsRequest;

impl Endpoint for FindCaseConnectorsRequest {
    type Response = Vec<AvailableConnector>;
    const NAME: &'static str = "cases.find_case_connectors";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/cases/configure/connectors/_find".to_string()
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Case configuration for an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfiguration {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub owner: String,
    /// Default connector for new cases.
    pub connector: RawPayload<CaseConnector>,
    /// `close-by-user` or `close-by-pushing`.
    #[serde(default)]
    pub closure_type: Option<String>,
    #[serde(default)]
    pub mappings: Vec<serde_json::Value>,
    #[serde(default, rename = "customFields")]
    pub custom_fields: Vec<serde_json::Value>,
    #[serde(default)]
    pub templates: Vec<serde_json::Value>,
}

/// Request for `GET /api/cases/configure`.
#[derive(Debug, Clone, Default)]
pub struct GetCaseConfigurationRequest {
    pub owner: Vec<String>,
}

impl Endpoint for GetCaseConfigurationRequest {
    type Response = Vec<CaseConfiguration>;
    const NAME: &'static str = "cases.get_case_configuration";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/cases/configure".to_string()
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
    use crate::api::common::decode_tagged;

    #[test]
    fn test_resolve_jira_fields() {
        let raw = r#"{"id":"j1","name":"Jira","type":".jira","fields":{"issueType":"10006","priority":"High","parent":null}}"#;
        match decode_tagged::<CaseConnector>(raw).unwrap() {
            CaseConnector::Jira(jira) => {
                let fields = jira.fields.unwrap();
                assert_eq!(fields.issue_type.as_deref(), Some("10006"));
                assert_eq!(jira.base.name, "Jira");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_none_connector_with_null_fields() {
        let raw = r#"{"id":"none","name":"none","type":".none","fields":null}"#;
        let connector: CaseConnector = decode_tagged(raw).unwrap();
        assert_eq!(connector, CaseConnector::None(ConnectorBase::none()));
    }

    #[test]
    fn test_unknown_connector_falls_back() {
        let raw = r#"{"id":"x","name":"Thing","type":".thehive","fields":{"tlp":2}}"#;
        let connector: CaseConnector = decode_tagged(raw).unwrap();
        assert!(matches!(connector, CaseConnector::Other(ref base) if base.connector_type == ".thehive"));
    }

    #[test]
    fn test_sparse_connector_documents_resolve() {
        let connector: CaseConnector = decode_tagged(r#"{"type":"mystery"}"#).unwrap();
        assert!(matches!(connector, CaseConnector::Other(ref base) if base.id.is_empty()));

        let connector: CaseConnector = decode_tagged(r#"{"name":"x"}"#).unwrap();
        assert!(matches!(connector, CaseConnector::Other(ref base) if base.name == "x"));

        let connector: CaseConnector = decode_tagged(r#"{"type":".thehive","name":"x"}"#).unwrap();
        assert_eq!(connector.base().connector_type, ".thehive");

        let connector: CaseConnector = decode_tagged(r#"{"type":".jira"}"#).unwrap();
        assert!(matches!(connector, CaseConnector::Jira(ref c) if c.fields.is_none()));
    }

    #[test]
    fn test_configuration_keeps_connector_raw() {
        let raw = Bytes::from_static(
            br#"[{"owner":"cases","closure_type":"close-by-user",
                 "connector":{"id":"sn","name":"SN","type":".servicenow","fields":null}}]"#,
        );
        let configs = GetCaseConfigurationRequest::decode(&raw).unwrap();
        let connector = configs[0].connector.resolve().unwrap();
        assert_eq!(connector.base().id, "sn");
        assert!(matches!(connector, CaseConnector::ServiceNow(_)));
    }
}
