//
//  kibana-api
//  api/fleet/agent_policies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Agent policies.
//!
//! Besides the JSON endpoints, a policy can be downloaded as the YAML file an
//! Elastic Agent consumes. The text is returned untouched in
//! [`AgentPolicyYaml`]; parse it with [`AgentPolicyYaml::to_yaml`] when the
//! structure is needed.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ItemsPage;
use crate::api::common::{Query, Result};
use crate::api::endpoint::{decode_json, decode_text, json_body, require, Endpoint};
use crate::transport::RequestBody;

const POLICIES_PATH: &str = "/api/fleet/agent_policies";

/// An agent policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPolicy {
    pub id: String,
    pub name: String,
    pub namespace: String,

    #[serde(default)]
    pub description: Option<String>,

    /// `active` or `inactive`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub is_managed: bool,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub is_default_fleet_server: bool,

    #[serde(default)]
    pub monitoring_enabled: Vec<String>,

    #[serde(default)]
    pub inactivity_timeout: Option<u64>,

    #[serde(default)]
    pub revision: u64,

    #[serde(default)]
    pub agents: Option<u64>,

    /// Present when the policy was listed with `full=true`.
    #[serde(default)]
    pub package_policies: Vec<serde_json::Value>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Body of a new agent policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAgentPolicy {
    pub name: String,
    pub namespace: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `logs` and/or `metrics`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monitoring_enabled: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_managed: Option<bool>,
}

impl NewAgentPolicy {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }
}

/// `{"item": ...}` wrapper used by single-policy responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPolicyItem {
    pub item: AgentPolicy,
}

/// Request for `GET /api/fleet/agent_policies`.
#[derive(Debug, Clone, Default)]
pub struct GetAgentPoliciesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub kuery: Option<String>,
    /// Include package policies in each item.
    pub full: Option<bool>,
}

impl Endpoint for GetAgentPoliciesRequest {
    type Response = ItemsPage<AgentPolicy>;
    const NAME: &'static str = "fleet.get_agent_policies";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        POLICIES_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("perPage", self.per_page)
            .opt("sortField", self.sort_field.as_deref())
            .opt("sortOrder", self.sort_order.as_deref())
            .opt("kuery", self.kuery.as_deref())
            .opt("full", self.full);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/fleet/agent_policies/{policy_id}`.
#[derive(Debug, Clone)]
pub struct GetAgentPolicyRequest {
    pub policy_id: String,
}

impl Endpoint for GetAgentPolicyRequest {
    type Response = AgentPolicyItem;
    const NAME: &'static str = "fleet.get_agent_policy";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/{}", POLICIES_PATH, self.policy_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.policy_id, "policy_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/fleet/agent_policies`.
#[derive(Debug, Clone)]
pub struct CreateAgentPolicyRequest {
    pub policy: NewAgentPolicy,
    /// Also add the system integration.
    pub sys_monitoring: Option<bool>,
}

impl Endpoint for CreateAgentPolicyRequest {
    type Response = AgentPolicyItem;
    const NAME: &'static str = "fleet.create_agent_policy";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        POLICIES_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("sys_monitoring", self.sys_monitoring);
        Ok(())
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.policy)
    }

    fn validate(&self) -> Result<()> {
        require(&self.policy.name, "name")?;
        require(&self.policy.namespace, "namespace")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Result of deleting an agent policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedAgentPolicy {
    pub id: String,
    pub name: String,
}

/// Request for `POST /api/fleet/agent_policies/delete`.
#[derive(Debug, Clone)]
pub struct DeleteAgentPolicyRequest {
    pub policy_id: String,
}

impl Endpoint for DeleteAgentPolicyRequest {
    type Response = DeletedAgentPolicy;
    const NAME: &'static str = "fleet.delete_agent_policy";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("{}/delete", POLICIES_PATH)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&serde_json::json!({ "agentPolicyId": self.policy_id }))
    }

    fn validate(&self) -> Result<()> {
        require(&self.policy_id, "policy_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// The compiled policy as sent to agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullAgentPolicy {
    pub item: serde_json::Value,
}

/// Request for `GET /api/fleet/agent_policies/{policy_id}/full`.
#[derive(Debug, Clone)]
pub struct GetFullAgentPolicyRequest {
    pub policy_id: String,
    /// Render the policy for a standalone agent.
    pub standalone: Option<bool>,
}

impl Endpoint for GetFullAgentPolicyRequest {
    type Response = FullAgentPolicy;
    const NAME: &'static str = "fleet.get_full_agent_policy";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/{}/full", POLICIES_PATH, self.policy_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("standalone", self.standalone);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.policy_id, "policy_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// A policy rendered as agent YAML, exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPolicyYaml(pub String);

impl AgentPolicyYaml {
    /// The YAML text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the text into a YAML value.
    pub fn to_yaml(&self) -> Result<serde_yaml::Value> {
        Ok(serde_yaml::from_str(&self.0)?)
    }
}

/// Request for `GET /api/fleet/agent_policies/{policy_id}/download`.
#[derive(Debug, Clone)]
pub struct DownloadAgentPolicyRequest {
    pub policy_id: String,
    pub standalone: Option<bool>,
    pub kubernetes: Option<bool>,
}

impl DownloadAgentPolicyRequest {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            standalone: None,
            kubernetes: None,
        }
    }
}

impl Endpoint for DownloadAgentPolicyRequest {
    type Response = AgentPolicyYaml;
    const NAME: &'static str = "fleet.download_agent_policy";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/{}/download", POLICIES_PATH, self.policy_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("standalone", self.standalone)
            .opt("kubernetes", self.kubernetes);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.policy_id, "policy_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_text(raw).map(AgentPolicyYaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::Error;

    #[test]
    fn test_download_keeps_text_verbatim() {
        let yaml = "id: p1\noutputs:\n  default:\n    type: elasticsearch\n";
        let policy = DownloadAgentPolicyRequest::decode(&Bytes::from(yaml)).unwrap();
        assert_eq!(policy.as_str(), yaml);

        let value = policy.to_yaml().unwrap();
        assert_eq!(value["outputs"]["default"]["type"].as_str(), Some("elasticsearch"));
    }

    #[test]
    fn test_invalid_yaml_is_yaml_error() {
        let policy = AgentPolicyYaml("key: [unclosed".into());
        assert!(matches!(policy.to_yaml(), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_delete_body() {
        let request = DeleteAgentPolicyRequest {
            policy_id: "p1".into(),
        };
        let body = request.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"agentPolicyId": "p1"}));
    }

    #[test]
    fn test_list_query_uses_camel_case() {
        let request = GetAgentPoliciesRequest {
            per_page: Some(50),
            full: Some(true),
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(
            query.pairs(),
            &[
                ("perPage".to_string(), "50".to_string()),
                ("full".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_policy_page_decodes() {
        let raw = Bytes::from_static(
            br#"{"items":[{"id":"p1","name":"Default","namespace":"default","status":"active",
                 "is_managed":false,"revision":3,"monitoring_enabled":["logs"]}],
                 "total":1,"page":1,"perPage":20}"#,
        );
        let page = GetAgentPoliciesRequest::decode(&raw).unwrap();
        assert_eq!(page.items[0].revision, 3);
        assert!(!page.has_next());
    }
}
