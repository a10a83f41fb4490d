//
//  kibana-api
//  api/fleet/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Fleet API
//!
//! Central management of Elastic Agents: setup, agent policies and enrolled
//! agents.
//!
//! Fleet list endpoints answer with `{"items": [...], "total", "page",
//! "perPage"}` rather than the `_find` shape used elsewhere, see
//! [`ItemsPage`].

pub mod agent_policies;
pub mod agents;

pub use agent_policies::*;
pub use agents::*;

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Response, Result};
use super::endpoint::{decode_json, Endpoint};
use super::options::RequestOption;

/// A page of Fleet items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default, rename = "perPage")]
    pub per_page: u32,
}

impl<T> ItemsPage<T> {
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// Outcome of Fleet setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSetup {
    #[serde(rename = "isInitialized")]
    pub is_initialized: bool,
    #[serde(default, rename = "nonFatalErrors")]
    pub non_fatal_errors: Vec<serde_json::Value>,
}

/// Request for `POST /api/fleet/setup`.
#[derive(Debug, Clone, Default)]
pub struct SetupRequest;

impl Endpoint for SetupRequest {
    type Response = FleetSetup;
    const NAME: &'static str = "fleet.setup";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/api/fleet/setup".to_string()
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Fleet endpoints.
#[derive(Debug, Clone, Copy)]
pub struct FleetApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Fleet endpoints.
    pub fn fleet(&self) -> FleetApi<'_> {
        FleetApi { client: self }
    }
}

impl FleetApi<'_> {
    /// Initializes Fleet. Safe to call repeatedly.
    pub async fn setup(&self, options: &[RequestOption]) -> Result<Response<FleetSetup>> {
        self.client.execute::<SetupRequest>(None, options).await
    }

    pub async fn get_agent_policies(
        &self,
        request: Option<&GetAgentPoliciesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<ItemsPage<AgentPolicy>>> {
        self.client.execute(request, options).await
    }

    pub async fn get_agent_policy(
        &self,
        request: &GetAgentPolicyRequest,
        options: &[RequestOption],
    ) -> Result<Response<AgentPolicyItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn create_agent_policy(
        &self,
        request: &CreateAgentPolicyRequest,
        options: &[RequestOption],
    ) -> Result<Response<AgentPolicyItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_agent_policy(
        &self,
        request: &DeleteAgentPolicyRequest,
        options: &[RequestOption],
    ) -> Result<Response<DeletedAgentPolicy>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_full_agent_policy(
        &self,
        request: &GetFullAgentPolicyRequest,
        options: &[RequestOption],
    ) -> Result<Response<FullAgentPolicy>> {
        self.client.execute(Some(request), options).await
    }

    /// Downloads a policy as agent YAML.
    pub async fn download_agent_policy(
        &self,
        request: &DownloadAgentPolicyRequest,
        options: &[RequestOption],
    ) -> Result<Response<AgentPolicyYaml>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_agents(
        &self,
        request: Option<&GetAgentsRequest>,
        options: &[RequestOption],
    ) -> Result<Response<ItemsPage<Agent>>> {
        self.client.execute(request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_response() {
        let raw = Bytes::from_static(br#"{"isInitialized":true,"nonFatalErrors":[]}"#);
        let setup = SetupRequest::decode(&raw).unwrap();
        assert!(setup.is_initialized);
    }

    #[test]
    fn test_items_page_last_page() {
        let page: ItemsPage<u32> = serde_json::from_str(r#"{"items":[1],"total":3,"page":3,"perPage":1}"#).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_page(), None);
    }
}
