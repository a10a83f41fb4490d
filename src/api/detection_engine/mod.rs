//
//  kibana-api
//  api/detection_engine/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Detection Engine API
//!
//! Security detection rules (`/api/detection_engine/rules`).
//!
//! Rules are identified either by saved object `id` or by the stable
//! `rule_id`; read, patch and delete accept one of the two through
//! [`RuleLookup`]. Rule documents are polymorphic ([`DetectionRule`]) and are
//! exchanged as [`RawPayload`]s.

pub mod rules;

pub use rules::*;

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Error, FindResponse, Query, RawPayload, Response, Result};
use super::endpoint::{decode_json, json_body, require, Endpoint};
use super::options::RequestOption;
use crate::transport::RequestBody;

/// How a single rule is looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleLookup {
    /// Saved object id.
    Id(String),
    /// Stable rule id.
    RuleId(String),
}

impl RuleLookup {
    fn apply(&self, query: &mut Query) {
        match self {
            Self::Id(id) => query.push("id", id),
            Self::RuleId(rule_id) => query.push("rule_id", rule_id),
        };
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Id(id) => require(id, "id"),
            Self::RuleId(rule_id) => require(rule_id, "rule_id"),
        }
    }
}

const RULES_PATH: &str = "/api/detection_engine/rules";

/// Request for `POST /api/detection_engine/rules`.
#[derive(Debug, Clone)]
pub struct CreateRuleRequest {
    pub rule: RawPayload<DetectionRule>,
}

impl Endpoint for CreateRuleRequest {
    type Response = RawPayload<DetectionRule>;
    const NAME: &'static str = "detection_engine.create_rule";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        RULES_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.rule)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/detection_engine/rules?id=|rule_id=`.
#[derive(Debug, Clone)]
pub struct ReadRuleRequest {
    pub lookup: RuleLookup,
}

impl Endpoint for ReadRuleRequest {
    type Response = RawPayload<DetectionRule>;
    const NAME: &'static str = "detection_engine.read_rule";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        RULES_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply(query);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.lookup.validate()
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PUT /api/detection_engine/rules`. The rule must carry `id` or
/// `rule_id`; fields left out are reset to their defaults.
#[derive(Debug, Clone)]
pub struct UpdateRuleRequest {
    pub rule: RawPayload<DetectionRule>,
}

impl Endpoint for UpdateRuleRequest {
    type Response = RawPayload<DetectionRule>;
    const NAME: &'static str = "detection_engine.update_rule";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        RULES_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.rule)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PATCH /api/detection_engine/rules`.
///
/// Only the fields in `changes` are modified.
#[derive(Debug, Clone)]
pub struct PatchRuleRequest {
    pub lookup: RuleLookup,
    pub changes: serde_json::Map<String, serde_json::Value>,
}

impl Endpoint for PatchRuleRequest {
    type Response = RawPayload<DetectionRule>;
    const NAME: &'static str = "detection_engine.patch_rule";
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        RULES_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        let mut body = self.changes.clone();
        match &self.lookup {
            RuleLookup::Id(id) => body.insert("id".into(), id.clone().into()),
            RuleLookup::RuleId(rule_id) => body.insert("rule_id".into(), rule_id.clone().into()),
        };
        json_body(&body)
    }

    fn validate(&self) -> Result<()> {
        self.lookup.validate()?;
        if self.changes.is_empty() {
            return Err(Error::InvalidArgument("changes cannot be empty".into()));
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/detection_engine/rules?id=|rule_id=`.
#[derive(Debug, Clone)]
pub struct DeleteRuleRequest {
    pub lookup: RuleLookup,
}

impl Endpoint for DeleteRuleRequest {
    type Response = RawPayload<DetectionRule>;
    const NAME: &'static str = "detection_engine.delete_rule";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        RULES_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply(query);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.lookup.validate()
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/detection_engine/rules/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindRulesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// KQL filter, e.g. `alert.attributes.enabled:true`.
    pub filter: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub fields: Vec<String>,
}

impl Endpoint for FindRulesRequest {
    type Response = FindResponse<RawPayload<DetectionRule>>;
    const NAME: &'static str = "detection_engine.find_rules";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/_find", RULES_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("per_page", self.per_page)
            .opt("filter", self.filter.as_deref())
            .opt("sort_field", self.sort_field.as_deref())
            .opt("sort_order", self.sort_order.as_deref())
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

/// Installation state of Elastic prebuilt rules and timelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepackagedStatus {
    pub rules_custom_installed: u64,
    pub rules_installed: u64,
    pub rules_not_installed: u64,
    pub rules_not_updated: u64,
    #[serde(default)]
    pub timelines_installed: u64,
    #[serde(default)]
    pub timelines_not_installed: u64,
    #[serde(default)]
    pub timelines_not_updated: u64,
}

/// Request for `GET /api/detection_engine/rules/prepackaged/_status`.
#[derive(Debug, Clone, Default)]
pub struct GetPrepackagedStatusRequest;

impl Endpoint for GetPrepackagedStatusRequest {
    type Response = PrepackagedStatus;
    const NAME: &'static str = "detection_engine.get_prepackaged_status";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/prepackaged/_status", RULES_PATH)
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Counts of what an install run changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepackagedInstallResult {
    pub rules_installed: u64,
    pub rules_updated: u64,
    #[serde(default)]
    pub timelines_installed: u64,
    #[serde(default)]
    pub timelines_updated: u64,
}

/// Request for `PUT /api/detection_engine/rules/prepackaged`.
#[derive(Debug, Clone, Default)]
pub struct InstallPrepackagedRequest;

impl Endpoint for InstallPrepackagedRequest {
    type Response = PrepackagedInstallResult;
    const NAME: &'static str = "detection_engine.install_prepackaged";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("{}/prepackaged", RULES_PATH)
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Detection engine endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DetectionEngineApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Detection engine endpoints.
    pub fn detection_engine(&self) -> DetectionEngineApi<'_> {
        DetectionEngineApi { client: self }
    }
}

impl DetectionEngineApi<'_> {
    pub async fn create_rule(
        &self,
        request: &CreateRuleRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<DetectionRule>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn read_rule(
        &self,
        request: &ReadRuleRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<DetectionRule>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_rule(
        &self,
        request: &UpdateRuleRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<DetectionRule>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn patch_rule(
        &self,
        request: &PatchRuleRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<DetectionRule>>> {
        self.client.execute(Some(request), options).await
    }

    /// Deletes a rule and returns it.
    pub async fn delete_rule(
        &self,
        request: &DeleteRuleRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<DetectionRule>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn find_rules(
        &self,
        request: Option<&FindRulesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<FindResponse<RawPayload<DetectionRule>>>> {
        self.client.execute(request, options).await
    }

    pub async fn get_prepackaged_status(&self, options: &[RequestOption]) -> Result<Response<PrepackagedStatus>> {
        self.client.execute::<GetPrepackagedStatusRequest>(None, options).await
    }

    /// Installs and updates Elastic prebuilt rules and timelines.
    pub async fn install_prepackaged(&self, options: &[RequestOption]) -> Result<Response<PrepackagedInstallResult>> {
        self.client.execute::<InstallPrepackagedRequest>(None, options).await
    }
}
