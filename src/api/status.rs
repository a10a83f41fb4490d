//
//  kibana-api
//  api/status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Kibana server status.
//!
//! `GET /api/status` reports the version and overall health of the instance,
//! plus per-plugin status that is kept as raw JSON.

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Query, Response, Result};
use super::endpoint::{decode_json, Endpoint};
use super::options::RequestOption;

/// Status of the Kibana instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Instance name.
    pub name: String,

    /// Instance UUID.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Version information.
    pub version: VersionInfo,

    /// Health information.
    pub status: StatusDetails,
}

/// Kibana build information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version number, e.g. `8.15.0`.
    pub number: String,

    #[serde(default)]
    pub build_hash: Option<String>,

    #[serde(default)]
    pub build_number: Option<u64>,

    #[serde(default)]
    pub build_snapshot: bool,
}

/// Overall, core and plugin health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDetails {
    /// Overall health.
    pub overall: ServiceStatus,

    /// Core service statuses.
    #[serde(default)]
    pub core: serde_json::Value,

    /// Plugin statuses.
    #[serde(default)]
    pub plugins: serde_json::Value,
}

/// Health of a single service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// `available`, `degraded`, `unavailable` or `critical`.
    pub level: String,

    #[serde(default)]
    pub summary: Option<String>,
}

impl ServiceStatus {
    /// Returns `true` when the service is fully available.
    pub fn is_available(&self) -> bool {
        self.level == "available"
    }
}

/// Request for `GET /api/status`.
#[derive(Debug, Clone, Default)]
pub struct GetStatusRequest {
    /// Ask for the v8 response format.
    pub v8format: Option<bool>,
}

impl Endpoint for GetStatusRequest {
    type Response = ServerStatus;
    const NAME: &'static str = "status.get_status";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/status".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query.opt("v8format", self.v8format);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Status endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StatusApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Status endpoints.
    pub fn status(&self) -> StatusApi<'_> {
        StatusApi { client: self }
    }
}

impl StatusApi<'_> {
    /// Returns the status of the instance.
    pub async fn get_status(
        &self,
        request: Option<&GetStatusRequest>,
        options: &[RequestOption],
    ) -> Result<Response<ServerStatus>> {
        self.client.execute(request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_status() {
        let raw = Bytes::from_static(
            br#"{"name":"kb","uuid":"u1","version":{"number":"8.15.0","build_snapshot":false},
                "status":{"overall":{"level":"available","summary":"All services are available"}}}"#,
        );
        let status = GetStatusRequest::decode(&raw).unwrap();
        assert_eq!(status.version.number, "8.15.0");
        assert!(status.status.overall.is_available());
    }

    #[test]
    fn test_query_only_when_set() {
        let mut query = Query::new();
        GetStatusRequest::default().query(&mut query).unwrap();
        assert!(query.is_empty());
    }
}
