//
//  kibana-api
//  api/fleet/agents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Enrolled agents.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ItemsPage;
use crate::api::common::{Query, Result};
use crate::api::endpoint::{decode_json, Endpoint};

/// An enrolled Elastic Agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,

    #[serde(default)]
    pub policy_id: Option<String>,

    #[serde(default)]
    pub policy_revision: Option<u64>,

    /// `online`, `offline`, `updating`, `unenrolled`, ...
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_checkin: Option<DateTime<Utc>>,

    /// Host and agent metadata reported at check-in.
    #[serde(default)]
    pub local_metadata: Option<serde_json::Value>,
}

/// Request for `GET /api/fleet/agents`.
#[derive(Debug, Clone, Default)]
pub struct GetAgentsRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub kuery: Option<String>,
    pub show_inactive: Option<bool>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl Endpoint for GetAgentsRequest {
    type Response = ItemsPage<Agent>;
    const NAME: &'static str = "fleet.get_agents";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/fleet/agents".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("perPage", self.per_page)
            .opt("kuery", self.kuery.as_deref())
            .opt("showInactive", self.show_inactive)
            .opt("sortField", self.sort_field.as_deref())
            .opt("sortOrder", self.sort_order.as_deref());
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

    #[test]
    fn test_agents_page() {
        let raw = Bytes::from_static(
            br#"{"items":[{"id":"a1","policy_id":"p1","status":"online","active":true,
                 "last_checkin":"2024-05-01T12:00:00Z","tags":["linux"]}],
                 "total":3,"page":1,"perPage":1}"#,
        );
        let page = GetAgentsRequest::decode(&raw).unwrap();
        assert_eq!(page.items[0].status.as_deref(), Some("online"));
        assert_eq!(page.next_page(), Some(2));
    }
}
