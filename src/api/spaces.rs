//
//  kibana-api
//  api/spaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Spaces API types and endpoints.
//!
//! Spaces partition saved objects into tenants. A client scoped with
//! [`ApiClient::with_space`] prefixes every path with `/s/{space}`; these
//! endpoints manage the spaces themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::spaces::{CreateSpaceRequest, Space};
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
//! let space = Space::new("marketing", "Marketing");
//! let created = client.spaces().create_space(&CreateSpaceRequest { space }, &[]).await?;
//! println!("created {}", created.body.id);
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Query, Response, Result};
use super::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use super::options::RequestOption;
use crate::transport::RequestBody;

/// A Kibana space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// URL-safe identifier, used in `/s/{id}`.
    pub id: String,

    /// Display name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Hex color of the avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Avatar initials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,

    /// Features hidden in this space.
    #[serde(default, rename = "disabledFeatures")]
    pub disabled_features: Vec<String>,

    /// Solution view (`es`, `oblt`, `security`, `classic`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    /// Set by Kibana on spaces that cannot be deleted.
    #[serde(default, rename = "_reserved", skip_serializing)]
    pub reserved: bool,
}

impl Space {
    /// Creates a space with only the required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            color: None,
            initials: None,
            disabled_features: Vec::new(),
            solution: None,
            reserved: false,
        }
    }
}

/// Request for `GET /api/spaces/space`.
#[derive(Debug, Clone, Default)]
pub struct GetAllSpacesRequest {
    /// `any`, `copySavedObjectsIntoSpace` or `shareSavedObjectsIntoSpace`.
    pub purpose: Option<String>,
    pub include_authorized_purposes: Option<bool>,
}

impl Endpoint for GetAllSpacesRequest {
    type Response = Vec<Space>;
    const NAME: &'static str = "spaces.get_all_spaces";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/spaces/space".to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("purpose", self.purpose.as_deref())
            .opt("include_authorized_purposes", self.include_authorized_purposes);
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/spaces/space/{id}`.
#[derive(Debug, Clone)]
pub struct GetSpaceRequest {
    pub id: String,
}

impl Endpoint for GetSpaceRequest {
    type Response = Space;
    const NAME: &'static str = "spaces.get_space";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/spaces/space/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/spaces/space`.
#[derive(Debug, Clone)]
pub struct CreateSpaceRequest {
    pub space: Space,
}

impl Endpoint for CreateSpaceRequest {
    type Response = Space;
    const NAME: &'static str = "spaces.create_space";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/api/spaces/space".to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.space)
    }

    fn validate(&self) -> Result<()> {
        require(&self.space.id, "space.id")?;
        require(&self.space.name, "space.name")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PUT /api/spaces/space/{id}`. The path id is taken from the space.
#[derive(Debug, Clone)]
pub struct UpdateSpaceRequest {
    pub space: Space,
}

impl Endpoint for UpdateSpaceRequest {
    type Response = Space;
    const NAME: &'static str = "spaces.update_space";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/api/spaces/space/{}", self.space.id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.space)
    }

    fn validate(&self) -> Result<()> {
        require(&self.space.id, "space.id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/spaces/space/{id}`.
#[derive(Debug, Clone)]
pub struct DeleteSpaceRequest {
    pub id: String,
}

impl Endpoint for DeleteSpaceRequest {
    type Response = ();
    const NAME: &'static str = "spaces.delete_space";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/spaces/space/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Spaces endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SpacesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Spaces endpoints.
    pub fn spaces(&self) -> SpacesApi<'_> {
        SpacesApi { client: self }
    }
}

impl SpacesApi<'_> {
    /// Lists all spaces visible to the caller.
    pub async fn get_all_spaces(
        &self,
        request: Option<&GetAllSpacesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<Vec<Space>>> {
        self.client.execute(request, options).await
    }

    /// Gets one space.
    pub async fn get_space(&self, request: &GetSpaceRequest, options: &[RequestOption]) -> Result<Response<Space>> {
        self.client.execute(Some(request), options).await
    }

    /// Creates a space.
    pub async fn create_space(
        &self,
        request: &CreateSpaceRequest,
        options: &[RequestOption],
    ) -> Result<Response<Space>> {
        self.client.execute(Some(request), options).await
    }

    /// Replaces a space.
    pub async fn update_space(
        &self,
        request: &UpdateSpaceRequest,
        options: &[RequestOption],
    ) -> Result<Response<Space>> {
        self.client.execute(Some(request), options).await
    }

    /// Deletes a space and everything in it.
    pub async fn delete_space(&self, request: &DeleteSpaceRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_body_skips_reserved() {
        let mut space = Space::new("ops", "Operations");
        space.reserved = true;
        let body = CreateSpaceRequest { space }.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert_eq!(json["id"], "ops");
        assert!(json.get("_reserved").is_none());
        assert_eq!(json["disabledFeatures"], serde_json::json!([]));
    }

    #[test]
    fn test_decode_reserved_space() {
        let raw = Bytes::from_static(br#"[{"id":"default","name":"Default","_reserved":true,"disabledFeatures":[]}]"#);
        let spaces = GetAllSpacesRequest::decode(&raw).unwrap();
        assert!(spaces[0].reserved);
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = GetSpaceRequest { id: "".into() }.validate().unwrap_err();
        assert!(err.to_string().contains("id cannot be empty"));
    }
}
