//
//  kibana-api
//  api/data_views.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Data view endpoints (`/api/data_views`).

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{Response, Result};
use super::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use super::options::RequestOption;
use crate::transport::RequestBody;

/// Summary entry returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataViewSummary {
    pub id: String,

    /// Index pattern, e.g. `logs-*`.
    pub title: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub namespaces: Vec<String>,

    #[serde(default, rename = "typeMeta")]
    pub type_meta: Option<serde_json::Value>,
}

/// A full data view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Index pattern, e.g. `logs-*`.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "timeFieldName", skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,

    #[serde(default, rename = "allowNoIndex", skip_serializing_if = "Option::is_none")]
    pub allow_no_index: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,

    #[serde(default, rename = "sourceFilters", skip_serializing_if = "Option::is_none")]
    pub source_filters: Option<Vec<serde_json::Value>>,

    #[serde(default, rename = "fieldFormats", skip_serializing_if = "Option::is_none")]
    pub field_formats: Option<HashMap<String, serde_json::Value>>,

    #[serde(default, rename = "runtimeFieldMap", skip_serializing_if = "Option::is_none")]
    pub runtime_field_map: Option<HashMap<String, serde_json::Value>>,

    /// Field specs keyed by field name. Only present on responses.
    #[serde(default, skip_serializing)]
    pub fields: Option<HashMap<String, serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// `{"data_view": ...}` wrapper used by single data view responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataViewResponse {
    pub data_view: DataView,
}

/// Response of the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataViewList {
    #[serde(default)]
    pub data_view: Vec<DataViewSummary>,
}

/// Request for `GET /api/data_views`.
#[derive(Debug, Clone, Default)]
pub struct GetAllDataViewsRequest;

impl Endpoint for GetAllDataViewsRequest {
    type Response = DataViewList;
    const NAME: &'static str = "data_views.get_all_data_views";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/api/data_views".to_string()
    }

    fn empty() -> Option<Self> {
        Some(Self)
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/data_views/data_view/{id}`.
#[derive(Debug, Clone)]
pub struct GetDataViewRequest {
    pub id: String,
}

impl Endpoint for GetDataViewRequest {
    type Response = DataViewResponse;
    const NAME: &'static str = "data_views.get_data_view";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/data_views/data_view/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/data_views/data_view`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDataViewRequest {
    pub data_view: DataView,

    /// Replace an existing data view with the same id.
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_existing: Option<bool>,
}

impl Endpoint for CreateDataViewRequest {
    type Response = DataViewResponse;
    const NAME: &'static str = "data_views.create_data_view";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/api/data_views/data_view".to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(self)
    }

    fn validate(&self) -> Result<()> {
        require(&self.data_view.title, "data_view.title")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/data_views/data_view/{id}`.
#[derive(Debug, Clone)]
pub struct DeleteDataViewRequest {
    pub id: String,
}

impl Endpoint for DeleteDataViewRequest {
    type Response = ();
    const NAME: &'static str = "data_views.delete_data_view";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/data_views/data_view/{}", self.id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Data view endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DataViewsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Data view endpoints.
    pub fn data_views(&self) -> DataViewsApi<'_> {
        DataViewsApi { client: self }
    }
}

impl DataViewsApi<'_> {
    pub async fn get_all_data_views(&self, options: &[RequestOption]) -> Result<Response<DataViewList>> {
        self.client.execute::<GetAllDataViewsRequest>(None, options).await
    }

    pub async fn get_data_view(
        &self,
        request: &GetDataViewRequest,
        options: &[RequestOption],
    ) -> Result<Response<DataViewResponse>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn create_data_view(
        &self,
        request: &CreateDataViewRequest,
        options: &[RequestOption],
    ) -> Result<Response<DataViewResponse>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_data_view(
        &self,
        request: &DeleteDataViewRequest,
        options: &[RequestOption],
    ) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_shape() {
        let request = CreateDataViewRequest {
            data_view: DataView {
                title: "logs-*".into(),
                time_field_name: Some("@timestamp".into()),
                ..Default::default()
            },
            override_existing: Some(true),
        };
        let body = request.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert_eq!(json["data_view"]["timeFieldName"], "@timestamp");
        assert_eq!(json["override"], true);
        assert!(json["data_view"].get("fields").is_none());
    }

    #[test]
    fn test_decode_list() {
        let raw = Bytes::from_static(br#"{"data_view":[{"id":"a","title":"logs-*","namespaces":["default"]}]}"#);
        let list = GetAllDataViewsRequest::decode(&raw).unwrap();
        assert_eq!(list.data_view[0].title, "logs-*");
    }
}
