//
//  kibana-api
//  api/exception_lists/lists.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Exception list containers.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ListLookup, NamespaceType, LISTS_PATH};
use crate::api::common::{Error, FindResponse, Query, Result};
use crate::api::endpoint::{decode_json, json_body, require, Endpoint};
use crate::transport::RequestBody;

/// An exception list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionList {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,

    /// Human readable list id.
    pub list_id: String,

    pub name: String,
    pub description: String,

    /// `detection`, `rule_default`, `endpoint`, `endpoint_trusted_apps`, ...
    #[serde(rename = "type")]
    pub list_type: String,

    #[serde(default)]
    pub namespace_type: NamespaceType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub os_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

    #[serde(default, skip_serializing)]
    pub immutable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Optimistic concurrency token, required on update.
    #[serde(default, rename = "_version", skip_serializing_if = "Option::is_none")]
    pub concurrency_version: Option<String>,

    #[serde(default, skip_serializing)]
    pub tie_breaker_id: Option<String>,

    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing)]
    pub updated_by: Option<String>,
}

impl ExceptionList {
    pub fn new(
        list_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        list_type: impl Into<String>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            name: name.into(),
            description: description.into(),
            list_type: list_type.into(),
            ..Default::default()
        }
    }
}

/// Request for `POST /api/exception_lists`.
#[derive(Debug, Clone)]
pub struct CreateListRequest {
    pub list: ExceptionList,
}

impl Endpoint for CreateListRequest {
    type Response = ExceptionList;
    const NAME: &'static str = "exception_lists.create_list";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        LISTS_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.list)
    }

    fn validate(&self) -> Result<()> {
        require(&self.list.name, "name")?;
        require(&self.list.list_type, "type")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/exception_lists`.
#[derive(Debug, Clone)]
pub struct ReadListRequest {
    pub lookup: ListLookup,
    pub namespace_type: Option<NamespaceType>,
}

impl ReadListRequest {
    pub fn by_list_id(list_id: impl Into<String>) -> Self {
        Self {
            lookup: ListLookup::ListId(list_id.into()),
            namespace_type: None,
        }
    }
}

impl Endpoint for ReadListRequest {
    type Response = ExceptionList;
    const NAME: &'static str = "exception_lists.read_list";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        LISTS_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply(query);
        query.opt("namespace_type", self.namespace_type);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.lookup.validate()
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PUT /api/exception_lists`.
///
/// The list is matched by `id` or `list_id`; `_version` guards against
/// concurrent edits.
#[derive(Debug, Clone)]
pub struct UpdateListRequest {
    pub id: Option<String>,
    pub list: ExceptionList,
}

impl Endpoint for UpdateListRequest {
    type Response = ExceptionList;
    const NAME: &'static str = "exception_lists.update_list";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        LISTS_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        let mut body = serde_json::to_value(&self.list).map_err(Error::Encode)?;
        if let (Some(id), Some(map)) = (&self.id, body.as_object_mut()) {
            map.insert("id".into(), id.clone().into());
        }
        json_body(&body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.list.name, "name")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/exception_lists`. Deletes the list and its items.
#[derive(Debug, Clone)]
pub struct DeleteListRequest {
    pub lookup: ListLookup,
    pub namespace_type: Option<NamespaceType>,
}

impl Endpoint for DeleteListRequest {
    type Response = ExceptionList;
    const NAME: &'static str = "exception_lists.delete_list";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        LISTS_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply(query);
        query.opt("namespace_type", self.namespace_type);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.lookup.validate()
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/exception_lists/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindListsRequest {
    pub filter: Option<String>,
    pub namespace_type: Vec<NamespaceType>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl Endpoint for FindListsRequest {
    type Response = FindResponse<ExceptionList>;
    const NAME: &'static str = "exception_lists.find_lists";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/_find", LISTS_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("filter", self.filter.as_deref())
            .list("namespace_type", &self.namespace_type)
            .opt("page", self.page)
            .opt("per_page", self.per_page)
            .opt("sort_field", self.sort_field.as_deref())
            .opt("sort_order", self.sort_order.as_deref());
        Ok(())
    }

    fn empty() -> Option<Self> {
        Some(Self::default())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `POST /api/exception_lists/_duplicate`.
#[derive(Debug, Clone)]
pub struct DuplicateListRequest {
    pub list_id: String,
    pub namespace_type: NamespaceType,
    pub include_expired_exceptions: bool,
}

impl DuplicateListRequest {
    pub fn new(list_id: impl Into<String>, namespace_type: NamespaceType) -> Self {
        Self {
            list_id: list_id.into(),
            namespace_type,
            include_expired_exceptions: true,
        }
    }
}

impl Endpoint for DuplicateListRequest {
    type Response = ExceptionList;
    const NAME: &'static str = "exception_lists.duplicate";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("{}/_duplicate", LISTS_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .push("list_id", &self.list_id)
            .push("namespace_type", self.namespace_type)
            .push("include_expired_exceptions", self.include_expired_exceptions);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.list_id, "list_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_omits_server_fields() {
        let mut list = ExceptionList::new("trusted", "Trusted", "Known good", "detection");
        list.id = Some("so-1".into());
        list.immutable = true;
        let request = CreateListRequest { list };
        let body = request.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("immutable").is_none());
        assert_eq!(json["namespace_type"], "single");
        assert_eq!(json["type"], "detection");
    }

    #[test]
    fn test_update_body_carries_id() {
        let request = UpdateListRequest {
            id: Some("so-1".into()),
            list: ExceptionList::new("trusted", "Trusted", "d", "detection"),
        };
        let body = request.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body.as_bytes().unwrap()).unwrap();
        assert_eq!(json["id"], "so-1");
    }

    #[test]
    fn test_find_joins_namespaces() {
        let request = FindListsRequest {
            namespace_type: vec![NamespaceType::Single, NamespaceType::Agnostic],
            page: Some(2),
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(
            query.pairs(),
            &[
                ("namespace_type".to_string(), "single,agnostic".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_query() {
        let request = DuplicateListRequest::new("trusted", NamespaceType::Agnostic);
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs()[1], ("namespace_type".to_string(), "agnostic".to_string()));
        assert_eq!(query.pairs()[2].1, "true");
    }
}
