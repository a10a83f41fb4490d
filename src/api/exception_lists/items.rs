//
//  kibana-api
//  api/exception_lists/items.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Exception list items.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ListLookup, NamespaceType, ITEMS_PATH};
use crate::api::common::{Error, FindResponse, Query, Result};
use crate::api::endpoint::{decode_json, json_body, require, Endpoint};
use crate::transport::RequestBody;

/// A single match condition of an item.
///
/// `type` is one of `match`, `match_any`, `exists`, `list`, `nested` or
/// `wildcard`; the remaining fields depend on it, so the entry is kept as
/// loosely typed JSON beyond the common keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub field: String,

    #[serde(rename = "type")]
    pub entry_type: String,

    /// `included` or `excluded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<serde_json::Value>,
}

impl ItemEntry {
    /// `field` must equal `value`.
    pub fn matches(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            entry_type: "match".into(),
            operator: Some("included".into()),
            value: Some(serde_json::Value::String(value.into())),
            entries: None,
            list: None,
        }
    }
}

/// An exception list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionListItem {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,

    /// Human readable item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,

    /// The list the item belongs to.
    pub list_id: String,

    pub name: String,
    pub description: String,

    /// Always `simple` at present.
    #[serde(rename = "type")]
    pub item_type: String,

    pub entries: Vec<ItemEntry>,

    #[serde(default)]
    pub namespace_type: NamespaceType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub os_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

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

impl ExceptionListItem {
    pub fn new(
        list_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        entries: Vec<ItemEntry>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            name: name.into(),
            description: description.into(),
            item_type: "simple".into(),
            entries,
            ..Default::default()
        }
    }
}

/// Request for `POST /api/exception_lists/items`.
#[derive(Debug, Clone)]
pub struct CreateItemRequest {
    pub item: ExceptionListItem,
}

impl Endpoint for CreateItemRequest {
    type Response = ExceptionListItem;
    const NAME: &'static str = "exception_lists.create_item";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        ITEMS_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.item)
    }

    fn validate(&self) -> Result<()> {
        require(&self.item.list_id, "list_id")?;
        require(&self.item.name, "name")?;
        if self.item.entries.is_empty() {
            return Err(Error::InvalidArgument("entries cannot be empty".into()));
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/exception_lists/items`.
///
/// [`ListLookup::ListId`] here names the item's `item_id`.
#[derive(Debug, Clone)]
pub struct ReadItemRequest {
    pub lookup: ListLookup,
    pub namespace_type: Option<NamespaceType>,
}

impl Endpoint for ReadItemRequest {
    type Response = ExceptionListItem;
    const NAME: &'static str = "exception_lists.read_item";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        ITEMS_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply_item(query);
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

/// Request for `PUT /api/exception_lists/items`.
#[derive(Debug, Clone)]
pub struct UpdateItemRequest {
    pub id: Option<String>,
    pub item: ExceptionListItem,
}

impl Endpoint for UpdateItemRequest {
    type Response = ExceptionListItem;
    const NAME: &'static str = "exception_lists.update_item";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        ITEMS_PATH.to_string()
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        let mut body = serde_json::to_value(&self.item).map_err(Error::Encode)?;
        if let (Some(id), Some(map)) = (&self.id, body.as_object_mut()) {
            map.insert("id".into(), id.clone().into());
        }
        json_body(&body)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_none() && self.item.item_id.is_none() {
            return Err(Error::InvalidArgument("id or item_id is required".into()));
        }
        require(&self.item.name, "name")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/exception_lists/items`.
#[derive(Debug, Clone)]
pub struct DeleteItemRequest {
    pub lookup: ListLookup,
    pub namespace_type: Option<NamespaceType>,
}

impl Endpoint for DeleteItemRequest {
    type Response = ExceptionListItem;
    const NAME: &'static str = "exception_lists.delete_item";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        ITEMS_PATH.to_string()
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        self.lookup.apply_item(query);
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

/// Request for `GET /api/exception_lists/items/_find`.
///
/// `list_id`, `namespace_type` and `filter` are parallel lists: the n-th
/// filter applies to the n-th list.
#[derive(Debug, Clone, Default)]
pub struct FindItemsRequest {
    pub list_id: Vec<String>,
    pub namespace_type: Vec<NamespaceType>,
    pub filter: Vec<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl FindItemsRequest {
    pub fn for_list(list_id: impl Into<String>) -> Self {
        Self {
            list_id: vec![list_id.into()],
            ..Default::default()
        }
    }
}

impl Endpoint for FindItemsRequest {
    type Response = FindResponse<ExceptionListItem>;
    const NAME: &'static str = "exception_lists.find_items";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("{}/_find", ITEMS_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .list("list_id", &self.list_id)
            .list("namespace_type", &self.namespace_type)
            .list("filter", &self.filter)
            .opt("search", self.search.as_deref())
            .opt("page", self.page)
            .opt("per_page", self.per_page)
            .opt("sort_field", self.sort_field.as_deref())
            .opt("sort_order", self.sort_order.as_deref());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.list_id.is_empty() {
            return Err(Error::InvalidArgument("list_id cannot be empty".into()));
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_round_trips_entries() {
        let raw = r#"{"id":"i1","item_id":"allow-notepad","list_id":"trusted","name":"notepad",
                      "description":"d","type":"simple","namespace_type":"agnostic",
                      "entries":[{"field":"process.name","type":"match","operator":"included","value":"notepad.exe"}],
                      "_version":"WzMsMV0=","tie_breaker_id":"t"}"#;
        let item: ExceptionListItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.namespace_type, NamespaceType::Agnostic);
        assert_eq!(item.entries, vec![ItemEntry::matches("process.name", "notepad.exe")]);
        assert_eq!(item.concurrency_version.as_deref(), Some("WzMsMV0="));
    }

    #[test]
    fn test_create_rejects_empty_entries() {
        let request = CreateItemRequest {
            item: ExceptionListItem::new("trusted", "n", "d", Vec::new()),
        };
        assert!(matches!(request.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_read_item_uses_item_id() {
        let request = ReadItemRequest {
            lookup: ListLookup::ListId("allow-notepad".into()),
            namespace_type: Some(NamespaceType::Single),
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs()[0], ("item_id".to_string(), "allow-notepad".to_string()));
    }

    #[test]
    fn test_find_requires_list() {
        assert!(FindItemsRequest::default().validate().is_err());
        assert!(FindItemsRequest::for_list("trusted").validate().is_ok());
    }
}
