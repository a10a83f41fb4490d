//
//  kibana-api
//  api/exception_lists/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Exception Lists API
//!
//! Exception lists suppress detection alerts that match known-good activity.
//! A list holds items; each item is a set of field conditions.
//!
//! ## Module Layout
//!
//! - [`lists`]: list CRUD, search and duplication
//! - [`items`]: item CRUD and search
//! - [`import_export`]: NDJSON export and multipart import
//!
//! Lists and items live either in the current space (`single`) or in every
//! space (`agnostic`), see [`NamespaceType`].

pub mod import_export;
pub mod items;
pub mod lists;

pub use import_export::*;
pub use items::*;
pub use lists::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::common::{FindResponse, NdjsonRecords, Query, Response, Result};
use super::endpoint::require;
use super::options::RequestOption;

pub(crate) const LISTS_PATH: &str = "/api/exception_lists";
pub(crate) const ITEMS_PATH: &str = "/api/exception_lists/items";

/// Where a list or item is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceType {
    /// The current space only.
    #[default]
    Single,
    /// Every space.
    Agnostic,
}

impl fmt::Display for NamespaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Agnostic => f.write_str("agnostic"),
        }
    }
}

/// How a single list or item is looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum ListLookup {
    /// Saved object id.
    Id(String),
    /// Human readable id: `list_id` for lists, `item_id` for items.
    ListId(String),
}

impl ListLookup {
    fn apply(&self, query: &mut Query) {
        match self {
            Self::Id(id) => query.push("id", id),
            Self::ListId(list_id) => query.push("list_id", list_id),
        };
    }

    fn apply_item(&self, query: &mut Query) {
        match self {
            Self::Id(id) => query.push("id", id),
            Self::ListId(item_id) => query.push("item_id", item_id),
        };
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Id(id) => require(id, "id"),
            Self::ListId(list_id) => require(list_id, "list_id"),
        }
    }
}

/// Exception list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionListsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Exception list endpoints.
    pub fn exception_lists(&self) -> ExceptionListsApi<'_> {
        ExceptionListsApi { client: self }
    }
}

impl ExceptionListsApi<'_> {
    pub async fn create_list(
        &self,
        request: &CreateListRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionList>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn read_list(&self, request: &ReadListRequest, options: &[RequestOption]) -> Result<Response<ExceptionList>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_list(
        &self,
        request: &UpdateListRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionList>> {
        self.client.execute(Some(request), options).await
    }

    /// Deletes a list with all of its items and returns the list.
    pub async fn delete_list(
        &self,
        request: &DeleteListRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionList>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn find_lists(
        &self,
        request: Option<&FindListsRequest>,
        options: &[RequestOption],
    ) -> Result<Response<FindResponse<ExceptionList>>> {
        self.client.execute(request, options).await
    }

    /// Exports a list and its items as NDJSON records.
    pub async fn export(&self, request: &ExportListRequest, options: &[RequestOption]) -> Result<Response<NdjsonRecords>> {
        self.client.execute(Some(request), options).await
    }

    /// Uploads an NDJSON export.
    pub async fn import(&self, request: &ImportListsRequest, options: &[RequestOption]) -> Result<Response<ImportResponse>> {
        self.client.execute(Some(request), options).await
    }

    /// Copies a list and its items under a new `list_id`.
    pub async fn duplicate(
        &self,
        request: &DuplicateListRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionList>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn create_item(
        &self,
        request: &CreateItemRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionListItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn read_item(
        &self,
        request: &ReadItemRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionListItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_item(
        &self,
        request: &UpdateItemRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionListItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_item(
        &self,
        request: &DeleteItemRequest,
        options: &[RequestOption],
    ) -> Result<Response<ExceptionListItem>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn find_items(
        &self,
        request: &FindItemsRequest,
        options: &[RequestOption],
    ) -> Result<Response<FindResponse<ExceptionListItem>>> {
        self.client.execute(Some(request), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_type_wire_format() {
        assert_eq!(serde_json::to_string(&NamespaceType::Agnostic).unwrap(), "\"agnostic\"");
        assert_eq!(NamespaceType::default().to_string(), "single");
    }

    #[test]
    fn test_lookup_validation() {
        assert!(ListLookup::Id(" ".into()).validate().is_err());
        assert!(ListLookup::ListId("trusted".into()).validate().is_ok());
    }
}
