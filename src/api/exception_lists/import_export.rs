//
//  kibana-api
//  api/exception_lists/import_export.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! NDJSON export and multipart import of exception lists.
//!
//! An export is the list document followed by one line per item, plus a
//! trailing summary line. The same file can be fed back to `_import`:
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::exception_lists::{ExportListRequest, ImportListsRequest, NamespaceType};
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
//! let export = ExportListRequest::new("so-1", "trusted", NamespaceType::Single);
//! let records = client.exception_lists().export(&export, &[]).await?.into_body();
//! records.write_to("trusted.ndjson")?;
//!
//! let import = ImportListsRequest::from_records("trusted.ndjson", &records).overwrite(true);
//! let summary = client.exception_lists().import(&import, &[]).await?.into_body();
//! println!("imported {} items", summary.success_count_exception_list_items);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{NamespaceType, LISTS_PATH};
use crate::api::common::{Error, NdjsonRecords, Query, Result};
use crate::api::endpoint::{decode_json, require, Endpoint};
use crate::transport::{MultipartForm, RequestBody};

/// MIME type of export files.
pub const NDJSON_CONTENT_TYPE: &str = "application/ndjson";

/// Request for `POST /api/exception_lists/_export`.
#[derive(Debug, Clone)]
pub struct ExportListRequest {
    /// Saved object id of the list.
    pub id: String,
    pub list_id: String,
    pub namespace_type: NamespaceType,
    pub include_expired_exceptions: bool,
}

impl ExportListRequest {
    pub fn new(id: impl Into<String>, list_id: impl Into<String>, namespace_type: NamespaceType) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            namespace_type,
            include_expired_exceptions: true,
        }
    }
}

impl Endpoint for ExportListRequest {
    type Response = NdjsonRecords;
    const NAME: &'static str = "exception_lists.export";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("{}/_export", LISTS_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .push("id", &self.id)
            .push("list_id", &self.list_id)
            .push("namespace_type", self.namespace_type)
            .push("include_expired_exceptions", self.include_expired_exceptions);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.id, "id")?;
        require(&self.list_id, "list_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        NdjsonRecords::parse(raw)
    }
}

/// Request for `POST /api/exception_lists/_import`.
#[derive(Debug, Clone)]
pub struct ImportListsRequest {
    /// File name reported in the form part. Must not be empty.
    pub file_name: String,
    /// NDJSON file content.
    pub data: Bytes,
    /// Replace lists and items that already exist.
    pub overwrite: Option<bool>,
    /// Import under freshly generated list ids.
    pub as_new_list: Option<bool>,
}

impl ImportListsRequest {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            overwrite: None,
            as_new_list: None,
        }
    }

    /// Uploads previously exported records.
    pub fn from_records(file_name: impl Into<String>, records: &NdjsonRecords) -> Self {
        Self::new(file_name, records.to_bytes())
    }

    /// Reads an NDJSON file from disk. The file name part is taken from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, data))
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn as_new_list(mut self, as_new_list: bool) -> Self {
        self.as_new_list = Some(as_new_list);
        self
    }
}

impl Endpoint for ImportListsRequest {
    type Response = ImportResponse;
    const NAME: &'static str = "exception_lists.import";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("{}/_import", LISTS_PATH)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("overwrite", self.overwrite)
            .opt("as_new_list", self.as_new_list);
        Ok(())
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        let form = MultipartForm::new().file("file", &self.file_name, NDJSON_CONTENT_TYPE, self.data.clone());
        Ok(Some(RequestBody::Multipart(form)))
    }

    fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(Error::InvalidArgument("file name cannot be empty".into()));
        }
        Ok(())
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Per-record failure reported by an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportError {
    pub error: ImportErrorDetail,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportErrorDetail {
    pub status_code: u16,
    pub message: String,
}

/// Summary of an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub errors: Vec<ImportError>,
    pub success: bool,
    pub success_count: u64,
    #[serde(default)]
    pub success_exception_lists: bool,
    #[serde(default)]
    pub success_count_exception_lists: u64,
    #[serde(default)]
    pub success_exception_list_items: bool,
    #[serde(default)]
    pub success_count_exception_list_items: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_decodes_ndjson() {
        let raw = Bytes::from_static(
            b"{\"list_id\":\"trusted\",\"type\":\"detection\"}\n{\"item_id\":\"a\"}\n\n{\"exported_exception_list_count\":1}\n",
        );
        let records = ExportListRequest::decode(&raw).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_import_body_is_single_file_part() {
        let request = ImportListsRequest::new("lists.ndjson", &b"{\"a\":1}\n"[..]).overwrite(true);
        let Some(RequestBody::Multipart(form)) = request.body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(form.parts.len(), 1);
        let part = form.part("file").unwrap();
        assert_eq!(part.file_name.as_deref(), Some("lists.ndjson"));
        assert_eq!(part.content_type.as_deref(), Some(NDJSON_CONTENT_TYPE));
        assert_eq!(&part.data[..], b"{\"a\":1}\n");

        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs(), &[("overwrite".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_import_requires_file_name() {
        let request = ImportListsRequest::new("", Bytes::new());
        assert!(matches!(request.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_import_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.ndjson");
        std::fs::write(&path, "{\"list_id\":\"x\"}\n").unwrap();
        let request = ImportListsRequest::from_path(&path).unwrap();
        assert_eq!(request.file_name, "export.ndjson");
        assert_eq!(request.data.len(), 16);
    }

    #[test]
    fn test_import_summary() {
        let raw = Bytes::from_static(
            br#"{"errors":[{"error":{"status_code":409,"message":"exists"},"list_id":"trusted"}],
                 "success":false,"success_count":1,"success_exception_lists":false,
                 "success_count_exception_lists":0,"success_exception_list_items":true,
                 "success_count_exception_list_items":1}"#,
        );
        let summary = ImportListsRequest::decode(&raw).unwrap();
        assert!(!summary.success);
        assert_eq!(summary.errors[0].error.status_code, 409);
    }
}
