//
//  kibana-api
//  api/cases/comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Case comments (attachments).
//!
//! Comments are polymorphic on their `type` field:
//!
//! | `type` | Variant |
//! |--------|---------|
//! | `user` | [`CaseComment::User`] |
//! | `alert` | [`CaseComment::Alert`] |
//! | `actions` | [`CaseComment::Actions`] |
//! | anything else | [`CaseComment::Other`] |
//!
//! Responses keep comments as [`RawPayload<CaseComment>`]; call
//! [`RawPayload::resolve`] to get the typed variant.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::case::Case;
use crate::api::common::{OneOrMany, Query, RawPayload, Result, Tagged, UserRef};
use crate::api::endpoint::{decode_json, decode_unit, json_body, require, Endpoint};
use crate::transport::RequestBody;

/// Fields shared by every comment type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// `cases`, `observability` or `securitySolution`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// The raw `type` value.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// A free-text comment written by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserComment {
    #[serde(flatten)]
    pub base: CommentBase,

    /// Markdown text.
    #[serde(default)]
    pub comment: String,
}

/// Rule that produced an attached alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One or more alerts attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertComment {
    #[serde(flatten)]
    pub base: CommentBase,

    #[serde(default, rename = "alertId")]
    pub alert_id: OneOrMany<String>,

    /// Index of each alert.
    #[serde(default)]
    pub index: OneOrMany<String>,

    #[serde(default)]
    pub rule: Option<AlertRule>,
}

/// Response actions taken on hosts, with a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsComment {
    #[serde(flatten)]
    pub base: CommentBase,

    #[serde(default)]
    pub comment: String,

    /// `{"targets": [...], "type": "isolate"}`.
    #[serde(default)]
    pub actions: serde_json::Value,
}

/// A case comment, resolved by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseComment {
    User(UserComment),
    Alert(AlertComment),
    Actions(ActionsComment),
    /// Comment types this crate does not model (`externalReference`,
    /// `persistableState`, ...).
    Other(CommentBase),
}

impl CaseComment {
    /// Fields shared by every comment type.
    pub fn base(&self) -> &CommentBase {
        match self {
            Self::User(c) => &c.base,
            Self::Alert(c) => &c.base,
            Self::Actions(c) => &c.base,
            Self::Other(base) => base,
        }
    }
}

impl Tagged for CaseComment {
    fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
        match tag {
            Some("user") => serde_json::from_str(raw).map(Self::User),
            Some("alert") => serde_json::from_str(raw).map(Self::Alert),
            Some("actions") => serde_json::from_str(raw).map(Self::Actions),
            _ => serde_json::from_str(raw).map(Self::Other),
        }
    }
}

/// Body of a new comment.
///
/// # Example
///
/// ```rust
/// use kibana_api::api::cases::{AddCommentRequest, NewComment};
///
/// let request = AddCommentRequest::new(
///     "case-1",
///     &NewComment::User { comment: "Looking into it".into(), owner: "cases".into() },
/// )
/// .unwrap();
/// assert!(request.body.get().contains(r#""type":"user""#));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NewComment {
    User {
        comment: String,
        owner: String,
    },
    Alert {
        #[serde(rename = "alertId")]
        alert_id: OneOrMany<String>,
        index: OneOrMany<String>,
        rule: AlertRule,
        owner: String,
    },
}

/// Request for `POST /api/cases/{case_id}/comments`.
///
/// The body is passed through as raw JSON so any attachment type Kibana
/// accepts can be sent.
#[derive(Debug, Clone)]
pub struct AddCommentRequest {
    pub case_id: String,
    pub body: RawPayload<CaseComment>,
}

impl AddCommentRequest {
    /// Builds a request from a typed comment.
    pub fn new(case_id: impl Into<String>, comment: &NewComment) -> Result<Self> {
        Ok(Self {
            case_id: case_id.into(),
            body: RawPayload::from_value(comment)?,
        })
    }
}

impl Endpoint for AddCommentRequest {
    type Response = Case;
    const NAME: &'static str = "cases.add_comment";
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments", self.case_id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `PATCH /api/cases/{case_id}/comments`.
///
/// `body` must carry the comment `id` and current `version` alongside the new
/// content.
#[derive(Debug, Clone)]
pub struct UpdateCommentRequest {
    pub case_id: String,
    pub body: RawPayload<CaseComment>,
}

impl Endpoint for UpdateCommentRequest {
    type Response = Case;
    const NAME: &'static str = "cases.update_comment";
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments", self.case_id)
    }

    fn body(&self) -> Result<Option<RequestBody>> {
        json_body(&self.body)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `GET /api/cases/{case_id}/comments/{comment_id}`.
#[derive(Debug, Clone)]
pub struct GetCommentRequest {
    pub case_id: String,
    pub comment_id: String,
}

impl Endpoint for GetCommentRequest {
    type Response = RawPayload<CaseComment>;
    const NAME: &'static str = "cases.get_comment";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments/{}", self.case_id, self.comment_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")?;
        require(&self.comment_id, "comment_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// A page of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsPage {
    #[serde(default)]
    pub comments: Vec<RawPayload<CaseComment>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

/// Request for `GET /api/cases/{case_id}/comments/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindCommentsRequest {
    pub case_id: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_order: Option<String>,
}

impl Endpoint for FindCommentsRequest {
    type Response = CommentsPage;
    const NAME: &'static str = "cases.find_comments";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments/_find", self.case_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("perPage", self.per_page)
            .opt("sortOrder", self.sort_order.as_deref());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// Request for `DELETE /api/cases/{case_id}/comments/{comment_id}`.
#[derive(Debug, Clone)]
pub struct DeleteCommentRequest {
    pub case_id: String,
    pub comment_id: String,
}

impl Endpoint for DeleteCommentRequest {
    type Response = ();
    const NAME: &'static str = "cases.delete_comment";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments/{}", self.case_id, self.comment_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")?;
        require(&self.comment_id, "comment_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

/// Request for `DELETE /api/cases/{case_id}/comments`.
#[derive(Debug, Clone)]
pub struct DeleteCommentsRequest {
    pub case_id: String,
}

impl Endpoint for DeleteCommentsRequest {
    type Response = ();
    const NAME: &'static str = "cases.delete_comments";
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/api/cases/{}/comments", self.case_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_unit(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::decode_tagged;

    #[test]
    fn test_resolve_alert_comment() {
        let raw = r#"{"type":"alert","id":"c1","alertId":["a1","a2"],"index":".alerts-security",
                      "rule":{"id":"r1","name":"Suspicious"},"owner":"securitySolution"}"#;
        let comment: CaseComment = decode_tagged(raw).unwrap();
        match comment {
            CaseComment::Alert(alert) => {
                assert_eq!(alert.alert_id.into_vec(), vec!["a1", "a2"]);
                assert_eq!(alert.base.id.as_deref(), Some("c1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_base() {
        let raw = r#"{"type":"externalReference","id":"c9","owner":"cases","externalReferenceId":"x"}"#;
        let comment: CaseComment = decode_tagged(raw).unwrap();
        assert!(matches!(&comment, CaseComment::Other(base) if base.comment_type.as_deref() == Some("externalReference")));
        assert_eq!(comment.base().id.as_deref(), Some("c9"));
    }

    #[test]
    fn test_sparse_alert_comment_resolves() {
        let comment: CaseComment = decode_tagged(r#"{"type":"alert","id":"c2"}"#).unwrap();
        assert!(matches!(comment, CaseComment::Alert(ref alert) if alert.index.clone().into_vec().is_empty()));
    }

    #[test]
    fn test_malformed_comment_errors() {
        assert!(decode_tagged::<CaseComment>(r#"{"type":"user","comment":"#).is_err());
    }

    #[test]
    fn test_add_comment_passes_raw_body() {
        let request = AddCommentRequest {
            case_id: "case-1".into(),
            body: RawPayload::from_json(r#"{"type":"user","comment":"hi","owner":"cases"}"#).unwrap(),
        };
        let body = request.body().unwrap().unwrap();
        assert_eq!(
            body.as_bytes().unwrap().as_ref(),
            br#"{"type":"user","comment":"hi","owner":"cases"}"#
        );
    }

    #[test]
    fn test_find_comments_query() {
        let request = FindCommentsRequest {
            case_id: "case-1".into(),
            page: Some(5),
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs(), &[("page".to_string(), "5".to_string())]);
    }
}
