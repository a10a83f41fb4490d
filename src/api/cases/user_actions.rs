//
//  kibana-api
//  api/cases/user_actions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Case activity history.
//!
//! Every change to a case is recorded as a user action whose `type` names the
//! changed attribute and whose `payload` carries the new value.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::comments::CaseComment;
use super::connectors::CaseConnector;
use crate::api::common::{Query, RawPayload, Result, Tagged, UserRef};
use crate::api::endpoint::{decode_json, require, Endpoint};

/// Fields shared by every user action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserActionBase {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// `add`, `create`, `delete`, `push_to_service` or `update`.
    #[serde(default)]
    pub action: Option<String>,

    /// The raw `type` value.
    #[serde(default, rename = "type")]
    pub action_type: Option<String>,

    #[serde(default)]
    pub owner: Option<String>,

    /// Set on comment actions.
    #[serde(default)]
    pub comment_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<UserRef>,
}

/// A user action with a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedUserAction<P> {
    #[serde(flatten)]
    pub base: UserActionBase,
    pub payload: P,
}

/// Profile of an assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneesPayload {
    pub assignees: Vec<Assignee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub comment: RawPayload<CaseComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPayload {
    pub connector: RawPayload<CaseConnector>,
}

/// Snapshot of the case at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCasePayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub connector: RawPayload<CaseConnector>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionPayload {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushedPayload {
    #[serde(rename = "externalService")]
    pub external_service: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityPayload {
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagsPayload {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

/// A case user action, resolved by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Assignees(TypedUserAction<AssigneesPayload>),
    Category(TypedUserAction<CategoryPayload>),
    Comment(TypedUserAction<CommentPayload>),
    Connector(TypedUserAction<ConnectorPayload>),
    CreateCase(TypedUserAction<CreateCasePayload>),
    /// Deleting a case has an empty payload.
    DeleteCase(UserActionBase),
    Description(TypedUserAction<DescriptionPayload>),
    Pushed(TypedUserAction<PushedPayload>),
    Settings(TypedUserAction<SettingsPayload>),
    Severity(TypedUserAction<SeverityPayload>),
    Status(TypedUserAction<StatusPayload>),
    Tags(TypedUserAction<TagsPayload>),
    Title(TypedUserAction<TitlePayload>),
    Other(UserActionBase),
}

impl UserAction {
    /// Fields shared by every user action.
    pub fn base(&self) -> &UserActionBase {
        match self {
            Self::Assignees(a) => &a.base,
            Self::Category(a) => &a.base,
            Self::Comment(a) => &a.base,
            Self::Connector(a) => &a.base,
            Self::CreateCase(a) => &a.base,
            Self::Description(a) => &a.base,
            Self::Pushed(a) => &a.base,
            Self::Settings(a) => &a.base,
            Self::Severity(a) => &a.base,
            Self::Status(a) => &a.base,
            Self::Tags(a) => &a.base,
            Self::Title(a) => &a.base,
            Self::DeleteCase(base) | Self::Other(base) => base,
        }
    }
}

impl Tagged for UserAction {
    fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
        match tag {
            Some("assignees") => serde_json::from_str(raw).map(Self::Assignees),
            Some("category") => serde_json::from_str(raw).map(Self::Category),
            Some("comment") => serde_json::from_str(raw).map(Self::Comment),
            Some("connector") => serde_json::from_str(raw).map(Self::Connector),
            Some("create_case") => serde_json::from_str(raw).map(Self::CreateCase),
            Some("delete_case") => serde_json::from_str(raw).map(Self::DeleteCase),
            Some("description") => serde_json::from_str(raw).map(Self::Description),
            Some("pushed") => serde_json::from_str(raw).map(Self::Pushed),
            Some("settings") => serde_json::from_str(raw).map(Self::Settings),
            Some("severity") => serde_json::from_str(raw).map(Self::Severity),
            Some("status") => serde_json::from_str(raw).map(Self::Status),
            Some("tags") => serde_json::from_str(raw).map(Self::Tags),
            Some("title") => serde_json::from_str(raw).map(Self::Title),
            _ => serde_json::from_str(raw).map(Self::Other),
        }
    }
}

/// Request for `GET /api/cases/{case_id}/user_actions`.
#[derive(Debug, Clone)]
pub struct GetUserActionsRequest {
    pub case_id: String,
}

impl Endpoint for GetUserActionsRequest {
    type Response = Vec<RawPayload<UserAction>>;
    const NAME: &'static str = "cases.get_user_actions";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}/user_actions", self.case_id)
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

/// A page of user actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActionsPage {
    #[serde(default, rename = "userActions")]
    pub user_actions: Vec<RawPayload<UserAction>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default, rename = "perPage")]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

/// Request for `GET /api/cases/{case_id}/user_actions/_find`.
#[derive(Debug, Clone, Default)]
pub struct FindUserActionsRequest {
    pub case_id: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Action types to include, e.g. `action`, `alert`, `user`, `status`.
    pub types: Vec<String>,
}

impl Endpoint for FindUserActionsRequest {
    type Response = UserActionsPage;
    const NAME: &'static str = "cases.find_user_actions";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/api/cases/{}/user_actions/_find", self.case_id)
    }

    fn query(&self, query: &mut Query) -> Result<()> {
        query
            .opt("page", self.page)
            .opt("perPage", self.per_page)
            .opt("sortOrder", self.sort_order.as_deref());
        for kind in &self.types {
            query.push("types", kind);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        require(&self.case_id, "case_id")
    }

    fn decode(raw: &Bytes) -> Result<Self::Response> {
        decode_json(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::decode_tagged;

    #[test]
    fn test_resolve_status_action() {
        let raw = r#"{"id":"ua1","action":"update","type":"status","payload":{"status":"closed"},
                      "created_at":"2024-02-01T10:00:00.000Z","created_by":{"username":"elastic"},
                      "owner":"cases","comment_id":null,"version":"WzEsMV0="}"#;
        match decode_tagged::<UserAction>(raw).unwrap() {
            UserAction::Status(action) => {
                assert_eq!(action.payload.status, "closed");
                assert_eq!(action.base.action.as_deref(), Some("update"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_comment_action_keeps_nested_comment_raw() {
        let raw = r#"{"id":"ua2","action":"create","type":"comment","comment_id":"c1",
                      "payload":{"comment":{"type":"user","comment":"hello","owner":"cases"}}}"#;
        let action: UserAction = decode_tagged(raw).unwrap();
        let UserAction::Comment(action) = action else {
            panic!("expected comment action");
        };
        assert!(matches!(action.payload.comment.resolve().unwrap(), CaseComment::User(_)));
    }

    #[test]
    fn test_unknown_action_type_falls_back() {
        let raw = r#"{"id":"ua3","action":"update","type":"customFields","payload":{"customFields":[]}}"#;
        let action: UserAction = decode_tagged(raw).unwrap();
        assert!(matches!(action, UserAction::Other(_)));
        assert_eq!(action.base().id.as_deref(), Some("ua3"));
    }

    #[test]
    fn test_find_types_repeat() {
        let request = FindUserActionsRequest {
            case_id: "c".into(),
            types: vec!["status".into(), "user".into()],
            ..Default::default()
        };
        let mut query = Query::new();
        request.query(&mut query).unwrap();
        assert_eq!(query.pairs().len(), 2);
        assert!(query.pairs().iter().all(|(k, _)| k == "types"));
    }
}
