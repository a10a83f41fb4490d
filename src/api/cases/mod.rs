//
//  kibana-api
//  api/cases/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Cases API
//!
//! Cases track investigations: a title and description, comments and
//! attached alerts, an optional external connector (Jira, ServiceNow, ...),
//! and a full activity history.
//!
//! ## Module Layout
//!
//! - [`case`]: the case resource and case-level endpoints
//! - [`comments`]: comments and alert attachments ([`CaseComment`])
//! - [`connectors`]: external connectors ([`CaseConnector`]) and configuration
//! - [`user_actions`]: activity history ([`UserAction`])
//!
//! ## Polymorphic Payloads
//!
//! Comments, connectors and user actions differ in shape by their `type`
//! field. Responses keep them as [`RawPayload`]s and resolve them on demand:
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::cases::{CaseComment, GetCaseRequest};
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
//! let mut request = GetCaseRequest::new("a1b2c3");
//! request.include_comments = Some(true);
//! let case = client.cases().get_case(&request, &[]).await?.into_body();
//!
//! for comment in &case.comments {
//!     match comment.resolve()? {
//!         CaseComment::User(user) => println!("comment: {}", user.comment),
//!         CaseComment::Alert(alert) => println!("alerts: {:?}", alert.alert_id),
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod case;
pub mod comments;
pub mod connectors;
pub mod user_actions;

pub use case::*;
pub use comments::*;
pub use connectors::*;
pub use user_actions::*;

use super::client::ApiClient;
use super::common::{RawPayload, Response, Result, UserRef};
use super::options::RequestOption;

/// Cases endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CasesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Cases endpoints.
    pub fn cases(&self) -> CasesApi<'_> {
        CasesApi { client: self }
    }
}

impl CasesApi<'_> {
    /// Opens a new case.
    pub async fn create_case(&self, request: &CreateCaseRequest, options: &[RequestOption]) -> Result<Response<Case>> {
        self.client.execute(Some(request), options).await
    }

    /// Gets a case by id.
    pub async fn get_case(&self, request: &GetCaseRequest, options: &[RequestOption]) -> Result<Response<Case>> {
        self.client.execute(Some(request), options).await
    }

    /// Updates one or more cases. Each patch must carry the case's current version.
    pub async fn update_cases(
        &self,
        request: &UpdateCasesRequest,
        options: &[RequestOption],
    ) -> Result<Response<Vec<Case>>> {
        self.client.execute(Some(request), options).await
    }

    /// Deletes cases with their comments and user actions.
    pub async fn delete_cases(&self, request: &DeleteCasesRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    /// Searches cases. `None` returns the first page with server defaults.
    pub async fn find_cases(
        &self,
        request: Option<&FindCasesRequest>,
        options: &[RequestOption],
    ) -> Result<Response<CasesPage>> {
        self.client.execute(request, options).await
    }

    /// Lists the alerts attached to a case.
    pub async fn get_case_alerts(
        &self,
        request: &GetCaseAlertsRequest,
        options: &[RequestOption],
    ) -> Result<Response<Vec<CaseAlert>>> {
        self.client.execute(Some(request), options).await
    }

    /// Lists the cases an alert is attached to.
    pub async fn get_cases_by_alert(
        &self,
        request: &GetCasesByAlertRequest,
        options: &[RequestOption],
    ) -> Result<Response<Vec<RelatedCase>>> {
        self.client.execute(Some(request), options).await
    }

    /// Pushes a case to its external connector.
    pub async fn push_case(&self, request: &PushCaseRequest, options: &[RequestOption]) -> Result<Response<Case>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_case_configuration(
        &self,
        request: Option<&GetCaseConfigurationRequest>,
        options: &[RequestOption],
    ) -> Result<Response<Vec<CaseConfiguration>>> {
        self.client.execute(request, options).await
    }

    /// Lists connectors that cases can be pushed to.
    pub async fn find_case_connectors(&self, options: &[RequestOption]) -> Result<Response<Vec<AvailableConnector>>> {
        self.client.execute::<FindCaseConnectorsRequest>(None, options).await
    }

    /// Adds a comment or alert to a case and returns the updated case.
    pub async fn add_comment(&self, request: &AddCommentRequest, options: &[RequestOption]) -> Result<Response<Case>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn update_comment(
        &self,
        request: &UpdateCommentRequest,
        options: &[RequestOption],
    ) -> Result<Response<Case>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_comment(
        &self,
        request: &GetCommentRequest,
        options: &[RequestOption],
    ) -> Result<Response<RawPayload<CaseComment>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn find_comments(
        &self,
        request: &FindCommentsRequest,
        options: &[RequestOption],
    ) -> Result<Response<CommentsPage>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn delete_comment(&self, request: &DeleteCommentRequest, options: &[RequestOption]) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    /// Deletes every comment on a case.
    pub async fn delete_comments(
        &self,
        request: &DeleteCommentsRequest,
        options: &[RequestOption],
    ) -> Result<Response<()>> {
        self.client.execute(Some(request), options).await
    }

    /// Returns the whole activity history of a case.
    pub async fn get_user_actions(
        &self,
        request: &GetUserActionsRequest,
        options: &[RequestOption],
    ) -> Result<Response<Vec<RawPayload<UserAction>>>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn find_user_actions(
        &self,
        request: &FindUserActionsRequest,
        options: &[RequestOption],
    ) -> Result<Response<UserActionsPage>> {
        self.client.execute(Some(request), options).await
    }

    pub async fn get_tags(&self, request: Option<&GetTagsRequest>, options: &[RequestOption]) -> Result<Response<Vec<String>>> {
        self.client.execute(request, options).await
    }

    pub async fn get_reporters(
        &self,
        request: Option<&GetReportersRequest>,
        options: &[RequestOption],
    ) -> Result<Response<Vec<UserRef>>> {
        self.client.execute(request, options).await
    }
}
