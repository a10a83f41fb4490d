//
//  kibana-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Kibana API Library
//!
//! Typed bindings for the Kibana management REST API: cases, alerting rules,
//! connectors, detection rules, exception lists, Fleet, spaces, data views
//! and server status.
//!
//! ## Overview
//!
//! Every operation follows the same contract: validate the request, build the
//! URL and body, apply headers and request options, send it through a
//! pluggable [`Transport`](transport::Transport), and decode either a typed
//! success body or an [`Error::Status`](api::Error::Status) carrying the
//! server's error body. Optional [`Instrumentation`](instrument::Instrumentation)
//! observes each call.
//!
//! ## Features
//!
//! - **Uniform call contract**: one generic executor drives every endpoint
//! - **Polymorphic payloads**: comments, connectors, user actions and
//!   detection rules resolve to typed variants by their `type` field
//! - **NDJSON export/import**: exception lists round-trip through files
//! - **YAML passthrough**: Fleet agent policies download as raw YAML
//! - **Spaces**: one client per space, addressed by a `/s/{space}` prefix
//!
//! ## Module Structure
//!
//! - [`api`]: the client, endpoint trait and one module per API domain
//! - [`transport`]: the HTTP seam and its `reqwest` implementation
//! - [`instrument`]: per-call tracing hooks
//! - [`auth`]: API key, basic and bearer credentials
//! - [`config`]: TOML profiles with environment overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::cases::{CreateCaseRequest, NewCase};
//! use kibana_api::auth::Credentials;
//! use kibana_api::instrument::TracingInstrumentation;
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("https://kibana.example.com", HttpTransport::new()?)?
//!     .with_auth(Credentials::api_key("VnVhQ2ZHY0JDZGJr..."))
//!     .with_space("security")
//!     .with_instrumentation(TracingInstrumentation::new());
//!
//! let body = NewCase::new("Suspicious login", "Multiple failed logins", "securitySolution")?;
//! let case = client.cases().create_case(&CreateCaseRequest { body }, &[]).await?;
//! println!("opened case {} ({})", case.body.id, case.status_code);
//! # Ok(())
//! # }
//! ```

/// Endpoint bindings and the client that executes them.
pub mod api;

/// Credentials applied to every request.
pub mod auth;

/// Configuration file management.
///
/// Profiles live in a platform-specific config directory and can be
/// overridden from the environment.
pub mod config;

/// Per-call instrumentation hooks.
pub mod instrument;

/// The HTTP transport seam.
pub mod transport;

pub use api::{ApiClient, Error, Response, Result};

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use kibana_api::VERSION;
///
/// println!("kibana-api {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
