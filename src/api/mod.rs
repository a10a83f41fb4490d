//
//  kibana-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Bindings for Kibana's management REST API.
//!
//! ## Architecture
//!
//! - [`client`]: [`ApiClient`], which runs every call through one executor
//! - [`endpoint`]: the [`Endpoint`](endpoint::Endpoint) trait each request implements
//! - [`options`]: per-call [`RequestOption`](options::RequestOption)s
//! - [`common`]: errors, response envelopes, query building, tagged payloads, NDJSON
//!
//! One module per API domain, each adding an accessor to [`ApiClient`]:
//!
//! | Accessor | Module | Base path |
//! |----------|--------|-----------|
//! | `status()` | [`status`] | `/api/status` |
//! | `spaces()` | [`spaces`] | `/api/spaces` |
//! | `data_views()` | [`data_views`] | `/api/data_views` |
//! | `alerting()` | [`alerting`] | `/api/alerting` |
//! | `actions()` | [`actions`] | `/api/actions` |
//! | `cases()` | [`cases`] | `/api/cases` |
//! | `detection_engine()` | [`detection_engine`] | `/api/detection_engine` |
//! | `exception_lists()` | [`exception_lists`] | `/api/exception_lists` |
//! | `fleet()` | [`fleet`] | `/api/fleet` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::api::options::with_opaque_id;
//! use kibana_api::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5601", HttpTransport::new()?)?;
//! let status = client.status().get_status(None, &[with_opaque_id("health-check")]).await?;
//! println!("Kibana {}", status.body.version.number);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]. Failures before I/O (`NilArgument`,
//! `InvalidArgument`, `Encode`, `RequestOption`) never reach the transport;
//! a non-success status becomes [`Error::Status`] with the parsed error body.

/// The client and its generic executor.
pub mod client;

/// The endpoint trait and shared decoders.
pub mod endpoint;

/// Per-call request options.
pub mod options;

/// Shared types.
pub mod common;

pub mod actions;
pub mod alerting;
pub mod cases;
pub mod data_views;
pub mod detection_engine;
pub mod exception_lists;
pub mod fleet;
pub mod spaces;
pub mod status;

pub use client::ApiClient;
pub use common::{Error, Response, Result};
