//
//  kibana-api
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Configuration Module
//!
//! Constants and normalization for Kibana base URLs.
//!
//! ## Usage
//!
//! ```rust
//! use kibana_api::config::{normalize_url, DEFAULT_URL};
//!
//! assert_eq!(normalize_url("  kibana.local:5601/ "), "http://kibana.local:5601");
//! assert_eq!(normalize_url(DEFAULT_URL), DEFAULT_URL);
//! ```

/// URL of a Kibana instance running locally with default settings.
pub const DEFAULT_URL: &str = "http://localhost:5601";

/// Normalizes a user-supplied Kibana URL.
///
/// # Returns
///
/// The URL with:
/// - Leading/trailing whitespace trimmed
/// - Trailing slashes removed
/// - `http://` added when no scheme is given
///
/// # Examples
///
/// ```rust
/// use kibana_api::config::normalize_url;
///
/// assert_eq!(normalize_url("https://kibana.example.com/"), "https://kibana.example.com");
/// assert_eq!(normalize_url("https://proxy.example.com/kibana//"), "https://proxy.example.com/kibana");
/// assert_eq!(normalize_url("localhost:5601"), "http://localhost:5601");
/// ```
///
/// # Notes
///
/// - The scheme is matched case-insensitively but otherwise preserved
/// - Base paths (Kibana behind a proxy) are kept
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Checks whether `url` points at a local Kibana instance.
///
/// # Examples
///
/// ```rust
/// use kibana_api::config::is_local_url;
///
/// assert!(is_local_url("http://localhost:5601"));
/// assert!(is_local_url("https://127.0.0.1:5601/"));
/// assert!(!is_local_url("https://kibana.example.com"));
/// ```
pub fn is_local_url(url: &str) -> bool {
    match ::url::Url::parse(&normalize_url(url)) {
        Ok(parsed) => matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]")),
        Err(_) => false,
    }
}
