//
//  kibana-api
//  api/common/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-string construction for endpoint parameters.
//!
//! Endpoint `Params` structs hold every optional parameter as an `Option`.
//! [`Query`] collects only the values that are set:
//!
//! | Method | Encoding |
//! |--------|----------|
//! | [`Query::opt`] | `key=value` when `Some` |
//! | [`Query::list`] | `key=a,b,c` when non-empty |
//! | [`Query::json`] | `key=<json>` when `Some` |
//!
//! # Example
//!
//! ```rust
//! use kibana_api::api::common::Query;
//!
//! let mut query = Query::new();
//! query.opt("page", Some(5)).opt("per_page", None::<u32>);
//! query.list("tags", &["a".to_string(), "b".to_string()]);
//!
//! assert_eq!(query.pairs(), &[
//!     ("page".to_string(), "5".to_string()),
//!     ("tags".to_string(), "a,b".to_string()),
//! ]);
//! ```

use std::fmt::Display;

use serde::Serialize;
use url::Url;

use super::{Error, Result};

/// Ordered collection of query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` unconditionally.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds `key=value` when `value` is `Some`.
    pub fn opt<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Adds a comma-joined list when `values` is non-empty.
    pub fn list<T: Display>(&mut self, key: &str, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    /// Adds a JSON-marshaled structured value when `value` is `Some`.
    pub fn json<T: Serialize>(&mut self, key: &str, value: Option<&T>) -> Result<&mut Self> {
        if let Some(value) = value {
            let encoded = serde_json::to_string(value).map_err(Error::Encode)?;
            self.push(key, encoded);
        }
        Ok(self)
    }

    /// Returns the collected pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns `true` when no parameter was set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends the pairs to `url`'s query string.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut serializer = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_omits_none() {
        let mut query = Query::new();
        query.opt("page", None::<u32>).opt("search", None::<&str>);
        assert!(query.is_empty());
    }

    #[test]
    fn test_empty_list_is_omitted() {
        let mut query = Query::new();
        query.list::<String>("tags", &[]);
        assert!(query.is_empty());
    }

    #[test]
    fn test_json_filter_is_single_value() {
        let filter = json!({"status": ["open", "closed"]});
        let mut query = Query::new();
        query.json("filter", Some(&filter)).unwrap();
        assert_eq!(query.pairs()[0].1, r#"{"status":["open","closed"]}"#);
    }

    #[test]
    fn test_apply_to_url_encodes() {
        let mut url = Url::parse("http://localhost:5601/api/cases/_find").unwrap();
        let mut query = Query::new();
        query.push("search", "a b").push("page", 2);
        query.apply_to(&mut url);
        assert_eq!(url.query(), Some("search=a+b&page=2"));
    }
}
