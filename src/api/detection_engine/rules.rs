//
//  kibana-api
//  api/detection_engine/rules.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Detection rule types.
//!
//! Detection rules share a large set of common fields ([`RuleBase`]) and add
//! type-specific ones selected by `type`:
//!
//! | `type` | Variant |
//! |--------|---------|
//! | `query` | [`DetectionRule::Query`] |
//! | `saved_query` | [`DetectionRule::SavedQuery`] |
//! | `eql` | [`DetectionRule::Eql`] |
//! | `esql` | [`DetectionRule::Esql`] |
//! | `threshold` | [`DetectionRule::Threshold`] |
//! | `threat_match` | [`DetectionRule::ThreatMatch`] |
//! | `machine_learning` | [`DetectionRule::MachineLearning`] |
//! | `new_terms` | [`DetectionRule::NewTerms`] |
//! | anything else | [`DetectionRule::Other`] |
//!
//! Each variant struct serializes back to a complete rule document, so it can
//! be used to build request bodies:
//!
//! ```rust
//! use kibana_api::api::common::RawPayload;
//! use kibana_api::api::detection_engine::{DetectionRule, QueryRule, RuleBase};
//!
//! let rule = QueryRule {
//!     base: RuleBase::new("query", "Suspicious process", "Detects odd parents", 47, "medium"),
//!     query: Some("process.parent.name:winword.exe".into()),
//!     language: Some("kuery".into()),
//!     index: vec!["logs-endpoint.events.*".into()],
//!     ..Default::default()
//! };
//! let payload: RawPayload<DetectionRule> = RawPayload::from_value(&rule).unwrap();
//! assert!(matches!(payload.resolve().unwrap(), DetectionRule::Query(_)));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{OneOrMany, Tagged};

/// Fields shared by every detection rule type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleBase {
    /// Saved object id, assigned by Kibana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Stable rule id, shared across spaces and versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// The raw `type` value, empty when the document has none.
    #[serde(default, rename = "type")]
    pub rule_type: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub risk_score: u8,

    /// `low`, `medium`, `high` or `critical`.
    #[serde(default)]
    pub severity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_signals: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub false_positives: Vec<String>,

    /// MITRE ATT&CK mappings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threat: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<serde_json::Value>,

    /// Exception lists applied to the rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions_list: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Set on prebuilt Elastic rules.
    #[serde(default, skip_serializing)]
    pub immutable: bool,

    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing)]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing)]
    pub revision: Option<u64>,
}

impl RuleBase {
    /// Required fields only.
    pub fn new(
        rule_type: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        risk_score: u8,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            rule_type: rule_type.into(),
            name: name.into(),
            description: description.into(),
            risk_score,
            severity: severity.into(),
            ..Default::default()
        }
    }
}

/// Custom query rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRule {
    #[serde(flatten)]
    pub base: RuleBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// `kuery` or `lucene`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_view_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<String>,
}

/// Rule running a saved query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedQueryRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub saved_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<serde_json::Value>,
}

/// Event correlation rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqlRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub query: String,

    /// Always `eql`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_category_override: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreaker_field: Option<String>,
}

/// ES|QL rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsqlRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub query: String,

    /// Always `esql`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Threshold settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    /// Fields to group by.
    pub field: OneOrMany<String>,
    pub value: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cardinality: Vec<serde_json::Value>,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            field: OneOrMany::Many(Vec::new()),
            value: 1,
            cardinality: Vec::new(),
        }
    }
}

/// Threshold rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    pub threshold: Threshold,
}

/// Indicator match rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatMatchRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub query: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    pub threat_query: String,
    pub threat_index: Vec<String>,
    pub threat_mapping: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_indicator_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_language: Option<String>,
}

/// Machine learning rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineLearningRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub anomaly_threshold: u32,
    pub machine_learning_job_id: OneOrMany<String>,
}

/// New terms rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTermsRule {
    #[serde(flatten)]
    pub base: RuleBase,

    pub query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<String>,

    pub new_terms_fields: Vec<String>,
    pub history_window_start: String,
}

/// A detection rule, resolved by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionRule {
    Query(QueryRule),
    SavedQuery(SavedQueryRule),
    Eql(EqlRule),
    Esql(EsqlRule),
    Threshold(ThresholdRule),
    ThreatMatch(ThreatMatchRule),
    MachineLearning(MachineLearningRule),
    NewTerms(NewTermsRule),
    Other(RuleBase),
}

impl DetectionRule {
    /// Fields shared by every rule type.
    pub fn base(&self) -> &RuleBase {
        match self {
            Self::Query(r) => &r.base,
            Self::SavedQuery(r) => &r.base,
            Self::Eql(r) => &r.base,
            Self::Esql(r) => &r.base,
            Self::Threshold(r) => &r.base,
            Self::ThreatMatch(r) => &r.base,
            Self::MachineLearning(r) => &r.base,
            Self::NewTerms(r) => &r.base,
            Self::Other(base) => base,
        }
    }
}

impl Tagged for DetectionRule {
    fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
        match tag {
            Some("query") => serde_json::from_str(raw).map(Self::Query),
            Some("saved_query") => serde_json::from_str(raw).map(Self::SavedQuery),
            Some("eql") => serde_json::from_str(raw).map(Self::Eql),
            Some("esql") => serde_json::from_str(raw).map(Self::Esql),
            Some("threshold") => serde_json::from_str(raw).map(Self::Threshold),
            Some("threat_match") => serde_json::from_str(raw).map(Self::ThreatMatch),
            Some("machine_learning") => serde_json::from_str(raw).map(Self::MachineLearning),
            Some("new_terms") => serde_json::from_str(raw).map(Self::NewTerms),
            _ => serde_json::from_str(raw).map(Self::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::decode_tagged;

    #[test]
    fn test_resolve_threshold_rule() {
        let raw = r#"{"id":"1","rule_id":"r","type":"threshold","name":"Brute force","description":"d",
                      "risk_score":73,"severity":"high","query":"event.outcome:failure","language":"kuery",
                      "threshold":{"field":"user.name","value":20},"immutable":true}"#;
        match decode_tagged::<DetectionRule>(raw).unwrap() {
            DetectionRule::Threshold(rule) => {
                assert_eq!(rule.threshold.value, 20);
                assert_eq!(rule.threshold.field.into_vec(), vec!["user.name"]);
                assert!(rule.base.immutable);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ml_job_id_list() {
        let raw = r#"{"type":"machine_learning","name":"n","description":"d","risk_score":21,"severity":"low",
                      "anomaly_threshold":75,"machine_learning_job_id":["a","b"]}"#;
        let rule: DetectionRule = decode_tagged(raw).unwrap();
        assert!(matches!(rule, DetectionRule::MachineLearning(ref r) if r.anomaly_threshold == 75));
    }

    #[test]
    fn test_unknown_rule_type_is_base() {
        let raw = r#"{"type":"future_kind","name":"n","description":"d","risk_score":1,"severity":"low"}"#;
        let rule: DetectionRule = decode_tagged(raw).unwrap();
        assert!(matches!(rule, DetectionRule::Other(_)));
        assert_eq!(rule.base().rule_type, "future_kind");
    }

    #[test]
    fn test_sparse_rule_documents_resolve() {
        let rule: DetectionRule = decode_tagged(r#"{"type":"mystery"}"#).unwrap();
        assert!(matches!(rule, DetectionRule::Other(ref base) if base.rule_type == "mystery"));
        assert_eq!(rule.base().name, "");

        let rule: DetectionRule = decode_tagged(r#"{"name":"x"}"#).unwrap();
        assert!(matches!(rule, DetectionRule::Other(ref base) if base.name == "x" && base.rule_type.is_empty()));

        let rule: DetectionRule = decode_tagged(r#"{"type":"eql","name":"x"}"#).unwrap();
        assert!(matches!(rule, DetectionRule::Eql(ref r) if r.query.is_empty()));

        let rule: DetectionRule = decode_tagged(r#"{"type":"threshold","threshold":{"field":"host.name"}}"#).unwrap();
        assert!(matches!(rule, DetectionRule::Threshold(ref r) if r.threshold.value == 1));
    }

    #[test]
    fn test_malformed_rule_is_an_error() {
        assert!(decode_tagged::<DetectionRule>(r#"{"type":"query","name":"#).is_err());
    }

    #[test]
    fn test_serialized_rule_skips_server_fields() {
        let mut rule = QueryRule {
            base: RuleBase::new("query", "n", "d", 10, "low"),
            ..Default::default()
        };
        rule.base.immutable = true;
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "query");
        assert!(json.get("immutable").is_none());
        assert!(json.get("index").is_none());
    }
}
