//
//  kibana-api
//  api/common/tagged.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Decode-by-discriminator support for polymorphic payloads.
//!
//! Several Kibana resources share a `type` field but differ in shape: case
//! comments, case connectors, case user actions, and detection rules. They are
//! kept as raw JSON ([`RawPayload`]) when a response is decoded, and resolved
//! into a concrete variant only when the caller asks for it.
//!
//! A payload family implements [`Tagged`]: it names its discriminator field and
//! maps a tag to a variant. [`decode_tagged`] does the rest:
//!
//! 1. reads only the discriminator field, skipping everything else
//! 2. hands the tag and the raw document to [`Tagged::from_tag`]
//!
//! Unknown and missing tags resolve to the family's fallback variant. Only
//! malformed JSON is an error.
//!
//! # Example
//!
//! ```rust
//! use kibana_api::api::common::{decode_tagged, Tagged};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Circle { radius: f64 }
//!
//! #[derive(Debug, Deserialize)]
//! struct Other {}
//!
//! #[derive(Debug)]
//! enum Shape { Circle(Circle), Other(Other) }
//!
//! impl Tagged for Shape {
//!     const TAG_FIELD: &'static str = "kind";
//!
//!     fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
//!         match tag {
//!             Some("circle") => serde_json::from_str(raw).map(Shape::Circle),
//!             _ => serde_json::from_str(raw).map(Shape::Other),
//!         }
//!     }
//! }
//!
//! let shape: Shape = decode_tagged(r#"{"kind":"circle","radius":2.0}"#).unwrap();
//! assert!(matches!(shape, Shape::Circle(c) if c.radius == 2.0));
//!
//! let shape: Shape = decode_tagged(r#"{"kind":"hexagon"}"#).unwrap();
//! assert!(matches!(shape, Shape::Other(_)));
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use super::{Error, Result};

/// A family of payloads distinguished by a tag field.
pub trait Tagged: Sized {
    /// Name of the discriminator field.
    const TAG_FIELD: &'static str = "type";

    /// Decodes `raw` as the variant selected by `tag`.
    ///
    /// `tag` is `None` when the field is absent or not a string. Implementations
    /// must fall back to a base variant rather than fail on unknown tags.
    fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self>;
}

/// Reads the string value of `field` from a JSON object without decoding the
/// rest of the document.
pub fn discriminator(raw: &str, field: &str) -> serde_json::Result<Option<String>> {
    let mut de = serde_json::Deserializer::from_str(raw);
    let tag = TagSeed { field }.deserialize(&mut de)?;
    de.end()?;
    Ok(tag)
}

/// Resolves `raw` into the variant of `T` selected by its discriminator.
pub fn decode_tagged<T: Tagged>(raw: &str) -> serde_json::Result<T> {
    let tag = discriminator(raw, T::TAG_FIELD)?;
    T::from_tag(tag.as_deref(), raw)
}

struct TagSeed<'f> {
    field: &'f str,
}

impl<'de, 'f> DeserializeSeed<'de> for TagSeed<'f> {
    type Value = Option<String>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'f> Visitor<'de> for TagSeed<'f> {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a JSON object with a `{}` field", self.field)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tag = None;
        while let Some(key) = map.next_key::<String>()? {
            if tag.is_none() && key == self.field {
                // Non-string tags are treated as missing.
                let value: serde_json::Value = map.next_value()?;
                tag = Some(value.as_str().map(str::to_owned));
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(tag.flatten())
    }
}

/// A polymorphic payload kept as raw JSON until resolved.
///
/// `RawPayload` deserializes from any JSON value and serializes back to the
/// exact same text, so it can sit in both request and response types.
///
/// # Example
///
/// ```rust
/// use kibana_api::api::cases::CaseComment;
/// use kibana_api::api::common::RawPayload;
///
/// let payload: RawPayload<CaseComment> =
///     serde_json::from_str(r#"{"type":"user","comment":"hi","owner":"cases"}"#).unwrap();
/// assert_eq!(payload.discriminator().unwrap().as_deref(), Some("user"));
/// assert!(matches!(payload.resolve().unwrap(), CaseComment::User(_)));
/// ```
pub struct RawPayload<T> {
    raw: Box<RawValue>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RawPayload<T> {
    /// Wraps an already captured raw JSON value.
    pub fn from_raw(raw: Box<RawValue>) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Parses `json` and keeps it as a raw payload.
    pub fn from_json(json: impl Into<String>) -> Result<Self> {
        RawValue::from_string(json.into())
            .map(Self::from_raw)
            .map_err(Error::Decode)
    }

    /// Serializes `value` into a raw payload, e.g. to build a request body.
    pub fn from_value<S: Serialize + ?Sized>(value: &S) -> Result<Self> {
        serde_json::value::to_raw_value(value)
            .map(Self::from_raw)
            .map_err(Error::Encode)
    }

    /// Returns the raw JSON text.
    pub fn get(&self) -> &str {
        self.raw.get()
    }
}

impl<T: Tagged> RawPayload<T> {
    /// Reads the discriminator without resolving the payload.
    pub fn discriminator(&self) -> Result<Option<String>> {
        discriminator(self.raw.get(), T::TAG_FIELD).map_err(Error::Decode)
    }

    /// Resolves the payload into its concrete variant.
    pub fn resolve(&self) -> Result<T> {
        decode_tagged(self.raw.get()).map_err(Error::Decode)
    }
}

impl<T> Clone for RawPayload<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.clone())
    }
}

impl<T> fmt::Debug for RawPayload<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPayload").field(&self.raw.get()).finish()
    }
}

impl<T> PartialEq for RawPayload<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.get() == other.raw.get()
    }
}

impl<T> Serialize for RawPayload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for RawPayload<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Box::<RawValue>::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Alert {
        #[serde(rename = "alertId")]
        alert_id: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Base {
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    #[derive(Debug, PartialEq)]
    enum Item {
        Alert(Alert),
        Base(Base),
    }

    impl Tagged for Item {
        fn from_tag(tag: Option<&str>, raw: &str) -> serde_json::Result<Self> {
            match tag {
                Some("alert") => serde_json::from_str(raw).map(Item::Alert),
                _ => serde_json::from_str(raw).map(Item::Base),
            }
        }
    }

    #[test]
    fn test_discriminator_skips_nested_values() {
        let raw = r#"{"nested":{"type":"wrong"},"list":[1,{"type":"x"}],"type":"alert"}"#;
        assert_eq!(discriminator(raw, "type").unwrap().as_deref(), Some("alert"));
    }

    #[test]
    fn test_missing_and_non_string_tags() {
        assert_eq!(discriminator(r#"{"a":1}"#, "type").unwrap(), None);
        assert_eq!(discriminator(r#"{"type":7}"#, "type").unwrap(), None);
    }

    #[test]
    fn test_resolves_known_tag() {
        let item: Item = decode_tagged(r#"{"type":"alert","alertId":"a-1"}"#).unwrap();
        assert_eq!(
            item,
            Item::Alert(Alert {
                alert_id: "a-1".into()
            })
        );
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let item: Item = decode_tagged(r#"{"type":"mystery","x":true}"#).unwrap();
        assert_eq!(
            item,
            Item::Base(Base {
                kind: Some("mystery".into())
            })
        );
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(decode_tagged::<Item>(r#"{"type":"alert""#).is_err());
        assert!(RawPayload::<Item>::from_json("{not json").is_err());
    }

    #[test]
    fn test_raw_payload_round_trips_text() {
        let text = r#"{"type":"alert","alertId":"a-2"}"#;
        let payload: RawPayload<Item> = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&payload).unwrap(), text);
        assert!(matches!(payload.resolve().unwrap(), Item::Alert(_)));
    }
}
