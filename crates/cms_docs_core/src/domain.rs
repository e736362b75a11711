//! crates/cms_docs_core/src/domain.rs
//!
//! Defines the core data structures: documentation versions and the content-type
//! metadata published by the CMS registry.
//! These structs are independent of where the metadata is read from.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//=========================================================================================
// Documentation Versions
//=========================================================================================

/// A documentation snapshot identifier, taken from a directory name (e.g. `1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentationVersion(String);

impl DocumentationVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric, segment-wise ordering: `10.0` sorts after `9.0`.
    ///
    /// Each `.`-separated segment is parsed as an integer; a missing or
    /// unparsable segment counts as `0`.
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        let left: Vec<u64> = self.segments().collect();
        let right: Vec<u64> = other.segments().collect();
        let len = left.len().max(right.len());
        for i in 0..len {
            let a = left.get(i).copied().unwrap_or(0);
            let b = right.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }

    fn segments(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.split('.').map(|s| s.trim().parse::<u64>().unwrap_or(0))
    }
}

impl fmt::Display for DocumentationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentationVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

//=========================================================================================
// Content Types
//=========================================================================================

/// All content types known to the registry, keyed by identifier
/// (e.g. `api::property.property`).
pub type ContentTypeMap = BTreeMap<String, ContentTypeDescriptor>;

/// The metadata the CMS publishes for one content type.
///
/// Deserialization never rejects a descriptor because of one badly typed
/// field: the field falls back to its default and naming falls back to the
/// next source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub info: ContentTypeInfo,
    #[serde(default, deserialize_with = "lenient")]
    pub collection_name: Option<String>,
    /// Attribute definitions in declaration order.
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: IndexMap<String, AttributeDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub singular_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub plural_name: Option<String>,
}

/// A single attribute of a content type. Unknown keys (relation targets,
/// plugin options, ...) are ignored. A non-string `type` reads as an empty
/// kind, which maps to `AttributeType::Other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub required: bool,
    /// Allowed values, only meaningful for `enumeration`. Non-string entries are dropped.
    #[serde(
        rename = "enum",
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<String>>,
    /// Only meaningful for `media`.
    #[serde(default, deserialize_with = "lenient")]
    pub multiple: bool,
}

impl AttributeDefinition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn attribute_type(&self) -> AttributeType {
        AttributeType::parse(&self.kind)
    }
}

// Any JSON value is accepted; one of the wrong type yields `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_enum<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|values| {
        values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }))
}

// An attribute that is not an object at all becomes a default definition.
fn lenient_attributes<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, AttributeDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(attributes) = Value::deserialize(deserializer)? else {
        return Ok(IndexMap::new());
    };
    Ok(attributes
        .into_iter()
        .map(|(name, raw)| (name, serde_json::from_value(raw).unwrap_or_default()))
        .collect())
}

/// The attribute kinds the CMS understands. Anything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Text,
    RichText,
    Uid,
    Email,
    Integer,
    BigInteger,
    Decimal,
    Float,
    Number,
    Boolean,
    Enumeration,
    Json,
    Media,
    Component,
    Relation,
    Other(String),
}

impl AttributeType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "string" => Self::String,
            "text" => Self::Text,
            "richtext" => Self::RichText,
            "uid" => Self::Uid,
            "email" => Self::Email,
            "integer" => Self::Integer,
            "biginteger" => Self::BigInteger,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "enumeration" => Self::Enumeration,
            "json" => Self::Json,
            "media" => Self::Media,
            "component" => Self::Component,
            "relation" => Self::Relation,
            other => Self::Other(other.to_string()),
        }
    }
}
