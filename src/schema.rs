//! In-memory schema model. Built once, read-only during generation.
//!
//! Only `type`, `properties`, `enum`, `required`, `foreignKey` and
//! `foreignKeyType` are recognized; any other keyword in the document is
//! ignored by serde.
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// The closed set of shape tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    String,
    Number,
    Object,
    Boolean,
    Null,
}

/// A property's declared `type`: one tag or a list of alternatives.
///
/// Tags are kept as written so an unknown one can be reported with its
/// property path instead of failing deep inside serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Alternatives(Vec<String>),
}

/// `null` members are `None`.
pub type EnumValues = Vec<Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForeignKeyType {
    OneToMany,
    ManyToOne,
    OneToOne,
}

/// Ordered: iteration order is emission order.
pub type Properties = IndexMap<String, Property>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub type_: TypeDecl,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_: Option<EnumValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Applies to this property's own `properties`, never to siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_type: Option<ForeignKeyType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default = "default_schema_type")]
    pub type_: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

fn default_schema_type() -> String {
    PropertyType::Object.as_str().to_string()
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl PropertyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Object => "object",
            PropertyType::Boolean => "boolean",
            PropertyType::Null => "null",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(PropertyType::String),
            "number" => Ok(PropertyType::Number),
            "object" => Ok(PropertyType::Object),
            "boolean" => Ok(PropertyType::Boolean),
            "null" => Ok(PropertyType::Null),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PropertyType> for TypeDecl {
    fn from(t: PropertyType) -> Self {
        TypeDecl::Single(t.as_str().to_string())
    }
}

impl From<[PropertyType; 2]> for TypeDecl {
    fn from(pair: [PropertyType; 2]) -> Self {
        TypeDecl::Alternatives(pair.iter().map(|t| t.as_str().to_string()).collect())
    }
}

impl TypeDecl {
    /// The raw tags in declaration order.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            TypeDecl::Single(t) => vec![t.as_str()],
            TypeDecl::Alternatives(ts) => ts.iter().map(String::as_str).collect(),
        }
    }

    /// True for a two-member list with a `null` member.
    pub fn is_nullable_pair(&self) -> bool {
        match self {
            TypeDecl::Alternatives(ts) => ts.len() == 2 && ts.iter().any(|t| t == "null"),
            TypeDecl::Single(_) => false,
        }
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDecl::Single(t) => write!(f, "\"{t}\""),
            TypeDecl::Alternatives(ts) => {
                let quoted = ts.iter().map(|t| format!("\"{t}\"")).collect::<Vec<_>>();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

impl Property {
    pub fn new(type_: impl Into<TypeDecl>) -> Self {
        Self {
            title: None,
            type_: type_.into(),
            enum_: None,
            properties: None,
            required: None,
            foreign_key: None,
            foreign_key_type: None,
        }
    }

    /// `[t, "null"]`
    pub fn nullable(t: PropertyType) -> Self {
        Self::new([t, PropertyType::Null])
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.enum_ = Some(values.into_iter().map(|v| v.map(Into::into)).collect());
        self
    }

    pub fn with_properties<I, K>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Property)>,
        K: Into<String>,
    {
        self.properties = Some(properties.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_foreign_key(mut self, key: impl Into<String>, kind: ForeignKeyType) -> Self {
        self.foreign_key = Some(key.into());
        self.foreign_key_type = Some(kind);
        self
    }

    /// Both halves of the hint are present. A lone `foreignKey` or
    /// `foreignKeyType` counts as no hint at all.
    pub fn foreign_key_hint(&self) -> Option<(&str, ForeignKeyType)> {
        match (&self.foreign_key, self.foreign_key_type) {
            (Some(key), Some(kind)) => Some((key.as_str(), kind)),
            _ => None,
        }
    }
}

impl Schema {
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Property)>,
        K: Into<String>,
    {
        Self {
            type_: default_schema_type(),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            required: None,
        }
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        is_listed(self.required.as_deref(), name)
    }

    pub fn from_json_str(src: &str) -> Result<Self, LoadError> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, LoadError> {
        crate::path_de::from_value_with_path(value)
    }
}

pub(crate) fn is_listed(required: Option<&[String]>, name: &str) -> bool {
    required.is_some_and(|names| names.iter().any(|n| n == name))
}
