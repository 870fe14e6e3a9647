//! Raw and normalized sign-up record types
//!
//! A [`RawCandidateRecord`] is what a form hands over on submission: loosely
//! typed, every key optional. A [`NormalizedRecord`] is only ever produced by
//! the signup schema once every rule and refinement has passed.
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A file attached to the form. Only `size` is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Original file name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type reported by the host, if any
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileHandle {
    /// Create a handle with no MIME type
    pub fn new<N: Into<String>>(name: N, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    /// Attach a MIME type
    pub fn with_mime_type<M: Into<String>>(mut self, mime_type: M) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Knowledge level as typed into the form: either a number or its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawKnowledge {
    Number(f64),
    Text(String),
}

impl Default for RawKnowledge {
    fn default() -> Self {
        RawKnowledge::Number(0.0)
    }
}

impl fmt::Display for RawKnowledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawKnowledge::Number(n) => write!(f, "{}", n),
            RawKnowledge::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for RawKnowledge {
    fn from(value: f64) -> Self {
        RawKnowledge::Number(value)
    }
}

impl From<u8> for RawKnowledge {
    fn from(value: u8) -> Self {
        RawKnowledge::Number(f64::from(value))
    }
}

impl From<&str> for RawKnowledge {
    fn from(value: &str) -> Self {
        RawKnowledge::Text(value.to_string())
    }
}

impl From<String> for RawKnowledge {
    fn from(value: String) -> Self {
        RawKnowledge::Text(value)
    }
}

/// One entry of the raw `techs` array
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTech {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub knowledge: RawKnowledge,
}

impl RawTech {
    pub fn new<T: Into<String>, K: Into<RawKnowledge>>(title: T, knowledge: K) -> Self {
        Self {
            title: title.into(),
            knowledge: knowledge.into(),
        }
    }
}

/// Untyped candidate record as produced by the form on submission
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCandidateRecord {
    /// File-list-like handle; the schema keeps only the first item
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: Vec<FileHandle>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub confirm_password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub techs: Vec<RawTech>,
}

impl RawCandidateRecord {
    /// Decode a record from an arbitrary JSON value
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// A `null` reads as the field's blank value, so it reaches the rules
/// instead of failing the whole record
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Validated tech entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tech {
    pub title: String,
    /// Always within the schema's knowledge bounds
    pub knowledge: u8,
}

/// Strongly typed sign-up record. Only built by a successful validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub avatar: FileHandle,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub techs: Vec<Tech>,
}

impl From<&NormalizedRecord> for RawCandidateRecord {
    /// Re-serialize a normalized record the way a form would submit it,
    /// knowledge included as text.
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            avatar: vec![record.avatar.clone()],
            name: record.name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            confirm_password: record.confirm_password.clone(),
            techs: record
                .techs
                .iter()
                .map(|tech| RawTech::new(tech.title.clone(), tech.knowledge.to_string()))
                .collect(),
        }
    }
}
