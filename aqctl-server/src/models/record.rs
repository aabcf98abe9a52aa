//! AQ record and key types
//!
//! Every column except `aq` is nullable. Storage NULL maps to `None` and
//! `None` maps to an explicit null (JSON) or nil (MessagePack) on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// One row of `mgl.aq`.
///
/// Fields missing from a request body decode to `None`, same as explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct AqRecord {
    pub aq: String,
    pub signout_name: Option<String>,
    pub prog_id: Option<i32>,
    pub migratory_group: Option<String>,
    pub cruise_id: Option<String>,
    pub comments: Option<String>,
    pub sample_types: Option<String>,
    pub trip: Option<String>,
    pub trip_location: Option<String>,
    pub mgl_lead: Option<String>,
    pub mgl_samplers: Option<String>,
    pub chief_scientist: Option<String>,
    pub target: Option<String>,
    pub comments_collection_method: Option<String>,
    pub vial_series: Option<String>,
    pub comments_vial_series: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Set by the server on create, never changed afterwards
    pub date_added: Option<DateTime<Utc>>,
    /// Set by the server on create and on every update
    pub date_updated: Option<DateTime<Utc>>,
    pub chief_scientist_id: Option<i64>,
}

impl AqRecord {
    /// Record with only the key set.
    pub fn new(aq: impl Into<String>) -> Self {
        Self {
            aq: aq.into(),
            ..Self::default()
        }
    }

    /// Validate the key of a write payload.
    pub fn key(&self) -> Result<AqKey, ValidationError> {
        AqKey::new(&self.aq)
    }
}

/// Validated, non-empty AQ key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AqKey(String);

impl AqKey {
    /// Create a key, rejecting only empty input.
    ///
    /// # Example
    /// ```
    /// use aqctl_server::models::AqKey;
    ///
    /// assert!(AqKey::new("AQ-0001").is_ok());
    /// assert!(AqKey::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "aq" });
        }
        Ok(Self(s.to_owned()))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}
