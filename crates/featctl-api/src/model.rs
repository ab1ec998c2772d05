// ── Registry domain model ──
//
// Feature is the only entity the registry exposes in this surface.
// Identifiers are opaque strings assigned by the backend; the client
// never inspects or generates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FeatureId ───────────────────────────────────────────────────────

/// Opaque identifier for a registered feature.
///
/// Assigned by the backend on creation and immutable afterwards. A
/// record without an id has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FeatureId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Feature ─────────────────────────────────────────────────────────

/// A named metadata record describing a derived data attribute (ML
/// feature) tracked by the store.
///
/// Wire format is camelCase JSON. All fields except `name` are
/// free-form: `owners` is comma-separated by convention but never
/// parsed client-side, and `status` carries no enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Backend-assigned identifier; `None` for a not-yet-created record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,

    /// Required, non-empty. The only field validated client-side.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub feature_type: String,

    /// Shown as a link target in table views.
    #[serde(default)]
    pub data_source: String,

    #[serde(default)]
    pub owners: String,
}

impl Feature {
    /// A draft record with the given name and every other field empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            status: String::new(),
            feature_type: String::new(),
            data_source: String::new(),
            owners: String::new(),
        }
    }

    /// `true` once the backend has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

// ── FeaturePage ─────────────────────────────────────────────────────

/// One page of list results, paired with the backend-reported total
/// count used for pagination display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturePage {
    /// Rows in server order; the client never re-sorts.
    pub items: Vec<Feature>,
    /// Total matching records across all pages.
    pub total: u64,
}
