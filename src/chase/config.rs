//! Link chaser configuration.

use serde::{Deserialize, Serialize};

/// What to do when an incoming set yields a link handle that does not resolve.
///
/// Such a handle means the store's indexes disagree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingLinkPolicy {
    /// Abort the call with [`ChaseError::DanglingLink`](super::ChaseError::DanglingLink).
    #[default]
    Fail,
    /// Log a warning and continue with the next candidate.
    Skip,
}

/// Configuration for a [`LinkChaser`](super::LinkChaser).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseConfig {
    /// Handling of unresolvable incoming links.
    #[serde(default)]
    pub dangling_links: DanglingLinkPolicy,
}

impl ChaseConfig {
    /// Strict configuration: dangling links abort the call.
    pub fn strict() -> Self {
        Self {
            dangling_links: DanglingLinkPolicy::Fail,
        }
    }

    /// Lenient configuration: dangling links are skipped.
    pub fn lenient() -> Self {
        Self {
            dangling_links: DanglingLinkPolicy::Skip,
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
