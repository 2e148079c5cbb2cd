//! Stable identity for a formatter configuration
//!
//! An identity is what a surrounding incremental-build cache keys on. It is
//! derived purely from the coordinate and the feature request, so two equal
//! configurations compare equal whether or not the backing artifact was
//! reloaded in between. The [`fingerprint`](ConfigurationIdentity::fingerprint)
//! digest is stable across process runs and safe to persist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::coordinate::LibraryCoordinate;
use super::features::{Feature, FeatureRequest};

/// Cache key for one formatter configuration
///
/// Equality and hashing are field-wise; used only for caching, never for
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationIdentity {
    coordinate: LibraryCoordinate,
    style: String,
    format_doc_comments: bool,
    max_line_length: Option<u32>,
    required: BTreeSet<Feature>,
}

impl ConfigurationIdentity {
    /// Derives the identity for a coordinate and feature request.
    ///
    /// Pure and total: equal inputs always produce equal identities.
    pub fn new(coordinate: &LibraryCoordinate, request: &FeatureRequest) -> Self {
        Self {
            coordinate: coordinate.clone(),
            style: request.style().to_string(),
            format_doc_comments: request.wants_doc_comments(),
            max_line_length: request.line_length(),
            required: request.required_features().clone(),
        }
    }

    /// Returns the coordinate this identity was derived from
    pub fn coordinate(&self) -> &LibraryCoordinate {
        &self.coordinate
    }

    /// Stable hex digest of the identity for build-cache persistence.
    ///
    /// Hashes the canonical JSON encoding; struct fields and the required
    /// feature set serialize in a fixed order, so the digest only changes
    /// when a field changes.
    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_vec(self).unwrap_or_else(|_| self.coordinate.to_string().into_bytes());
        blake3::hash(&canonical).to_hex().to_string()
    }
}
