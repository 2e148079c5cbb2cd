//! Feature requests for the wrapped formatting engine
//!
//! A [`FeatureRequest`] captures everything a caller wants from a formatter
//! configuration: the style plus any optional capabilities. Optional
//! capabilities may additionally be marked *required*, in which case building
//! against an engine version that lacks them fails instead of degrading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default style when the caller does not specify one
pub const DEFAULT_STYLE: &str = "STANDARD";

/// Optional engine capabilities that vary across engine versions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Reflow and normalize doc comments alongside code
    FormatDocComments,

    /// Override the engine's built-in line length limit
    MaxLineLength,
}

impl Feature {
    /// Minimum engine version known to support this feature, when known.
    ///
    /// `MaxLineLength` only exists in forks, so no upstream version
    /// can be recommended for it.
    pub fn min_version_hint(&self) -> Option<&'static str> {
        match self {
            Feature::FormatDocComments => Some("2.36.0"),
            Feature::MaxLineLength => None,
        }
    }

    /// Returns a display label for the feature
    pub fn label(&self) -> &'static str {
        match self {
            Feature::FormatDocComments => "format_doc_comments",
            Feature::MaxLineLength => "max_line_length",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a caller wants from one formatter configuration
///
/// Immutable once built. The style is always mandatory; every other field is
/// an optional capability that the capability adapter may silently drop when
/// the loaded engine version does not support it, unless the caller marked it
/// required via [`FeatureRequest::require`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureRequest {
    /// Style name passed through to the engine (e.g., `STANDARD`, `AOSP`)
    style: String,

    /// Whether doc comments should be formatted
    format_doc_comments: bool,

    /// Optional line length override
    max_line_length: Option<u32>,

    /// Features that must be honored rather than silently dropped
    required: BTreeSet<Feature>,
}

impl FeatureRequest {
    /// Creates a request for the given style with no optional features
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            format_doc_comments: false,
            max_line_length: None,
            required: BTreeSet::new(),
        }
    }

    /// Enables or disables doc comment formatting
    pub fn format_doc_comments(mut self, enabled: bool) -> Self {
        self.format_doc_comments = enabled;
        self
    }

    /// Sets a line length override
    pub fn max_line_length(mut self, limit: u32) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    /// Marks a feature as required: building fails with a descriptive error
    /// if the loaded engine version cannot honor it
    pub fn require(mut self, feature: Feature) -> Self {
        self.required.insert(feature);
        self
    }

    /// Returns the requested style name
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Returns whether doc comment formatting was requested
    pub fn wants_doc_comments(&self) -> bool {
        self.format_doc_comments
    }

    /// Returns the requested line length override, if any
    pub fn line_length(&self) -> Option<u32> {
        self.max_line_length
    }

    /// Returns the features the caller actually asked for
    pub fn requested_features(&self) -> BTreeSet<Feature> {
        let mut features = BTreeSet::new();
        if self.format_doc_comments {
            features.insert(Feature::FormatDocComments);
        }
        if self.max_line_length.is_some() {
            features.insert(Feature::MaxLineLength);
        }
        features
    }

    /// Returns the features that must be honored
    pub fn required_features(&self) -> &BTreeSet<Feature> {
        &self.required
    }
}

impl Default for FeatureRequest {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_has_no_optional_features() {
        let request = FeatureRequest::default();

        assert_eq!(request.style(), "STANDARD");
        assert!(request.requested_features().is_empty());
        assert!(request.required_features().is_empty());
    }

    #[test]
    fn requested_features_track_builder_calls() {
        let request = FeatureRequest::new("AOSP")
            .format_doc_comments(true)
            .max_line_length(100);

        let features = request.requested_features();
        assert!(features.contains(&Feature::FormatDocComments));
        assert!(features.contains(&Feature::MaxLineLength));
    }

    #[test]
    fn disabled_doc_comments_are_not_requested() {
        let request = FeatureRequest::new("STANDARD").format_doc_comments(false);

        assert!(!request
            .requested_features()
            .contains(&Feature::FormatDocComments));
    }

    #[test]
    fn require_marks_features_without_affecting_requests() {
        let request = FeatureRequest::new("STANDARD")
            .format_doc_comments(true)
            .require(Feature::FormatDocComments);

        assert!(request.required_features().contains(&Feature::FormatDocComments));
        assert!(!request.required_features().contains(&Feature::MaxLineLength));
    }

    #[test]
    fn min_version_hints() {
        assert_eq!(
            Feature::FormatDocComments.min_version_hint(),
            Some("2.36.0")
        );
        assert_eq!(Feature::MaxLineLength.min_version_hint(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let request = FeatureRequest::new("STANDARD")
            .format_doc_comments(true)
            .max_line_length(80)
            .require(Feature::FormatDocComments);

        let json = serde_json::to_string(&request).unwrap();
        let parsed: FeatureRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request, parsed);
    }
}
