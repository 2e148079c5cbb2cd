//! Declared construction surface of a loaded artifact
//!
//! Instead of trial instantiation, every loaded artifact describes which
//! constructor parameters its entry point accepts. Capability probing is a
//! non-throwing check against this description.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::Feature;

/// One constructor parameter the engine entry point may accept
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorParam {
    /// Style name, accepted by every known engine version
    Style,

    /// Doc comment formatting toggle
    FormatDocComments,

    /// Line length override
    MaxLineLength,
}

impl ConstructorParam {
    /// Parses a parameter name as declared by an engine manifest.
    ///
    /// Unknown names return `None` so newer engines can declare parameters
    /// this crate does not know about yet without breaking resolution.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "style" => Some(ConstructorParam::Style),
            "format_doc_comments" => Some(ConstructorParam::FormatDocComments),
            "max_line_length" => Some(ConstructorParam::MaxLineLength),
            _ => None,
        }
    }

    /// Returns the manifest name of the parameter
    pub fn name(&self) -> &'static str {
        match self {
            ConstructorParam::Style => "style",
            ConstructorParam::FormatDocComments => "format_doc_comments",
            ConstructorParam::MaxLineLength => "max_line_length",
        }
    }
}

impl From<Feature> for ConstructorParam {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::FormatDocComments => ConstructorParam::FormatDocComments,
            Feature::MaxLineLength => ConstructorParam::MaxLineLength,
        }
    }
}

impl fmt::Display for ConstructorParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of constructor parameters a loaded artifact accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSurface {
    params: BTreeSet<ConstructorParam>,
}

impl ArtifactSurface {
    /// Creates a surface from the given parameters
    pub fn new(params: impl IntoIterator<Item = ConstructorParam>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    /// Base surface every known engine version exposes (style only)
    pub fn base() -> Self {
        Self::new([ConstructorParam::Style])
    }

    /// Returns true if the artifact accepts the given parameter
    pub fn supports(&self, param: ConstructorParam) -> bool {
        self.params.contains(&param)
    }

    /// Returns true if the artifact accepts every one of the given parameters
    pub fn supports_all(&self, params: &[ConstructorParam]) -> bool {
        params.iter().all(|p| self.supports(*p))
    }

    /// Returns true if no parameters are declared at all
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The declared parameters
    pub fn params(&self) -> &BTreeSet<ConstructorParam> {
        &self.params
    }
}

/// Resolved construction arguments passed to an engine entry point
///
/// Only fields covered by the selected construction signature are set; the
/// capability adapter leaves everything else `None` so older engines never
/// see options they cannot handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Style name, always present
    pub style: String,

    /// Doc comment formatting toggle, if the signature covers it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_doc_comments: Option<bool>,

    /// Line length override, if the signature covers it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<u32>,
}
