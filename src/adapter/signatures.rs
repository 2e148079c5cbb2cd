//! Known construction signatures of the engine entry point
//!
//! Each signature is one way of constructing a formatter instance, from the
//! richest (every optional feature as an explicit parameter) down to the base
//! form every known version accepts. Selection ranks by feature coverage,
//! with declaration order as the stable tiebreak, so the same artifact always
//! selects the same signature.

use crate::domain::Feature;
use crate::engine::ConstructorParam;

/// One candidate construction signature
#[derive(Debug)]
pub(crate) struct Signature {
    /// Short name used in reports and log events
    pub name: &'static str,

    /// Constructor parameters the artifact must accept for this signature
    pub params: &'static [ConstructorParam],

    /// Optional features this signature covers
    pub features: &'static [Feature],
}

impl Signature {
    /// Returns true if this signature covers the given feature
    pub fn covers(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// All known signatures, declared richest first
const SIGNATURES: &[Signature] = &[
    Signature {
        name: "style+doc+width",
        params: &[
            ConstructorParam::Style,
            ConstructorParam::FormatDocComments,
            ConstructorParam::MaxLineLength,
        ],
        features: &[Feature::FormatDocComments, Feature::MaxLineLength],
    },
    Signature {
        name: "style+doc",
        params: &[ConstructorParam::Style, ConstructorParam::FormatDocComments],
        features: &[Feature::FormatDocComments],
    },
    Signature {
        name: "style",
        params: &[ConstructorParam::Style],
        features: &[],
    },
];

/// Returns the candidate signatures in selection order.
///
/// The sort is stable, so equal coverage counts keep declaration order.
pub(crate) fn ranked() -> Vec<&'static Signature> {
    let mut candidates: Vec<&'static Signature> = SIGNATURES.iter().collect();
    candidates.sort_by(|a, b| b.features.len().cmp(&a.features.len()));
    candidates
}
