//! # Capability Adapter
//!
//! Builds a working [`FormattingInvoker`] for whatever the loaded engine
//! version actually supports.
//!
//! ## Selection
//!
//! The adapter keeps a ranked table of known construction signatures
//! (richest feature coverage first). It probes each candidate against the
//! artifact's declared [`ArtifactSurface`] (introspection only, no trial
//! instantiation) and picks the first match that covers every feature the
//! caller marked *required*:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | Richest match covers all required features | build with it |
//! | Match omits a requested-but-optional feature | build anyway, record it |
//! | No match covers a required feature | [`BuildError::UnsupportedFeature`] |
//! | Engine rejects the configuration | [`BuildError::InvalidConfiguration`] |
//! | Nothing matches at all | [`BuildError::IncompatibleArtifact`] |
//!
//! Optional-feature absence is never an error: the feature is dropped from
//! the engine configuration and listed in the [`CapabilityReport`]. Whether
//! that downgrade also emits a warning is configurable via
//! [`AdapterOptions`].
//!
//! [`ArtifactSurface`]: crate::engine::ArtifactSurface

mod invoker;
mod signatures;

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{ConfigurationIdentity, Feature, FeatureRequest, LibraryCoordinate};
use crate::engine::{ArtifactHandle, EngineConfig};

pub use invoker::{FormatError, FormattingInvoker, Stage};

use signatures::{ranked, Signature};

fn hint_suffix(hint: &Option<&'static str>) -> String {
    match hint {
        Some(version) => format!("; requires at least version {version}"),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Required feature '{feature}' is not supported by {coordinate}{}", hint_suffix(.min_version_hint))]
    UnsupportedFeature {
        feature: Feature,
        coordinate: LibraryCoordinate,
        min_version_hint: Option<&'static str>,
    },

    #[error("Formatter {coordinate} rejected the configuration: {detail}")]
    InvalidConfiguration {
        coordinate: LibraryCoordinate,
        detail: String,
    },

    #[error("Artifact {coordinate} does not match any known formatter entry point shape")]
    IncompatibleArtifact { coordinate: LibraryCoordinate },
}

/// What to do when a requested optional feature is silently dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IgnoredFeaturePolicy {
    /// Record the downgrade in the report only
    #[default]
    Silent,

    /// Record it and emit a warning event
    Warn,
}

/// Adapter configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct AdapterOptions {
    /// Observability of silently ignored optional features
    pub ignored_feature_policy: IgnoredFeaturePolicy,
}

/// Which requested features the built invoker actually honors
///
/// Transient diagnostic value; not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    /// Name of the selected construction signature
    pub signature: &'static str,

    /// Requested features the selected signature covers
    pub honored: BTreeSet<Feature>,

    /// Requested optional features the loaded version cannot honor
    pub ignored: BTreeSet<Feature>,
}

/// Builds formatting invokers against whatever a loaded artifact supports
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityAdapter {
    options: AdapterOptions,
}

impl CapabilityAdapter {
    /// Creates an adapter with the given options
    pub fn new(options: AdapterOptions) -> Self {
        Self { options }
    }

    /// Builds an invoker for the handle and feature request.
    ///
    /// Never fails for requested-but-optional features the loaded version
    /// lacks; fails descriptively when a *required* feature is unavailable.
    pub fn build(
        &self,
        handle: &Arc<ArtifactHandle>,
        request: &FeatureRequest,
    ) -> Result<FormattingInvoker, BuildError> {
        let coordinate = handle.coordinate();
        let surface = handle.surface();

        let matching: Vec<&'static Signature> = ranked()
            .into_iter()
            .filter(|candidate| surface.supports_all(candidate.params))
            .collect();

        if matching.is_empty() {
            return Err(BuildError::IncompatibleArtifact {
                coordinate: coordinate.clone(),
            });
        }

        let required = request.required_features();
        let selected = matching
            .iter()
            .find(|candidate| required.iter().all(|f| candidate.covers(*f)))
            .copied()
            .ok_or_else(|| {
                // No matching candidate covers more than matching[0] does.
                let feature = required
                    .iter()
                    .find(|f| !matching[0].covers(**f))
                    .copied()
                    .unwrap_or(Feature::FormatDocComments);
                BuildError::UnsupportedFeature {
                    feature,
                    coordinate: coordinate.clone(),
                    min_version_hint: feature.min_version_hint(),
                }
            })?;

        let requested = request.requested_features();
        let honored: BTreeSet<Feature> = requested
            .iter()
            .filter(|f| selected.covers(**f))
            .copied()
            .collect();
        let ignored: BTreeSet<Feature> = requested.difference(&honored).copied().collect();

        if !ignored.is_empty() && self.options.ignored_feature_policy == IgnoredFeaturePolicy::Warn
        {
            for feature in &ignored {
                warn!(
                    %coordinate,
                    %feature,
                    "requested feature is not supported by this version and will be ignored"
                );
            }
        }

        let config = engine_config(request, selected);
        debug!(%coordinate, signature = selected.name, "instantiating formatter");

        let engine =
            handle
                .instantiate(&config)
                .map_err(|e| BuildError::InvalidConfiguration {
                    coordinate: coordinate.clone(),
                    detail: format!("{e:#}"),
                })?;

        let report = CapabilityReport {
            signature: selected.name,
            honored,
            ignored,
        };

        Ok(FormattingInvoker::new(
            engine,
            Arc::clone(handle),
            ConfigurationIdentity::new(coordinate, request),
            report,
        ))
    }
}

/// Restricts the request to the options the selected signature covers
fn engine_config(request: &FeatureRequest, selected: &Signature) -> EngineConfig {
    EngineConfig {
        style: request.style().to_string(),
        format_doc_comments: selected
            .covers(Feature::FormatDocComments)
            .then(|| request.wants_doc_comments()),
        max_line_length: selected
            .covers(Feature::MaxLineLength)
            .then(|| request.line_length())
            .flatten(),
    }
}
