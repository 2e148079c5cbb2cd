//! Formatting invocation wrapper
//!
//! The invoker is the run-time entry point: given source text it runs the
//! fixed three-stage pipeline (import reordering, unused-import removal,
//! structural formatting), each stage consuming the previous stage's output.
//! Stage failures are translated into [`FormatError`] with the attempted
//! engine version and, when a newer known-good version exists, an upgrade
//! recommendation.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{version_lt, ConfigurationIdentity, LibraryCoordinate};
use crate::engine::{ArtifactHandle, FormatterEngine};

use super::CapabilityReport;

/// Engine versions known to work, oldest to newest
const KNOWN_GOOD_VERSIONS: &[&str] = &["1.1.0", "2.28.0", "2.57.0"];

/// Returns the newest known-good version when the given one is older
pub(crate) fn recommended_upgrade(version: &str) -> Option<&'static str> {
    let newest = KNOWN_GOOD_VERSIONS.last()?;
    version_lt(version, newest).then_some(*newest)
}

/// One stage of the formatting pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReorderImports,
    RemoveUnusedImports,
    FormatSource,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ReorderImports => "Import reordering",
            Stage::RemoveUnusedImports => "Unused import removal",
            Stage::FormatSource => "Structural formatting",
        };
        f.write_str(label)
    }
}

fn upgrade_suffix(recommended: &Option<&'static str>) -> String {
    match recommended {
        Some(version) => format!(" (consider upgrading to {version})"),
        None => String::new(),
    }
}

/// A pipeline stage failed for one input
///
/// Reported per input item; the invoker stays valid for subsequent calls.
#[derive(Debug, Error)]
#[error("{stage} failed with formatter version {version}: {detail}{}", upgrade_suffix(.recommended_version))]
pub struct FormatError {
    /// The stage that failed
    pub stage: Stage,

    /// The engine version that produced the failure
    pub version: String,

    /// The underlying engine message
    pub detail: String,

    /// Newer known-good version, when the attempted one is older
    pub recommended_version: Option<&'static str>,
}

/// A working formatting function bound to one loaded artifact
///
/// Created by the capability adapter; reusable across many `apply` calls and
/// discarded when the configuration changes. A single invoker is not
/// guaranteed reentrant; use one invoker per worker, all bound to the same
/// cached [`ArtifactHandle`].
pub struct FormattingInvoker {
    engine: Box<dyn FormatterEngine>,
    handle: Arc<ArtifactHandle>,
    identity: ConfigurationIdentity,
    report: CapabilityReport,
}

impl FormattingInvoker {
    pub(crate) fn new(
        engine: Box<dyn FormatterEngine>,
        handle: Arc<ArtifactHandle>,
        identity: ConfigurationIdentity,
        report: CapabilityReport,
    ) -> Self {
        Self {
            engine,
            handle,
            identity,
            report,
        }
    }

    /// Formats source text through the full pipeline.
    ///
    /// Stage order is fixed: imports are reordered, unused imports removed,
    /// then structural formatting runs over the result. Any stage failure
    /// aborts the pipeline for this input only.
    pub fn apply(&self, source: &str) -> Result<String, FormatError> {
        let reordered = self.run_stage(Stage::ReorderImports, source, |engine, text| {
            engine.reorder_imports(text)
        })?;
        let pruned = self.run_stage(Stage::RemoveUnusedImports, &reordered, |engine, text| {
            engine.remove_unused_imports(text)
        })?;
        self.run_stage(Stage::FormatSource, &pruned, |engine, text| {
            engine.format_source(text)
        })
    }

    /// The coordinate of the artifact this invoker is bound to
    pub fn coordinate(&self) -> &LibraryCoordinate {
        self.handle.coordinate()
    }

    /// The cache identity of the configuration this invoker was built from
    pub fn identity(&self) -> &ConfigurationIdentity {
        &self.identity
    }

    /// Which requested features were honored versus silently ignored
    pub fn report(&self) -> &CapabilityReport {
        &self.report
    }

    fn run_stage<F>(&self, stage: Stage, input: &str, op: F) -> Result<String, FormatError>
    where
        F: FnOnce(&dyn FormatterEngine, &str) -> anyhow::Result<String>,
    {
        let version = self.handle.coordinate().version();
        op(self.engine.as_ref(), input).map_err(|e| FormatError {
            stage,
            version: version.to_string(),
            detail: format!("{e:#}"),
            recommended_version: recommended_upgrade(version),
        })
    }
}

impl fmt::Debug for FormattingInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattingInvoker")
            .field("coordinate", self.handle.coordinate())
            .field("report", &self.report)
            .finish()
    }
}
