//! Collaborator interfaces around the wrapped engine
//!
//! Artifact resolution is an external concern: something else turns a
//! coordinate into loadable code. This crate only consumes the result through
//! these traits.

use crate::domain::LibraryCoordinate;

use super::surface::{ArtifactSurface, EngineConfig};

/// A constructed formatter instance inside a loaded artifact
///
/// Instances are bound to one configuration at construction time. Calls are
/// pure text-to-text transformations; a single instance is not guaranteed
/// reentrant, so callers wanting parallelism should construct one instance
/// per worker.
pub trait FormatterEngine: Send {
    /// Reorders import statements according to the configured style
    fn reorder_imports(&self, source: &str) -> anyhow::Result<String>;

    /// Removes imports the engine detects as unused
    fn remove_unused_imports(&self, source: &str) -> anyhow::Result<String>;

    /// Applies full structural formatting
    fn format_source(&self, source: &str) -> anyhow::Result<String>;
}

/// The entry point exposed by one loaded artifact
///
/// Shared freely across workers once loaded; implementations must not mutate
/// state after construction.
pub trait EngineEntryPoint: Send + Sync + std::fmt::Debug {
    /// Describes which constructor parameters this artifact version accepts
    fn surface(&self) -> &ArtifactSurface;

    /// Constructs a formatter instance for the given configuration.
    ///
    /// Fails when the engine itself rejects the configuration (e.g. an
    /// unknown style name); the capability adapter translates such failures
    /// into a typed error.
    fn instantiate(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn FormatterEngine>>;
}

/// Resolves a coordinate to a loaded artifact entry point
///
/// Implementations own the expensive part: locating artifacts, linking or
/// spawning them, and producing an entry point. The lazy shared loader
/// guarantees each coordinate is resolved at most once.
pub trait ArtifactResolver: Send + Sync {
    /// Resolves the artifact for a fully specified coordinate
    fn resolve(&self, coordinate: &LibraryCoordinate) -> anyhow::Result<Box<dyn EngineEntryPoint>>;
}
