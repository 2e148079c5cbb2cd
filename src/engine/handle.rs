//! Handle to one loaded artifact
//!
//! A handle pairs a coordinate with the entry point that was resolved for it.
//! Handles are created by the loader, cached for the process lifetime, and
//! never mutated after construction.

use crate::domain::LibraryCoordinate;

use super::surface::{ArtifactSurface, EngineConfig};
use super::traits::{EngineEntryPoint, FormatterEngine};

/// One resolved, loaded instance of the external library
pub struct ArtifactHandle {
    coordinate: LibraryCoordinate,
    entry: Box<dyn EngineEntryPoint>,
}

impl ArtifactHandle {
    /// Wraps a resolved entry point for the given coordinate
    pub fn new(coordinate: LibraryCoordinate, entry: Box<dyn EngineEntryPoint>) -> Self {
        Self { coordinate, entry }
    }

    /// The coordinate this handle was loaded for
    pub fn coordinate(&self) -> &LibraryCoordinate {
        &self.coordinate
    }

    /// The declared construction surface of the loaded artifact
    pub fn surface(&self) -> &ArtifactSurface {
        self.entry.surface()
    }

    /// Constructs a formatter instance inside the loaded artifact
    pub fn instantiate(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn FormatterEngine>> {
        self.entry.instantiate(config)
    }
}

impl std::fmt::Debug for ArtifactHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactHandle")
            .field("coordinate", &self.coordinate)
            .field("surface", self.entry.surface())
            .finish()
    }
}
