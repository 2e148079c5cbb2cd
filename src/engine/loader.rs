//! Lazy shared loader for engine artifacts
//!
//! Loading an artifact is expensive (resolution, linking, process spawning),
//! so the loader memoizes handles per coordinate with single-flight
//! semantics: concurrent requests for one coordinate trigger exactly one
//! resolver call and every caller receives the same handle. The cache is an
//! explicit, injectable object rather than process-global state, which keeps
//! tests deterministic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::debug;

use crate::domain::LibraryCoordinate;

use super::handle::ArtifactHandle;
use super::traits::ArtifactResolver;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("Failed to load formatter artifact {coordinate}: {cause}")]
    Resolution {
        coordinate: LibraryCoordinate,
        cause: String,
    },

    #[error("Artifact {coordinate} does not expose a formatter entry point")]
    MissingEntryPoint { coordinate: LibraryCoordinate },
}

type LoadOutcome = Result<Arc<ArtifactHandle>, LoadError>;

/// Memoizing loader for artifact handles
///
/// Entries are added once and never mutated in place. A failed load stays
/// cached (no automatic retry) until [`invalidate`](EngineLoader::invalidate)
/// drops it.
pub struct EngineLoader {
    resolver: Arc<dyn ArtifactResolver>,

    /// Per-coordinate cells; the map lock is only held to fetch or insert a
    /// cell, never across a load, so unrelated coordinates load in parallel
    cache: Mutex<HashMap<LibraryCoordinate, Arc<OnceCell<LoadOutcome>>>>,
}

impl EngineLoader {
    /// Creates a loader backed by the given resolver
    pub fn new(resolver: Arc<dyn ArtifactResolver>) -> Self {
        Self {
            resolver,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached handle for a coordinate, loading it on first use.
    ///
    /// Concurrent calls for the same coordinate block on one underlying load
    /// and all receive the same handle. Failures are cached and re-surfaced
    /// on subsequent calls.
    pub fn get_or_load(&self, coordinate: &LibraryCoordinate) -> LoadOutcome {
        let cell = self.cell_for(coordinate);
        cell.get_or_init(|| self.load(coordinate)).clone()
    }

    /// Drops the cached entry for a coordinate so a later call retries.
    ///
    /// Callers already holding the handle are unaffected.
    pub fn invalidate(&self, coordinate: &LibraryCoordinate) {
        let mut cache = self.lock_cache();
        cache.remove(coordinate);
    }

    /// Drops every cached entry
    pub fn clear(&self) {
        let mut cache = self.lock_cache();
        cache.clear();
    }

    /// Returns true if the coordinate has a cached outcome (success or failure)
    pub fn is_cached(&self, coordinate: &LibraryCoordinate) -> bool {
        let cache = self.lock_cache();
        cache
            .get(coordinate)
            .map(|cell| cell.get().is_some())
            .unwrap_or(false)
    }

    fn cell_for(&self, coordinate: &LibraryCoordinate) -> Arc<OnceCell<LoadOutcome>> {
        let mut cache = self.lock_cache();
        cache.entry(coordinate.clone()).or_default().clone()
    }

    fn lock_cache(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<LibraryCoordinate, Arc<OnceCell<LoadOutcome>>>> {
        // A poisoned lock only means another holder panicked; the map
        // itself is always consistent.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load(&self, coordinate: &LibraryCoordinate) -> LoadOutcome {
        debug!(%coordinate, "loading formatter artifact");

        let entry = self
            .resolver
            .resolve(coordinate)
            .map_err(|e| LoadError::Resolution {
                coordinate: coordinate.clone(),
                cause: format!("{e:#}"),
            })?;

        if entry.surface().is_empty() {
            return Err(LoadError::MissingEntryPoint {
                coordinate: coordinate.clone(),
            });
        }

        debug!(%coordinate, surface = ?entry.surface(), "formatter artifact loaded");
        Ok(Arc::new(ArtifactHandle::new(coordinate.clone(), entry)))
    }
}

impl std::fmt::Debug for EngineLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.lock_cache().len();
        f.debug_struct("EngineLoader")
            .field("cached_coordinates", &cached)
            .finish()
    }
}
