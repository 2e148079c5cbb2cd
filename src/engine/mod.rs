//! # Engine Abstraction
//!
//! Interfaces around the wrapped, independently versioned formatting engine.
//!
//! The bridge never links the engine at compile time. Instead, an
//! [`ArtifactResolver`] collaborator turns a [`LibraryCoordinate`] into an
//! [`EngineEntryPoint`], whose [`ArtifactSurface`] declares which constructor
//! parameters that version accepts. The [`EngineLoader`] memoizes the result
//! per coordinate with single-flight semantics.
//!
//! ## Key types
//!
//! - [`EngineLoader`] - lazy shared loader, one load per coordinate
//! - [`ArtifactHandle`] - one loaded artifact, cached for the process lifetime
//! - [`ArtifactSurface`] - declared construction capabilities of a version
//! - [`FormatterEngine`] - a constructed formatter instance
//!
//! [`LibraryCoordinate`]: crate::domain::LibraryCoordinate

mod handle;
mod loader;
mod surface;
mod traits;

pub use handle::ArtifactHandle;
pub use loader::{EngineLoader, LoadError};
pub use surface::{ArtifactSurface, ConstructorParam, EngineConfig};
pub use traits::{ArtifactResolver, EngineEntryPoint, FormatterEngine};
