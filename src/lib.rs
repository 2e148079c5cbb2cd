//! fmt-bridge - Version-adaptive bridge to external code-formatting engines
//!
//! A build pipeline that shells out to an independently versioned formatting
//! engine should not need recompiling every time the engine's API grows a new
//! option. This crate loads one engine artifact per requested version, probes
//! which capabilities that version exposes, and builds a working formatting
//! function from the richest feature set available - degrading gracefully on
//! older versions and failing descriptively only when a caller-required
//! feature is missing.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fmt_bridge::adapter::CapabilityAdapter;
//! use fmt_bridge::domain::{FeatureRequest, LibraryCoordinate};
//! use fmt_bridge::engine::EngineLoader;
//! use fmt_bridge::provision::EngineCatalog;
//!
//! # fn main() -> anyhow::Result<()> {
//! let loader = EngineLoader::new(Arc::new(EngineCatalog::with_default_dir()));
//! let coordinate: LibraryCoordinate = "com.example:fmt-lib:2.57.0".parse()?;
//! let request = FeatureRequest::new("STANDARD").max_line_length(80);
//!
//! let handle = loader.get_or_load(&coordinate)?;
//! let invoker = CapabilityAdapter::default().build(&handle, &request)?;
//! println!("{}", invoker.apply("class A{}")?);
//! # Ok(())
//! # }
//! ```
//!
//! The [`domain::ConfigurationIdentity`] derived from a coordinate and
//! request is a stable cache key, so a surrounding incremental build can skip
//! reconstructing invokers for unchanged configurations.

pub mod adapter;
pub mod domain;
pub mod engine;
pub mod provision;

pub use adapter::{BuildError, CapabilityAdapter, FormatError, FormattingInvoker};
pub use domain::{ConfigurationIdentity, Feature, FeatureRequest, LibraryCoordinate};
pub use engine::{ArtifactHandle, EngineLoader, LoadError};
