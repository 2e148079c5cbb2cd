//! # Engine Provisioning
//!
//! A stock [`ArtifactResolver`](crate::engine::ArtifactResolver) backed by
//! external engine executables.
//!
//! Each engine version is a separate executable that speaks JSON over
//! stdin/stdout and declares its construction surface via `--manifest`:
//!
//! ```text
//! Bridge                          Engine Executable
//!  │                                  │
//!  ├── Run: fmt-lib-2.57.0 --manifest │
//!  │                                  │
//!  ├── Stdin: {"operation": "format_source", "params": {...}}
//!  │                                  │
//!  └── Stdout: {"success": true, "data": {"source": "..."}}
//! ```
//!
//! The [`EngineCatalog`] maps coordinates to executables through explicit
//! entries (optionally loaded from a TOML file) and directory scanning, and
//! hands each located executable to [`ProcessEntryPoint`].

mod catalog;
mod process;
mod protocol;

pub use catalog::EngineCatalog;
pub use process::ProcessEntryPoint;
pub use protocol::{EngineManifest, EngineRequest, EngineResponse};
