//! Engine process protocol types
//!
//! Engine executables communicate via JSON messages over stdin/stdout.
//! Every engine must support the `--manifest` flag to declare its version
//! and construction surface.

use serde::{Deserialize, Serialize};

use crate::engine::{ArtifactSurface, ConstructorParam};

/// Engine manifest declaring version and capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineManifest {
    /// Engine name (e.g., "fmt-lib")
    pub name: String,

    /// Engine version, matched against the requested coordinate
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Construction options this version accepts, by name.
    ///
    /// Kept as plain strings so manifests from newer engines may declare
    /// options this crate does not know about.
    pub options: Vec<String>,

    /// Supported operations
    pub operations: Vec<String>,
}

impl EngineManifest {
    /// Maps the declared options onto the known construction surface.
    ///
    /// Unknown option names are skipped.
    pub fn surface(&self) -> ArtifactSurface {
        ArtifactSurface::new(
            self.options
                .iter()
                .filter_map(|name| ConstructorParam::from_name(name)),
        )
    }
}

/// A message sent to an engine process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRequest {
    /// The operation to perform
    pub operation: String,

    /// Operation-specific parameters
    pub params: serde_json::Value,
}

impl EngineRequest {
    pub fn new(operation: impl Into<String>, params: impl Into<serde_json::Value>) -> Self {
        Self {
            operation: operation.into(),
            params: params.into(),
        }
    }
}

/// A response from an engine process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Result data (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message (if failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EngineResponse {
    pub fn success(data: impl Into<serde_json::Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
