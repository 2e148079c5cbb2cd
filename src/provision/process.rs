//! Process-backed engine entry point
//!
//! Each resolved artifact is an executable. Probing runs it once with
//! `--manifest` to learn its version and construction surface; formatting
//! stages each run the executable with a JSON request on stdin and read a
//! JSON response from stdout.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::engine::{ArtifactSurface, EngineConfig, EngineEntryPoint, FormatterEngine};

use super::protocol::{EngineManifest, EngineRequest, EngineResponse};

/// Entry point backed by an engine executable
#[derive(Debug)]
pub struct ProcessEntryPoint {
    path: PathBuf,
    manifest: EngineManifest,
    surface: ArtifactSurface,
}

impl ProcessEntryPoint {
    /// Probes an executable for its manifest and builds the entry point
    pub fn probe(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let manifest = load_manifest(&path)?;
        let surface = manifest.surface();

        Ok(Self {
            path,
            manifest,
            surface,
        })
    }

    /// The manifest declared by the executable
    pub fn manifest(&self) -> &EngineManifest {
        &self.manifest
    }

    /// Path of the underlying executable
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EngineEntryPoint for ProcessEntryPoint {
    fn surface(&self) -> &ArtifactSurface {
        &self.surface
    }

    fn instantiate(&self, config: &EngineConfig) -> Result<Box<dyn FormatterEngine>> {
        // Validate the configuration up front so bad styles fail at build
        // time rather than on the first format call.
        let params = serde_json::to_value(config).context("Failed to serialize engine config")?;
        let response = execute(&self.path, &EngineRequest::new("configure", params))?;

        if !response.success {
            bail!(
                "{}",
                response
                    .error
                    .unwrap_or_else(|| "engine rejected the configuration".to_string())
            );
        }

        Ok(Box::new(ProcessEngine {
            path: self.path.clone(),
            config: config.clone(),
        }))
    }
}

/// A configured formatter driving one engine executable
struct ProcessEngine {
    path: PathBuf,
    config: EngineConfig,
}

impl ProcessEngine {
    fn run_operation(&self, operation: &str, source: &str) -> Result<String> {
        let params = serde_json::json!({
            "source": source,
            "config": self.config,
        });
        let response = execute(&self.path, &EngineRequest::new(operation, params))?;

        if !response.success {
            bail!(
                "{}",
                response
                    .error
                    .unwrap_or_else(|| format!("engine operation '{operation}' failed"))
            );
        }

        let data = response
            .data
            .ok_or_else(|| anyhow::anyhow!("No data returned for operation '{operation}'"))?;

        data.get("source")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Engine response is missing 'source' text"))
    }
}

impl FormatterEngine for ProcessEngine {
    fn reorder_imports(&self, source: &str) -> Result<String> {
        self.run_operation("reorder_imports", source)
    }

    fn remove_unused_imports(&self, source: &str) -> Result<String> {
        self.run_operation("remove_unused_imports", source)
    }

    fn format_source(&self, source: &str) -> Result<String> {
        self.run_operation("format_source", source)
    }
}

/// Loads the manifest from an engine executable
fn load_manifest(path: &Path) -> Result<EngineManifest> {
    let output = Command::new(path)
        .arg("--manifest")
        .output()
        .with_context(|| format!("Failed to execute engine: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("Engine returned error: {}", stderr);
    }

    let manifest: EngineManifest = serde_json::from_slice(&output.stdout)
        .with_context(|| "Failed to parse engine manifest")?;

    Ok(manifest)
}

/// Executes one request against an engine executable
fn execute(path: &Path, request: &EngineRequest) -> Result<EngineResponse> {
    let mut child = Command::new(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn engine: {}", path.display()))?;

    let request_json = serde_json::to_string(request).context("Failed to serialize request")?;
    if let Some(stdin) = child.stdin.as_mut() {
        writeln!(stdin, "{}", request_json).context("Failed to write to engine")?;
    }

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("Engine stdout unavailable"))?;
    let reader = BufReader::new(stdout);

    let response_line = reader
        .lines()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No response from engine"))?
        .context("Failed to read engine response")?;

    let response: EngineResponse =
        serde_json::from_str(&response_line).context("Failed to parse engine response")?;

    let _ = child.wait();

    Ok(response)
}
