//! Engine catalog: locating engine executables for coordinates
//!
//! Engines are located from:
//! 1. Explicit entries, optionally loaded from a TOML catalog file
//! 2. Search directories containing executables named `{name}-{version}`
//!
//! The catalog implements [`ArtifactResolver`], so it plugs directly into an
//! [`EngineLoader`](crate::engine::EngineLoader).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::LibraryCoordinate;
use crate::engine::{ArtifactResolver, EngineEntryPoint};

use super::process::ProcessEntryPoint;

/// One entry in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    /// Coordinate the executable provides
    coordinate: LibraryCoordinate,

    /// Path to the engine executable
    path: PathBuf,
}

/// On-disk catalog file format
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "engine")]
    engines: Vec<CatalogEntry>,
}

/// Resolves coordinates to engine executables
#[derive(Debug, Default)]
pub struct EngineCatalog {
    /// Explicit coordinate-to-path entries, consulted first
    entries: HashMap<LibraryCoordinate, PathBuf>,

    /// Directories scanned for `{name}-{version}` executables
    search_dirs: Vec<PathBuf>,
}

impl EngineCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog that searches the per-user engine directory
    pub fn with_default_dir() -> Self {
        let mut catalog = Self::new();
        if let Some(dirs) = ProjectDirs::from("", "", "fmt-bridge") {
            catalog.add_search_dir(dirs.data_dir().join("engines"));
        }
        catalog
    }

    /// Loads explicit entries from a TOML catalog file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine catalog: {}", path.display()))?;
        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse engine catalog: {}", path.display()))?;

        let mut catalog = Self::new();
        for entry in file.engines {
            catalog.add_entry(entry.coordinate, entry.path);
        }
        Ok(catalog)
    }

    /// Registers an explicit executable for a coordinate
    pub fn add_entry(&mut self, coordinate: LibraryCoordinate, path: impl Into<PathBuf>) {
        self.entries.insert(coordinate, path.into());
    }

    /// Adds a directory to search for engine executables
    pub fn add_search_dir(&mut self, dir: impl Into<PathBuf>) {
        self.search_dirs.push(dir.into());
    }

    /// Locates the executable for a coordinate, explicit entries first
    fn locate(&self, coordinate: &LibraryCoordinate) -> Option<PathBuf> {
        if let Some(path) = self.entries.get(coordinate) {
            return Some(path.clone());
        }

        let file_name = format!("{}-{}", coordinate.name(), coordinate.version());
        for dir in &self.search_dirs {
            let candidate = dir.join(&file_name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }

        None
    }
}

impl ArtifactResolver for EngineCatalog {
    fn resolve(&self, coordinate: &LibraryCoordinate) -> Result<Box<dyn EngineEntryPoint>> {
        let path = self.locate(coordinate).ok_or_else(|| {
            anyhow::anyhow!(
                "No engine executable found for {} (checked {} explicit entries and {} directories)",
                coordinate,
                self.entries.len(),
                self.search_dirs.len()
            )
        })?;

        let entry = ProcessEntryPoint::probe(&path)?;
        let manifest = entry.manifest();

        if manifest.name != coordinate.name() {
            bail!(
                "Engine at {} declares name '{}' but coordinate requires '{}'",
                path.display(),
                manifest.name,
                coordinate.name()
            );
        }
        if manifest.version != coordinate.version() {
            bail!(
                "Engine at {} declares version {} but coordinate requires {}",
                path.display(),
                manifest.version,
                coordinate.version()
            );
        }

        Ok(Box::new(entry))
    }
}

/// Checks if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = path.metadata() {
            return meta.is_file() && meta.permissions().mode() & 0o111 != 0;
        }
    }

    #[cfg(windows)]
    {
        if path.is_file() {
            if let Some(ext) = path.extension() {
                return ext == "exe" || ext == "bat" || ext == "cmd";
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn coordinate(version: &str) -> LibraryCoordinate {
        LibraryCoordinate::new("com.example", "fmt-lib", version).unwrap()
    }

    #[test]
    fn empty_catalog_locates_nothing() {
        let catalog = EngineCatalog::new();
        assert!(catalog.locate(&coordinate("1.1.0")).is_none());
    }

    #[test]
    fn explicit_entry_wins_over_search_dirs() {
        let dir = TempDir::new().unwrap();
        let mut catalog = EngineCatalog::new();
        catalog.add_search_dir(dir.path());
        catalog.add_entry(coordinate("1.1.0"), "/explicit/fmt-lib-1.1.0");

        let located = catalog.locate(&coordinate("1.1.0")).unwrap();
        assert_eq!(located, PathBuf::from("/explicit/fmt-lib-1.1.0"));
    }

    #[cfg(unix)]
    #[test]
    fn search_dir_finds_named_executables() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fmt-lib-2.57.0");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let mut catalog = EngineCatalog::new();
        catalog.add_search_dir(dir.path());

        assert_eq!(catalog.locate(&coordinate("2.57.0")), Some(path));
        assert!(catalog.locate(&coordinate("1.1.0")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fmt-lib-2.57.0");
        fs::write(&path, "not a program").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut catalog = EngineCatalog::new();
        catalog.add_search_dir(dir.path());

        assert!(catalog.locate(&coordinate("2.57.0")).is_none());
    }

    #[test]
    fn catalog_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engines.toml");
        fs::write(
            &path,
            r#"
            [[engine]]
            coordinate = "com.example:fmt-lib:2.57.0"
            path = "/opt/engines/fmt-lib-2.57.0"

            [[engine]]
            coordinate = "com.example:fmt-lib:1.1.0"
            path = "/opt/engines/fmt-lib-1.1.0"
            "#,
        )
        .unwrap();

        let catalog = EngineCatalog::from_file(&path).unwrap();

        assert_eq!(
            catalog.locate(&coordinate("2.57.0")),
            Some(PathBuf::from("/opt/engines/fmt-lib-2.57.0"))
        );
        assert_eq!(
            catalog.locate(&coordinate("1.1.0")),
            Some(PathBuf::from("/opt/engines/fmt-lib-1.1.0"))
        );
    }

    #[test]
    fn malformed_catalog_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engines.toml");
        fs::write(&path, "[[engine]]\ncoordinate = \"not-a-coordinate\"\n").unwrap();

        assert!(EngineCatalog::from_file(&path).is_err());
    }

    #[test]
    fn missing_coordinate_resolution_is_descriptive() {
        let catalog = EngineCatalog::new();
        let err = catalog.resolve(&coordinate("9.9.9")).unwrap_err();

        assert!(err.to_string().contains("com.example:fmt-lib:9.9.9"));
    }
}
