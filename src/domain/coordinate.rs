//! Library coordinates for the wrapped formatting engine
//!
//! A coordinate identifies exactly one published artifact of the engine:
//! `{group}:{name}:{version}` (e.g., `com.example:fmt-lib:2.57.0`).
//! Coordinates are immutable values; equality is field-wise.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("Invalid coordinate format: expected 'group:name:version', got '{0}'")]
    InvalidFormat(String),

    #[error("Coordinate field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Identifies one published version of the wrapped formatting engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LibraryCoordinate {
    /// Group or namespace (e.g., `com.example`)
    group: String,

    /// Artifact name (e.g., `fmt-lib`)
    name: String,

    /// Version string, never empty
    version: String,
}

impl LibraryCoordinate {
    /// Creates a coordinate, rejecting empty fields
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let group = group.into();
        let name = name.into();
        let version = version.into();

        if group.is_empty() {
            return Err(CoordinateError::EmptyField("group"));
        }
        if name.is_empty() {
            return Err(CoordinateError::EmptyField("name"));
        }
        if version.is_empty() {
            return Err(CoordinateError::EmptyField("version"));
        }

        Ok(Self {
            group,
            name,
            version,
        })
    }

    /// Returns the group/namespace portion
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the artifact name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the same artifact at a different version
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self, CoordinateError> {
        Self::new(self.group.clone(), self.name.clone(), version)
    }
}

impl fmt::Display for LibraryCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for LibraryCoordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();

        if parts.len() != 3 {
            return Err(CoordinateError::InvalidFormat(s.to_string()));
        }

        Self::new(parts[0], parts[1], parts[2])
            .map_err(|_| CoordinateError::InvalidFormat(s.to_string()))
    }
}

impl TryFrom<String> for LibraryCoordinate {
    type Error = CoordinateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LibraryCoordinate> for String {
    fn from(coordinate: LibraryCoordinate) -> Self {
        coordinate.to_string()
    }
}

/// Compares two version strings segment-wise.
///
/// Segments are split on `.`; numeric segments compare numerically,
/// anything else falls back to lexicographic order. Missing segments
/// count as zero, so `2.57` equals `2.57.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let l = l.unwrap_or("0");
                let r = r.unwrap_or("0");
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Returns true if version `a` is strictly older than version `b`
pub fn version_lt(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}
