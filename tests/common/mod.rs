//! Shared test fixtures: an in-memory engine family with version-dependent
//! construction surfaces, plus a counting resolver for loader tests.
//!
//! The toy engine implements just enough formatting behavior to observe the
//! pipeline stages: alphabetical import ordering, unused-import removal by
//! symbol reference, brace/indentation normalization, optional doc comment
//! reflow, and optional line wrapping.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fmt_bridge::domain::{version_lt, LibraryCoordinate};
use fmt_bridge::engine::{
    ArtifactResolver, ArtifactSurface, ConstructorParam, EngineConfig, EngineEntryPoint,
    FormatterEngine,
};

const VALID_STYLES: &[&str] = &["STANDARD", "AOSP", "PALANTIR"];

/// Construction surface the fake engine family exposes at a given version
pub fn surface_for(version: &str) -> ArtifactSurface {
    if version_lt(version, "2.36.0") {
        ArtifactSurface::new([ConstructorParam::Style])
    } else if version_lt(version, "2.57.0") {
        ArtifactSurface::new([ConstructorParam::Style, ConstructorParam::FormatDocComments])
    } else {
        ArtifactSurface::new([
            ConstructorParam::Style,
            ConstructorParam::FormatDocComments,
            ConstructorParam::MaxLineLength,
        ])
    }
}

pub fn coordinate(version: &str) -> LibraryCoordinate {
    LibraryCoordinate::new("com.example", "fmt-lib", version).unwrap()
}

/// In-memory entry point for one fake engine version
#[derive(Debug)]
pub struct FakeEntryPoint {
    surface: ArtifactSurface,
}

impl FakeEntryPoint {
    pub fn new(version: &str) -> Self {
        Self {
            surface: surface_for(version),
        }
    }
}

impl EngineEntryPoint for FakeEntryPoint {
    fn surface(&self) -> &ArtifactSurface {
        &self.surface
    }

    fn instantiate(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn FormatterEngine>> {
        if !VALID_STYLES.contains(&config.style.as_str()) {
            anyhow::bail!("unknown style name: {}", config.style);
        }
        Ok(Box::new(ToyEngine {
            style: config.style.clone(),
            format_doc_comments: config.format_doc_comments.unwrap_or(false),
            max_line_length: config.max_line_length,
        }))
    }
}

/// Resolver over the fake engine family, counting resolutions
pub struct FakeResolver {
    loads: AtomicUsize,
    load_delay: Option<Duration>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            load_delay: None,
        }
    }

    /// Adds an artificial delay to each load to widen race windows
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            loads: AtomicUsize::new(0),
            load_delay: Some(delay),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ArtifactResolver for FakeResolver {
    fn resolve(
        &self,
        coordinate: &LibraryCoordinate,
    ) -> anyhow::Result<Box<dyn EngineEntryPoint>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.load_delay {
            std::thread::sleep(delay);
        }
        if coordinate.name() != "fmt-lib" {
            anyhow::bail!("no such artifact: {coordinate}");
        }
        Ok(Box::new(FakeEntryPoint::new(coordinate.version())))
    }
}

/// Deterministic toy formatter used to observe pipeline behavior
pub struct ToyEngine {
    style: String,
    format_doc_comments: bool,
    max_line_length: Option<u32>,
}

impl ToyEngine {
    fn indent_unit(&self) -> usize {
        match self.style.as_str() {
            "AOSP" => 8,
            _ => 4,
        }
    }
}

impl FormatterEngine for ToyEngine {
    fn reorder_imports(&self, source: &str) -> anyhow::Result<String> {
        let mut header: Vec<String> = Vec::new();
        let mut imports: Vec<String> = Vec::new();
        let mut rest: Vec<String> = Vec::new();
        let mut seen_import = false;

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with("import ") {
                imports.push(trimmed.to_string());
                seen_import = true;
            } else if !seen_import
                && rest.is_empty()
                && (trimmed.is_empty() || trimmed.starts_with("package "))
            {
                header.push(line.to_string());
            } else {
                rest.push(line.to_string());
            }
        }

        imports.sort();
        imports.dedup();

        let mut out: Vec<String> = Vec::new();
        out.extend(header);
        out.extend(imports);
        out.extend(rest);
        Ok(out.join("\n"))
    }

    fn remove_unused_imports(&self, source: &str) -> anyhow::Result<String> {
        let body: String = source
            .lines()
            .filter(|line| !line.trim().starts_with("import "))
            .collect::<Vec<_>>()
            .join("\n");

        let kept: Vec<&str> = source
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if !trimmed.starts_with("import ") {
                    return true;
                }
                let symbol = trimmed
                    .trim_start_matches("import ")
                    .trim_end_matches(';')
                    .rsplit('.')
                    .next()
                    .unwrap_or("");
                !symbol.is_empty() && body.contains(symbol)
            })
            .collect();

        Ok(kept.join("\n"))
    }

    fn format_source(&self, source: &str) -> anyhow::Result<String> {
        let segments = self.segment(source);
        let mut out = String::new();
        let mut depth: usize = 0;

        for segment in segments {
            if segment.is_empty() {
                out.push('\n');
                continue;
            }
            if segment.starts_with('}') {
                depth = depth.saturating_sub(1);
            }
            let indent = " ".repeat(depth * self.indent_unit());
            let line = format!("{indent}{segment}");
            for piece in self.wrap(&line) {
                out.push_str(&piece);
                out.push('\n');
            }
            if segment.ends_with('{') {
                depth += 1;
            }
        }

        Ok(out)
    }
}

impl ToyEngine {
    /// Splits source into logical lines, breaking at braces
    fn segment(&self, source: &str) -> Vec<String> {
        let mut segments: Vec<String> = Vec::new();

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                segments.push(String::new());
                continue;
            }
            if self.format_doc_comments && is_doc_line(trimmed) {
                let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
                if collapsed.starts_with('*') {
                    segments.push(format!(" {collapsed}"));
                } else {
                    segments.push(collapsed);
                }
                continue;
            }

            let mut current = String::new();
            for ch in trimmed.chars() {
                match ch {
                    '{' => {
                        let head = current.trim_end();
                        if head.is_empty() {
                            segments.push("{".to_string());
                        } else {
                            segments.push(format!("{head} {{"));
                        }
                        current.clear();
                    }
                    '}' => {
                        let head = current.trim().to_string();
                        if !head.is_empty() {
                            segments.push(head);
                        }
                        segments.push("}".to_string());
                        current.clear();
                    }
                    _ => current.push(ch),
                }
            }
            let tail = current.trim().to_string();
            if !tail.is_empty() {
                segments.push(tail);
            }
        }

        segments
    }

    /// Wraps a rendered line at the configured limit, if any
    fn wrap(&self, line: &str) -> Vec<String> {
        let Some(width) = self.max_line_length.map(|w| w as usize) else {
            return vec![line.to_string()];
        };

        let continuation = " ".repeat(line.len() - line.trim_start().len() + 8);
        let mut pieces = Vec::new();
        let mut remaining = line.to_string();

        loop {
            if remaining.len() <= width {
                pieces.push(remaining);
                break;
            }
            // Only break after the leading indent; an unbreakable token
            // longer than the limit is emitted as-is.
            let lead = remaining.len() - remaining.trim_start().len();
            let window = &remaining[..width];
            match window.rfind(' ').filter(|&at| at > lead) {
                Some(at) => {
                    pieces.push(remaining[..at].trim_end().to_string());
                    let tail = remaining[at..].trim_start().to_string();
                    remaining = format!("{continuation}{tail}");
                }
                None => {
                    pieces.push(remaining);
                    break;
                }
            }
        }

        pieces
    }
}

fn is_doc_line(trimmed: &str) -> bool {
    trimmed.starts_with("/**") || trimmed.starts_with('*')
}
