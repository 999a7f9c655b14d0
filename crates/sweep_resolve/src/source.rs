//! Config document loading.
//!
//! Config files are JSON extended with `//` line comments. Several
//! documents can be layered: later documents override earlier ones key
//! by key at the top level, which keeps a base parameter set separate
//! from per-experiment overrides.

use crate::error::SourceError;
use std::path::Path;
use sweep_core::types::{Config, Value};

/// Strip `//` line comments from a config document.
///
/// Comment detection is string-aware: a `//` inside a quoted string is
/// left alone. Everything from an unquoted `//` to the end of its line
/// is removed.
pub fn strip_line_comments(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    for line in text.lines() {
        stripped.push_str(uncommented(line));
        stripped.push('\n');
    }
    stripped
}

fn uncommented(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &byte) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                return &line[..i];
            }
            _ => {}
        }
    }
    line
}

/// Parse a config document, stripping line comments first.
///
/// # Returns
///
/// * `Ok(config)` - The document's top-level mapping
/// * `Err(SourceError)` - If the text does not parse, or its root is
///   not a mapping
///
/// # Example
///
/// ```
/// use sweep_resolve::parse_config;
///
/// let config = parse_config(
///     r#"{
///         "axon_length": 300.0, // micrometres
///         "segments": 100
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config["segments"].as_number(), Some(100.0));
/// ```
pub fn parse_config(text: &str) -> Result<Config, SourceError> {
    let document: Value = serde_json::from_str(&strip_line_comments(text)).map_err(|e| {
        SourceError::Parse {
            reason: e.to_string(),
        }
    })?;
    match document {
        Value::Map(config) => Ok(config),
        _ => Err(SourceError::NotAMapping),
    }
}

/// Load one config document from a file.
pub fn load_config(path: &Path) -> Result<Config, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&text)
}

/// Load and merge a sequence of config documents.
///
/// Later paths override earlier ones key by key at the top level. An
/// empty path list yields an empty config.
pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<Config, SourceError> {
    let mut merged = Config::new();
    for path in paths {
        let layer = load_config(path.as_ref())?;
        merge_layer(&mut merged, layer);
    }
    Ok(merged)
}

/// Overlay one config onto another, key by key at the top level.
pub fn merge_layer(base: &mut Config, overlay: Config) {
    base.extend(overlay);
}
