//! Resolution-specific error types.
//!
//! This module provides structured error handling for configuration
//! resolution and config-file loading, with diagnostic information for
//! each failure mode.

use std::path::PathBuf;
use sweep_core::types::TableError;
use thiserror::Error;

/// Errors that can occur while resolving a configuration to a fixed point.
///
/// Provides structured error handling with diagnostic information
/// including offending keys, action names, and pass counts.
///
/// # Variants
///
/// - `UnresolvedReference`: A reference names a key absent from the configuration
/// - `IncompleteAction`: An action node stabilised with a missing or non-numeric field
/// - `UnknownAction`: An action node names an unrecognised action
/// - `DidNotConverge`: The pass cap was reached before a fixed point
/// - `Table`: Wrapped table validation error from an inline or loaded table
/// - `TableRead`: A table file could not be opened or read
/// - `TableRow`: A table file row is not a numeric pair
///
/// # Examples
///
/// ```
/// use sweep_resolve::ResolveError;
///
/// let err = ResolveError::unresolved_reference("ambient_temperature");
/// assert!(format!("{}", err).contains("ambient_temperature"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// A reference inside a stalled action node names a key absent from
    /// the configuration.
    #[error("Unresolved reference '{key}': no such key in the configuration")]
    UnresolvedReference {
        /// The key that could not be looked up
        key: String,
    },

    /// An action node stabilised without collapsing because a required
    /// field is missing or has the wrong shape.
    #[error("Action '{action}' stabilised with unresolved field '{field}'")]
    IncompleteAction {
        /// The action name
        action: String,
        /// The field that blocked the collapse
        field: String,
    },

    /// An action node names an action this engine does not implement.
    #[error("Unknown action '{action}': expected one of interpolate, interpolate_from_csv, gaussian")]
    UnknownAction {
        /// The unrecognised action name
        action: String,
    },

    /// The pass cap was reached while the configuration was still changing.
    ///
    /// Almost always caused by a reference cycle, which would otherwise
    /// rewrite forever.
    #[error("Configuration did not reach a fixed point after {passes} passes")]
    DidNotConverge {
        /// Number of passes executed before giving up
        passes: usize,
    },

    /// Wrapped table validation error from interpolation table construction.
    #[error("Malformed interpolation table: {0}")]
    Table(#[from] TableError),

    /// A table file named by an `interpolate_from_csv` action could not
    /// be opened or read.
    #[error("Failed to read table file {}: {reason}", path.display())]
    TableRead {
        /// Path of the table file
        path: PathBuf,
        /// Underlying I/O failure description
        reason: String,
    },

    /// A table file row did not parse as a numeric `(input, output)` pair.
    #[error("Malformed row in table file {} at line {line}: expected two numeric columns", path.display())]
    TableRow {
        /// Path of the table file
        path: PathBuf,
        /// One-based line number of the offending row
        line: usize,
    },
}

impl ResolveError {
    /// Create an unresolved reference error.
    pub fn unresolved_reference(key: impl Into<String>) -> Self {
        Self::UnresolvedReference { key: key.into() }
    }

    /// Create an incomplete action error.
    pub fn incomplete_action(action: impl Into<String>, field: impl Into<String>) -> Self {
        Self::IncompleteAction {
            action: action.into(),
            field: field.into(),
        }
    }

    /// Create an unknown action error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Create a did-not-converge error.
    pub fn did_not_converge(passes: usize) -> Self {
        Self::DidNotConverge { passes }
    }

    /// Create a table read error.
    pub fn table_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::TableRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a table row error.
    pub fn table_row(path: impl Into<PathBuf>, line: usize) -> Self {
        Self::TableRow {
            path: path.into(),
            line,
        }
    }

    /// Check if this is an unresolved reference error.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }

    /// Check if this is an incomplete action error.
    pub fn is_incomplete_action(&self) -> bool {
        matches!(self, Self::IncompleteAction { .. })
    }

    /// Check if this is an unknown action error.
    pub fn is_unknown_action(&self) -> bool {
        matches!(self, Self::UnknownAction { .. })
    }

    /// Check if this is a did-not-converge error.
    pub fn is_did_not_converge(&self) -> bool {
        matches!(self, Self::DidNotConverge { .. })
    }
}

/// Errors that can occur while loading a configuration document.
///
/// Loading covers reading the file, stripping line comments, parsing the
/// remaining text, and checking that the root is a mapping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// A config file could not be opened or read.
    #[error("Failed to read config file {}: {reason}", path.display())]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O failure description
        reason: String,
    },

    /// The comment-stripped text is not a valid config document.
    #[error("Invalid config document: {reason}")]
    Parse {
        /// Parser failure description
        reason: String,
    },

    /// The document parsed, but its root is not a mapping.
    #[error("Config root must be a mapping of parameter names to values")]
    NotAMapping,
}
