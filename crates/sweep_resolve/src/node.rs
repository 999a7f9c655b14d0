//! Node classification for the rewriting engine.
//!
//! Every value in a configuration tree is exactly one of a closed set of
//! node kinds, and the engine dispatches on that kind rather than
//! inspecting shapes ad hoc. Classification is context-dependent for
//! strings only: a string is a reference when it names a key of the
//! resolution context, and ordinary text otherwise.

use crate::error::ResolveError;
use std::fmt;
use sweep_core::types::{Config, Value};

/// Reserved mapping key that marks an action node.
///
/// The value under this key is the action name itself, never a reference,
/// and is carried through rewriting untouched.
pub const ACTION_KEY: &str = "action";

/// The named procedures an action node can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Piecewise-linear interpolation over an inline table.
    Interpolate,
    /// Piecewise-linear interpolation over a table loaded from a CSV file.
    InterpolateFromCsv,
    /// Gaussian profile evaluation.
    Gaussian,
}

impl ActionKind {
    /// Look up an action kind by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "interpolate" => Some(Self::Interpolate),
            "interpolate_from_csv" => Some(Self::InterpolateFromCsv),
            "gaussian" => Some(Self::Gaussian),
            _ => None,
        }
    }

    /// The configuration name of this action kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Interpolate => "interpolate",
            Self::InterpolateFromCsv => "interpolate_from_csv",
            Self::Gaussian => "gaussian",
        }
    }

    /// The fields that must be resolved before this action collapses.
    ///
    /// `csv_file` resolves to a path string; every other field resolves
    /// to a number or, for the inline table columns, a list of numbers.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Interpolate => &["example_inputs", "example_outputs", "new_input"],
            Self::InterpolateFromCsv => &["csv_file", "new_input"],
            Self::Gaussian => &["center", "width", "height", "input"],
        }
    }

    /// Detect whether a mapping is an action node.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(kind))` - The mapping carries a recognised action name
    /// * `Ok(None)` - The mapping has no [`ACTION_KEY`] entry
    /// * `Err(ResolveError::UnknownAction)` - The action name is missing
    ///   from the closed set, or is not a string at all
    pub fn detect(map: &Config) -> Result<Option<Self>, ResolveError> {
        let discriminant = match map.get(ACTION_KEY) {
            Some(value) => value,
            None => return Ok(None),
        };
        let name = match discriminant.as_text() {
            Some(name) => name,
            None => return Err(ResolveError::unknown_action(discriminant.to_string())),
        };
        match Self::from_name(name) {
            Some(kind) => Ok(Some(kind)),
            None => Err(ResolveError::unknown_action(name)),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The closed set of node kinds the rewriting engine dispatches on.
///
/// Borrowed views into the classified value; classification itself never
/// clones or rewrites anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    /// A number, or a string that names no context key.
    Scalar,
    /// A string equal to a key of the resolution context.
    Reference(&'a str),
    /// A list with no special meaning of its own.
    PlainList(&'a [Value]),
    /// A mapping without an [`ACTION_KEY`] entry.
    PlainMapping(&'a Config),
    /// A mapping carrying a recognised action name.
    Action(ActionKind, &'a Config),
}

impl<'a> NodeKind<'a> {
    /// Classify a value against a resolution context.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownAction`] when the value is a mapping
    /// whose [`ACTION_KEY`] entry is not one of the recognised action names.
    pub fn classify(value: &'a Value, context: &Config) -> Result<Self, ResolveError> {
        match value {
            Value::Number(_) => Ok(Self::Scalar),
            Value::Text(name) => {
                if context.contains_key(name) {
                    Ok(Self::Reference(name))
                } else {
                    Ok(Self::Scalar)
                }
            }
            Value::List(items) => Ok(Self::PlainList(items)),
            Value::Map(map) => match ActionKind::detect(map)? {
                Some(kind) => Ok(Self::Action(kind, map)),
                None => Ok(Self::PlainMapping(map)),
            },
        }
    }

    /// True if this node is a reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// True if this node is an action node.
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action(..))
    }
}
