//! Fixed-point configuration rewriting engine.
//!
//! This module provides [`Resolver`], which turns a configuration
//! containing references and action nodes into a fully concrete one by
//! repeated rewriting passes. Each pass rewrites the whole tree bottom-up
//! against a snapshot of the configuration taken at the start of the
//! pass, so a chain of references resolves one link per pass. The loop
//! stops at the first pass that changes nothing.

use crate::error::ResolveError;
use crate::node::{ActionKind, NodeKind, ACTION_KEY};
use crate::table::load_table;
use std::path::{Path, PathBuf};
use sweep_core::math::{gaussian_profile, LinearTable};
use sweep_core::types::{Config, Value};

/// Default cap on rewriting passes before resolution gives up.
///
/// A well-formed configuration reaches its fixed point in a handful of
/// passes (one per reference-chain link). The cap only trips on cycles,
/// which would otherwise rewrite forever.
pub const DEFAULT_MAX_PASSES: usize = 100;

/// The configuration rewriting engine.
///
/// A `Resolver` holds the rewriting policy (pass cap, table file root)
/// and no per-configuration state, so one instance can resolve any
/// number of configurations.
///
/// # Examples
///
/// ```
/// use sweep_core::types::{Config, Value};
/// use sweep_resolve::Resolver;
///
/// let mut config = Config::new();
/// config.insert("gain".to_string(), Value::Number(5.0));
/// config.insert("echo".to_string(), Value::from("gain"));
///
/// let resolved = Resolver::new().simplify(&config).unwrap();
/// assert_eq!(resolved["echo"], Value::Number(5.0));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    /// Maximum number of rewriting passes
    max_passes: usize,
    /// Directory that relative table file names resolve against
    table_root: Option<PathBuf>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            table_root: None,
        }
    }
}

impl Resolver {
    /// Create a resolver with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of rewriting passes.
    ///
    /// # Panics
    ///
    /// Panics if `max_passes` is zero.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        assert!(max_passes >= 1, "max_passes must be at least 1");
        self.max_passes = max_passes;
        self
    }

    /// Set the directory that relative table file names resolve against.
    pub fn with_table_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.table_root = Some(root.into());
        self
    }

    /// Get the pass cap.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Get the table root, if one is set.
    pub fn table_root(&self) -> Option<&Path> {
        self.table_root.as_deref()
    }

    /// Resolve a configuration to its fixed point.
    ///
    /// The input is never mutated; the result is a new configuration in
    /// which every reference has been replaced by its target and every
    /// action node by its computed number. Top-level keys always keep
    /// their names, only values rewrite.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration to resolve, used as its own
    ///   resolution context
    ///
    /// # Returns
    ///
    /// * `Ok(resolved)` - A configuration that one more pass would leave
    ///   unchanged, with no residual action nodes
    /// * `Err(ResolveError)` - If an action is unknown, a table is
    ///   malformed or unreadable, the tree stabilises with a residual
    ///   action node, or the pass cap is reached
    ///
    /// # Example
    ///
    /// ```
    /// use sweep_core::types::{Config, Value};
    /// use sweep_resolve::Resolver;
    ///
    /// let mut profile = Config::new();
    /// profile.insert("action".to_string(), Value::from("gaussian"));
    /// profile.insert("center".to_string(), Value::Number(0.0));
    /// profile.insert("width".to_string(), Value::Number(2.0));
    /// profile.insert("height".to_string(), Value::Number(10.0));
    /// profile.insert("input".to_string(), Value::from("position"));
    ///
    /// let mut config = Config::new();
    /// config.insert("position".to_string(), Value::Number(0.0));
    /// config.insert("heat".to_string(), Value::Map(profile));
    ///
    /// let resolved = Resolver::new().simplify(&config).unwrap();
    /// assert_eq!(resolved["heat"], Value::Number(10.0));
    /// ```
    pub fn simplify(&self, config: &Config) -> Result<Config, ResolveError> {
        let mut resolved = config.clone();
        for pass in 1..=self.max_passes {
            let (rewritten, changed) = self.rewrite_entries(&resolved, &resolved)?;
            resolved = rewritten;
            tracing::trace!(pass, changed, "rewriting pass complete");
            if !changed {
                tracing::debug!(passes = pass, "configuration reached a fixed point");
                self.audit(&resolved)?;
                return Ok(resolved);
            }
        }
        Err(ResolveError::did_not_converge(self.max_passes))
    }

    /// Rewrite every entry of a mapping against a context.
    ///
    /// Used both for the top-level configuration (where the mapping is
    /// the context) and for nested mappings (which still resolve against
    /// the top-level context). The action discriminant is carried
    /// through untouched.
    fn rewrite_entries(
        &self,
        map: &Config,
        context: &Config,
    ) -> Result<(Config, bool), ResolveError> {
        let mut rewritten = Config::new();
        let mut changed = false;
        for (key, value) in map {
            if key == ACTION_KEY {
                rewritten.insert(key.clone(), value.clone());
                continue;
            }
            let (new_value, value_changed) = self.rewrite_value(value, context)?;
            changed |= value_changed;
            rewritten.insert(key.clone(), new_value);
        }
        Ok((rewritten, changed))
    }

    /// Rewrite one value bottom-up, reporting whether anything changed.
    ///
    /// A reference substitutes its target verbatim; whatever the target
    /// contains is picked up on the next pass. An action node first
    /// rewrites its fields, then collapses if every field it needs is
    /// ready.
    fn rewrite_value(&self, value: &Value, context: &Config) -> Result<(Value, bool), ResolveError> {
        match NodeKind::classify(value, context)? {
            NodeKind::Scalar => Ok((value.clone(), false)),
            NodeKind::Reference(key) => match context.get(key) {
                Some(bound) => Ok((bound.clone(), true)),
                None => Ok((value.clone(), false)),
            },
            NodeKind::PlainList(items) => {
                let mut rewritten = Vec::with_capacity(items.len());
                let mut changed = false;
                for item in items {
                    let (new_item, item_changed) = self.rewrite_value(item, context)?;
                    changed |= item_changed;
                    rewritten.push(new_item);
                }
                Ok((Value::List(rewritten), changed))
            }
            NodeKind::PlainMapping(map) => {
                let (rewritten, changed) = self.rewrite_entries(map, context)?;
                Ok((Value::Map(rewritten), changed))
            }
            NodeKind::Action(kind, map) => {
                let (rewritten, changed) = self.rewrite_entries(map, context)?;
                match self.collapse(kind, &rewritten, context)? {
                    Some(collapsed) => Ok((collapsed, true)),
                    None => Ok((Value::Map(rewritten), changed)),
                }
            }
        }
    }

    /// Attempt to collapse an action node whose fields have been rewritten.
    ///
    /// `Ok(None)` means the node is not ready yet; it stays a mapping and
    /// is retried on the next pass. The pass context is consulted because
    /// a text field can be either data or a still-pending reference.
    fn collapse(
        &self,
        kind: ActionKind,
        fields: &Config,
        context: &Config,
    ) -> Result<Option<Value>, ResolveError> {
        match kind {
            ActionKind::Interpolate => Self::collapse_interpolate(fields),
            ActionKind::InterpolateFromCsv => self.collapse_interpolate_from_csv(fields, context),
            ActionKind::Gaussian => Ok(Self::collapse_gaussian(fields)),
        }
    }

    fn collapse_interpolate(fields: &Config) -> Result<Option<Value>, ResolveError> {
        let xs = match fields.get("example_inputs").and_then(Value::as_number_list) {
            Some(xs) => xs,
            None => return Ok(None),
        };
        let ys = match fields.get("example_outputs").and_then(Value::as_number_list) {
            Some(ys) => ys,
            None => return Ok(None),
        };
        let x = match fields.get("new_input").and_then(Value::as_number) {
            Some(x) => x,
            None => return Ok(None),
        };
        let table = LinearTable::new(xs, ys)?;
        Ok(Some(Value::Number(table.value_at(x))))
    }

    fn collapse_interpolate_from_csv(
        &self,
        fields: &Config,
        context: &Config,
    ) -> Result<Option<Value>, ResolveError> {
        let file = match fields.get("csv_file").and_then(Value::as_text) {
            Some(file) => file,
            None => return Ok(None),
        };
        // A name that still matches a context key is a pending reference,
        // not a path; the next pass substitutes it.
        if context.contains_key(file) {
            return Ok(None);
        }
        let x = match fields.get("new_input").and_then(Value::as_number) {
            Some(x) => x,
            None => return Ok(None),
        };
        // The file is read only once every other field has resolved, and
        // once per successful collapse.
        let table = load_table(&self.table_path(file))?;
        Ok(Some(Value::Number(table.value_at(x))))
    }

    fn collapse_gaussian(fields: &Config) -> Option<Value> {
        let center = fields.get("center")?.as_number()?;
        let width = fields.get("width")?.as_number()?;
        let height = fields.get("height")?.as_number()?;
        let input = fields.get("input")?.as_number()?;
        Some(Value::Number(gaussian_profile(center, width, height, input)))
    }

    /// Resolve a table file name against the configured table root.
    ///
    /// Absolute names are used as given.
    fn table_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        match &self.table_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Check a stabilised configuration for residual action nodes.
    ///
    /// A tree at its fixed point that still contains an action node can
    /// make no further progress; the audit turns that stall into an
    /// error naming the first blocker found, innermost node first.
    fn audit(&self, config: &Config) -> Result<(), ResolveError> {
        for value in config.values() {
            Self::audit_value(value)?;
        }
        Ok(())
    }

    fn audit_value(value: &Value) -> Result<(), ResolveError> {
        match value {
            Value::Number(_) | Value::Text(_) => Ok(()),
            Value::List(items) => {
                for item in items {
                    Self::audit_value(item)?;
                }
                Ok(())
            }
            Value::Map(map) => {
                for (key, entry) in map {
                    if key != ACTION_KEY {
                        Self::audit_value(entry)?;
                    }
                }
                match ActionKind::detect(map)? {
                    Some(kind) => Err(Self::diagnose_stall(kind, map)),
                    None => Ok(()),
                }
            }
        }
    }

    /// Explain why a residual action node failed to collapse.
    fn diagnose_stall(kind: ActionKind, fields: &Config) -> ResolveError {
        for &field in kind.required_fields() {
            let value = match fields.get(field) {
                Some(value) => value,
                None => return ResolveError::incomplete_action(kind.name(), field),
            };
            if field_is_ready(kind, field, value) {
                continue;
            }
            if let Some(key) = value.as_text() {
                // At a fixed point a string field can name no context key,
                // otherwise substitution would have fired.
                return ResolveError::unresolved_reference(key);
            }
            return ResolveError::incomplete_action(kind.name(), field);
        }
        // Unreachable for a stalled node: every collapse guard maps to a
        // field check above.
        ResolveError::incomplete_action(kind.name(), ACTION_KEY)
    }
}

/// Whether a field already has the shape its action's collapse requires.
fn field_is_ready(kind: ActionKind, field: &str, value: &Value) -> bool {
    match (kind, field) {
        (ActionKind::Interpolate, "example_inputs" | "example_outputs") => {
            value.as_number_list().is_some()
        }
        (ActionKind::InterpolateFromCsv, "csv_file") => value.as_text().is_some(),
        _ => value.is_number(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(entries: &[(&str, Value)]) -> Config {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn mapping(entries: &[(&str, Value)]) -> Value {
        Value::Map(config(entries))
    }

    fn numbers(ns: &[f64]) -> Value {
        Value::List(ns.iter().copied().map(Value::Number).collect())
    }

    fn gaussian_node(center: Value, width: Value, height: Value, input: Value) -> Value {
        mapping(&[
            ("action", Value::from("gaussian")),
            ("center", center),
            ("width", width),
            ("height", height),
            ("input", input),
        ])
    }

    // ========================================
    // Reference Resolution Tests
    // ========================================

    #[test]
    fn test_literal_config_is_unchanged() {
        let template = config(&[
            ("axon_length", Value::Number(300.0)),
            ("label", Value::from("warm")),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved, template);
    }

    #[test]
    fn test_reference_resolution() {
        let template = config(&[("a", Value::Number(5.0)), ("b", Value::from("a"))]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["a"], Value::Number(5.0));
        assert_eq!(resolved["b"], Value::Number(5.0));
    }

    #[test]
    fn test_chained_references() {
        let template = config(&[
            ("a", Value::from("b")),
            ("b", Value::from("c")),
            ("c", Value::Number(7.0)),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["a"], Value::Number(7.0));
        assert_eq!(resolved["b"], Value::Number(7.0));
    }

    #[test]
    fn test_unbound_text_is_plain_data() {
        let template = config(&[("note", Value::from("no such key"))]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["note"], Value::from("no such key"));
    }

    #[test]
    fn test_reference_to_mapping() {
        let inner = mapping(&[("k", Value::Number(1.0))]);
        let template = config(&[("a", inner.clone()), ("b", Value::from("a"))]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["b"], inner);
    }

    #[test]
    fn test_reference_inside_list() {
        let template = config(&[
            ("a", Value::Number(2.0)),
            ("xs", Value::List(vec![Value::from("a"), Value::Number(3.0)])),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["xs"], numbers(&[2.0, 3.0]));
    }

    #[test]
    fn test_reference_inside_nested_mapping_uses_flat_namespace() {
        let template = config(&[
            ("a", Value::Number(1.0)),
            ("outer", mapping(&[("inner", Value::from("a"))])),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["outer"], mapping(&[("inner", Value::Number(1.0))]));
    }

    // ========================================
    // Gaussian Action Tests
    // ========================================

    #[test]
    fn test_gaussian_action_collapses() {
        let template = config(&[(
            "heat",
            gaussian_node(
                Value::Number(0.0),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(0.0),
            ),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["heat"], Value::Number(10.0));
    }

    #[test]
    fn test_gaussian_off_center() {
        let template = config(&[(
            "heat",
            gaussian_node(
                Value::Number(0.0),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(2.0),
            ),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["heat"], Value::Number(10.0 * (-1.0f64).exp()));
    }

    #[test]
    fn test_gaussian_with_referenced_fields() {
        let template = config(&[
            ("position", Value::Number(150.0)),
            ("peak", Value::Number(4.0)),
            (
                "heat",
                gaussian_node(
                    Value::Number(150.0),
                    Value::Number(25.0),
                    Value::from("peak"),
                    Value::from("position"),
                ),
            ),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["heat"], Value::Number(4.0));
    }

    #[test]
    fn test_gaussian_nan_input_propagates() {
        let template = config(&[(
            "heat",
            gaussian_node(
                Value::Number(0.0),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(f64::NAN),
            ),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert!(resolved["heat"].as_number().unwrap().is_nan());

        // A NaN in the tree must not defeat fixed-point detection.
        let again = Resolver::new().simplify(&resolved).unwrap();
        assert!(again["heat"].as_number().unwrap().is_nan());
    }

    // ========================================
    // Interpolate Action Tests
    // ========================================

    #[test]
    fn test_interpolate_action_collapses() {
        let template = config(&[(
            "temperature",
            mapping(&[
                ("action", Value::from("interpolate")),
                ("example_inputs", numbers(&[0.0, 10.0])),
                ("example_outputs", numbers(&[0.0, 100.0])),
                ("new_input", Value::Number(3.0)),
            ]),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(30.0));
    }

    #[test]
    fn test_interpolate_with_referenced_table() {
        let template = config(&[
            ("knots", numbers(&[0.0, 1.0])),
            ("scale", numbers(&[0.0, 10.0])),
            ("x0", Value::Number(0.5)),
            (
                "temperature",
                mapping(&[
                    ("action", Value::from("interpolate")),
                    ("example_inputs", Value::from("knots")),
                    ("example_outputs", Value::from("scale")),
                    ("new_input", Value::from("x0")),
                ]),
            ),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(5.0));
    }

    #[test]
    fn test_action_inside_list_collapses() {
        let template = config(&[(
            "profile",
            Value::List(vec![gaussian_node(
                Value::Number(0.0),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(0.0),
            )]),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["profile"], numbers(&[10.0]));
    }

    #[test]
    fn test_nested_actions_collapse() {
        // The inner interpolation feeds the outer Gaussian's input.
        let inner = mapping(&[
            ("action", Value::from("interpolate")),
            ("example_inputs", numbers(&[0.0, 1.0])),
            ("example_outputs", numbers(&[0.0, 4.0])),
            ("new_input", Value::Number(0.5)),
        ]);
        let template = config(&[(
            "heat",
            gaussian_node(
                Value::Number(2.0),
                Value::Number(1.0),
                Value::Number(10.0),
                inner,
            ),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        // Inner collapses to 2.0, so the Gaussian is evaluated at its center.
        assert_eq!(resolved["heat"], Value::Number(10.0));
    }

    #[test]
    fn test_plain_mapping_never_collapses() {
        let template = config(&[(
            "table",
            mapping(&[
                ("example_inputs", numbers(&[0.0, 1.0])),
                ("example_outputs", numbers(&[0.0, 1.0])),
                ("new_input", Value::Number(0.5)),
            ]),
        )]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert!(resolved["table"].as_map().is_some());
    }

    #[test]
    fn test_action_discriminant_survives_key_collision() {
        // A top-level key happens to share the action's name; the
        // discriminant must stay text while `new_input` resolves through
        // the same name as a reference.
        let template = config(&[
            ("interpolate", Value::Number(3.0)),
            (
                "out",
                mapping(&[
                    ("action", Value::from("interpolate")),
                    ("example_inputs", numbers(&[0.0, 1.0])),
                    ("example_outputs", numbers(&[0.0, 10.0])),
                    ("new_input", Value::from("interpolate")),
                ]),
            ),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        // new_input resolves to 3.0 and clamps to the last output.
        assert_eq!(resolved["out"], Value::Number(10.0));
    }

    // ========================================
    // CSV Action Tests
    // ========================================

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn csv_node(file: &str, new_input: Value) -> Value {
        mapping(&[
            ("action", Value::from("interpolate_from_csv")),
            ("csv_file", Value::from(file)),
            ("new_input", new_input),
        ])
    }

    #[test]
    fn test_csv_action_collapses() {
        let file = write_table("0.0,0.0\n10.0,100.0\n");
        let path = file.path().to_str().unwrap();
        let template = config(&[("temperature", csv_node(path, Value::Number(3.0)))]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(30.0));
    }

    #[test]
    fn test_csv_file_through_reference() {
        let file = write_table("0.0,1.0\n1.0,3.0\n");
        let path = file.path().to_str().unwrap();
        let template = config(&[
            ("cooling_table", Value::from(path)),
            (
                "temperature",
                csv_node("cooling_table", Value::Number(0.5)),
            ),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(2.0));
    }

    #[test]
    fn test_csv_file_through_chained_references() {
        // The path arrives through two reference links, so after one pass
        // csv_file still names another key. The read waits for the chain
        // instead of treating that name as a path.
        let file = write_table("0.0,1.0\n1.0,3.0\n");
        let path = file.path().to_str().unwrap();
        let template = config(&[
            ("table_alias", Value::from("cooling_table")),
            ("cooling_table", Value::from(path)),
            ("temperature", csv_node("table_alias", Value::Number(0.5))),
        ]);
        let resolved = Resolver::new().simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(2.0));
    }

    #[test]
    fn test_csv_action_missing_file() {
        let template = config(&[(
            "temperature",
            csv_node("no/such/table.csv", Value::Number(0.5)),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert!(matches!(err, ResolveError::TableRead { .. }));
    }

    #[test]
    fn test_csv_action_malformed_row() {
        let file = write_table("0.0,0.0\nwarm,100.0\n");
        let path = file.path().to_str().unwrap();
        let template = config(&[("temperature", csv_node(path, Value::Number(0.5)))]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert!(matches!(err, ResolveError::TableRow { line: 2, .. }));
    }

    #[test]
    fn test_csv_action_with_table_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cooling.csv"), "0.0,0.0\n1.0,10.0\n").unwrap();
        let template = config(&[("temperature", csv_node("cooling.csv", Value::Number(0.5)))]);
        let resolver = Resolver::new().with_table_root(dir.path());
        let resolved = resolver.simplify(&template).unwrap();
        assert_eq!(resolved["temperature"], Value::Number(5.0));
    }

    // ========================================
    // Idempotence Tests
    // ========================================

    #[test]
    fn test_simplify_is_idempotent() {
        let template = config(&[
            ("a", Value::from("b")),
            ("b", Value::Number(2.0)),
            ("xs", Value::List(vec![Value::from("a"), Value::Number(1.0)])),
            (
                "heat",
                gaussian_node(
                    Value::Number(0.0),
                    Value::Number(2.0),
                    Value::from("b"),
                    Value::Number(0.0),
                ),
            ),
        ]);
        let resolver = Resolver::new();
        let once = resolver.simplify(&template).unwrap();
        let twice = resolver.simplify(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let template = config(&[("a", Value::Number(5.0)), ("b", Value::from("a"))]);
        let snapshot = template.clone();
        let _ = Resolver::new().simplify(&template).unwrap();
        assert_eq!(template, snapshot);
    }

    // ========================================
    // Convergence Failure Tests
    // ========================================

    #[test]
    fn test_cyclic_references_do_not_converge() {
        let template = config(&[("a", Value::from("b")), ("b", Value::from("a"))]);
        let err = Resolver::new()
            .with_max_passes(8)
            .simplify(&template)
            .unwrap_err();
        assert_eq!(err, ResolveError::DidNotConverge { passes: 8 });
    }

    #[test]
    fn test_self_reference_does_not_converge() {
        let template = config(&[("a", Value::from("a"))]);
        let err = Resolver::new()
            .with_max_passes(4)
            .simplify(&template)
            .unwrap_err();
        assert!(err.is_did_not_converge());
    }

    // ========================================
    // Stall Diagnosis Tests
    // ========================================

    #[test]
    fn test_unknown_action_fails_fast() {
        let template = config(&[(
            "f",
            mapping(&[("action", Value::from("spline")), ("x", Value::Number(1.0))]),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert!(err.is_unknown_action());
    }

    #[test]
    fn test_stalled_action_missing_field() {
        let template = config(&[(
            "heat",
            mapping(&[
                ("action", Value::from("gaussian")),
                ("center", Value::Number(0.0)),
            ]),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(
            err,
            ResolveError::IncompleteAction {
                action: "gaussian".to_string(),
                field: "width".to_string(),
            }
        );
    }

    #[test]
    fn test_dangling_reference_inside_action() {
        let template = config(&[(
            "heat",
            gaussian_node(
                Value::from("ambient"),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(0.0),
            ),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(err, ResolveError::unresolved_reference("ambient"));
    }

    #[test]
    fn test_wrong_shape_field_is_incomplete() {
        let template = config(&[(
            "heat",
            gaussian_node(
                numbers(&[1.0, 2.0]),
                Value::Number(2.0),
                Value::Number(10.0),
                Value::Number(0.0),
            ),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(
            err,
            ResolveError::IncompleteAction {
                action: "gaussian".to_string(),
                field: "center".to_string(),
            }
        );
    }

    #[test]
    fn test_plain_dangling_string_outside_action_is_fine() {
        let template = config(&[
            ("label", Value::from("ambient")),
            ("nested", mapping(&[("note", Value::from("ambient"))])),
        ]);
        assert!(Resolver::new().simplify(&template).is_ok());
    }

    // ========================================
    // Inline Table Validation Tests
    // ========================================

    fn interpolate_node(xs: Value, ys: Value, x: Value) -> Value {
        mapping(&[
            ("action", Value::from("interpolate")),
            ("example_inputs", xs),
            ("example_outputs", ys),
            ("new_input", x),
        ])
    }

    #[test]
    fn test_inline_table_length_mismatch_aborts() {
        let template = config(&[(
            "f",
            interpolate_node(
                numbers(&[0.0, 1.0, 2.0]),
                numbers(&[0.0, 1.0]),
                Value::Number(0.5),
            ),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Table(sweep_core::types::TableError::LengthMismatch { xs: 3, ys: 2 })
        );
    }

    #[test]
    fn test_inline_table_single_point_aborts() {
        let template = config(&[(
            "f",
            interpolate_node(numbers(&[0.0]), numbers(&[5.0]), Value::Number(0.5)),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Table(sweep_core::types::TableError::InsufficientPoints {
                got: 1,
                need: 2
            })
        );
    }

    #[test]
    fn test_inline_table_unsorted_aborts() {
        let template = config(&[(
            "f",
            interpolate_node(
                numbers(&[0.0, 2.0, 1.0]),
                numbers(&[0.0, 1.0, 2.0]),
                Value::Number(0.5),
            ),
        )]);
        let err = Resolver::new().simplify(&template).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Table(sweep_core::types::TableError::NotAscending { index: 2 })
        );
    }

    // ========================================
    // Resolver Policy Tests
    // ========================================

    #[test]
    fn test_default_policy() {
        let resolver = Resolver::new();
        assert_eq!(resolver.max_passes(), DEFAULT_MAX_PASSES);
        assert!(resolver.table_root().is_none());
    }

    #[test]
    fn test_builder_policy() {
        let resolver = Resolver::new()
            .with_max_passes(7)
            .with_table_root("/tmp/tables");
        assert_eq!(resolver.max_passes(), 7);
        assert_eq!(resolver.table_root(), Some(Path::new("/tmp/tables")));
    }

    #[test]
    #[should_panic(expected = "max_passes must be at least 1")]
    fn test_zero_pass_cap_panics() {
        let _ = Resolver::new().with_max_passes(0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn literal_entry() -> impl Strategy<Value = Value> {
            prop_oneof![
                (-1.0e6..1.0e6f64).prop_map(Value::Number),
                prop_oneof![Just("warm"), Just("cold"), Just("fibre")].prop_map(Value::from),
                proptest::collection::vec((-100.0..100.0f64).prop_map(Value::Number), 0..4)
                    .prop_map(Value::List),
            ]
        }

        /// Literal keys, references into them, and one Gaussian node.
        /// References only point at literals, so the graph is acyclic.
        fn acyclic_config() -> impl Strategy<Value = Config> {
            let literals = proptest::collection::vec(literal_entry(), 1..5);
            let refs = proptest::collection::vec(0usize..16, 0..4);
            (literals, refs, -5.0..5.0f64).prop_map(|(literals, refs, input)| {
                let mut template = Config::new();
                let count = literals.len();
                for (i, value) in literals.into_iter().enumerate() {
                    template.insert(format!("lit{}", i), value);
                }
                for (i, target) in refs.into_iter().enumerate() {
                    template.insert(
                        format!("ref{}", i),
                        Value::from(format!("lit{}", target % count)),
                    );
                }
                template.insert(
                    "profile".to_string(),
                    gaussian_node(
                        Value::Number(0.0),
                        Value::Number(2.0),
                        Value::Number(10.0),
                        Value::Number(input),
                    ),
                );
                template
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn prop_simplify_is_idempotent(template in acyclic_config()) {
                let resolver = Resolver::new();
                let once = resolver.simplify(&template).unwrap();
                let twice = resolver.simplify(&once).unwrap();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_simplify_never_mutates_input(template in acyclic_config()) {
                let snapshot = template.clone();
                let _ = Resolver::new().simplify(&template).unwrap();
                prop_assert_eq!(template, snapshot);
            }

            #[test]
            fn prop_resolved_configs_contain_no_references(template in acyclic_config()) {
                let resolved = Resolver::new().simplify(&template).unwrap();
                for value in resolved.values() {
                    if let Some(text) = value.as_text() {
                        prop_assert!(!resolved.contains_key(text));
                    }
                }
            }
        }
    }
}
