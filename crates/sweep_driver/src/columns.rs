//! Which config keys a sweep reports.
//!
//! A sweep binds two keys per row (the outer position and the threshold
//! candidate), and every key whose expression tree mentions one of them
//! takes a different resolved value from row to row. Those are the keys
//! worth a CSV column; the rest of the config is constant across the
//! whole sweep and stays out of the output.
//!
//! The scan runs over the raw template, not a resolved config, because
//! resolution collapses the references this scan follows.

use std::collections::BTreeSet;

use sweep_core::types::{Config, Value};
use sweep_resolve::ACTION_KEY;

/// Top-level keys whose resolved values vary across sweep rows.
///
/// A key qualifies when its raw expression tree names the swept key, the
/// threshold key, or another qualifying key. The two bound keys
/// themselves are plumbing and are excluded; the caller decides where the
/// threshold lands in the output. The result is sorted by name.
///
/// # Example
///
/// ```
/// use sweep_driver::columns::swept_columns;
/// use sweep_resolve::parse_config;
///
/// let template = parse_config(
///     r#"{
///         "sweep_position": 0.0,
///         "block_strength": 0.0,
///         "block_width_um": {"action": "interpolate", "example_inputs": [0, 1],
///                            "example_outputs": [50, 200], "new_input": "sweep_position"},
///         "axon_length_um": 3000.0
///     }"#,
/// )
/// .unwrap();
///
/// let columns = swept_columns(&template, "sweep_position", "block_strength");
/// assert_eq!(columns, vec!["block_width_um".to_string()]);
/// ```
pub fn swept_columns(template: &Config, swept_key: &str, threshold_key: &str) -> Vec<String> {
    let mut reached: BTreeSet<&str> = BTreeSet::new();
    reached.insert(swept_key);
    reached.insert(threshold_key);

    // Each pass can only mark keys referencing ones marked before it, so
    // the key count bounds the pass count.
    loop {
        let mut changed = false;
        for (key, value) in template {
            if !reached.contains(key.as_str()) && mentions(value, &reached) {
                reached.insert(key.as_str());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    reached
        .into_iter()
        .filter(|key| *key != swept_key && *key != threshold_key)
        .map(str::to_string)
        .collect()
}

/// True when the tree names any of the target keys.
///
/// The `action` discriminant of a map is a label, never a reference, and
/// is skipped the same way the resolver skips it.
fn mentions(value: &Value, targets: &BTreeSet<&str>) -> bool {
    match value {
        Value::Number(_) => false,
        Value::Text(name) => targets.contains(name.as_str()),
        Value::List(items) => items.iter().any(|item| mentions(item, targets)),
        Value::Map(entries) => entries
            .iter()
            .any(|(key, item)| key != ACTION_KEY && mentions(item, targets)),
    }
}
