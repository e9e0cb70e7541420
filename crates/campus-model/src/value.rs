//! Cell value helpers.

use serde_json::Value;

/// Whether a cell value counts as empty for the engine's local
/// validation rule: null, or a string that is blank after trimming.
///
/// Numbers and booleans are never blank; `0` and `false` are valid
/// committed values.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
