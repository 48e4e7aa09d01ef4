//! Built-in validator families.
//!
//! Each one checks a single target and hands back its diagnostic; none of
//! them recurse. Recursion lives in `schema`.
pub mod primitive;
pub mod array;
pub mod pattern;

use serde_json::Value;

pub use primitive::check_primitive;
pub use array::check_array;
pub use pattern::check_pattern;

/// `None` for absent and for `null`: both are reported as missing.
pub fn present(target: Option<&Value>) -> Option<&Value> {
    target.filter(|v| !v.is_null())
}

/// Text a non-string value is matched as when patterns do not require strings.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
