use serde_json::Value;

use crate::diagnostic::{Diagnostic, Failure};
use crate::node::kind_name;

/// Exactly one diagnostic: array or not. Independent of `arrays_are_objects`.
pub fn check_array(target: Option<&Value>, path: &str) -> Diagnostic {
    match super::present(target) {
        None => Diagnostic::fail(
            Failure::Missing,
            path,
            format!("Missing property {path}, expecting an Array"),
        ),
        Some(Value::Array(_)) => Diagnostic::pass(path, format!("Property {path} is an Array")),
        Some(other) => Diagnostic::fail(
            Failure::TypeMismatch,
            path,
            format!("Type of {path} is {}, expecting an Array", kind_name(other)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_like_passes() {
        assert!(check_array(Some(&json!([])), "object.xs").ok);
        assert!(check_array(Some(&json!([1, "a"])), "object.xs").ok);
    }

    #[test]
    fn missing_and_wrong_type_differ() {
        let missing = check_array(None, "object.xs");
        assert!(missing.is_missing());
        let wrong = check_array(Some(&json!({"0": 1})), "object.xs");
        assert_eq!(wrong.failure, Some(Failure::TypeMismatch));
        assert_eq!(wrong.message, "Type of object.xs is object, expecting an Array");
    }
}
