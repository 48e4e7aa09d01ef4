use regex::Regex;
use serde_json::Value;

use crate::diagnostic::{Diagnostic, Failure};
use crate::node::{kind_name, Options};

pub fn check_pattern(
    target: Option<&Value>,
    pattern: &Regex,
    path: &str,
    options: Options,
) -> Diagnostic {
    let rx = pattern.as_str();
    let Some(value) = super::present(target) else {
        return Diagnostic::fail(
            Failure::Missing,
            path,
            format!("Missing property {path}, expecting a string matching /{rx}/"),
        );
    };

    let text = match value {
        Value::String(s) => s.clone(),
        other if options.pattern_requires_string => {
            return Diagnostic::fail(
                Failure::TypeMismatch,
                path,
                format!("Type of {path} is {}, expecting a string matching /{rx}/", kind_name(other)),
            );
        }
        other => super::render(other),
    };

    if pattern.is_match(&text) {
        Diagnostic::pass(path, format!("Property {path} matches /{rx}/"))
    } else {
        Diagnostic::fail(
            Failure::PatternMismatch,
            path,
            format!("Property {path} ({text:?}) does not match /{rx}/"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn digits() -> Regex { Regex::new(r"^\d+$").unwrap() }

    #[test]
    fn strings_are_matched() {
        let d = check_pattern(Some(&json!("123")), &digits(), "object.p", Options::default());
        assert!(d.ok);
        let d = check_pattern(Some(&json!("12a")), &digits(), "object.p", Options::default());
        assert_eq!(d.failure, Some(Failure::PatternMismatch));
        assert!(d.message.contains(r"/^\d+$/"));
    }

    #[test]
    fn numbers_fail_when_strings_are_required() {
        let d = check_pattern(Some(&json!(123)), &digits(), "object.p", Options::default());
        assert_eq!(d.failure, Some(Failure::TypeMismatch));
        assert!(d.message.contains("is number"));
    }

    #[test]
    fn numbers_are_rendered_when_relaxed() {
        let relaxed = Options { pattern_requires_string: false, ..Options::default() };
        assert!(check_pattern(Some(&json!(123)), &digits(), "object.p", relaxed).ok);
        assert!(!check_pattern(Some(&json!(1.5)), &digits(), "object.p", relaxed).ok);
    }

    #[test]
    fn missing_is_reported_either_way() {
        let relaxed = Options { pattern_requires_string: false, ..Options::default() };
        assert!(check_pattern(None, &digits(), "object.p", relaxed).is_missing());
        assert!(check_pattern(Some(&Value::Null), &digits(), "object.p", Options::default()).is_missing());
    }
}
