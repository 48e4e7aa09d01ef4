//! Diagnostic records, the result aggregator and the dotted path builder.
//!
//! A `Diagnostic` is created once per check and never mutated afterwards.
//! Validators hand back `Vec<Diagnostic>`; callers concatenate them in
//! traversal order and reduce with [`aggregate`].
use std::fmt;
use serde::Serialize;

// ------------------------------- Records ---------------------------------- //

/// Why a check failed. Passing diagnostics carry no failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    /// value absent or null
    Missing,
    /// value present but of the wrong kind
    TypeMismatch,
    /// an array where an object was expected and arrays are not objects
    StrictArray,
    PatternMismatch,
    RangeViolation,
    ArrayContentMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub ok: bool,
    /// dotted location of the check, e.g. `object.address.zip`
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Diagnostic {
    pub fn pass(path: &str, message: impl Into<String>) -> Self {
        Self { ok: true, path: path.to_string(), message: message.into(), failure: None }
    }

    pub fn fail(failure: Failure, path: &str, message: impl Into<String>) -> Self {
        Self { ok: false, path: path.to_string(), message: message.into(), failure: Some(failure) }
    }

    pub fn is_missing(&self) -> bool {
        self.failure == Some(Failure::Missing)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.ok { "ok" } else { "FAIL" };
        write!(f, "[{mark}] {}", self.message)
    }
}

// ------------------------------ Aggregator -------------------------------- //

/// `true` iff every diagnostic passed. Vacuously `true` when empty.
pub fn aggregate(results: &[Diagnostic]) -> bool {
    results.iter().all(|d| d.ok)
}

// ----------------------------- Path builder ------------------------------- //

pub mod path {
    /// Label used when `Schema::test` is called without an explicit path.
    pub const ROOT: &str = "object";

    /// Always `base.key`, even for an empty base.
    pub fn child(base: &str, key: &str) -> String {
        format!("{base}.{key}")
    }

    pub fn index(base: &str, i: usize) -> String {
        format!("{base}[{i}]")
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_vacuously_valid() {
        assert!(aggregate(&[]));
    }

    #[test]
    fn one_failure_sinks_the_verdict() {
        let results = vec![
            Diagnostic::pass("object.a", "Type of object.a is number"),
            Diagnostic::fail(Failure::Missing, "object.b", "Missing property object.b, expecting string"),
            Diagnostic::pass("object.c", "Type of object.c is boolean"),
        ];
        assert!(!aggregate(&results));
        assert!(aggregate(&results[..1]));
        assert!(results[1].is_missing());
    }

    #[test]
    fn paths_are_dotted_and_indexed() {
        assert_eq!(path::child(path::ROOT, "a"), "object.a");
        assert_eq!(path::child(&path::child("object", "a"), "b"), "object.a.b");
        assert_eq!(path::child("", "a"), ".a");
        assert_eq!(path::index("object.tags", 2), "object.tags[2]");
    }

    #[test]
    fn passing_diagnostics_serialize_without_failure() {
        let d = Diagnostic::pass("object.a", "fine");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "path": "object.a", "message": "fine"}));

        let d = Diagnostic::fail(Failure::RangeViolation, "object.n", "too small");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["failure"], "range_violation");
    }
}
