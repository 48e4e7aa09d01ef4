use std::fmt;

use super::{Context, Validator};
use crate::diagnostic::{Diagnostic, Failure};
use crate::node::kind_name;
use crate::validate::present;

/// Numeric closed interval. Each specified bound yields its own diagnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Range {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Some(lo) => write!(f, "[{lo}, ")?,
            None => f.write_str("(-inf, ")?,
        }
        match self.upper {
            Some(hi) => write!(f, "{hi}]"),
            None => f.write_str("+inf)"),
        }
    }
}

impl Validator for Range {
    fn name(&self) -> String {
        format!("number in {self}")
    }

    fn validate(&self, cx: &Context<'_>) -> Vec<Diagnostic> {
        let path = cx.path;
        let value = match present(cx.target) {
            None => {
                return vec![Diagnostic::fail(
                    Failure::Missing,
                    path,
                    format!("Missing property {path}, expecting a number in {self}"),
                )];
            }
            Some(v) => v,
        };
        let Some(n) = value.as_f64() else {
            return vec![Diagnostic::fail(
                Failure::TypeMismatch,
                path,
                format!("Type of {path} is {}, expecting a number in {self}", kind_name(value)),
            )];
        };

        let mut out = Vec::with_capacity(2);
        if let Some(lo) = self.lower {
            out.push(if n >= lo {
                Diagnostic::pass(path, format!("Property {path} ({n}) is at least {lo}"))
            } else {
                Diagnostic::fail(
                    Failure::RangeViolation,
                    path,
                    format!("Property {path} ({n}) is below the lower bound {lo}"),
                )
            });
        }
        if let Some(hi) = self.upper {
            out.push(if n <= hi {
                Diagnostic::pass(path, format!("Property {path} ({n}) is at most {hi}"))
            } else {
                Diagnostic::fail(
                    Failure::RangeViolation,
                    path,
                    format!("Property {path} ({n}) is above the upper bound {hi}"),
                )
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Options;
    use serde_json::{json, Value};

    fn run(range: Range, target: Option<&Value>) -> Vec<Diagnostic> {
        range.validate(&Context { target, path: "object.n", options: Options::default() })
    }

    #[test]
    fn both_bounds_are_checked() {
        let out = run(Range::new(Some(0.0), Some(10.0)), Some(&json!(5)));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|d| d.ok));
    }

    #[test]
    fn failing_lower_still_checks_upper() {
        let out = run(Range::new(Some(0.0), Some(10.0)), Some(&json!(-1)));
        assert_eq!(out.len(), 2);
        assert!(!out[0].ok);
        assert_eq!(out[0].failure, Some(Failure::RangeViolation));
        assert!(out[1].ok);
    }

    #[test]
    fn bounds_are_inclusive() {
        let out = run(Range::new(Some(0.0), Some(10.0)), Some(&json!(10)));
        assert!(out.iter().all(|d| d.ok));
        let out = run(Range::new(Some(0.0), Some(10.0)), Some(&json!(0.0)));
        assert!(out.iter().all(|d| d.ok));
    }

    #[test]
    fn open_bounds_emit_nothing() {
        let out = run(Range::new(None, Some(3.0)), Some(&json!(1)));
        assert_eq!(out.len(), 1);
        let out = run(Range::new(None, None), Some(&json!(1)));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_and_non_numeric_emit_one_failure() {
        let out = run(Range::new(Some(0.0), Some(10.0)), None);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_missing());

        let out = run(Range::new(Some(0.0), Some(10.0)), Some(&json!("5")));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].failure, Some(Failure::TypeMismatch));
    }

    #[test]
    fn interval_display() {
        assert_eq!(Range::new(Some(0.0), Some(10.5)).to_string(), "[0, 10.5]");
        assert_eq!(Range::new(None, Some(1.0)).to_string(), "(-inf, 1]");
        assert_eq!(Range::new(Some(2.0), None).to_string(), "[2, +inf)");
    }
}
