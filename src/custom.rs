//! Custom validator protocol.
//!
//! A custom node carries any `Validator`. It gets the target, the current
//! path and the dispatching schema's options, and returns the diagnostics
//! it wants recorded. The returned sequence alone decides validity; an
//! empty one leaves the node vacuously valid.
//!
//! Two combinators ship with the crate: [`range`] and [`array_of`].
pub mod range;
pub mod array_of;

use std::fmt;

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::node::{Node, Options};

pub use array_of::ArrayOf;
pub use range::Range;

pub trait Validator: Send + Sync + fmt::Debug {
    /// Label used when this validator is listed as a candidate.
    fn name(&self) -> String;
    fn validate(&self, cx: &Context<'_>) -> Vec<Diagnostic>;
}

/// What a validator sees for one check.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub target: Option<&'a Value>,
    pub path: &'a str,
    pub options: Options,
}

impl Context<'_> {
    /// Run the engine on another node under the same options.
    pub fn check(&self, node: &Node, target: Option<&Value>, path: &str) -> Vec<Diagnostic> {
        crate::schema::check(node, target, path, self.options)
    }
}

// ----------------------------- Closures ----------------------------------- //

pub struct FnValidator<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Context<'_>) -> Vec<Diagnostic> + Send + Sync,
{
    fn name(&self) -> String { self.name.clone() }
    fn validate(&self, cx: &Context<'_>) -> Vec<Diagnostic> { (self.f)(cx) }
}

/// Wrap a closure as a custom node.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> Node
where
    F: Fn(&Context<'_>) -> Vec<Diagnostic> + Send + Sync + 'static,
{
    Node::custom(FnValidator { name: name.into(), f })
}

// ----------------------------- Built-ins ---------------------------------- //

/// Closed interval; either bound may be left open.
pub fn range(lower: Option<f64>, upper: Option<f64>) -> Node {
    Node::custom(Range::new(lower, upper))
}

pub fn at_least(lower: f64) -> Node {
    range(Some(lower), None)
}

pub fn at_most(upper: f64) -> Node {
    range(None, Some(upper))
}

/// Array whose every element matches at least one candidate.
pub fn array_of<I>(candidates: I) -> Node
where
    I: IntoIterator<Item = Node>,
{
    Node::custom(ArrayOf::new(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Failure;
    use crate::Schema;
    use serde_json::json;

    #[test]
    fn closures_plug_into_the_engine() {
        let even = from_fn("even number", |cx| {
            let ok = cx.target.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0);
            if ok {
                vec![Diagnostic::pass(cx.path, format!("{} is even", cx.path))]
            } else {
                vec![Diagnostic::fail(Failure::TypeMismatch, cx.path, format!("{} is not even", cx.path))]
            }
        });
        let mut schema = Schema::new(Node::tree([("n", even)]));
        assert!(schema.test(&json!({"n": 4})));
        assert_eq!(schema.results()[0].message, "object.n is even");
        assert!(!schema.test(&json!({"n": 3})));
    }

    #[test]
    fn half_open_ranges() {
        let mut schema = Schema::new(Node::tree([("min", at_least(1.0)), ("max", at_most(1.0))]));
        assert!(schema.test(&json!({"min": 1, "max": 1})));
        assert_eq!(schema.results().len(), 2);
        assert!(!schema.test(&json!({"min": 0.5, "max": 2})));
        assert_eq!(schema.failures().count(), 2);
    }

    #[test]
    fn empty_contribution_is_vacuously_valid() {
        let silent = from_fn("anything", |_| Vec::new());
        let mut schema = Schema::new(silent);
        assert!(schema.test(&json!("whatever")));
        assert!(schema.results().is_empty());
    }

    #[test]
    fn validators_see_the_dispatching_options() {
        let probe = from_fn("probe", |cx| {
            vec![Diagnostic::pass(cx.path, format!("{}", cx.options.arrays_are_objects))]
        });
        let mut schema = Schema::new(probe);
        schema.set_arrays_are_objects(true);
        schema.test(&json!(null));
        assert_eq!(schema.results()[0].message, "true");
    }
}
