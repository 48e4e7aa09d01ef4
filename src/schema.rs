//! The orchestrator: dispatch a node to its validator family, recurse into
//! object trees and nested schemas, and keep the trail of the last run.
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::custom::Context;
use crate::diagnostic::{aggregate, path, Diagnostic, Failure};
use crate::node::{Node, Options, Shape};
use crate::validate::{check_array, check_pattern, check_primitive, present};

// -------------------------------- Engine ---------------------------------- //

/// Validate `target` against `node`, depth first. Diagnostics come back in
/// traversal order; property order follows the tree's insertion order.
pub fn check(node: &Node, target: Option<&Value>, at: &str, options: Options) -> Vec<Diagnostic> {
    trace!(path = at, node = variant_name(node), "check");
    match node {
        Node::Primitive(expected) => vec![check_primitive(target, expected, at, options)],
        Node::Array => vec![check_array(target, at)],
        Node::Pattern(re) => vec![check_pattern(target, re, at, options)],
        Node::Custom(validator) => validator.validate(&Context { target, path: at, options }),
        Node::Nested(shape) => {
            let out = check(&shape.node, target, at, shape.options());
            trace!(path = at, valid = aggregate(&out), "nested schema done");
            out
        }
        Node::Tree(fields) => {
            // absent subtree: one collective failure, no descent
            let Some(value) = present(target) else {
                return vec![Diagnostic::fail(
                    Failure::Missing,
                    at,
                    format!("Missing property {at}, expecting an object"),
                )];
            };
            let object = value.as_object();
            let mut out = Vec::with_capacity(fields.len());
            for (key, child) in fields {
                let child_path = path::child(at, key);
                let prop = object.and_then(|m| m.get(key));
                out.extend(check(child, prop, &child_path, options));
            }
            out
        }
    }
}

fn variant_name(node: &Node) -> &'static str {
    match node {
        Node::Primitive(_) => "primitive",
        Node::Array => "array",
        Node::Pattern(_) => "pattern",
        Node::Custom(_) => "custom",
        Node::Nested(_) => "nested",
        Node::Tree(_) => "tree",
    }
}

// ------------------------------- Front API -------------------------------- //

/// A schema definition plus the diagnostics of its most recent `test`.
///
/// The definition and its switches are shared (`Arc`): clones and the
/// schemas it is nested in see switch changes made through any of them,
/// while each keeps its own result list. Each `test` call replaces that
/// list. Use one `Schema` per concurrent validation, built with
/// `Schema::with_options(schema.node().clone(), ..)` when it needs its own
/// switches.
#[derive(Debug, Clone)]
pub struct Schema {
    shape: Arc<Shape>,
    results: Vec<Diagnostic>,
}

impl Schema {
    pub fn new(node: impl Into<Node>) -> Self {
        Self::with_options(node, Options::default())
    }

    pub fn with_options(node: impl Into<Node>, options: Options) -> Self {
        Self {
            shape: Arc::new(Shape::new(node.into(), options)),
            results: Vec::new(),
        }
    }

    pub fn node(&self) -> &Node {
        &self.shape.node
    }

    pub fn options(&self) -> Options {
        self.shape.options()
    }

    pub fn set_options(&mut self, options: Options) {
        self.shape.set_options(options);
    }

    pub fn set_arrays_are_objects(&mut self, on: bool) {
        self.shape.set_arrays_are_objects(on);
    }

    pub fn set_pattern_requires_string(&mut self, on: bool) {
        self.shape.set_pattern_requires_string(on);
    }

    pub(crate) fn shape(&self) -> Arc<Shape> {
        Arc::clone(&self.shape)
    }

    /// Validate from the root label `object`.
    pub fn test(&mut self, value: &Value) -> bool {
        self.test_at(Some(value), path::ROOT)
    }

    /// Validate a possibly absent value under an explicit base path.
    pub fn test_at(&mut self, value: Option<&Value>, at: &str) -> bool {
        self.results = check(&self.shape.node, value, at, self.shape.options());
        let valid = aggregate(&self.results);
        debug!(path = at, valid, diagnostics = self.results.len(), "schema test");
        valid
    }

    /// Diagnostics of the last `test` call, in traversal order.
    pub fn results(&self) -> &[Diagnostic] {
        &self.results
    }

    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.results.iter().filter(|d| !d.ok)
    }

    pub fn is_valid(&self) -> bool {
        aggregate(&self.results)
    }

    pub fn into_results(self) -> Vec<Diagnostic> {
        self.results
    }
}

// ------------------------------- Tests ------------------------------------ //
