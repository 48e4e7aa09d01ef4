//! Schema nodes: the declarative description of an expected value shape.
//!
//! A node graph is built once and then only read during validation, so
//! every branch that can be shared (`Custom`, `Nested`) is held behind an
//! `Arc` and cloning a `Node` never deep-copies a sub-schema.
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::custom::Validator;

// ------------------------------- Errors ----------------------------------- //

/// Raised while *building* a schema. Validation itself never errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown kind tag `{0}`")]
    UnknownKind(String),
    #[error("invalid pattern `{source_text}`: {source}")]
    InvalidPattern {
        source_text: String,
        #[source]
        source: regex::Error,
    },
}

// ------------------------------- Options ---------------------------------- //

/// Semantic strictness switches, owned per `Schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Options {
    /// When off, an array fails an `object` primitive check.
    pub arrays_are_objects: bool,
    /// When on, a non-string value fails a pattern check instead of being
    /// rendered to text first.
    pub pattern_requires_string: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { arrays_are_objects: false, pattern_requires_string: true }
    }
}

// ------------------------------ Primitives -------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Function,
    Number,
    Object,
    String,
    /// Host-specific kind (e.g. `xml`). No JSON value ever has one.
    Opaque(String),
}

impl Primitive {
    /// Runtime kind of a present value. Arrays report `Object`; callers that
    /// care about the difference check `Value::is_array` themselves.
    pub fn of(value: &Value) -> Option<Primitive> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Primitive::Boolean),
            Value::Number(_) => Some(Primitive::Number),
            Value::String(_) => Some(Primitive::String),
            Value::Array(_) | Value::Object(_) => Some(Primitive::Object),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Boolean => f.write_str("boolean"),
            Primitive::Function => f.write_str("function"),
            Primitive::Number => f.write_str("number"),
            Primitive::Object => f.write_str("object"),
            Primitive::String => f.write_str("string"),
            Primitive::Opaque(name) => f.write_str(name),
        }
    }
}

/// Kind name of a value as it appears in messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// --------------------------------- Nodes ---------------------------------- //

/// A schema definition together with the switches it validates under.
///
/// The switches live here, behind the `Arc` every referrer holds, so a
/// change made through the owning `Schema` is seen by all of them.
#[derive(Debug)]
pub struct Shape {
    pub node: Node,
    arrays_are_objects: AtomicBool,
    pattern_requires_string: AtomicBool,
}

impl Shape {
    pub fn new(node: Node, options: Options) -> Self {
        Self {
            node,
            arrays_are_objects: AtomicBool::new(options.arrays_are_objects),
            pattern_requires_string: AtomicBool::new(options.pattern_requires_string),
        }
    }

    pub fn options(&self) -> Options {
        Options {
            arrays_are_objects: self.arrays_are_objects.load(Ordering::Relaxed),
            pattern_requires_string: self.pattern_requires_string.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn set_options(&self, options: Options) {
        self.set_arrays_are_objects(options.arrays_are_objects);
        self.set_pattern_requires_string(options.pattern_requires_string);
    }

    pub(crate) fn set_arrays_are_objects(&self, on: bool) {
        self.arrays_are_objects.store(on, Ordering::Relaxed);
    }

    pub(crate) fn set_pattern_requires_string(&self, on: bool) {
        self.pattern_requires_string.store(on, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Primitive(Primitive),
    /// value must be an array
    Array,
    /// value (as text) must match
    Pattern(Regex),
    Custom(Arc<dyn Validator>),
    /// re-enter the engine with another schema and its own options
    Nested(Arc<Shape>),
    /// property name → node, in insertion order
    Tree(IndexMap<String, Node>),
}

impl Node {
    /// Parse a textual kind tag: `boolean`, `function`, `number`, `object`,
    /// `string` or `array`. Host-specific kinds go through [`Node::opaque`].
    pub fn kind(tag: &str) -> Result<Node, SchemaError> {
        let node = match tag {
            "boolean" => Node::Primitive(Primitive::Boolean),
            "function" => Node::Primitive(Primitive::Function),
            "number" => Node::Primitive(Primitive::Number),
            "object" => Node::Primitive(Primitive::Object),
            "string" => Node::Primitive(Primitive::String),
            "array" => Node::Array,
            other => return Err(SchemaError::UnknownKind(other.to_string())),
        };
        Ok(node)
    }

    /// Kind no JSON value carries (e.g. `xml`); any present value mismatches.
    pub fn opaque(name: impl Into<String>) -> Node {
        Node::Primitive(Primitive::Opaque(name.into()))
    }

    pub fn pattern(source: &str) -> Result<Node, SchemaError> {
        Regex::new(source)
            .map(Node::Pattern)
            .map_err(|source_err| SchemaError::InvalidPattern {
                source_text: source.to_string(),
                source: source_err,
            })
    }

    pub fn tree<K, I>(fields: I) -> Node
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Tree(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Empty object tree: accepts any present value.
    pub fn empty_tree() -> Node {
        Node::Tree(IndexMap::new())
    }

    /// Reference another schema. Its definition and switches are shared, not
    /// copied: flipping a switch on `schema` later changes how this node
    /// validates too.
    pub fn nested(schema: &crate::Schema) -> Node {
        Node::Nested(schema.shape())
    }

    pub fn custom<V: Validator + 'static>(validator: V) -> Node {
        Node::Custom(Arc::new(validator))
    }

    /// Short label used in candidate lists and logs.
    pub fn describe(&self) -> String {
        match self {
            Node::Primitive(p) => p.to_string(),
            Node::Array => "array".to_string(),
            Node::Pattern(re) => format!("/{}/", re.as_str()),
            Node::Custom(v) => v.name(),
            Node::Nested(shape) => format!("schema {}", shape.node.describe()),
            Node::Tree(fields) => {
                let keys = fields.keys().map(String::as_str).collect::<Vec<_>>();
                format!("{{{}}}", keys.join(", "))
            }
        }
    }
}

impl From<Primitive> for Node {
    fn from(p: Primitive) -> Self { Node::Primitive(p) }
}

impl From<Regex> for Node {
    fn from(re: Regex) -> Self { Node::Pattern(re) }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(fields: IndexMap<String, Node>) -> Self { Node::Tree(fields) }
}

// ------------------------------- Tests ------------------------------------ //
