//! Structural validation of JSON values against declarative schemas.
//!
//! Build a [`Node`] graph (primitive kinds, the array marker, patterns,
//! custom validators, nested schemas, object trees), wrap it in a
//! [`Schema`], call [`Schema::test`], then read the verdict and the ordered
//! diagnostic trail from [`Schema::results`].
//!
//! ```
//! use json_structure::{custom, Node, Schema};
//! use serde_json::json;
//!
//! let mut schema = Schema::new(Node::tree([
//!     ("name", Node::kind("string").unwrap()),
//!     ("age", custom::range(Some(0.0), Some(150.0))),
//!     ("tags", custom::array_of([Node::kind("string").unwrap()])),
//! ]));
//!
//! assert!(schema.test(&json!({"name": "Ada", "age": 36, "tags": ["math"]})));
//! assert!(!schema.test(&json!({"name": "Ada", "age": -1, "tags": []})));
//! assert_eq!(schema.failures().count(), 1);
//! ```
pub mod diagnostic;
pub mod node;
pub mod validate;
pub mod custom;
pub mod schema;

pub use diagnostic::{aggregate, Diagnostic, Failure};
pub use node::{Node, Options, Primitive, SchemaError, Shape};
pub use schema::Schema;
