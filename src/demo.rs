//! Bundled demonstration schema and payload.
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use json_structure::{custom, Node, Schema, SchemaError};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

fn address() -> Result<Schema, SchemaError> {
    Ok(Schema::new(Node::tree([
        ("street", Node::kind("string")?),
        ("city", Node::kind("string")?),
        ("zip", Node::pattern(r"^\d{5}$")?),
    ])))
}

pub fn schema() -> Result<Schema, SchemaError> {
    let address = address()?;
    let point = Node::tree([
        ("lat", custom::range(Some(-90.0), Some(90.0))),
        ("lon", custom::range(Some(-180.0), Some(180.0))),
    ]);
    Ok(Schema::new(Node::tree([
        ("boolean1", Node::kind("boolean")?),
        ("positiveInteger", Node::kind("number")?),
        ("negativeFloat", Node::kind("number")?),
        ("object1", Node::kind("object")?),
        ("string1", Node::kind("string")?),
        ("array", Node::kind("array")?),
        ("regExp1", Node::pattern(r"\w+")?),
        ("email", Node::from(EMAIL.clone())),
        ("address", Node::nested(&address)),
        ("rating", custom::range(Some(0.0), Some(5.0))),
        ("tags", custom::array_of([Node::kind("string")?])),
        ("locations", custom::array_of([Node::kind("number")?, point])),
    ])))
}

/// A payload that satisfies [`schema`] under default options.
pub fn payload() -> Value {
    json!({
        "boolean1": true,
        "positiveInteger": 1,
        "negativeFloat": -5.6,
        "object1": {},
        "string1": "Testing is fun",
        "array": [1, 2, 3],
        "regExp1": "a",
        "email": "someone@example.com",
        "address": {"street": "1 Main St", "city": "Springfield", "zip": "12345"},
        "rating": 4.3,
        "tags": ["hardware", "store"],
        "locations": [0, {"lat": 37.42, "lon": -122.08}]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_payload_is_valid() {
        let mut schema = schema().unwrap();
        assert!(schema.test(&payload()));
        assert!(schema.results().iter().any(|d| d.path == "object.address.zip"));
    }

    #[test]
    fn demo_catches_a_broken_payload() {
        let mut schema = schema().unwrap();
        let mut broken = payload();
        broken["object1"] = json!([1, 2]);
        broken["address"]["zip"] = json!("ABCDE");
        broken["locations"] = json!([{"lat": 91, "lon": 0}]);
        assert!(!schema.test(&broken));
        let failed = schema.failures().map(|d| d.path.as_str()).collect::<Vec<_>>();
        assert_eq!(failed, ["object.object1", "object.address.zip", "object.locations[0]"]);
    }
}
