use serde_json::Value;

use crate::diagnostic::{Diagnostic, Failure};
use crate::node::{kind_name, Options, Primitive};

pub fn check_primitive(
    target: Option<&Value>,
    expected: &Primitive,
    path: &str,
    options: Options,
) -> Diagnostic {
    let Some(value) = super::present(target) else {
        return Diagnostic::fail(
            Failure::Missing,
            path,
            format!("Missing property {path}, expecting {expected}"),
        );
    };

    if Primitive::of(value).as_ref() != Some(expected) {
        return Diagnostic::fail(
            Failure::TypeMismatch,
            path,
            format!("Type of {path} is {}, expecting {expected}", kind_name(value)),
        );
    }

    // arrays pass `typeof`-style kind equality; the switch decides
    if *expected == Primitive::Object && value.is_array() && !options.arrays_are_objects {
        return Diagnostic::fail(
            Failure::StrictArray,
            path,
            format!("Property {path} is an Array, expecting object (arraysAreObjects is set to false)"),
        );
    }

    Diagnostic::pass(path, format!("Type of {path} is {expected}"))
}
