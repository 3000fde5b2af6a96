//! Typed argument accessors for tool implementations.
//!
//! A missing or mistyped argument is a tool fault, so these return `ToolError` and are meant to
//! be used with `?` inside `Tool::invoke`.

use crate::error::ToolError;
use crate::value::{Value, Variables};

pub fn require<'a>(args: &'a Variables, name: &str) -> Result<&'a Value, ToolError> {
    args.get(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}

fn mismatch(name: &str, expected: &str, found: &Value) -> ToolError {
    ToolError::InvalidArgument {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.clone(),
    }
}

pub fn require_i64(args: &Variables, name: &str) -> Result<i64, ToolError> {
    let value = require(args, name)?;
    value.as_i64().ok_or_else(|| mismatch(name, "integer", value))
}

pub fn require_f64(args: &Variables, name: &str) -> Result<f64, ToolError> {
    let value = require(args, name)?;
    value.as_f64().ok_or_else(|| mismatch(name, "number", value))
}

pub fn require_bool(args: &Variables, name: &str) -> Result<bool, ToolError> {
    let value = require(args, name)?;
    value.as_bool().ok_or_else(|| mismatch(name, "bool", value))
}

pub fn require_str<'a>(args: &'a Variables, name: &str) -> Result<&'a str, ToolError> {
    let value = require(args, name)?;
    value.as_str().ok_or_else(|| mismatch(name, "text", value))
}
