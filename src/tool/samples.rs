//! Demonstration tools for the age-check flowchart.

use super::args::{require_i64, require_str};
use super::{NodeResponse, ToolRegistry};
use crate::error::ToolError;
use crate::value::Variables;
use rand::Rng;

pub fn greet(args: Variables) -> Result<NodeResponse, ToolError> {
    let name = require_str(&args, "name")?;
    Ok(NodeResponse::message(format!("Hello, {}!", name)))
}

/// Draws an age between 1 and 30 and publishes it as the `age` variable.
pub fn random_age(_args: Variables) -> Result<NodeResponse, ToolError> {
    let age: i64 = rand::rng().random_range(1..=30);
    Ok(NodeResponse::default()
        .with_result("age", age)
        .with_message(format!("Your age is {}.", age)))
}

pub fn check_age(args: Variables) -> Result<NodeResponse, ToolError> {
    let age = require_i64(&args, "age")?;
    let adult = age >= 18;
    let message = if adult {
        "You are an adult. Exiting."
    } else {
        "You are a child. Trying again."
    };
    Ok(NodeResponse::condition(adult).with_message(message))
}

pub fn adult_message(_args: Variables) -> Result<NodeResponse, ToolError> {
    Ok(NodeResponse::message("You are an adult. Exiting."))
}

pub fn child_message(_args: Variables) -> Result<NodeResponse, ToolError> {
    Ok(NodeResponse::message("You are a child. Trying again."))
}

/// A registry holding every sample tool under its function name.
pub fn sample_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with_fn("greet", &["name"], greet)
        .with_fn("random_age", &[], random_age)
        .with_fn("check_age", &["age"], check_age)
        .with_fn("adult_message", &[], adult_message)
        .with_fn("child_message", &[], child_message)
}
