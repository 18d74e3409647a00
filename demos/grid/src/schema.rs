//! The grid object model: a grid of columns with an optional header.

use std::sync::Arc;

use serde_json::{Value, json};

use mapcraft::{CraftResult, OptionConfig, OptionSpec, Schema, Transform};

/// Appends `!!!` to string values of options whose metadata flags
/// `exclaim`.
struct Exclamation;

impl Transform for Exclamation {
    fn apply(&self, value: Value, option: &OptionSpec) -> Value {
        match (value, option.meta("exclaim")) {
            (Value::String(s), Some(&Value::Bool(true))) => Value::String(format!("{s}!!!")),
            (value, _) => value,
        }
    }
}

fn content() -> CraftResult<Arc<Schema>> {
    Schema::builder("content")
        .option("property", OptionConfig::new())
        .build()
}

fn column() -> CraftResult<Arc<Schema>> {
    Schema::builder("column")
        .options(["header", "property"], OptionConfig::new())
        .option(
            "context",
            OptionConfig::new()
                .mutator("hash")
                .eager()
                .default_value(json!({})),
        )
        .option(
            "content",
            OptionConfig::new()
                .craft(content()?)
                .mutator("array")
                .key("contents"),
        )
        .build()
}

fn header() -> CraftResult<Arc<Schema>> {
    let base = Schema::builder("header_base")
        .key_transformer("camel_case")
        .value_transformer(Arc::new(Exclamation) as Arc<dyn Transform>)
        .build()?;

    Schema::builder("header")
        .extends(base)
        .option(
            "title",
            OptionConfig::new()
                .eager()
                .default_value("Untitled Grid")
                .meta("exclaim", true),
        )
        .option("message", OptionConfig::new())
        .build()
}

/// Builds the full grid schema family.
pub fn grid() -> CraftResult<Arc<Schema>> {
    Schema::builder("grid")
        .options(["api_url", "name"], OptionConfig::new())
        .option(
            "child",
            OptionConfig::new().key("children").mutator("flat_array"),
        )
        .option("context", OptionConfig::new().mutator("hash"))
        .option("header", OptionConfig::new().craft(header()?))
        .option(
            "max_width",
            OptionConfig::new().eager().default_value("350px"),
        )
        .option(
            "column",
            OptionConfig::new()
                .craft(column()?)
                .mutator("array")
                .key("columns")
                .eager()
                .default_value(json!([])),
        )
        .option(
            "reorderable",
            OptionConfig::new()
                .eager()
                .default_value(false)
                .mutator("always_true"),
        )
        .option(
            "disable",
            OptionConfig::new()
                .key("disabled")
                .mutator("always_false")
                .default_value(true),
        )
        .build()
}
