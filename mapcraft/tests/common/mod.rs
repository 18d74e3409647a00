//! Grid/header/column schema fixtures shared by the integration suite.

use std::sync::Arc;

use serde_json::{Value, json};

use mapcraft::{OptionConfig, OptionSpec, Schema, Transform};

/// Appends `!!!` to string values of options whose metadata flags
/// `exclaim`, exercising the concrete-strategy pass-through path.
pub struct Exclamation;

impl Transform for Exclamation {
    fn apply(&self, value: Value, option: &OptionSpec) -> Value {
        match (value, option.meta("exclaim")) {
            (Value::String(s), Some(&Value::Bool(true))) => Value::String(format!("{s}!!!")),
            (value, _) => value,
        }
    }
}

pub fn content_schema() -> Arc<Schema> {
    Schema::builder("content")
        .option("property", OptionConfig::new())
        .build()
        .expect("content schema builds")
}

pub fn column_schema() -> Arc<Schema> {
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
                .craft(content_schema())
                .mutator("array")
                .key("contents"),
        )
        .build()
        .expect("column schema builds")
}

pub fn header_schema() -> Arc<Schema> {
    let base = Schema::builder("header_base")
        .key_transformer("camel_case")
        .value_transformer(Arc::new(Exclamation) as Arc<dyn Transform>)
        .build()
        .expect("header base schema builds");

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
        .option(
            "i_should_be_camel_cased",
            OptionConfig::new()
                .eager()
                .default_value("")
                .meta("exclaim", true),
        )
        .build()
        .expect("header schema builds")
}

pub fn grid_schema() -> Arc<Schema> {
    Schema::builder("grid")
        .options(["api_url", "name"], OptionConfig::new())
        .option(
            "child",
            OptionConfig::new().key("children").mutator("flat_array"),
        )
        .option("context", OptionConfig::new().mutator("hash"))
        .option("header", OptionConfig::new().craft(header_schema()))
        .option(
            "max_width",
            OptionConfig::new().eager().default_value("350px"),
        )
        .option(
            "column",
            OptionConfig::new()
                .craft(column_schema())
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
        .expect("grid schema builds")
}
