//! Demo entry-point: build a patients grid and print the compiled JSON.

mod schema;

use anyhow::Result;
use mapcraft::Instance;
use serde_json::json;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let grid = schema::grid()?;
    let instance = Instance::build(&grid, [("name", json!("PatientsGrid"))], |g| {
        g.set("api_url", "/api/patients")?;
        g.set("context", json!({"practice_id": 456}))?;
        g.set_with("header", json!(null), |h| {
            h.set("message", "Use this grid to search patients...")?;
            Ok(())
        })?;
        g.set_with("column", json!({"header": "ID #"}), |column| {
            column.set("content", json!({"property": "id"}))?;
            Ok(())
        })?;
        g.set_with("column", json!({"header": "Name"}), |column| {
            column.set("content", json!({"property": "first"}))?;
            column.set("content", json!({"property": "last"}))?;
            Ok(())
        })?;
        g.touch("reorderable")?;
        Ok(())
    })?;

    tracing::debug!(grid = %grid.name(), "compiling demo grid");
    println!("{}", serde_json::to_string_pretty(&instance.compile())?);
    Ok(())
}
