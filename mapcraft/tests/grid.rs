//! End-to-end coverage of the grid/header/column object model.

mod common;

use rstest::rstest;
use serde_json::json;

use common::grid_schema;
use mapcraft::{CraftError, Instance};

#[rstest]
fn a_fresh_grid_holds_only_eager_defaults() {
    let grid = Instance::new(&grid_schema()).expect("grid builds");

    assert_eq!(
        grid.compile(),
        json!({
            "max_width": "350px",
            "columns": [],
            "reorderable": false,
        })
    );
}

#[rstest]
fn crafted_headers_use_their_own_transformers() {
    let what = "patients";
    let grid = Instance::build(
        &grid_schema(),
        [("name", json!("PatientsGrid"))],
        |g| {
            g.set_with("header", json!(null), |h| {
                h.set("message", format!("Use this grid to search {what}..."))?;
                Ok(())
            })?;
            Ok(())
        },
    )
    .expect("grid builds");

    assert_eq!(
        grid.compile()["header"],
        json!({
            "message": "Use this grid to search patients...",
            "title": "Untitled Grid!!!",
            "iShouldBeCamelCased": "!!!",
        })
    );
}

#[rstest]
fn value_transformers_run_after_a_value_is_resolved() {
    let grid = Instance::configured(&grid_schema(), |g| {
        g.set_with("header", json!(null), |h| {
            h.set("title", "patients")?;
            Ok(())
        })?;
        Ok(())
    })
    .expect("grid builds");

    assert_eq!(grid.compile()["header"]["title"], json!("patients!!!"));
}

#[rstest]
fn explicit_values_override_eager_defaults() {
    let grid = Instance::from_values(&grid_schema(), [("max_width", json!("500px"))])
        .expect("grid builds");

    assert_eq!(grid.compile()["max_width"], json!("500px"));
}

#[rstest]
fn hash_mutations_merge_across_calls_and_nesting_levels() {
    let grid = Instance::configured(&grid_schema(), |g| {
        g.set("context", json!({"patient_id": 123}))?;
        g.set("context", json!({"practice_id": 456}))?;
        g.set_with("column", json!({"header": "ID #"}), |column| {
            column.set("context", json!({"visible": true}))?;
            column.set("context", json!({"align": "center"}))?;
            Ok(())
        })?;
        Ok(())
    })
    .expect("grid builds");

    let compiled = grid.compile();
    assert_eq!(
        compiled["context"],
        json!({"patient_id": 123, "practice_id": 456})
    );
    assert_eq!(
        compiled["columns"][0]["context"],
        json!({"visible": true, "align": "center"})
    );
}

#[rstest]
fn flat_array_accepts_scalars_and_lists() {
    let grid = Instance::configured(&grid_schema(), |g| {
        g.set("child", "ChartsGrid")?;
        g.set("child", json!(["NotesGrid"]))?;
        Ok(())
    })
    .expect("grid builds");

    assert_eq!(
        grid.compile()["children"],
        json!(["ChartsGrid", "NotesGrid"])
    );
}

#[rstest]
fn boolean_options_flip_when_invoked() {
    let grid = Instance::configured(&grid_schema(), |g| {
        g.touch("disable")?;
        g.touch("reorderable")?;
        Ok(())
    })
    .expect("grid builds");

    let compiled = grid.compile();
    assert_eq!(compiled["disabled"], json!(false));
    assert_eq!(compiled["reorderable"], json!(true));
}

#[rstest]
fn columns_compile_recursively_with_nested_contents() {
    let grid = Instance::configured(&grid_schema(), |g| {
        g.set_with("column", json!({"header": "ID #"}), |column| {
            column.set("content", json!({"property": "id"}))?;
            Ok(())
        })?;
        g.set_with("column", json!({"header": "Name"}), |column| {
            column.set("content", json!({"property": "first"}))?;
            column.set("content", json!({"property": "last"}))?;
            Ok(())
        })?;
        Ok(())
    })
    .expect("grid builds");

    assert_eq!(
        grid.compile()["columns"],
        json!([
            {
                "header": "ID #",
                "context": {},
                "contents": [{"property": "id"}],
            },
            {
                "header": "Name",
                "context": {},
                "contents": [
                    {"property": "first"},
                    {"property": "last"},
                ],
            },
        ])
    );
}

#[rstest]
fn undeclared_options_fail_inside_configurators() {
    let err = Instance::configured(&grid_schema(), |g| {
        g.set("non_existent", "something")?;
        Ok(())
    })
    .expect_err("must fail");

    assert!(matches!(err, CraftError::UnknownOption { .. }));
}

#[rstest]
fn undeclared_options_fail_in_bulk_values() {
    let err = Instance::from_values(&grid_schema(), [("non_existent", json!("something"))])
        .expect_err("must fail");

    assert!(matches!(err, CraftError::UnknownOption { .. }));
}
