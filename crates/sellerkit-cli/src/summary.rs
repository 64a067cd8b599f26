//! Terminal and JSON rendering of validation results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use sellerkit_model::ValidationIssue;

use crate::commands::ValidateOutcome;

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    schema: &'a str,
    file: String,
    rows: Option<usize>,
    issue_count: usize,
    issues: &'a [ValidationIssue],
}

/// Render a validate outcome; `max_issues` truncates the table, never the
/// count. Returns the process exit code.
pub fn print_validate_outcome(outcome: &ValidateOutcome, json: bool, max_issues: usize) -> i32 {
    match outcome {
        ValidateOutcome::Passed {
            schema_name,
            file,
            rows,
        } => {
            if json {
                print_json(&JsonReport {
                    status: "passed",
                    schema: schema_name,
                    file: file.display().to_string(),
                    rows: Some(*rows),
                    issue_count: 0,
                    issues: &[],
                });
            } else {
                println!(
                    "OK: {} row(s) in {} valid against '{}'",
                    rows,
                    file.display(),
                    schema_name
                );
            }
            0
        }
        ValidateOutcome::Failed {
            schema_name,
            file,
            error,
        } => {
            if json {
                print_json(&JsonReport {
                    status: "failed",
                    schema: schema_name,
                    file: file.display().to_string(),
                    rows: None,
                    issue_count: error.issues.len(),
                    issues: &error.issues,
                });
            } else {
                println!(
                    "FAILED: {} against '{}': {} issue(s)",
                    file.display(),
                    schema_name,
                    error.issues.len()
                );
                print_issue_table(&error.issues, max_issues);
            }
            1
        }
    }
}

fn print_json(report: &JsonReport<'_>) {
    match serde_json::to_string_pretty(report) {
        Ok(rendered) => println!("{rendered}"),
        Err(error) => eprintln!("error: failed to render JSON report: {error}"),
    }
}

fn print_issue_table(issues: &[ValidationIssue], max_issues: usize) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    table
        .column_mut(0)
        .expect("row column")
        .set_cell_alignment(CellAlignment::Right);

    for issue in issues.iter().take(max_issues) {
        table.add_row(vec![
            Cell::new(issue.row),
            Cell::new(issue.column.as_deref().unwrap_or("-")),
            Cell::new(issue.code.as_str()).fg(Color::Red),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");

    if issues.len() > max_issues {
        println!("... and {} more issue(s)", issues.len() - max_issues);
    }
}

pub fn print_schema_list() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Name"),
        header_cell("Version"),
        header_cell("Columns"),
        header_cell("Strict"),
        header_cell("Description"),
    ]);

    for key in sellerkit_schemas::schema_keys() {
        // Keys come straight from the registry; each resolves by construction.
        if let Some(schema) = sellerkit_schemas::get_schema(key) {
            table.add_row(vec![
                Cell::new(key).add_attribute(Attribute::Bold),
                Cell::new(&schema.name),
                Cell::new(&schema.version),
                Cell::new(schema.columns.len()),
                Cell::new(if schema.strict { "yes" } else { "no" }),
                Cell::new(schema.description.as_deref().unwrap_or("-")),
            ]);
        }
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
