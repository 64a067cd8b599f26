//! Command implementations.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, bail};
use indicatif::{ProgressBar, ProgressStyle};

use sellerkit_ingest::{IngestError, parse_and_validate_with_progress};
use sellerkit_model::{AggregateError, SchemaDef};
use sellerkit_schemas::load_schema_file;

use crate::cli::ValidateArgs;

/// Result of a validate run. Violations are an expected outcome, not a
/// process failure, so they come back in the report rather than as an error.
pub enum ValidateOutcome {
    Passed {
        schema_name: String,
        file: PathBuf,
        rows: usize,
    },
    Failed {
        schema_name: String,
        file: PathBuf,
        error: AggregateError,
    },
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<ValidateOutcome> {
    let schema = resolve_schema(args)?;
    let bar = progress_bar(args);

    let mut on_progress = |fraction: f32| {
        bar.set_position((fraction * 100.0) as u64);
    };

    let result = parse_and_validate_with_progress(&args.file, &schema, &mut on_progress);
    bar.finish_and_clear();

    match result {
        Ok(rows) => Ok(ValidateOutcome::Passed {
            schema_name: schema.name,
            file: args.file.clone(),
            rows: rows.len(),
        }),
        Err(IngestError::Validation(error)) => Ok(ValidateOutcome::Failed {
            schema_name: schema.name,
            file: args.file.clone(),
            error,
        }),
        Err(error) => Err(error)
            .with_context(|| format!("failed to validate {}", args.file.display())),
    }
}

fn resolve_schema(args: &ValidateArgs) -> anyhow::Result<SchemaDef> {
    if let Some(key) = &args.schema {
        let Some(schema) = sellerkit_schemas::get_schema(key) else {
            bail!("unknown schema key '{key}' (run `sellerkit schemas` to list them)");
        };
        return Ok(schema.clone());
    }
    if let Some(path) = &args.schema_file {
        return load_schema_file(path)
            .with_context(|| format!("failed to load schema {}", path.display()));
    }
    bail!("provide --schema <KEY> or --schema-file <PATH>");
}

fn progress_bar(args: &ValidateArgs) -> ProgressBar {
    if args.no_progress || args.json || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner} reading [{bar:30}] {pos}%")
            .expect("static progress template")
            .progress_chars("=> "),
    );
    bar
}

pub fn run_schemas() {
    crate::summary::print_schema_list();
}
