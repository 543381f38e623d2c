//! Implementation of `dbtree check`.

use std::process::ExitCode;

use dbtree_config::ConfigWarning;
use dbtree_record::ingest_file;

use crate::cli::{
    context::CommandContext,
    output::{dim, error, subheader, success, warning},
};

/// Validates the configuration and test-reads the record source.
///
/// Fails if anything is reported.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let warnings = config.validate();
    let mut problems = Vec::new();

    if let Some(path) = &config.source.records
        && path.is_file()
    {
        match ingest_file(path) {
            Ok(batch) => {
                let label = config.database_label(batch.database_label.as_deref());
                if label.is_none_or(|l| l.trim().is_empty()) {
                    problems.push(
                        "no database label: the record file has no dbName and [source] database is not set"
                            .to_string(),
                    );
                }
                if batch.documents.is_empty() {
                    problems.push(format!("record file has no documents: {}", path.display()));
                }
            }
            Err(e) => problems.push(e.to_string()),
        }
    }

    if warnings.is_empty() && problems.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }
    if !problems.is_empty() {
        println!("{}", subheader(&format!("Errors ({}):", problems.len())));
        for p in &problems {
            println!("   {}", error(p));
        }
    }

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoRecordSource => {
                println!("{}", dim("Hint: set [source] records in .dbtree.toml"));
            }
            ConfigWarning::UnknownStemmer { .. } => {
                println!("{}", dim("Hint: [search] stemmer must be a Snowball language, e.g. \"english\""));
            }
            _ => {}
        }
    }
}
