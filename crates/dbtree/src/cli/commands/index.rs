//! Implementation of `dbtree index`.

use std::process::ExitCode;

use dbtree_index::IndexWriter;
use tracing::debug;

use crate::cli::{args::IndexCommand, context::CommandContext, output::success};

/// Replaces the indexed documents of one database with the current record source.
pub fn run(ctx: &CommandContext, cmd: &IndexCommand) -> ExitCode {
    let records = match ctx.load_records(&cmd.source) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let dir = match ctx.index_dir() {
        Ok(d) => d,
        Err(code) => return code,
    };
    debug!(records = %records.path.display(), index = %dir.display(), "indexing");

    let mut writer = match IndexWriter::open(&dir, &ctx.config.search.stemmer) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match writer.replace_database(&records.database_label, &records.documents) {
        Ok(count) => {
            println!(
                "{}",
                success(&format!(
                    "Indexed {count} documents for database {}",
                    records.database_label
                ))
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
