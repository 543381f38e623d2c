//! Implementation of `dbtree show`.

use std::process::ExitCode;

use crate::cli::{
    args::ShowCommand,
    context::CommandContext,
    output::{print_json, render_document},
};

/// Prints the stored document for a pid.
pub fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let hierarchy = match ctx.load_hierarchy(&cmd.source) {
        Ok(h) => h,
        Err(code) => return code,
    };

    let Some(document) = hierarchy.document(&cmd.pid) else {
        eprintln!(
            "error: no document with pid '{}' in database {}",
            cmd.pid.trim(),
            hierarchy.database_label()
        );
        return ExitCode::FAILURE;
    };

    if cmd.json {
        return print_json(document.as_ref());
    }
    print!("{}", render_document(document));
    ExitCode::SUCCESS
}
