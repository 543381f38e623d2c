//! Implementation of `dbtree config`.

use std::process::ExitCode;

use dbtree_style::Highlighter;

use crate::cli::context::CommandContext;

/// Prints the effective settings after merging every configuration file.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            print!("{}", Highlighter::new().highlight_toml(&toml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
