//! Implementation of `dbtree tree`.

use std::{collections::BTreeSet, process::ExitCode};

use dbtree_hierarchy::Level;

use crate::cli::{
    args::TreeCommand,
    context::CommandContext,
    output::{print_json, render_tree},
};

/// Prints the hierarchy built from the record source.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let depth = match cmd.depth {
        Some(level) => level,
        None => match configured_depth(ctx) {
            Ok(level) => level,
            Err(code) => return code,
        },
    };

    let hierarchy = match ctx.load_hierarchy(&cmd.source) {
        Ok(h) => h,
        Err(code) => return code,
    };

    if cmd.json {
        return print_json(&hierarchy);
    }

    print!("{}", render_tree(hierarchy.root(), depth, &BTreeSet::new()));
    ExitCode::SUCCESS
}

/// The `[display] depth` setting as a level.
pub(crate) fn configured_depth(ctx: &CommandContext) -> Result<Level, ExitCode> {
    ctx.config.display.depth.parse::<Level>().map_err(|e| {
        eprintln!("error: invalid [display] depth in configuration: {e}");
        ExitCode::FAILURE
    })
}
