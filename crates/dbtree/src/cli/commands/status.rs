//! Implementation of `dbtree status`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use dbtree_config::{discover_config_files, display_path};
use dbtree_hierarchy::{Hierarchy, HierarchySummary};
use dbtree_index::index_directory;

use crate::cli::{
    args::SourceArgs,
    context::{CliIndex, CommandContext},
    output::{dim, subheader, warning},
};

/// Shows configuration files, the record source, hierarchy counts and index state.
///
/// Problems are reported but never fail the command; `dbtree check` does that.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("dbtree init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", display_path(path, cwd));
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Records:"));
    match &config.source.records {
        Some(path) if path.is_file() => println!("   {}", display_path(path, cwd)),
        Some(path) => println!("   {} {}", display_path(path, cwd), warning("[missing]")),
        None => println!("   {}", dim("(none configured)")),
    }
    println!();

    let hierarchy = if config.source.records.is_some() {
        ctx.load_hierarchy(&SourceArgs::default()).ok()
    } else {
        None
    };

    if let Some(hierarchy) = &hierarchy {
        println!("{} {}", subheader("Database:"), hierarchy.database_label());
        println!("{}", summary_table(&hierarchy.summary()));
        println!();
    }

    print_index_status(ctx, hierarchy.as_ref());

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
    }

    ExitCode::SUCCESS
}

/// Node counts per level as a table.
fn summary_table(summary: &HierarchySummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Level", "Nodes"]);
    let rows = [
        ("Authors", summary.authors),
        ("Areas", summary.areas),
        ("Report types", summary.report_types),
        ("Documents", summary.leaves),
        ("Distinct pids", summary.distinct_pids),
    ];
    for (name, count) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }
    table
}

/// Prints where the index lives and how many documents it holds.
fn print_index_status(ctx: &CommandContext, hierarchy: Option<&Hierarchy>) {
    print!("{}\n   ", subheader("Index:"));
    match ctx.search_index() {
        CliIndex::Open(index) => {
            match index.num_docs() {
                Ok(n) => print!("{n} documents"),
                Err(e) => print!("{}", warning(&e.to_string())),
            }
            if let Some(hierarchy) = hierarchy {
                let label = hierarchy.database_label();
                match index.count_database(label) {
                    Ok(n) => print!(", {n} for {label}"),
                    Err(e) => print!(", {}", warning(&e.to_string())),
                }
            }
        }
        CliIndex::Unavailable(reason) => print!("{}", warning(&reason)),
    }
    match index_directory(&ctx.config) {
        Some(path) => println!(" {}", dim(&format!("({})", path.display()))),
        None => println!(),
    }
    println!();
}
