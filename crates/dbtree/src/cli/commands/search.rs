//! Implementation of `dbtree search`.

use std::{
    process::ExitCode,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use dbtree_hierarchy::{
    CancelFlag, Cancelled, HighlightOutcome, HighlightRequest, HighlightSession,
};
use dbtree_query::{FilterSet, SearchIndex};
use tracing::{debug, warn};

use super::tree::configured_depth;
use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, emphasis, print_search_json, render_tree, subheader},
};

/// Runs one highlight request and prints the matching leaves.
///
/// Index failures are reported as a warning and show no matches; the command still
/// succeeds. Only a search that exceeds `[search] timeout_ms` fails.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let hierarchy = match ctx.load_hierarchy(&cmd.source) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let depth = if cmd.tree {
        match configured_depth(ctx) {
            Ok(level) => Some(level),
            Err(code) => return code,
        }
    } else {
        None
    };

    let index = ctx.search_index();
    let session = HighlightSession::new(&hierarchy, &index);
    let filters: FilterSet = cmd.filters.iter().copied().collect();
    let request = HighlightRequest::new(cmd.text.as_str(), filters);

    let timeout_ms = ctx.config.search.timeout_ms;
    let result = if timeout_ms == 0 {
        session.run(&request)
    } else {
        run_with_timeout(&session, request, Duration::from_millis(timeout_ms))
    };
    let Ok(outcome) = result else {
        eprintln!("error: search timed out after {timeout_ms} ms");
        return ExitCode::FAILURE;
    };

    if let Some(error) = &outcome.degraded {
        eprintln!("warning: search failed: {error}");
    }

    if cmd.json {
        return print_search_json(&outcome);
    }
    if let Some(depth) = depth {
        print!("{}", render_tree(hierarchy.root(), depth, &outcome.leaves.paths()));
        println!();
        print_summary(&outcome);
        return ExitCode::SUCCESS;
    }

    print_results(&outcome);
    ExitCode::SUCCESS
}

/// Runs the request on a worker thread, cancelling it if no answer arrives in time.
///
/// The worker is scoped, so this returns only after the worker does. On timeout the flag
/// is set and the late result is discarded, but a tantivy search already in progress
/// runs to completion first.
fn run_with_timeout<'a, S>(
    session: &HighlightSession<'a, S>,
    request: HighlightRequest,
    timeout: Duration,
) -> Result<HighlightOutcome<'a>, Cancelled>
where
    S: SearchIndex + Sync,
{
    let cancel = CancelFlag::new();
    let request = request.with_cancel(cancel.clone());
    let request = &request;

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        scope.spawn(move || {
            if tx.send(session.run(request)).is_err() {
                debug!("search finished after the caller gave up");
            }
        });
        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                warn!(timeout_ms = timeout.as_millis(), "search timed out; cancelling");
                cancel.cancel();
                Err(Cancelled)
            }
        }
    })
}

/// Prints the composed query, the highlighted breadcrumbs and the result count.
fn print_results(outcome: &HighlightOutcome<'_>) {
    if outcome.is_cleared() {
        println!("{}", dim("Empty query; nothing highlighted."));
        return;
    }

    println!("{} {}", subheader("Query:"), outcome.query);
    println!();
    for leaf in outcome.leaves.iter() {
        println!("   {}", emphasis(&leaf.node.label));
    }
    if !outcome.leaves.is_empty() {
        println!();
    }
    print_summary(outcome);
}

/// Prints the result count line.
fn print_summary(outcome: &HighlightOutcome<'_>) {
    if outcome.is_cleared() {
        println!("{}", dim("Empty query; nothing highlighted."));
    } else {
        println!("{}", outcome.summary_line());
    }
}
