//! Rendering and JSON serialization for CLI output.

use std::{collections::BTreeSet, process::ExitCode};

use dbtree_hierarchy::{HighlightOutcome, HierarchyNode, Level, NodePath};
pub use dbtree_style::{dim, emphasis, error, header, rule, subheader, success, warning};
use dbtree_record::Document;
use serde::Serialize;

/// Width of rules separating output sections.
const RULE_WIDTH: usize = 60;

/// JSON output for `dbtree search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The composed query; empty when nothing was searched.
    query: &'a str,
    /// Number of matched documents.
    count: usize,
    /// Human-readable count, e.g. `2 results found`.
    summary: String,
    /// Matched pids, sorted.
    matches: Vec<&'a str>,
    /// Highlighted leaves in tree order.
    leaves: Vec<JsonLeaf<'a>>,
    /// Why the search returned nothing, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    degraded: Option<String>,
}

/// One highlighted leaf.
#[derive(Serialize)]
struct JsonLeaf<'a> {
    /// Node path, e.g. `/1/0/0/0`.
    path: String,
    /// Breadcrumb label.
    label: &'a str,
    /// Document pid.
    pid: Option<&'a str>,
}

/// Serializes `value` as pretty JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a search outcome as JSON.
pub fn print_search_json(outcome: &HighlightOutcome<'_>) -> ExitCode {
    let mut matches: Vec<&str> = outcome.matches.iter().map(String::as_str).collect();
    matches.sort_unstable();
    let output = JsonSearchOutput {
        query: &outcome.query,
        count: outcome.match_count(),
        summary: outcome.summary_line(),
        matches,
        leaves: outcome
            .leaves
            .iter()
            .map(|leaf| JsonLeaf {
                path: leaf.path.to_string(),
                label: &leaf.node.label,
                pid: leaf.node.pid(),
            })
            .collect(),
        degraded: outcome.degraded.as_ref().map(ToString::to_string),
    };
    print_json(&output)
}

/// Renders the hierarchy down to `max`, one node per line, indented by depth.
///
/// Group lines carry their leaf count. A leaf on a path in `hits` is emphasized; when
/// leaves are not shown, the deepest shown group containing a hit is emphasized instead.
pub fn render_tree(root: &HierarchyNode, max: Level, hits: &BTreeSet<NodePath>) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, NodePath::root())];
    while let Some((node, path)) = stack.pop() {
        out.push_str(&render_node(node, &path, max, hits));
        out.push('\n');
        if node.level.depth() < max.depth() {
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((child, path.child(i)));
            }
        }
    }
    out
}

/// Renders a single tree line.
fn render_node(
    node: &HierarchyNode,
    path: &NodePath,
    max: Level,
    hits: &BTreeSet<NodePath>,
) -> String {
    let indent = "  ".repeat(path.depth());
    let name = format!("{}: {}", node.level.prefix(), node.display);

    if node.level == Level::Root {
        let count = dim(&format!("({} records)", node.leaf_count()));
        return format!("{} {count}", header(&name));
    }

    let hot = (node.is_leaf() || node.level == max)
        && hits.iter().any(|hit| hit.indices().starts_with(path.indices()));
    let name = if hot { emphasis(&name) } else { name };

    if node.is_leaf() {
        format!("{indent}{name}")
    } else {
        format!("{indent}{name} {}", dim(&format!("({})", node.leaf_count())))
    }
}

/// Renders a document for `dbtree show`: identifying fields, then the parsed report text.
pub fn render_document(doc: &Document) -> String {
    let patient = format!("{} {}", doc.first_name.trim(), doc.last_name.trim());
    let rows = [
        ("Author", doc.author_name.as_str()),
        ("Area", doc.area.as_str()),
        ("Type", doc.report_type.as_str()),
        ("Title", doc.title.as_str()),
        ("Date", doc.date.as_str()),
        ("Patient", patient.as_str()),
        ("Sex", doc.sex.as_str()),
        ("Race", doc.race.as_str()),
        ("DOB", doc.dob.as_str()),
    ];

    let mut lines = vec![header(&format!("PID: {}", doc.pid.trim()))];
    lines.extend(
        rows.iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| format!("{} {}", subheader(&format!("{name}:")), value.trim())),
    );
    lines.push(rule(RULE_WIDTH));
    if doc.parsed_text.trim().is_empty() {
        lines.push(dim("(no parsed report text)"));
    } else {
        lines.push(doc.parsed_text.trim_end().to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use dbtree_hierarchy::build;

    use super::*;

    /// Removes ANSI escape sequences.
    fn strip_ansi(input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                output.push(ch);
            }
        }
        output
    }

    fn doc(author: &str, area: &str, report_type: &str, pid: &str) -> Document {
        Document {
            author_name: author.into(),
            area: area.into(),
            report_type: report_type.into(),
            pid: pid.into(),
            ..Document::default()
        }
    }

    fn sample() -> dbtree_hierarchy::Hierarchy {
        build(
            "Hosp",
            vec![
                doc("Smith", "Cardio", "Note", "001"),
                doc("Smith", "Cardio", "Note", "002"),
                doc("Jones", "ER", "Surgery", "003"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn renders_full_tree_with_counts() {
        let hierarchy = sample();
        let text = strip_ansi(&render_tree(hierarchy.root(), Level::Leaf, &BTreeSet::new()));
        let expected = "\
Database: Hosp (3 records)
  Author: Smith (2)
    Area: Cardio (2)
      Type: Note (2)
        PID: 001
        PID: 002
  Author: Jones (1)
    Area: ER (1)
      Type: Surgery (1)
        PID: 003
";
        assert_eq!(text, expected);
    }

    #[test]
    fn depth_limits_output() {
        let hierarchy = sample();
        let text = strip_ansi(&render_tree(hierarchy.root(), Level::Author, &BTreeSet::new()));
        assert_eq!(
            text,
            "Database: Hosp (3 records)\n  Author: Smith (2)\n  Author: Jones (1)\n"
        );
    }

    #[test]
    fn emphasizes_hit_leaf_only() {
        let hierarchy = sample();
        let hits = BTreeSet::from([NodePath::from(vec![0, 0, 0, 1])]);
        let text = render_tree(hierarchy.root(), Level::Leaf, &hits);
        assert!(text.contains(&emphasis("PID: 002")));
        assert!(!text.contains(&emphasis("PID: 001")));
        assert!(!text.contains(&emphasis("Author: Smith")));
    }

    #[test]
    fn emphasizes_cutoff_group_containing_hit() {
        let hierarchy = sample();
        let hits = BTreeSet::from([NodePath::from(vec![1, 0, 0, 0])]);
        let text = render_tree(hierarchy.root(), Level::Author, &hits);
        assert!(text.contains(&emphasis("Author: Jones")));
        assert!(!text.contains(&emphasis("Author: Smith")));
    }

    #[test]
    fn document_view_skips_empty_fields() {
        let mut d = doc("Smith", "Cardio", "NOTE", " 001 ");
        d.parsed_text = "Chest pain.\n".into();
        let text = strip_ansi(&render_document(&d));
        assert!(text.starts_with("PID: 001\n"));
        assert!(text.contains("Author: Smith\n"));
        assert!(!text.contains("Race:"));
        assert!(text.ends_with("Chest pain.\n"));
    }
}
