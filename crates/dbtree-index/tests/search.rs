//! Index-backed highlighting: records in, highlighted leaves out.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use dbtree_hierarchy::{HighlightRequest, HighlightSession, build};
use dbtree_index::{IndexWriter, TantivyIndex};
use dbtree_query::{FilterSet, FilterTag};
use dbtree_record::ingest_reader;

const RECORDS: &str = r#"<records dbName="Hosp">
  <document><authname>Smith</authname><area>Cardio</area><type>NOTE</type><pid>001</pid>
    <parsed>Chest pain radiating to the left arm.</parsed></document>
  <document><authname>Smith</authname><area>Cardio</area><type>NOTE</type><pid>002</pid>
    <parsed>Routine follow-up.</parsed></document>
  <document><authname>Jones</authname><area>ER</area><type>SURG</type><pid>003</pid>
    <parsed>Emergency appendectomy; mild pain afterwards.</parsed></document>
</records>"#;

#[test]
fn filters_and_text_highlight_through_tantivy() {
    let batch = ingest_reader(RECORDS.as_bytes()).unwrap();
    let label = batch.database_label.clone().unwrap();

    let temp = tempfile::TempDir::new().unwrap();
    let mut writer = IndexWriter::open(temp.path(), "english").unwrap();
    writer.replace_database(&label, &batch.documents).unwrap();
    drop(writer);

    let hierarchy = build(&label, batch.documents).unwrap();
    let index = TantivyIndex::open(temp.path(), "english").unwrap();
    let session = HighlightSession::new(&hierarchy, &index);

    let outcome = session
        .run(&HighlightRequest::new("pain", FilterSet::new()))
        .unwrap();
    assert_eq!(outcome.summary_line(), "2 results found");
    assert_eq!(outcome.leaves.pids().into_iter().collect::<Vec<_>>(), vec!["001", "003"]);

    let outcome = session
        .run(&HighlightRequest::new("pain", FilterSet::from([FilterTag::Surgery])))
        .unwrap();
    assert_eq!(outcome.query, "(type:SURG ) AND pain");
    assert_eq!(outcome.summary_line(), "1 result found");
    let leaf = outcome.leaves.iter().next().unwrap();
    assert_eq!(
        leaf.node.label,
        "Database: Hosp / Author: Jones / Area: ER / Type: SURG / PID: 003"
    );
}

#[test]
fn unparsable_query_degrades_to_no_highlights() {
    let batch = ingest_reader(RECORDS.as_bytes()).unwrap();
    let mut writer = IndexWriter::in_memory("english").unwrap();
    writer.replace_database("Hosp", &batch.documents).unwrap();
    let index = writer.searcher().unwrap();

    let hierarchy = build("Hosp", batch.documents).unwrap();
    let session = HighlightSession::new(&hierarchy, &index);
    let outcome = session
        .run(&HighlightRequest::new("bogus:field", FilterSet::new()))
        .unwrap();
    assert!(outcome.leaves.is_empty());
    assert!(outcome.degraded.is_some());
    assert_eq!(outcome.summary_line(), "0 results found");
}
