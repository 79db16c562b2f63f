mod common;

use common::read_fixture;
use xbrlrss_loader::LoaderError;
use xbrlrss_loader::parsing::index::IndexDocument;

const MIXED_FIXTURE: &str = "rss/xbrlrss-2013-03-mixed.xml";
const ENCLOSURE_FIXTURE: &str = "rss/xbrlrss-2013-03-enclosure.xml";

#[test]
fn test_mixed_feed_view() {
    let content = read_fixture(MIXED_FIXTURE);
    let doc = IndexDocument::parse(content.as_bytes());

    assert!(doc.feed_error.is_none());
    assert_eq!(
        doc.feed.title.as_deref(),
        Some("All XBRL Data Submitted to the SEC for 2013-03")
    );
    assert_eq!(doc.feed.entries.len(), 4);

    let bravo = &doc.feed.entries[1];
    assert_eq!(bravo.cik().unwrap(), "0000022222");
    assert_eq!(bravo.company_name.as_deref(), Some("BRAVO BANCORP"));
    assert!(
        bravo
            .enclosure_url
            .as_deref()
            .unwrap()
            .ends_with("0000022222-13-000009-xbrl.zip")
    );

    assert!(doc.feed.entries[0].enclosure_url.is_none());
    assert!(matches!(
        doc.feed.entries[2].cik(),
        Err(LoaderError::KeyFieldMissing("cikNumber"))
    ));
}

#[test]
fn test_mixed_tree_view() {
    let content = read_fixture(MIXED_FIXTURE);
    let doc = IndexDocument::parse(content.as_bytes());

    assert!(doc.tree_error.is_none());
    assert_eq!(doc.tree.items.len(), 4);

    let alpha = doc.tree.items[0].files().unwrap();
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[1].file_type.as_deref(), Some("EX-101.DEF"));
    assert_eq!(alpha[1].file_name.as_deref(), Some("alpha-20121231_def.xml"));
}

#[test]
fn test_entries_match_items_by_position() {
    let content = read_fixture(MIXED_FIXTURE);
    let doc = IndexDocument::parse(content.as_bytes());
    let matched = doc.matched();
    assert_eq!(matched.len(), 4);

    for (position, pair) in matched.iter().enumerate() {
        assert_eq!(pair.entry.position, position);
        assert_eq!(pair.item.unwrap().position, position);
    }

    let delta = &matched[3];
    assert_eq!(delta.entry.company_name.as_deref(), Some("DELTA FOODS INC"));
    let files = delta.item.unwrap().files().unwrap();
    assert!(files.iter().all(|f| f.url.as_deref().unwrap().contains("/44444/")));
}

#[test]
fn test_prefix_declared_on_filing_element() {
    let content = read_fixture(ENCLOSURE_FIXTURE);
    let doc = IndexDocument::parse(content.as_bytes());

    assert_eq!(doc.feed.entries.len(), 1);
    assert_eq!(doc.feed.entries[0].cik().unwrap(), "0000012345");
    assert_eq!(doc.feed.entries[0].form_type.as_deref(), Some("10-K"));

    let files = doc.tree.items[0].files().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0].sequence.as_deref(), Some("1"));
}

#[test]
fn test_truncated_document_degrades_both_views() {
    let content = read_fixture(MIXED_FIXTURE);
    let cut = content.find("<edgar:companyName>BRAVO").unwrap();
    let truncated = &content[..cut];
    let doc = IndexDocument::parse(truncated.as_bytes());

    assert!(matches!(doc.feed_error, Some(LoaderError::FeedParse(_))));
    assert!(matches!(doc.tree_error, Some(LoaderError::TreeParse(_))));
    assert!(doc.tree.items.is_empty());
    assert!(doc.matched().is_empty());
}

#[test]
fn test_odd_enclosures_keep_every_entry() {
    let content = read_fixture("rss/xbrlrss-2013-03-odd-enclosures.xml");
    let doc = IndexDocument::parse(content.as_bytes());

    assert!(doc.feed_error.is_none());
    assert_eq!(doc.feed.entries.len(), 4);
    assert_eq!(doc.tree.items.len(), 4);

    let entries = &doc.feed.entries;
    assert!(entries[0].enclosure_url.as_deref().unwrap().ends_with("0000055555-13-000002-xbrl.zip"));
    assert!(entries[1].enclosure_url.is_none());
    assert_eq!(entries[1].cik().unwrap(), "0000066666");
    assert!(entries[2].enclosure_url.as_deref().unwrap().ends_with("0000077777-13-000005-xbrl.zip"));
    assert!(matches!(entries[3].cik(), Err(LoaderError::InvalidCik(_))));
}
