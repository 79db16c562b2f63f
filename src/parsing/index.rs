use super::feed::{FeedView, IndexEntry, parse_feed};
use super::tree::{IndexItem, TreeView, parse_tree};
use crate::LoaderError;

/// A monthly index payload parsed two ways.
///
/// The feed view knows each entry's filer and enclosure but not its individual XBRL
/// files; the tree view knows the files but nothing else. The two are never mixed
/// while parsing. They meet only in [`matched`](IndexDocument::matched), which pairs
/// entry *i* with item *i*: both parsers enumerate `<item>` elements in document order,
/// so equal positions describe the same filing.
///
/// A failure in either parse degrades that view to empty and is kept in
/// `feed_error`/`tree_error`; [`parse`](IndexDocument::parse) itself never fails.
///
/// # Example
///
/// ```rust
/// use xbrlrss_loader::parsing::index::IndexDocument;
///
/// let doc = IndexDocument::parse(b"<rss><channel><title>t</title></channel></rss>");
/// assert!(doc.feed_error.is_none());
/// assert!(doc.matched().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct IndexDocument {
    pub feed: FeedView,
    pub tree: TreeView,
    pub feed_error: Option<LoaderError>,
    pub tree_error: Option<LoaderError>,
}

/// A feed entry together with the tree item at the same position, if there is one.
#[derive(Debug, Clone, Copy)]
pub struct MatchedEntry<'a> {
    pub entry: &'a IndexEntry,
    pub item: Option<&'a IndexItem>,
}

impl IndexDocument {
    /// Parses both views of `payload`.
    pub fn parse(payload: &[u8]) -> Self {
        let (tree, tree_error) = match parse_tree(payload) {
            Ok(tree) => (tree, None),
            Err(e) => {
                tracing::error!(error = %e, "Raw index tree could not be parsed, continuing without it");
                (TreeView::default(), Some(e))
            }
        };

        let (feed, feed_error) = match parse_feed(payload) {
            Ok(feed) => (feed, None),
            Err(e) => {
                tracing::error!(error = %e, "Index feed could not be parsed, no entries will be processed");
                (FeedView::default(), Some(e))
            }
        };

        match feed.title.as_deref() {
            Some(title) => tracing::info!(title, entries = feed.entries.len(), "Parsed index feed"),
            None if feed_error.is_none() => {
                tracing::warn!(entries = feed.entries.len(), "Index feed has no channel title")
            }
            None => {}
        }

        Self {
            feed,
            tree,
            feed_error,
            tree_error,
        }
    }

    /// Builds a document from views parsed elsewhere.
    pub fn from_views(feed: FeedView, tree: TreeView) -> Self {
        Self {
            feed,
            tree,
            ..Self::default()
        }
    }

    /// Pairs every feed entry with the tree item at the same position, in feed order.
    pub fn matched(&self) -> Vec<MatchedEntry<'_>> {
        if self.tree.items.len() != self.feed.entries.len() && self.tree_error.is_none() {
            tracing::warn!(
                entries = self.feed.entries.len(),
                items = self.tree.items.len(),
                "Feed and tree views disagree on the number of items"
            );
        }

        self.feed
            .entries
            .iter()
            .map(|entry| MatchedEntry {
                entry,
                item: self.tree.items.get(entry.position),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tree::XbrlFileRef;

    fn entry(position: usize, cik: &str) -> IndexEntry {
        IndexEntry {
            position,
            cik: Some(cik.to_string()),
            ..IndexEntry::default()
        }
    }

    #[test]
    fn test_matched_by_position() {
        let feed = FeedView {
            title: None,
            entries: vec![entry(0, "A"), entry(1, "B"), entry(2, "C")],
        };
        let tree = TreeView {
            items: vec![
                IndexItem::with_files(0, vec![XbrlFileRef::from_url("http://host/a.xml")]),
                IndexItem::with_files(1, vec![XbrlFileRef::from_url("http://host/b.xml")]),
                IndexItem::with_files(2, vec![XbrlFileRef::from_url("http://host/c.xml")]),
            ],
        };
        let doc = IndexDocument::from_views(feed, tree);
        let matched = doc.matched();

        assert_eq!(matched.len(), 3);
        let b = &matched[1];
        assert_eq!(b.entry.cik.as_deref(), Some("B"));
        let files = b.item.unwrap().files().unwrap();
        assert_eq!(files[0].url.as_deref(), Some("http://host/b.xml"));
    }

    #[test]
    fn test_missing_tree_items() {
        let feed = FeedView {
            title: None,
            entries: vec![entry(0, "A"), entry(1, "B")],
        };
        let doc = IndexDocument::from_views(feed, TreeView::default());
        let matched = doc.matched();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|m| m.item.is_none()));
    }

    #[test]
    fn test_parse_never_fails() {
        let doc = IndexDocument::parse(b"\x00\x01 definitely not xml <<<");
        assert!(doc.feed_error.is_some());
        assert!(doc.feed.entries.is_empty());
        assert!(doc.matched().is_empty());
    }

    #[test]
    fn test_feed_without_channel_keeps_tree() {
        let payload = br#"<rss xmlns:edgar="http://www.sec.gov/Archives/edgar">
            <item><edgar:xbrlFiling><edgar:xbrlFiles>
                <edgar:xbrlFile edgar:url="http://host/a.xml"/>
            </edgar:xbrlFiles></edgar:xbrlFiling></item>
        </rss>"#;
        let doc = IndexDocument::parse(payload);
        assert!(matches!(doc.feed_error, Some(LoaderError::FeedParse(_))));
        assert!(doc.tree_error.is_none());
        assert_eq!(doc.tree.items.len(), 1);
        assert!(doc.matched().is_empty());
    }
}
