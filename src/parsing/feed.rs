//! Feed view of the monthly XBRL RSS index.
//!
//! The index is deserialized with serde into the RSS channel and its items. The
//! quick-xml deserializer matches elements by local name, so `edgar:cikNumber`
//! lands in `cik_number` without any namespace handling. This view only carries
//! per-entry metadata and the enclosure; the per-file listing of an item is left to
//! the tree view (see `tree.rs`).

use crate::{LoaderError, Result};
use serde::Deserialize;

/// Feed view of the index: channel title plus one [`IndexEntry`] per `<item>`, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedView {
    pub title: Option<String>,
    pub entries: Vec<IndexEntry>,
}

/// One `<item>` of the monthly index as seen by the feed view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexEntry {
    /// Zero-based position among the feed's items.
    pub position: usize,
    pub title: Option<String>,
    /// Filer identifier (`edgar:cikNumber`), kept as text to preserve leading zeros.
    pub cik: Option<String>,
    pub company_name: Option<String>,
    pub form_type: Option<String>,
    /// Link to the filing index page.
    pub link: Option<String>,
    /// URL of the single-archive enclosure, when the feed offers one.
    pub enclosure_url: Option<String>,
}

impl IndexEntry {
    /// The filer's CIK.
    ///
    /// # Errors
    ///
    /// - `KeyFieldMissing` when the item carried no (non-blank) `edgar:cikNumber`
    /// - `InvalidCik` when it is not made of ASCII digits only. The CIK ends up in
    ///   local file names.
    pub fn cik(&self) -> Result<&str> {
        let cik = self
            .cik
            .as_deref()
            .map(str::trim)
            .filter(|cik| !cik.is_empty())
            .ok_or(LoaderError::KeyFieldMissing("cikNumber"))?;
        if !cik.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LoaderError::InvalidCik(cik.to_string()));
        }
        Ok(cik)
    }
}

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: Channel,
}

/// Only the fields the loader needs. The channel's `<link>` and `<atom:link>` share a
/// local name and would collide as a serde field, so neither is declared.
#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

/// Every field is optional so that one odd item cannot fail the whole channel.
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "enclosure", default)]
    enclosures: Vec<Enclosure>,
    #[serde(rename = "xbrlFiling", default)]
    xbrl_filing: Option<XbrlFiling>,
}

#[derive(Debug, Deserialize)]
struct Enclosure {
    #[serde(rename = "@url", default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XbrlFiling {
    #[serde(rename = "companyName")]
    company_name: Option<String>,
    #[serde(rename = "formType")]
    form_type: Option<String>,
    #[serde(rename = "cikNumber")]
    cik_number: Option<String>,
}

/// Deserializes the feed view from a raw index payload.
///
/// # Errors
///
/// `FeedParse` when the payload is not well-formed XML or has no `<channel>`.
pub fn parse_feed(payload: &[u8]) -> Result<FeedView> {
    let document: RssDocument = quick_xml::de::from_reader(payload)?;

    let entries = document
        .channel
        .items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let (cik, company_name, form_type) = match item.xbrl_filing {
                Some(filing) => (filing.cik_number, filing.company_name, filing.form_type),
                None => (None, None, None),
            };
            IndexEntry {
                position,
                title: item.title,
                cik,
                company_name,
                form_type,
                link: item.link,
                enclosure_url: item
                    .enclosures
                    .into_iter()
                    .filter_map(|enclosure| enclosure.url)
                    .find(|url| !url.trim().is_empty()),
            }
        })
        .collect();

    Ok(FeedView {
        title: document.channel.title,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_xml() {
        assert!(matches!(parse_feed(b"invalid xml"), Err(LoaderError::FeedParse(_))));
    }

    #[test]
    fn test_missing_channel() {
        let payload = br#"<?xml version="1.0"?><rss version="2.0"><item><title>x</title></item></rss>"#;
        assert!(matches!(parse_feed(payload), Err(LoaderError::FeedParse(_))));
    }

    #[test]
    fn test_empty_channel() {
        let payload = br#"<?xml version="1.0"?>
            <rss version="2.0">
                <channel>
                    <title>Empty Feed</title>
                    <link>http://www.sec.gov/</link>
                </channel>
            </rss>"#;
        let feed = parse_feed(payload).unwrap();
        assert_eq!(feed.title.as_deref(), Some("Empty Feed"));
        assert!(feed.entries.is_empty());
    }

    #[test]
    fn test_entry_fields() {
        let payload = br#"<?xml version="1.0" encoding="utf-8"?>
            <rss version="2.0" xmlns:edgar="http://www.sec.gov/Archives/edgar">
                <channel>
                    <title>All XBRL Data Submitted to the SEC for 2013-03</title>
                    <item>
                        <title>ACME CORP (0000012345) (Filer)</title>
                        <link>http://www.sec.gov/Archives/edgar/data/12345/0000012345-13-000001-index.htm</link>
                        <enclosure url="http://host/archive.zip" length="1024" type="application/zip" />
                        <edgar:xbrlFiling>
                            <edgar:companyName>ACME CORP</edgar:companyName>
                            <edgar:formType>10-K</edgar:formType>
                            <edgar:cikNumber>0000012345</edgar:cikNumber>
                        </edgar:xbrlFiling>
                    </item>
                    <item>
                        <title>NO CIK INC</title>
                        <link>http://www.sec.gov/Archives/edgar/data/1/0000000001-13-000001-index.htm</link>
                    </item>
                </channel>
            </rss>"#;
        let feed = parse_feed(payload).unwrap();
        assert_eq!(feed.entries.len(), 2);

        let first = &feed.entries[0];
        assert_eq!(first.position, 0);
        assert_eq!(first.cik().unwrap(), "0000012345");
        assert_eq!(first.company_name.as_deref(), Some("ACME CORP"));
        assert_eq!(first.form_type.as_deref(), Some("10-K"));
        assert_eq!(first.enclosure_url.as_deref(), Some("http://host/archive.zip"));

        let second = &feed.entries[1];
        assert_eq!(second.position, 1);
        assert!(second.enclosure_url.is_none());
        assert!(matches!(second.cik(), Err(LoaderError::KeyFieldMissing("cikNumber"))));
    }

    #[test]
    fn test_enclosure_without_url_keeps_siblings() {
        let payload = br#"<rss xmlns:edgar="http://www.sec.gov/Archives/edgar"><channel>
            <item><edgar:xbrlFiling><edgar:cikNumber>1</edgar:cikNumber></edgar:xbrlFiling></item>
            <item>
                <enclosure length="0" type="application/zip"/>
                <edgar:xbrlFiling><edgar:cikNumber>2</edgar:cikNumber></edgar:xbrlFiling>
            </item>
            <item>
                <enclosure url="http://host/c.zip"/>
                <edgar:xbrlFiling><edgar:cikNumber>3</edgar:cikNumber></edgar:xbrlFiling>
            </item>
        </channel></rss>"#;
        let feed = parse_feed(payload).unwrap();
        assert_eq!(feed.entries.len(), 3);
        assert!(feed.entries[1].enclosure_url.is_none());
        assert_eq!(feed.entries[1].cik().unwrap(), "2");
        assert_eq!(feed.entries[2].enclosure_url.as_deref(), Some("http://host/c.zip"));
    }

    #[test]
    fn test_first_usable_enclosure_wins() {
        let payload = br#"<rss><channel>
            <item>
                <enclosure url=" "/>
                <enclosure url="http://host/first.zip"/>
                <enclosure url="http://host/second.zip"/>
            </item>
            <item><title>next</title></item>
        </channel></rss>"#;
        let feed = parse_feed(payload).unwrap();
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].enclosure_url.as_deref(), Some("http://host/first.zip"));
        assert_eq!(feed.entries[1].title.as_deref(), Some("next"));
    }

    #[test]
    fn test_cik_must_be_digits() {
        let entry = IndexEntry {
            cik: Some(" 0000012345 ".to_string()),
            ..IndexEntry::default()
        };
        assert_eq!(entry.cik().unwrap(), "0000012345");

        for bad in ["../../etc", "12/34", "12a"] {
            let entry = IndexEntry {
                cik: Some(bad.to_string()),
                ..IndexEntry::default()
            };
            assert!(matches!(entry.cik(), Err(LoaderError::InvalidCik(c)) if c == bad));
        }
    }
}
