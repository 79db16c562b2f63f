//! Tree view of the monthly XBRL RSS index.
//!
//! Older monthly indexes list an item's XBRL files without wrapping them in an
//! `<enclosure>` archive. The file list only exists as namespaced children of the item:
//!
//! ```text
//! <item>
//!   <edgar:xbrlFiling>
//!     <edgar:xbrlFiles>
//!       <edgar:xbrlFile edgar:url="http://.../abc-20130331_cal.xml" ... />
//! ```
//!
//! This module walks the raw document with a namespace-resolving reader and records,
//! for every un-namespaced `<item>` in document order, whether the expected
//! `xbrlFiling`/`xbrlFiles` children were present and which files they list. Each
//! level must be a direct child of the previous one.

use crate::{LoaderError, Result};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

/// Namespace of the `edgar:` elements and attributes.
pub const EDGAR_NAMESPACE: &str = "http://www.sec.gov/Archives/edgar";

/// Tree view of the index: one [`IndexItem`] per `<item>`, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeView {
    pub items: Vec<IndexItem>,
}

/// One `<item>` of the monthly index as seen by the tree view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexItem {
    /// Zero-based position among the document's items.
    pub position: usize,
    has_filing: bool,
    has_files: bool,
    files: Vec<XbrlFileRef>,
}

/// An `edgar:xbrlFile` reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XbrlFileRef {
    pub url: Option<String>,
    pub file_name: Option<String>,
    /// EDGAR exhibit type, e.g. `EX-101.CAL`.
    pub file_type: Option<String>,
    pub sequence: Option<String>,
}

impl IndexItem {
    /// Builds an item with a complete `xbrlFiling/xbrlFiles` structure.
    pub fn with_files(position: usize, files: Vec<XbrlFileRef>) -> Self {
        Self {
            position,
            has_filing: true,
            has_files: true,
            files,
        }
    }

    /// The item's XBRL file references.
    ///
    /// # Errors
    ///
    /// `StructuralMismatch` when the item lacks `edgar:xbrlFiling` or its
    /// `edgar:xbrlFiles` child.
    pub fn files(&self) -> Result<&[XbrlFileRef]> {
        if !self.has_filing {
            return Err(LoaderError::StructuralMismatch(format!(
                "item {} has no edgar:xbrlFiling",
                self.position
            )));
        }
        if !self.has_files {
            return Err(LoaderError::StructuralMismatch(format!(
                "item {} has no edgar:xbrlFiles",
                self.position
            )));
        }
        Ok(&self.files)
    }
}

impl XbrlFileRef {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Nesting depth at which each tracked element was opened, for the item being walked.
#[derive(Debug, Default)]
struct OpenItem {
    item: IndexItem,
    item_depth: usize,
    filing_depth: Option<usize>,
    files_depth: Option<usize>,
}

/// Walks the raw payload and collects the tree view.
///
/// # Errors
///
/// `TreeParse` on any reader error (malformed markup, mismatched tags, bad
/// attributes). The partial walk is discarded.
pub fn parse_tree(payload: &[u8]) -> Result<TreeView> {
    let mut reader = NsReader::from_reader(payload);
    let mut buf = Vec::new();
    let mut items = Vec::new();
    let mut open: Option<OpenItem> = None;
    // Number of currently open elements.
    let mut depth = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            LoaderError::TreeParse(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(ref e) => {
                visit_element(&reader, e, depth, false, &mut open, &mut items)?;
                depth += 1;
            }
            Event::Empty(ref e) => {
                visit_element(&reader, e, depth, true, &mut open, &mut items)?;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if let Some(current) = open.as_mut() {
                    if current.files_depth == Some(depth) {
                        current.files_depth = None;
                    } else if current.filing_depth == Some(depth) {
                        current.filing_depth = None;
                    } else if current.item_depth == depth {
                        if let Some(done) = open.take() {
                            items.push(done.item);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if open.is_some() {
        return Err(LoaderError::TreeParse(
            "document ended inside an <item>".to_string(),
        ));
    }

    Ok(TreeView { items })
}

/// Handles an opening (or self-closing) tag seen at `depth`.
fn visit_element(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    depth: usize,
    empty: bool,
    open: &mut Option<OpenItem>,
    items: &mut Vec<IndexItem>,
) -> Result<()> {
    let (namespace, local) = reader.resolve_element(element.name());
    let local = local.as_ref();

    let Some(current) = open.as_mut() else {
        if matches!(namespace, ResolveResult::Unbound) && local == b"item" {
            let item = IndexItem {
                position: items.len(),
                ..IndexItem::default()
            };
            if empty {
                // `<item/>` still occupies a position.
                items.push(item);
            } else {
                *open = Some(OpenItem {
                    item,
                    item_depth: depth,
                    ..OpenItem::default()
                });
            }
        }
        return Ok(());
    };

    if !is_edgar(&namespace) {
        return Ok(());
    }

    match local {
        b"xbrlFiling" if depth == current.item_depth + 1 && !current.item.has_filing => {
            current.item.has_filing = true;
            if !empty {
                current.filing_depth = Some(depth);
            }
        }
        b"xbrlFiles"
            if current.filing_depth.is_some_and(|d| depth == d + 1) && !current.item.has_files =>
        {
            current.item.has_files = true;
            if !empty {
                current.files_depth = Some(depth);
            }
        }
        b"xbrlFile" if current.files_depth.is_some_and(|d| depth == d + 1) => {
            let file = read_file_ref(reader, element)?;
            current.item.files.push(file);
        }
        _ => {}
    }
    Ok(())
}

fn read_file_ref(reader: &NsReader<&[u8]>, element: &BytesStart<'_>) -> Result<XbrlFileRef> {
    let mut file = XbrlFileRef::default();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| LoaderError::TreeParse(e.to_string()))?;
        let (namespace, local) = reader.resolve_attribute(attr.key);
        if !matches!(namespace, ResolveResult::Unbound) && !is_edgar(&namespace) {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|e| LoaderError::TreeParse(e.to_string()))?
            .into_owned();
        match local.as_ref() {
            b"url" => file.url = Some(value),
            b"file" => file.file_name = Some(value),
            b"type" => file.file_type = Some(value),
            b"sequence" => file.sequence = Some(value),
            _ => {}
        }
    }
    Ok(file)
}

fn is_edgar(namespace: &ResolveResult<'_>) -> bool {
    matches!(namespace, ResolveResult::Bound(Namespace(ns)) if *ns == EDGAR_NAMESPACE.as_bytes())
}
