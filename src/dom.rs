//! Shared DOM plumbing for the plancke page layout.
//!
//! Selectors are precompiled once; the rest are small helpers over
//! `scraper` nodes used by the record and table extractors.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{Error, Result};
use crate::mode::GameMode;

pub(crate) static CARD_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.card-box").expect("card box selector"));
pub(crate) static DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("div selector"));
pub(crate) static BOLD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("b").expect("bold selector"));
pub(crate) static SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("span selector"));
pub(crate) static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("anchor selector"));
pub(crate) static SCRIPT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("script selector"));
pub(crate) static DATA_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.table").expect("table selector"));
pub(crate) static TABLE_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody").expect("tbody selector"));
pub(crate) static ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("row selector"));
pub(crate) static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("cell selector"));

/// Card boxes are addressed by document order: profile 0, guild 1,
/// status 2, socials 3.
pub(crate) fn card_box(doc: &Html, index: usize) -> Result<ElementRef<'_>> {
    doc.select(&CARD_BOX)
        .nth(index)
        .ok_or_else(|| Error::Extraction(format!("card box {index} not found")))
}

pub(crate) fn mode_panel(doc: &Html, mode: GameMode) -> Result<ElementRef<'_>> {
    let id = mode.spec().panel_id;
    doc.select(&DIV)
        .find(|el| el.value().attr("id") == Some(id))
        .ok_or_else(|| Error::Extraction(format!("{} panel #{id} not found", mode.as_str())))
}

/// Visible text of an element, whitespace-collapsed and trimmed.
pub(crate) fn own_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of the first following sibling that has any, whether a bare
/// text node or an element. Labels on the page look like
/// `<b>Karma:</b> 14,806,410<br/>`, so this is where values live.
pub(crate) fn sibling_text(el: ElementRef<'_>) -> Option<String> {
    let mut node = el.next_sibling();
    while let Some(n) = node {
        match n.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(sibling) = ElementRef::wrap(n) {
                    let text = own_text(sibling);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            _ => {}
        }
        node = n.next_sibling();
    }
    None
}
