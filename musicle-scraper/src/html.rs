//! Small helpers over the `scraper` DOM.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// The catalog table: a sortable wikitable.
pub static WORKS_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.wikitable.sortable"));
pub static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
pub static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
pub static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
pub static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));

/// All text under an element, trimmed.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text under an element with its first `<span>` (and everything inside it)
/// removed, trimmed.
///
/// Catalog pages hide alternate numbering in a display-suppressed span inside
/// the opus cell.
pub fn text_without_hidden(el: ElementRef<'_>) -> String {
    let Some(hidden) = el.select(&SPAN).next() else {
        return cell_text(el);
    };
    let hidden_id = hidden.id();

    let mut text = String::new();
    for node in el.descendants() {
        if let Some(t) = node.value().as_text() {
            if !node.ancestors().any(|a| a.id() == hidden_id) {
                text.push_str(t);
            }
        }
    }
    text.trim().to_string()
}
