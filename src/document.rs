//! Narrow wrapper over the HTML parser.
//!
//! Extraction code asks questions of a [`Document`] ("the stripped text of
//! the first `title`", "the href of the anchor reading `Google Maps`") and
//! never touches `scraper` types directly.

use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Stripped text of the first element matching `css`.
    pub fn first_text(&self, css: &str) -> Option<String> {
        let selector = selector(css)?;
        self.html.select(&selector).next().map(stripped_text)
    }

    /// Stripped text of every `item` inside the first element matching
    /// `container`. Later containers are ignored.
    pub fn texts_in_first(&self, container: &str, item: &str) -> Vec<String> {
        let (Some(container), Some(item)) = (selector(container), selector(item)) else {
            return Vec::new();
        };
        self.html
            .select(&container)
            .next()
            .map(|block| block.select(&item).map(stripped_text).collect())
            .unwrap_or_default()
    }

    /// For every element matching `container`, the `attr` value of its first
    /// descendant matching `inner`. A container is skipped when it has no such
    /// descendant or that descendant lacks the attribute.
    pub fn first_attr_in_each(&self, container: &str, inner: &str, attr: &str) -> Vec<String> {
        let (Some(container), Some(inner)) = (selector(container), selector(inner)) else {
            return Vec::new();
        };
        self.html
            .select(&container)
            .filter_map(|row| {
                row.select(&inner)
                    .next()
                    .and_then(|el| el.value().attr(attr))
                    .map(str::to_string)
            })
            .collect()
    }

    /// The href of the first anchor whose stripped text equals `label`.
    pub fn anchor_href_by_text(&self, label: &str) -> Option<String> {
        let anchors = selector("a")?;
        self.html
            .select(&anchors)
            .find(|a| stripped_text(*a) == label)
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
    }

    /// Stripped text of the first `item` element that follows, in document
    /// order, the first `heading` element whose stripped text equals `label`.
    pub fn text_after_heading(&self, heading: &str, label: &str, item: &str) -> Option<String> {
        let heading_sel = selector(heading)?;
        let item_sel = selector(item)?;
        let combined = selector(&format!("{heading}, {item}"))?;

        let mut seen_heading = false;
        for el in self.html.select(&combined) {
            if seen_heading && item_sel.matches(&el) {
                return Some(stripped_text(el));
            }
            if !seen_heading && heading_sel.matches(&el) && stripped_text(el) == label {
                seen_heading = true;
            }
        }
        None
    }

    /// Stripped text of each `fields` selector found inside the first
    /// `container`, in the order given; missing fields are skipped. `None`
    /// when there is no container at all.
    pub fn field_texts(&self, container: &str, fields: &[&str]) -> Option<Vec<String>> {
        let container_sel = selector(container)?;
        let block = self.html.select(&container_sel).next()?;
        let values = fields
            .iter()
            .filter_map(|css| selector(css))
            .filter_map(|sel| block.select(&sel).next().map(stripped_text))
            .collect();
        Some(values)
    }
}

/// Every text node trimmed, then concatenated.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}
