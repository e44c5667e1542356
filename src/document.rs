//! Source document loading and HTML flattening.
//!
//! A page is reduced to its `h2` headings and tables in document order.
//! Tables are expanded into a rectangular grid of optional cell texts, with
//! `rowspan`/`colspan` cells repeated into every slot they cover.

use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the raw HTML from a URL or a local file.
pub fn load(source: &Source, user_agent: &str) -> Result<String, DocumentError> {
    match source {
        Source::Url(url) => {
            let fetch_err = |reason: String| DocumentError::Fetch {
                url: url.clone(),
                reason,
            };
            ureq::get(url)
                .set("User-Agent", user_agent)
                .call()
                .map_err(|e| fetch_err(e.to_string()))?
                .into_string()
                .map_err(|e| fetch_err(e.to_string()))
        }
        Source::File(path) => fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.clone(),
            source,
        }),
    }
}

// ─── Document model ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Section heading text; empty when the heading carried no text.
    Heading(String),
    Table(Table),
}

/// A table flattened to named columns and rows of optional cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text; short rows read as absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

// ─── Parsing ─────────────────────────────────────────────────────

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector")
}

/// Every `h2` and `table` in document order.
pub fn parse(html: &str) -> Vec<Element> {
    let document = Html::parse_document(html);
    let blocks = selector("h2, table");
    let headline = selector("span.mw-headline");

    document
        .select(&blocks)
        .map(|el| match el.value().name() {
            "h2" => {
                let text = match el.select(&headline).next() {
                    Some(span) => collapse_text(span),
                    // Current page markup puts the title directly in the h2.
                    None => collapse_text(el),
                };
                Element::Heading(text)
            }
            _ => Element::Table(parse_table(el)),
        })
        .collect()
}

fn collapse_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// The table's own rows, not those of nested tables, each tagged with
/// whether it sits in `thead`.
fn table_rows(table: ElementRef<'_>) -> Vec<(ElementRef<'_>, bool)> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        match child.value().name() {
            "tr" => rows.push((child, false)),
            section @ ("thead" | "tbody" | "tfoot") => {
                let in_head = section == "thead";
                rows.extend(
                    child_elements(child)
                        .filter(|r| r.value().name() == "tr")
                        .map(|r| (r, in_head)),
                );
            }
            _ => {}
        }
    }
    rows
}

/// Upper bounds from the HTML table model.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

fn span_attr(cell: ElementRef<'_>, name: &str, max: usize) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, max)
}

/// A cell still covering rows below the one that declared it.
#[derive(Clone)]
struct Carry {
    remaining: usize,
    text: Option<String>,
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let mut carries: Vec<Option<Carry>> = Vec::new();
    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (tr, in_head) in table_rows(table) {
        let cells: Vec<ElementRef<'_>> = child_elements(tr)
            .filter(|c| matches!(c.value().name(), "td" | "th"))
            .collect();
        if cells.is_empty() {
            continue;
        }
        let header_row = in_head || cells.iter().all(|c| c.value().name() == "th");

        let mut out: Vec<Option<String>> = Vec::new();
        let mut cells = cells.into_iter();
        let mut col = 0;
        loop {
            // Slots still covered by a rowspan from above come first.
            if let Some(Some(carry)) = carries.get_mut(col) {
                out.push(carry.text.clone());
                carry.remaining -= 1;
                if carry.remaining == 0 {
                    carries[col] = None;
                }
                col += 1;
                continue;
            }
            let Some(cell) = cells.next() else { break };

            let text = Some(collapse_text(cell)).filter(|t| !t.is_empty());
            let rowspan = span_attr(cell, "rowspan", MAX_ROWSPAN);
            for _ in 0..span_attr(cell, "colspan", MAX_COLSPAN) {
                out.push(text.clone());
                if rowspan > 1 {
                    if carries.len() <= col {
                        carries.resize(col + 1, None);
                    }
                    carries[col] = Some(Carry {
                        remaining: rowspan - 1,
                        text: text.clone(),
                    });
                }
                col += 1;
            }
        }
        // Trailing rowspans beyond the last explicit cell.
        while col < carries.len() {
            if let Some(carry) = carries[col].as_mut() {
                out.push(carry.text.clone());
                carry.remaining -= 1;
                if carry.remaining == 0 {
                    carries[col] = None;
                }
            } else {
                out.push(None);
            }
            col += 1;
        }

        if header_row {
            if columns.is_none() {
                columns = Some(out.into_iter().map(Option::unwrap_or_default).collect());
            }
        } else {
            rows.push(out);
        }
    }

    Table {
        columns: columns.unwrap_or_default(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn only_table(html: &str) -> Table {
        match parse(html).into_iter().next() {
            Some(Element::Table(t)) => t,
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_headings_and_tables_in_order() {
        let html = r#"
            <table><tr><th>A</th></tr><tr><td>1</td></tr></table>
            <h2><span class="mw-headline">France</span><span class="mw-editsection">edit</span></h2>
            <p>intro</p>
            <table><tr><th>B</th></tr></table>
            <h2>Germany</h2>
        "#;
        let elements = parse(html);
        assert_eq!(elements.len(), 4);
        assert!(matches!(&elements[0], Element::Table(_)));
        assert_eq!(elements[1], Element::Heading("France".into()));
        assert!(matches!(&elements[2], Element::Table(_)));
        assert_eq!(elements[3], Element::Heading("Germany".into()));
    }

    #[test]
    fn test_table_columns_and_cells() {
        let table = only_table(
            r#"<table>
                <tr><th>City or town</th><th>Namesake</th></tr>
                <tr><td>Paris</td><td>Paris<sup>[1]</sup></td></tr>
                <tr><td>  Lyon
                    </td><td></td></tr>
            </table>"#,
        );
        assert_eq!(table.columns, vec!["City or town", "Namesake"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 1), Some("Paris[1]"));
        assert_eq!(table.cell(1, 0), Some("Lyon"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.column("Namesake"), Some(1));
        assert_eq!(table.column("State"), None);
    }

    #[test]
    fn test_thead_header() {
        let table = only_table(
            r#"<table>
                <thead><tr><td>City or town</td><td>Namesake</td></tr></thead>
                <tbody><tr><th>Rome</th><td>Rome, Georgia</td></tr></tbody>
            </table>"#,
        );
        assert_eq!(table.columns, vec!["City or town", "Namesake"]);
        assert_eq!(table.rows, vec![vec![Some("Rome".into()), Some("Rome, Georgia".into())]]);
    }

    #[test]
    fn test_rowspan_is_repeated() {
        let table = only_table(
            r#"<table>
                <tr><th>City or town</th><th>Namesake</th></tr>
                <tr><td rowspan="2">Paris</td><td>Paris, Texas</td></tr>
                <tr><td>Paris, Maine</td></tr>
                <tr><td>Lyon</td><td>Lyons, Kansas</td></tr>
            </table>"#,
        );
        assert_eq!(table.cell(1, 0), Some("Paris"));
        assert_eq!(table.cell(1, 1), Some("Paris, Maine"));
        assert_eq!(table.cell(2, 0), Some("Lyon"));
    }

    #[test]
    fn test_trailing_rowspan_and_colspan() {
        let table = only_table(
            r#"<table>
                <tr><th colspan="2">City or town</th><th>Namesake</th></tr>
                <tr><td>a</td><td>b</td><td rowspan="2">Shared</td></tr>
                <tr><td colspan="2">wide</td></tr>
            </table>"#,
        );
        assert_eq!(table.columns, vec!["City or town", "City or town", "Namesake"]);
        assert_eq!(
            table.rows[1],
            vec![Some("wide".into()), Some("wide".into()), Some("Shared".into())]
        );
    }

    #[test]
    fn test_huge_spans_are_clamped() {
        let table = only_table(
            r#"<table>
                <tr><th>City or town</th><th>Namesake</th></tr>
                <tr><td colspan="200000000">x</td></tr>
                <tr><td rowspan="999999999">y</td><td>z</td></tr>
            </table>"#,
        );
        assert_eq!(table.rows[0].len(), 1000);
        assert_eq!(table.cell(0, 999), Some("x"));
        assert_eq!(table.rows[1], vec![Some("y".into()), Some("z".into())]);
    }

    #[test]
    fn test_nested_table_rows_stay_out() {
        let elements = parse(
            r#"<table>
                <tr><th>Namesake</th></tr>
                <tr><td>Outer<table><tr><td>Inner</td></tr></table></td></tr>
            </table>"#,
        );
        let Element::Table(outer) = &elements[0] else { panic!("expected table") };
        assert_eq!(outer.rows.len(), 1);
        // The nested table is still visited on its own.
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_heading_without_headline_span_uses_own_text() {
        let elements = parse(r#"<div class="mw-heading"><h2 id="France">France</h2><span>[edit]</span></div>"#);
        assert_eq!(elements, vec![Element::Heading("France".into())]);
    }

    #[test]
    fn test_empty_heading() {
        let elements = parse("<h2>  </h2>");
        assert_eq!(elements, vec![Element::Heading(String::new())]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<h2>France</h2>").unwrap();

        let html = load(&Source::File(path), "test").unwrap();
        assert_eq!(html, "<h2>France</h2>");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(&Source::File(PathBuf::from("/nonexistent/page.html")), "test").unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
