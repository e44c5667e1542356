//! Namesake/original pair extraction from the flattened document.
//!
//! Each `h2` heading names the country of origin for the tables that follow
//! it. Tables before the first heading, tables without the expected columns
//! and rows missing either name are skipped.

use crate::document::{Element, Table};
use crate::record::NamePair;

pub const CITY_COLUMN: &str = "City or town";
pub const NAMESAKE_COLUMN: &str = "Namesake";

/// Extract pairs in document order.
pub fn extract_pairs(elements: &[Element]) -> Vec<NamePair> {
    let mut country: Option<&str> = None;
    let mut pairs = Vec::new();

    for element in elements {
        match element {
            Element::Heading(text) => {
                country = Some(text.as_str()).filter(|t| !t.is_empty());
            }
            Element::Table(table) => {
                let Some(country) = country else { continue };
                pairs.extend(pairs_from_table(table, country));
            }
        }
    }
    pairs
}

fn pairs_from_table(table: &Table, country: &str) -> Vec<NamePair> {
    let (Some(city_col), Some(namesake_col)) =
        (table.column(CITY_COLUMN), table.column(NAMESAKE_COLUMN))
    else {
        tracing::debug!(country, columns = ?table.columns, "skipping table without name columns");
        return Vec::new();
    };

    (0..table.rows.len())
        .filter_map(|row| {
            let city = table.cell(row, city_col)?;
            let namesake = strip_citation(table.cell(row, namesake_col)?);
            if namesake.is_empty() {
                return None;
            }
            Some(NamePair::new(namesake, original_name(city, country)))
        })
        .collect()
}

/// "Paris[1]" -> "Paris"
pub fn strip_citation(namesake: &str) -> &str {
    let end = namesake.find('[').unwrap_or(namesake.len());
    &namesake[..end]
}

/// "{city}, {country}" with surrounding newlines removed.
pub fn original_name(city: &str, country: &str) -> String {
    format!("{}, {}", city, country).trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_table(rows: Vec<(Option<&str>, Option<&str>)>) -> Element {
        Element::Table(Table {
            columns: vec![CITY_COLUMN.into(), NAMESAKE_COLUMN.into()],
            rows: rows
                .into_iter()
                .map(|(c, n)| vec![c.map(String::from), n.map(String::from)])
                .collect(),
        })
    }

    fn heading(text: &str) -> Element {
        Element::Heading(text.into())
    }

    #[test]
    fn test_citation_stripped_and_original_joined() {
        let elements = vec![
            heading("France"),
            name_table(vec![(Some("Paris"), Some("Paris[1]"))]),
        ];
        assert_eq!(extract_pairs(&elements), vec![NamePair::new("Paris", "Paris, France")]);
    }

    #[test]
    fn test_table_before_heading_contributes_nothing() {
        let elements = vec![
            name_table(vec![(Some("Paris"), Some("Paris, Texas"))]),
            heading("France"),
        ];
        assert!(extract_pairs(&elements).is_empty());
    }

    #[test]
    fn test_empty_heading_clears_context() {
        let elements = vec![
            heading("France"),
            heading(""),
            name_table(vec![(Some("Paris"), Some("Paris, Texas"))]),
        ];
        assert!(extract_pairs(&elements).is_empty());
    }

    #[test]
    fn test_missing_fields_skip_row_only() {
        let elements = vec![
            heading("Italy"),
            name_table(vec![
                (None, Some("Rome, Georgia")),
                (Some("Naples"), None),
                (Some("Rome"), Some("Rome, New York")),
                (Some("Milan"), Some("[3]")),
            ]),
        ];
        assert_eq!(
            extract_pairs(&elements),
            vec![NamePair::new("Rome, New York", "Rome, Italy")]
        );
    }

    #[test]
    fn test_table_without_columns_is_skipped() {
        let elements = vec![
            heading("Spain"),
            Element::Table(Table {
                columns: vec!["Place".into(), "Notes".into()],
                rows: vec![vec![Some("Madrid".into()), Some("Madrid, Iowa".into())]],
            }),
            name_table(vec![(Some("Toledo"), Some("Toledo, Ohio"))]),
        ];
        assert_eq!(
            extract_pairs(&elements),
            vec![NamePair::new("Toledo, Ohio", "Toledo, Spain")]
        );
    }

    #[test]
    fn test_heading_applies_to_following_tables_until_next() {
        let elements = vec![
            heading("France"),
            name_table(vec![(Some("Paris"), Some("Paris, Texas"))]),
            name_table(vec![(Some("Lyon"), Some("Lyons, Kansas"))]),
            heading("Germany"),
            name_table(vec![(Some("Berlin"), Some("Berlin, New Hampshire"))]),
        ];
        let originals: Vec<String> =
            extract_pairs(&elements).into_iter().map(|p| p.original).collect();
        assert_eq!(originals, vec!["Paris, France", "Lyon, France", "Berlin, Germany"]);
    }

    #[test]
    fn test_strip_citation() {
        assert_eq!(strip_citation("Paris[1]"), "Paris");
        assert_eq!(strip_citation("Paris [note 2][3]"), "Paris ");
        assert_eq!(strip_citation("Paris"), "Paris");
        assert_eq!(strip_citation("[1]"), "");
    }

    #[test]
    fn test_text_before_citation_is_kept_verbatim() {
        let elements = vec![
            heading("France"),
            name_table(vec![(Some("Paris"), Some("Paris, Texas [2]"))]),
        ];
        assert_eq!(
            extract_pairs(&elements),
            vec![NamePair::new("Paris, Texas ", "Paris, France")]
        );
    }

    #[test]
    fn test_original_name_strips_newlines() {
        assert_eq!(original_name("Paris", "France\n"), "Paris, France");
        assert_eq!(original_name("\nParis", "France"), "Paris, France");
    }
}
