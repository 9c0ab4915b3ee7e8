//! HTML extractor for listing table rows
//!
//! Each data row of the results table becomes one [`Record`], reading the
//! first five cells in order. Pages without a matching table produce no
//! records; extraction never fails.

use crate::model::Record;
use scraper::error::SelectorErrorKind;
use scraper::{ElementRef, Html, Selector};

/// Rows of the results table
const ROW_SELECTOR: &str = "table tbody tr";

/// Cells of a row, by position
const CELL_SELECTORS: [&str; 5] = [
    "td:nth-child(1)",
    "td:nth-child(2)",
    "td:nth-child(3)",
    "td:nth-child(4)",
    "td:nth-child(5)",
];

/// Pre-parsed selectors for the listing table layout
#[derive(Debug, Clone)]
pub struct Extractor {
    rows: Selector,
    any_cell: Selector,
    cells: [Selector; 5],
}

impl Extractor {
    /// Parses the fixed selectors once
    pub fn new() -> Result<Self, SelectorErrorKind<'static>> {
        let rows = Selector::parse(ROW_SELECTOR)?;
        let any_cell = Selector::parse("td")?;
        let cells = [
            Selector::parse(CELL_SELECTORS[0])?,
            Selector::parse(CELL_SELECTORS[1])?,
            Selector::parse(CELL_SELECTORS[2])?,
            Selector::parse(CELL_SELECTORS[3])?,
            Selector::parse(CELL_SELECTORS[4])?,
        ];

        Ok(Self {
            rows,
            any_cell,
            cells,
        })
    }

    /// Extracts records from the page in document order
    ///
    /// # Example
    ///
    /// ```
    /// use bin_scrape::pipeline::extract;
    ///
    /// let html = r#"<table><tbody>
    ///     <tr><td>411111</td><td>VISA</td><td>Bank</td><td>DEBIT</td><td>CLASSIC</td></tr>
    /// </tbody></table>"#;
    /// let records = extract(html);
    /// assert_eq!(records[0].bin, "411111");
    /// ```
    pub fn extract(&self, content: &str) -> Vec<Record> {
        let document = Html::parse_document(content);

        document
            .select(&self.rows)
            .filter(|row| self.is_data_row(row))
            .map(|row| self.extract_row(&row))
            .collect()
    }

    /// Header rows made only of `<th>` cells are skipped
    fn is_data_row(&self, row: &ElementRef<'_>) -> bool {
        row.select(&self.any_cell).next().is_some()
    }

    fn extract_row(&self, row: &ElementRef<'_>) -> Record {
        let [bin, brand, bank, card_type, level] =
            self.cells.each_ref().map(|selector| cell_text(row, selector));

        Record {
            bin,
            brand,
            bank,
            card_type,
            level,
        }
    }
}

/// Trimmed text of the first cell matching `selector`, or empty if absent
fn cell_text(row: &ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Convenience function for extracting records with a one-off [`Extractor`]
pub fn extract(content: &str) -> Vec<Record> {
    Extractor::new()
        .map(|extractor| extractor.extract(content))
        .unwrap_or_default()
}
