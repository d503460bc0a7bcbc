// src/services/rows.rs

//! Results table row extraction.
//!
//! Lifts `<tr>` elements out of a results page into [`RawRow`]s for the
//! parser, keeping the stripe color and first-cell width as markers.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{RawRow, TableConfig};
use crate::utils::normalize_whitespace;

/// Extracts candidate rows with the configured selector.
pub struct RowExtractor {
    row_sel: Selector,
}

impl RowExtractor {
    pub fn new(config: &TableConfig) -> Result<Self> {
        Ok(Self {
            row_sel: parse_selector(&config.row_selector)?,
        })
    }

    /// All matching rows in document order.
    pub fn extract(&self, document: &Html) -> Vec<RawRow> {
        document
            .select(&self.row_sel)
            .map(|row| Self::lift_row(&row))
            .collect()
    }

    fn lift_row(row: &ElementRef) -> RawRow {
        // Direct cells only; nested tables belong to their own rows.
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "td" | "th"))
            .collect();

        RawRow {
            cells: cells
                .iter()
                .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
                .collect(),
            bgcolor: row.value().attr("bgcolor").map(str::to_string),
            lead_width: cells
                .first()
                .and_then(|cell| cell.value().attr("width"))
                .map(str::to_string),
        }
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
