//! Row classifier.

use crate::models::{RawRow, TableConfig};

/// What a physical row means to the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Starts a new section record
    NewRecord,
    /// Carries extra data for the open record
    Continuation,
    /// Carries nothing; skipped
    Separator,
}

/// Decides the role of each row from its cell count and stripe markers.
pub struct RowClassifier<'a> {
    config: &'a TableConfig,
}

impl<'a> RowClassifier<'a> {
    pub fn new(config: &'a TableConfig) -> Self {
        Self { config }
    }

    /// Classify `row` given whether a record is currently open.
    pub fn classify(&self, row: &RawRow, record_open: bool) -> RowClass {
        if self.starts_record(row) {
            RowClass::NewRecord
        } else if record_open {
            RowClass::Continuation
        } else {
            RowClass::Separator
        }
    }

    /// A section row is wide enough, carries a row marker and is not a header.
    pub fn starts_record(&self, row: &RawRow) -> bool {
        row.len() >= self.config.min_cells && self.has_marker(row) && !self.is_header(row)
    }

    fn has_marker(&self, row: &RawRow) -> bool {
        let striped = row.bgcolor.as_deref().is_some_and(|color| {
            self.config
                .stripe_colors
                .iter()
                .any(|stripe| stripe.trim().eq_ignore_ascii_case(color.trim()))
        });

        let lead = match (&self.config.lead_cell_width, &row.lead_width) {
            (Some(expected), Some(actual)) => expected.trim().eq_ignore_ascii_case(actual.trim()),
            _ => false,
        };

        striped || lead
    }

    fn is_header(&self, row: &RawRow) -> bool {
        let crn = row.cell(self.config.columns.crn).trim();
        self.config
            .header_signatures
            .iter()
            .any(|signature| signature.eq_ignore_ascii_case(crn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_row(crn: &str) -> RawRow {
        let mut cells = vec![String::new(); 11];
        cells[2] = crn.to_string();
        RawRow::new(cells)
    }

    #[test]
    fn test_striped_wide_row_starts_record() {
        let config = TableConfig::default();
        let classifier = RowClassifier::new(&config);

        let row = wide_row("12345").with_bgcolor("#dcdcdc");
        assert_eq!(classifier.classify(&row, false), RowClass::NewRecord);
        assert_eq!(classifier.classify(&row, true), RowClass::NewRecord);
    }

    #[test]
    fn test_lead_width_marker_starts_record() {
        let config = TableConfig::default();
        let classifier = RowClassifier::new(&config);

        let row = wide_row("12345").with_lead_width("5%");
        assert_eq!(classifier.classify(&row, false), RowClass::NewRecord);
    }

    #[test]
    fn test_narrow_row_never_starts_record() {
        let config = TableConfig::default();
        let classifier = RowClassifier::new(&config);

        let row = RawRow::new(vec![String::new(); 10]).with_bgcolor("#C0C0C0");
        assert_eq!(classifier.classify(&row, false), RowClass::Separator);
        assert_eq!(classifier.classify(&row, true), RowClass::Continuation);
    }

    #[test]
    fn test_unmarked_wide_row_is_not_a_record() {
        let config = TableConfig::default();
        let classifier = RowClassifier::new(&config);

        let row = wide_row("12345").with_bgcolor("#FFFFFF");
        assert_eq!(classifier.classify(&row, false), RowClass::Separator);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let config = TableConfig::default();
        let classifier = RowClassifier::new(&config);

        let row = wide_row("CRN").with_bgcolor("#C0C0C0");
        assert_eq!(classifier.classify(&row, false), RowClass::Separator);
    }
}
