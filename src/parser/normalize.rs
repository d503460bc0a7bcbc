//! Record normalizer.
//!
//! Lifts the cells of a section row into a [`CourseRecord`]. Every coercion
//! has a fallback so a single bad cell never costs the whole record.

use crate::models::{ColumnMap, CourseRecord, RawRow, ScheduleType};
use crate::utils::normalize_whitespace;

/// A freshly built record plus the number of fields that fell back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: CourseRecord,
    pub defaulted: usize,
}

/// Builds records from section rows using a column map.
pub struct RecordNormalizer<'a> {
    columns: &'a ColumnMap,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(columns: &'a ColumnMap) -> Self {
        Self { columns }
    }

    /// Build a record from the header cells of a section row.
    pub fn normalize(&self, row: &RawRow) -> Normalized {
        let mut defaulted = 0;
        let mut text = |index: usize| match row.cells.get(index) {
            Some(cell) => normalize_whitespace(cell),
            None => {
                defaulted += 1;
                String::new()
            }
        };

        let status = text(self.columns.status);
        let crn = text(self.columns.crn);
        let course_code = text(self.columns.course_code);
        let section = text(self.columns.section);
        let title = text(self.columns.title);
        let credits_text = text(self.columns.credits);
        let schedule_text = text(self.columns.schedule_type);
        let instructor = text(self.columns.instructor);

        let credits = parse_credits(&credits_text).unwrap_or_else(|| {
            log::debug!(
                "Credits '{}' for {} {} is not a number, using 0.0",
                credits_text,
                course_code,
                section
            );
            defaulted += 1;
            0.0
        });

        Normalized {
            record: CourseRecord {
                status,
                crn,
                course_code,
                section,
                title,
                credits,
                schedule_type: ScheduleType::from_text(&schedule_text),
                instructor,
                ..CourseRecord::default()
            },
            defaulted,
        }
    }
}

/// Parse a credit weight. Rejects empty, non-numeric, negative and non-finite text.
pub fn parse_credits(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_row(credits: &str) -> RawRow {
        RawRow::new([
            "",
            "Open",
            "12345",
            "COMP  1405",
            "A",
            "Intro to\n Computer Science I",
            credits,
            "Lecture",
            "",
            "",
            "Jane Smith",
        ])
    }

    #[test]
    fn test_normalize_reads_mapped_columns() {
        let columns = ColumnMap::default();
        let normalized = RecordNormalizer::new(&columns).normalize(&section_row("0.5"));
        let record = normalized.record;

        assert_eq!(normalized.defaulted, 0);
        assert_eq!(record.status, "Open");
        assert_eq!(record.crn, "12345");
        assert_eq!(record.course_code, "COMP 1405");
        assert_eq!(record.section, "A");
        assert_eq!(record.title, "Intro to Computer Science I");
        assert_eq!(record.credits, 0.5);
        assert_eq!(record.schedule_type, ScheduleType::Lecture);
        assert_eq!(record.instructor, "Jane Smith");
        assert!(record.meeting_day.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_malformed_credits_default_to_zero() {
        let columns = ColumnMap::default();
        let normalized = RecordNormalizer::new(&columns).normalize(&section_row("N/A"));
        assert_eq!(normalized.record.credits, 0.0);
        assert_eq!(normalized.defaulted, 1);
    }

    #[test]
    fn test_short_row_defaults_missing_cells() {
        let columns = ColumnMap::default();
        let row = RawRow::new(["", "Open", "12345"]);
        let normalized = RecordNormalizer::new(&columns).normalize(&row);

        assert_eq!(normalized.record.crn, "12345");
        assert_eq!(normalized.record.instructor, "");
        // course_code, section, title, credits, schedule_type, instructor missing
        // plus the credits fallback itself
        assert_eq!(normalized.defaulted, 7);
    }

    #[test]
    fn test_parse_credits() {
        assert_eq!(parse_credits("1.0"), Some(1.0));
        assert_eq!(parse_credits(" 0.25 "), Some(0.25));
        assert_eq!(parse_credits("0"), Some(0.0));
        assert_eq!(parse_credits("N/A"), None);
        assert_eq!(parse_credits(""), None);
        assert_eq!(parse_credits("NaN"), None);
        assert_eq!(parse_credits("inf"), None);
        assert_eq!(parse_credits("-1"), None);
    }
}
