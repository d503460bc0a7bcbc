//! Multi-row results table parser.
//!
//! One course section spans a variable number of `<tr>` rows: a wide striped
//! row with the section's columns, then continuation rows with meeting
//! times, cross-registration and prerequisite lines. The parser turns that
//! row sequence into flat [`CourseRecord`](crate::models::CourseRecord)s.
//!
//! - [`RowClassifier`]: new record / continuation / separator
//! - [`ContinuationDecoder`]: marker-driven extraction from continuation text
//! - [`RecordNormalizer`]: header cells to typed fields with defaults
//! - [`TableWalker`]: the idle/open state machine tying them together
//!
//! Parsing never fails. Malformed cells fall back to defaults and are counted
//! in [`WalkStats`].

pub mod classify;
pub mod decode;
pub mod normalize;
pub mod walker;

pub use classify::{RowClass, RowClassifier};
pub use decode::{ContinuationDecoder, Decoded, Rule};
pub use normalize::{Normalized, RecordNormalizer};
pub use walker::{TableWalker, WalkOutcome, WalkStats};

use scraper::Html;

use crate::error::Result;
use crate::models::{RawRow, TableConfig};
use crate::services::RowExtractor;

/// Parse an already extracted row sequence.
pub fn parse_rows(rows: &[RawRow], config: &TableConfig) -> WalkOutcome {
    TableWalker::new(config).walk(rows)
}

/// Parse a results page. Fails only on an invalid row selector.
pub fn parse_document(html: &str, config: &TableConfig) -> Result<WalkOutcome> {
    let document = Html::parse_document(html);
    let rows = RowExtractor::new(config)?.extract(&document);
    Ok(parse_rows(&rows, config))
}
