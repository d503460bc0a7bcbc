//! Table walker.
//!
//! A single pass over the rows with one cursor. The walker is either idle or
//! holds exactly one open record; a record is handed to the output the moment
//! the next section row arrives, a "Section Information:" line closes it, or
//! the rows run out.

use serde::{Deserialize, Serialize};

use crate::models::{CourseRecord, RawRow, TableConfig};
use crate::parser::classify::{RowClass, RowClassifier};
use crate::parser::decode::{ContinuationDecoder, Decoded};
use crate::parser::normalize::RecordNormalizer;

/// Counters describing one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Physical rows seen
    pub rows: usize,
    /// Records emitted
    pub records: usize,
    /// Rows that opened a record
    pub new_records: usize,
    /// Rows decoded into an open record
    pub continuations: usize,
    /// Rows skipped while idle
    pub separators: usize,
    /// Records closed by a section information line
    pub section_ends: usize,
    /// Continuation lines kept as notes
    pub notes: usize,
    /// Header fields that fell back to a default
    pub defaulted_fields: usize,
}

impl WalkStats {
    /// Add another walk's counters to these.
    pub fn merge(&mut self, other: &WalkStats) {
        self.rows += other.rows;
        self.records += other.records;
        self.new_records += other.new_records;
        self.continuations += other.continuations;
        self.separators += other.separators;
        self.section_ends += other.section_ends;
        self.notes += other.notes;
        self.defaulted_fields += other.defaulted_fields;
    }
}

/// Records produced by a walk, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutcome {
    pub records: Vec<CourseRecord>,
    pub stats: WalkStats,
}

enum WalkState {
    Idle,
    Open(CourseRecord),
}

/// Drives classifier, decoder and normalizer over a row sequence.
pub struct TableWalker<'a> {
    classifier: RowClassifier<'a>,
    decoder: ContinuationDecoder,
    normalizer: RecordNormalizer<'a>,
}

impl<'a> TableWalker<'a> {
    pub fn new(config: &'a TableConfig) -> Self {
        Self::with_decoder(config, ContinuationDecoder::default())
    }

    /// Use a decoder with extra rules.
    pub fn with_decoder(config: &'a TableConfig, decoder: ContinuationDecoder) -> Self {
        Self {
            classifier: RowClassifier::new(config),
            decoder,
            normalizer: RecordNormalizer::new(&config.columns),
        }
    }

    /// Turn rows into records.
    pub fn walk(&self, rows: &[RawRow]) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        outcome.stats.rows = rows.len();

        let mut state = WalkState::Idle;
        let mut cursor = 0;

        while let Some(row) = rows.get(cursor) {
            let open = matches!(state, WalkState::Open(_));
            let class = self.classifier.classify(row, open);
            log::trace!("row {cursor}: {class:?}");

            state = match (state, class) {
                (WalkState::Idle, RowClass::NewRecord) => {
                    let normalized = self.normalizer.normalize(row);
                    outcome.stats.new_records += 1;
                    outcome.stats.defaulted_fields += normalized.defaulted;
                    cursor += 1;
                    WalkState::Open(normalized.record)
                }
                (WalkState::Idle, _) => {
                    outcome.stats.separators += 1;
                    cursor += 1;
                    WalkState::Idle
                }
                (WalkState::Open(mut record), RowClass::Continuation) => {
                    outcome.stats.continuations += 1;
                    cursor += 1;
                    match self.decoder.decode(&row.text(), &mut record) {
                        Decoded::SectionEnd => {
                            outcome.stats.section_ends += 1;
                            Self::finalize(&mut outcome, record);
                            WalkState::Idle
                        }
                        Decoded::Note => {
                            outcome.stats.notes += 1;
                            WalkState::Open(record)
                        }
                        _ => WalkState::Open(record),
                    }
                }
                // Cursor stays put: the row is classified again while idle.
                (WalkState::Open(record), _) => {
                    Self::finalize(&mut outcome, record);
                    WalkState::Idle
                }
            };
        }

        if let WalkState::Open(record) = state {
            Self::finalize(&mut outcome, record);
        }

        outcome.stats.records = outcome.records.len();
        outcome
    }

    fn finalize(outcome: &mut WalkOutcome, record: CourseRecord) {
        log::debug!(
            "Parsed {} {} (CRN {}) {}",
            record.course_code,
            record.section,
            record.crn,
            record.time_range()
        );
        outcome.records.push(record);
    }
}
