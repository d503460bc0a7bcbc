//! Continuation decoder.
//!
//! Continuation rows are free-text cells with no fixed schema, so each row is
//! matched against an ordered table of marker strings. The first marker found
//! (case-insensitive) picks the extraction rule; anything unmatched becomes a
//! note on the record.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::CourseRecord;

/// What a continuation row turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Meeting,
    CrossRegistration,
    /// "Section Information:" line; closes the record, text is dropped
    SectionEnd,
    Prerequisites,
    Note,
    /// Blank row
    Empty,
}

/// Extraction rule applied when a marker matches.
pub type Extract = fn(&str, &mut CourseRecord);

/// One entry of the dispatch table.
#[derive(Clone)]
pub struct Rule {
    /// Lowercase marker searched for in the lowercased row text
    pub marker: &'static str,
    pub outcome: Decoded,
    pub extract: Extract,
}

static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Days:\s*(.+?)\s*Time:").expect("valid regex"));
static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Time:\s*(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})").expect("valid regex")
});
static DATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Meeting Date:\s*(.+?)\s*Days:").expect("valid regex"));
static BUILDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Building:\s*(.+?)\s*(?:Room:|$)").expect("valid regex"));
static ROOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Room:\s*(\S+)").expect("valid regex"));
static ALSO_REGISTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)also register in:\s*(.*)").expect("valid regex"));

/// Ordered marker -> rule table.
pub struct ContinuationDecoder {
    rules: Vec<Rule>,
}

impl ContinuationDecoder {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule after the built-in ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Merge one continuation line into `record`.
    pub fn decode(&self, text: &str, record: &mut CourseRecord) -> Decoded {
        let text = text.trim();
        if text.is_empty() {
            return Decoded::Empty;
        }

        let lowered = text.to_lowercase();
        if let Some(rule) = self.rules.iter().find(|r| lowered.contains(r.marker)) {
            (rule.extract)(text, record);
            return rule.outcome;
        }

        record.notes.push(text.to_string());
        Decoded::Note
    }
}

impl Default for ContinuationDecoder {
    fn default() -> Self {
        Self::new(vec![
            Rule {
                marker: "meeting date:",
                outcome: Decoded::Meeting,
                extract: extract_meeting,
            },
            Rule {
                marker: "also register in:",
                outcome: Decoded::CrossRegistration,
                extract: extract_cross_registration,
            },
            Rule {
                marker: "section information:",
                outcome: Decoded::SectionEnd,
                extract: discard,
            },
            Rule {
                marker: "prerequisites",
                outcome: Decoded::Prerequisites,
                extract: extract_prerequisites,
            },
        ])
    }
}

/// First capture group, trimmed, if non-empty.
fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_meeting(text: &str, record: &mut CourseRecord) {
    if let Some(days) = capture(&DAYS, text) {
        record.meeting_day = days;
    }
    if let Some(caps) = TIME.captures(text) {
        record.start_time = caps[1].to_string();
        record.end_time = caps[2].to_string();
    }
    if let Some(dates) = capture(&DATES, text) {
        record.meeting_dates = dates;
    }
    if let Some(building) = capture(&BUILDING, text) {
        record.building = building;
    }
    if let Some(room) = capture(&ROOM, text) {
        record.room = room;
    }
}

fn extract_cross_registration(text: &str, record: &mut CourseRecord) {
    if let Some(target) = capture(&ALSO_REGISTER, text) {
        record.cross_registration = Some(target);
    }
}

fn extract_prerequisites(text: &str, record: &mut CourseRecord) {
    record.prerequisites = Some(text.to_string());
}

// TODO: keep the section information text once a field for it is agreed on
fn discard(_text: &str, _record: &mut CourseRecord) {}
