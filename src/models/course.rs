//! Course section record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::normalize_code;

/// Kind of class meeting a section represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Lecture,
    Tutorial,
    #[default]
    Other,
}

impl ScheduleType {
    /// Map the site's schedule type text ("Lecture", "Tutorial", "Laboratory", ...).
    pub fn from_text(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        if lowered.starts_with("lecture") {
            ScheduleType::Lecture
        } else if lowered.starts_with("tutorial") {
            ScheduleType::Tutorial
        } else {
            ScheduleType::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Lecture => "lecture",
            ScheduleType::Tutorial => "tutorial",
            ScheduleType::Other => "other",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (course, section) offering scraped from the registration table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Registration status (e.g. "Open", "Registration Closed")
    pub status: String,

    /// Course reference number, kept as text
    pub crn: String,

    /// Subject and number (e.g. "COMP 1405")
    pub course_code: String,

    /// Section code (e.g. "A", "T1")
    pub section: String,

    /// Course title
    pub title: String,

    /// Credit weight (0, 0.5, 1.0, ...)
    pub credits: f64,

    /// Lecture, tutorial or other
    pub schedule_type: ScheduleType,

    /// Instructor name, may be empty
    pub instructor: String,

    /// Meeting days (e.g. "MWF")
    pub meeting_day: String,

    /// Start clock time, free text
    pub start_time: String,

    /// End clock time, free text
    pub end_time: String,

    /// Meeting date range (e.g. "Jan 06, 2025 to Apr 08, 2025")
    #[serde(default)]
    pub meeting_dates: String,

    /// Building code
    #[serde(default)]
    pub building: String,

    /// Room number
    #[serde(default)]
    pub room: String,

    /// Linked section the student must also register in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_registration: Option<String>,

    /// Prerequisite line, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,

    /// Continuation lines that matched no known marker
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CourseRecord {
    /// Course code with whitespace removed and letters uppercased.
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.course_code)
    }

    /// "start - end", or empty when neither time is known.
    pub fn time_range(&self) -> String {
        if self.start_time.is_empty() && self.end_time.is_empty() {
            String::new()
        } else {
            format!("{} - {}", self.start_time, self.end_time)
        }
    }

    /// "building room", trimmed.
    pub fn location(&self) -> String {
        format!("{} {}", self.building, self.room).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CourseRecord {
        CourseRecord {
            status: "Open".to_string(),
            crn: "31245".to_string(),
            course_code: "COMP 1405".to_string(),
            section: "A".to_string(),
            title: "Introduction to Computer Science I".to_string(),
            credits: 0.5,
            schedule_type: ScheduleType::Lecture,
            instructor: "Jane Smith".to_string(),
            meeting_day: "Tue Thu".to_string(),
            start_time: "08:35".to_string(),
            end_time: "09:55".to_string(),
            ..CourseRecord::default()
        }
    }

    #[test]
    fn test_schedule_type_from_text() {
        assert_eq!(ScheduleType::from_text("Lecture"), ScheduleType::Lecture);
        assert_eq!(ScheduleType::from_text(" TUTORIAL "), ScheduleType::Tutorial);
        assert_eq!(
            ScheduleType::from_text("Lecture (in person)"),
            ScheduleType::Lecture
        );
        assert_eq!(ScheduleType::from_text("Laboratory"), ScheduleType::Other);
        assert_eq!(ScheduleType::from_text(""), ScheduleType::Other);
    }

    #[test]
    fn test_crn_serializes_as_string() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["crn"], serde_json::Value::String("31245".into()));
        assert_eq!(json["schedule_type"], "lecture");
        assert!(json.get("cross_registration").is_none());
    }

    #[test]
    fn test_time_range_and_location() {
        let mut record = sample_record();
        assert_eq!(record.time_range(), "08:35 - 09:55");
        assert_eq!(record.location(), "");

        record.start_time.clear();
        record.end_time.clear();
        record.building = "HP".to_string();
        assert_eq!(record.time_range(), "");
        assert_eq!(record.location(), "HP");
    }
}
