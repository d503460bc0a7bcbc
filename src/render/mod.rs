//! Markdown rendering of course lists.
//!
//! The Markdown list is what the schedule generator hands to the language
//! model as context, so field labels are fixed.

use std::fmt::Write;

use crate::models::CourseRecord;

/// Render `courses` under a `# {title}` heading, one section per record.
pub fn render_markdown(title: &str, courses: &[CourseRecord]) -> String {
    let mut md = format!("# {title}\n\n");
    for course in courses {
        render_course(&mut md, course);
    }
    md
}

fn render_course(md: &mut String, c: &CourseRecord) {
    // Writing into a String cannot fail.
    let _ = writeln!(md, "## {} (Section {})\n", c.course_code, c.section);
    let _ = writeln!(md, "- **CRN**: {}", c.crn);
    let _ = writeln!(md, "- **Title**: {}", c.title);
    let _ = writeln!(md, "- **Status**: {}", c.status);
    let _ = writeln!(md, "- **Credits**: {}", c.credits);
    let _ = writeln!(md, "- **Schedule Type**: {}", c.schedule_type);
    let _ = writeln!(md, "- **Instructor**: {}", c.instructor);
    let _ = writeln!(md, "- **Days**: {}", c.meeting_day);
    let _ = writeln!(md, "- **Time**: {} - {}", c.start_time, c.end_time);

    let location = c.location();
    if !location.is_empty() {
        let _ = writeln!(md, "- **Location**: {location}");
    }
    if !c.meeting_dates.is_empty() {
        let _ = writeln!(md, "- **Meeting Dates**: {}", c.meeting_dates);
    }
    if let Some(target) = &c.cross_registration {
        let _ = writeln!(md, "- **Also Register in**: {target}");
    }
    if let Some(prerequisites) = &c.prerequisites {
        let _ = writeln!(md, "- **Prerequisites**: {prerequisites}");
    }
    if !c.notes.is_empty() {
        md.push_str("- **Notes**:\n");
        for note in &c.notes {
            let _ = writeln!(md, "  - {note}");
        }
    }

    md.push_str("\n---\n\n");
}

/// Render a code catalog as a single comma-separated line.
pub fn render_codes<'a>(codes: impl IntoIterator<Item = &'a String>) -> String {
    codes
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a comma-separated code catalog back, dropping blank entries.
pub fn parse_codes(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleType;

    fn course() -> CourseRecord {
        CourseRecord {
            status: "Open".to_string(),
            crn: "12345".to_string(),
            course_code: "COMP 1405".to_string(),
            section: "A".to_string(),
            title: "Intro to CS I".to_string(),
            credits: 0.5,
            schedule_type: ScheduleType::Lecture,
            instructor: "Jane Smith".to_string(),
            meeting_day: "MWF".to_string(),
            start_time: "8:35".to_string(),
            end_time: "9:25".to_string(),
            ..CourseRecord::default()
        }
    }

    #[test]
    fn test_render_fixed_labels() {
        let md = render_markdown("Course List", &[course()]);

        assert!(md.starts_with("# Course List\n\n## COMP 1405 (Section A)\n\n"));
        assert!(md.contains("- **CRN**: 12345\n"));
        assert!(md.contains("- **Credits**: 0.5\n"));
        assert!(md.contains("- **Schedule Type**: lecture\n"));
        assert!(md.contains("- **Time**: 8:35 - 9:25\n"));
        assert!(!md.contains("Also Register in"));
        assert!(!md.contains("Notes"));
        assert!(md.ends_with("\n---\n\n"));
    }

    #[test]
    fn test_render_optional_fields() {
        let mut c = course();
        c.cross_registration = Some("COMP 1405 T1".to_string());
        c.prerequisites = Some("Prerequisites: none".to_string());
        c.notes = vec!["Lab fee".to_string(), "Lab fee".to_string()];
        c.building = "HP".to_string();
        c.room = "4351".to_string();

        let md = render_markdown("Courses", &[c]);
        assert!(md.contains("- **Also Register in**: COMP 1405 T1\n"));
        assert!(md.contains("- **Prerequisites**: Prerequisites: none\n"));
        assert!(md.contains("- **Location**: HP 4351\n"));
        assert!(md.contains("- **Notes**:\n  - Lab fee\n  - Lab fee\n"));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_markdown("Course List", &[]), "# Course List\n\n");
    }

    #[test]
    fn test_render_codes_joins_with_comma() {
        let codes = vec!["COMP1405".to_string(), "MATH1007".to_string()];
        assert_eq!(render_codes(&codes), "COMP1405, MATH1007");
        assert_eq!(render_codes(&Vec::<String>::new()), "");
    }

    #[test]
    fn test_parse_codes_skips_blanks() {
        assert_eq!(
            parse_codes(" COMP1405 ,, MATH1007,\n"),
            vec!["COMP1405", "MATH1007"]
        );
        assert!(parse_codes("").is_empty());
    }
}
