// src/pipeline/filter.rs

//! Course code filtering.

use std::collections::HashSet;

use crate::models::CourseRecord;
use crate::utils::{normalize_code, subject_prefix};

/// Keep the courses whose normalized code was requested, in input order.
///
/// An empty request keeps everything.
pub fn filter_courses(courses: Vec<CourseRecord>, requested: &[String]) -> Vec<CourseRecord> {
    if requested.is_empty() {
        return courses;
    }

    let wanted: HashSet<String> = requested.iter().map(|c| normalize_code(c)).collect();
    courses
        .into_iter()
        .filter(|course| wanted.contains(&course.normalized_code()))
        .collect()
}

/// Subject prefixes of the given codes, deduplicated in first-seen order.
pub fn subjects_of(codes: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .filter_map(|code| subject_prefix(code))
        .filter(|subject| seen.insert(subject.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, section: &str) -> CourseRecord {
        CourseRecord {
            course_code: code.to_string(),
            section: section.to_string(),
            ..CourseRecord::default()
        }
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_matches_normalized_codes() {
        let courses = vec![
            course("COMP 1405", "A"),
            course("MATH 1007", "B"),
            course("COMP 1405", "B"),
            course("COMP 1406", "A"),
        ];

        let kept = filter_courses(courses, &codes(&["comp1405", " MATH 1007 "]));
        let keys: Vec<_> = kept
            .iter()
            .map(|c| format!("{} {}", c.course_code, c.section))
            .collect();
        assert_eq!(keys, vec!["COMP 1405 A", "MATH 1007 B", "COMP 1405 B"]);
    }

    #[test]
    fn test_filter_empty_request_keeps_all() {
        let courses = vec![course("COMP 1405", "A"), course("MATH 1007", "B")];
        assert_eq!(filter_courses(courses, &[]).len(), 2);
    }

    #[test]
    fn test_subjects_of_dedupes_in_order() {
        let subjects = subjects_of(&codes(&["MATH1007", "comp 1405", "COMP1406", "1234"]));
        assert_eq!(subjects, vec!["MATH", "COMP"]);
    }
}
