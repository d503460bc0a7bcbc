// src/services/subjects.rs

//! Subject discovery from the registrar's search form.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::Subject;
use crate::services::rows::parse_selector;
use crate::utils::normalize_whitespace;

const SUBJECT_OPTIONS: &str = "select[name='sel_subj'] option";

/// Read the subject dropdown. The empty "All Subjects" option is skipped.
pub fn extract_subjects(document: &Html) -> Result<Vec<Subject>> {
    let select_sel = parse_selector("select[name='sel_subj']")?;
    if document.select(&select_sel).next().is_none() {
        return Err(AppError::fetch(
            "subjects",
            "Unable to locate the 'sel_subj' dropdown",
        ));
    }

    let option_sel = parse_selector(SUBJECT_OPTIONS)?;
    let subjects = document
        .select(&option_sel)
        .filter_map(|option| {
            let code = option.value().attr("value")?.trim();
            if code.is_empty() {
                return None;
            }
            let name = normalize_whitespace(&option.text().collect::<String>());
            Some(Subject::new(code, name))
        })
        .collect();

    Ok(subjects)
}
