// src/pipeline/codes.rs

//! Course code catalog: every distinct code offered in a term.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, CourseRecord};
use crate::services::RegistrarClient;
use crate::storage::CourseStorage;
use crate::utils::normalize_code;

/// Normalized, deduplicated and sorted codes of `courses`.
pub fn catalog_codes(courses: &[CourseRecord]) -> BTreeSet<String> {
    courses
        .iter()
        .map(|course| normalize_code(&course.course_code))
        .filter(|code| !code.is_empty())
        .collect()
}

/// Scrape every requested subject (all subjects when empty) and store the
/// code catalog.
pub async fn run_codes(
    config: Arc<Config>,
    storage: &dyn CourseStorage,
    subjects: &[String],
) -> Result<Vec<String>> {
    let client = RegistrarClient::new(Arc::clone(&config))?;

    let subjects = if subjects.is_empty() {
        client
            .fetch_subjects()
            .await?
            .into_iter()
            .map(|s| s.code)
            .collect()
    } else {
        subjects.to_vec()
    };
    log::info!(
        "Cataloging course codes of {} subject(s) for term {}",
        subjects.len(),
        config.registrar.term_code
    );

    let outcome = client.scrape(&subjects).await?;
    if outcome.subject_failures > 0 {
        log::warn!(
            "{} of {} subject(s) failed; the catalog is incomplete",
            outcome.subject_failures,
            outcome.subject_total
        );
    }

    let codes: Vec<String> = catalog_codes(&outcome.courses).into_iter().collect();
    storage.write_codes(&codes).await?;
    Ok(codes)
}
