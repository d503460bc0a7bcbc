// src/pipeline/report.rs

//! Read-only commands: configuration check, subject listing, snapshot info.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, Subject};
use crate::services::RegistrarClient;
use crate::storage::CourseStorage;

/// Validate the configuration and log the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("  User agent: {}", config.http.user_agent);
    log::info!("  Timeout: {}s", config.http.timeout_secs);
    log::info!("  Max concurrent: {}", config.http.max_concurrent);
    log::info!("  Term: {}", config.registrar.term_code);
    log::info!("  Search URL: {}", config.registrar.search_url()?);
    log::info!(
        "  Record rows: {} with >= {} cells",
        config.table.row_selector,
        config.table.min_cells
    );
    Ok(())
}

/// Fetch the subject dropdown for the configured term.
pub async fn run_subjects(config: Arc<Config>) -> Result<Vec<Subject>> {
    let client = RegistrarClient::new(config)?;
    let subjects = client.fetch_subjects().await?;
    log::info!("Found {} subject(s)", subjects.len());
    Ok(subjects)
}

/// Log a summary of the stored snapshot. Returns false when there is none.
pub async fn run_show(storage: &dyn CourseStorage) -> Result<bool> {
    let Some(snapshot) = storage.load_snapshot().await? else {
        log::info!("No snapshot found yet.");
        return Ok(false);
    };

    log::info!("Term: {}", snapshot.term_code);
    log::info!("Generated at: {}", snapshot.generated_at);
    log::info!("Courses: {}", snapshot.count);

    let mut subjects: Vec<String> = snapshot
        .courses
        .iter()
        .filter_map(|c| crate::utils::subject_prefix(&c.course_code))
        .collect();
    subjects.sort();
    subjects.dedup();
    if !subjects.is_empty() {
        log::info!("Subjects: {}", subjects.join(", "));
    }

    let codes = storage.load_codes().await?;
    if !codes.is_empty() {
        log::info!("Cataloged course codes: {}", codes.len());
    }
    Ok(true)
}
