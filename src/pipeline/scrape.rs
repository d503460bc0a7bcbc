// src/pipeline/scrape.rs

//! Scrape and offline parse pipelines.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, CourseRecord};
use crate::parser::{WalkStats, parse_document};
use crate::pipeline::filter::{filter_courses, subjects_of};
use crate::services::RegistrarClient;
use crate::storage::{CourseSnapshot, CourseStorage, WriteMetadata};

/// What to scrape. Empty `subjects` falls back to the prefixes of `courses`,
/// then to every subject the site lists.
#[derive(Debug, Default, Clone)]
pub struct ScrapeRequest {
    pub subjects: Vec<String>,
    pub courses: Vec<String>,
}

/// Fetch, parse, filter and store courses for the configured term.
pub async fn run_scrape(
    config: Arc<Config>,
    storage: &dyn CourseStorage,
    request: &ScrapeRequest,
) -> Result<WriteMetadata> {
    let start_time = Utc::now();
    log::info!(
        "Scraping term {} from {}",
        config.registrar.term_code,
        config.registrar.base_url
    );

    let client = RegistrarClient::new(Arc::clone(&config))?;

    let subjects = if !request.subjects.is_empty() {
        request.subjects.clone()
    } else if !request.courses.is_empty() {
        subjects_of(&request.courses)
    } else {
        log::info!("No subjects requested, fetching the subject list");
        client
            .fetch_subjects()
            .await?
            .into_iter()
            .map(|s| s.code)
            .collect()
    };
    log::info!("Fetching {} subject(s)", subjects.len());

    let outcome = client.scrape(&subjects).await?;
    if outcome.subject_failures > 0 {
        log::warn!(
            "{} of {} subject(s) failed",
            outcome.subject_failures,
            outcome.subject_total
        );
    }
    log_stats(&outcome.stats);

    let courses = filter_courses(outcome.courses, &request.courses);
    let summary = store(&config, storage, courses).await?;

    let elapsed = Utc::now() - start_time;
    log::info!("Scrape finished in {}s", elapsed.num_seconds());
    Ok(summary)
}

/// Parse a saved results page instead of fetching one.
pub async fn run_parse(
    config: &Config,
    storage: &dyn CourseStorage,
    html_path: &Path,
    courses: &[String],
) -> Result<WriteMetadata> {
    log::info!("Parsing {}", html_path.display());
    let html = tokio::fs::read_to_string(html_path).await?;

    let outcome = parse_document(&html, &config.table)?;
    log_stats(&outcome.stats);

    let records = filter_courses(outcome.records, courses);
    store(config, storage, records).await
}

async fn store(
    config: &Config,
    storage: &dyn CourseStorage,
    courses: Vec<CourseRecord>,
) -> Result<WriteMetadata> {
    if courses.is_empty() {
        log::warn!("No courses matched; writing an empty list");
    }
    let snapshot = CourseSnapshot::new(config.registrar.term_code.clone(), courses);
    storage.write_snapshot(&snapshot).await
}

fn log_stats(stats: &WalkStats) {
    log::info!(
        "Parsed {} row(s) into {} record(s)",
        stats.rows,
        stats.records
    );
    log::debug!(
        "continuations={} separators={} section_ends={} notes={} defaulted_fields={}",
        stats.continuations,
        stats.separators,
        stats.section_ends,
        stats.notes,
        stats.defaulted_fields
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputConfig;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    const PAGE: &str = r##"<html><body><table>
        <tr><td>Status</td><td>CRN</td><td>Course</td></tr>
        <tr bgcolor="#C0C0C0"><td width="5%"></td><td>Open</td><td>12345</td><td>COMP 1405</td><td>A</td><td>Intro to CS I</td><td>0.5</td><td>Lecture</td><td></td><td></td><td>Jane Smith</td></tr>
        <tr bgcolor="#C0C0C0"><td></td><td colspan="10">Meeting Date: Jan 06, 2025 to Apr 08, 2025 Days: Mon Wed Time: 08:35 - 09:55 Building: HP Room: 4351</td></tr>
        <tr bgcolor="#DCDCDC"><td width="5%"></td><td>Full</td><td>23456</td><td>MATH 1007</td><td>B</td><td>Calculus</td><td>0.5</td><td>Lecture</td><td></td><td></td><td>Ann Lee</td></tr>
    </table></body></html>"##;

    #[tokio::test]
    async fn test_run_parse_filters_and_writes() {
        let tmp = TempDir::new().unwrap();
        let html_path = tmp.path().join("results.html");
        std::fs::write(&html_path, PAGE).unwrap();

        let mut config = Config::default();
        config.output = OutputConfig {
            dir: tmp.path().join("out"),
            ..OutputConfig::default()
        };
        let storage = LocalStorage::new(&config.output);

        let meta = run_parse(&config, &storage, &html_path, &["comp1405".to_string()])
            .await
            .unwrap();
        assert_eq!(meta.count, 1);

        let snapshot = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.courses[0].crn, "12345");
        assert_eq!(snapshot.courses[0].meeting_day, "Mon Wed");
        assert_eq!(snapshot.courses[0].start_time, "08:35");
        assert_eq!(snapshot.courses[0].location(), "HP 4351");
    }

    #[tokio::test]
    async fn test_run_parse_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let storage = LocalStorage::new(&OutputConfig {
            dir: tmp.path().to_path_buf(),
            ..OutputConfig::default()
        });

        let result = run_parse(&config, &storage, &tmp.path().join("nope.html"), &[]).await;
        assert!(result.is_err());
    }
}
