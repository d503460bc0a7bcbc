// src/services/registrar.rs

//! Registrar client service.
//!
//! Submits the course search form once per subject and feeds each results
//! page through the table parser.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;

use crate::error::Result;
use crate::models::{Config, CourseRecord, RegistrarConfig, Subject};
use crate::parser::{WalkOutcome, WalkStats, parse_document};
use crate::services::subjects::extract_subjects;
use crate::utils::http::{create_async_client, read_body};

/// Summary of a scrape run.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Courses in subject input order, table order within a subject
    pub courses: Vec<CourseRecord>,
    pub subject_total: usize,
    pub subject_failures: usize,
    /// Parser counters summed over all subjects
    pub stats: WalkStats,
}

/// Service for fetching course tables from the registration site.
pub struct RegistrarClient {
    config: Arc<Config>,
    client: Client,
}

impl RegistrarClient {
    /// Create a new client with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_async_client(&config.http)?;
        Ok(Self { config, client })
    }

    /// Fetch the subject dropdown for the configured term.
    pub async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        let registrar = &self.config.registrar;
        let url = registrar.subjects_url()?;
        let form = [
            ("wsea_code", "EXT"),
            ("term_code", registrar.term_code.as_str()),
            ("session_id", registrar.session_id.as_str()),
        ];

        let response = self.client.post(url).form(&form).send().await?;
        let html = read_body("subjects", response).await?;
        extract_subjects(&Html::parse_document(&html))
    }

    /// Submit the search form for one subject and return the results page.
    pub async fn fetch_subject_page(&self, subject: &str) -> Result<String> {
        let url = self.config.registrar.search_url()?;
        let form = search_form(&self.config.registrar, subject);

        let response = self.client.post(url).form(&form).send().await?;
        read_body(subject, response).await
    }

    /// Fetch and parse every subject, bounded by `http.max_concurrent`.
    ///
    /// A failing subject is logged and counted; it does not stop the others.
    pub async fn scrape(&self, subjects: &[String]) -> Result<ScrapeOutcome> {
        let delay = Duration::from_millis(self.config.http.request_delay_ms);
        let concurrency = self.config.http.max_concurrent.max(1);

        let mut outcome = ScrapeOutcome {
            subject_total: subjects.len(),
            ..ScrapeOutcome::default()
        };

        let mut results: Vec<(usize, WalkOutcome)> = Vec::with_capacity(subjects.len());
        let mut subject_stream = stream::iter(subjects.iter().enumerate())
            .map(|(index, subject)| async move {
                let result = self.fetch_and_parse(subject).await;
                (index, subject, result)
            })
            .buffer_unordered(concurrency);

        let mut remaining = subjects.len();
        while let Some((index, subject, result)) = subject_stream.next().await {
            remaining -= 1;
            match result {
                Ok(walk) => {
                    log::info!("{}: {} section(s)", subject, walk.records.len());
                    results.push((index, walk));
                }
                Err(error) => {
                    outcome.subject_failures += 1;
                    log::warn!("Failed to fetch courses for {}: {}", subject, error);
                }
            }

            if remaining > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        results.sort_by_key(|(index, _)| *index);
        for (_, walk) in results {
            outcome.stats.merge(&walk.stats);
            outcome.courses.extend(walk.records);
        }

        Ok(outcome)
    }

    async fn fetch_and_parse(&self, subject: &str) -> Result<WalkOutcome> {
        let html = self.fetch_subject_page(subject).await?;
        parse_document(&html, &self.config.table)
    }
}

/// Course search form body. The site expects every field to be present, with
/// "dummy" placeholders ahead of the real values.
pub fn search_form(registrar: &RegistrarConfig, subject: &str) -> Vec<(&'static str, String)> {
    const DUMMIES: &[&str] = &[
        "sel_aud",
        "sel_subj",
        "sel_camp",
        "sel_sess",
        "sel_attr",
        "sel_levl",
        "sel_schd",
        "sel_insm",
        "sel_link",
        "sel_wait",
        "sel_day",
        "sel_begin_hh",
        "sel_begin_mi",
        "sel_begin_am_pm",
        "sel_end_hh",
        "sel_end_mi",
        "sel_end_am_pm",
        "sel_instruct",
        "sel_special",
        "sel_resd",
        "sel_breadth",
    ];

    let mut form: Vec<(&'static str, String)> = vec![
        ("wsea_code", "EXT".into()),
        ("term_code", registrar.term_code.clone()),
        ("session_id", registrar.session_id.clone()),
        ("ws_numb", String::new()),
    ];
    form.extend(DUMMIES.iter().map(|name| (*name, "dummy".to_string())));
    form.extend([
        ("sel_levl", registrar.level.clone()),
        ("sel_subj", subject.to_string()),
        ("sel_number", String::new()),
        ("sel_crn", String::new()),
        ("sel_special", "N".into()),
        ("sel_sess", String::new()),
        ("sel_schd", String::new()),
        ("sel_instruct", String::new()),
        ("sel_begin_hh", "0".into()),
        ("sel_begin_mi", "0".into()),
        ("sel_begin_am_pm", "a".into()),
        ("sel_end_hh", "0".into()),
        ("sel_end_mi", "0".into()),
        ("sel_end_am_pm", "a".into()),
    ]);
    form.extend(
        ["m", "t", "w", "r", "f", "s", "u"]
            .into_iter()
            .map(|day| ("sel_day", day.to_string())),
    );
    form.push(("block_button", String::new()));
    form
}
