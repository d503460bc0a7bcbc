//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Registration site endpoints and search parameters
    #[serde(default)]
    pub registrar: RegistrarConfig,

    /// Results table layout and row markers
    #[serde(default)]
    pub table: TableConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.registrar.term_code.trim().is_empty() {
            return Err(AppError::validation("registrar.term_code is empty"));
        }
        self.registrar.search_url()?;
        self.table.validate()
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay after each completed request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent subject requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Registration site endpoints and search form parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarConfig {
    /// Base URL that the paths below are resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the course search form target
    #[serde(default = "defaults::search_path")]
    pub search_path: String,

    /// Path of the page holding the subject dropdown
    #[serde(default = "defaults::subjects_path")]
    pub subjects_path: String,

    /// Term code (e.g. "202510" for Winter 2025)
    #[serde(default = "defaults::term_code")]
    pub term_code: String,

    /// Level filter ("UG", "GR")
    #[serde(default = "defaults::level")]
    pub level: String,

    /// Session identifier echoed back to the search form
    #[serde(default = "defaults::session_id")]
    pub session_id: String,
}

impl RegistrarConfig {
    /// Absolute URL of the course search endpoint.
    pub fn search_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.base_url)?.join(&self.search_path)?)
    }

    /// Absolute URL of the subject listing page.
    pub fn subjects_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.base_url)?.join(&self.subjects_path)?)
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            search_path: defaults::search_path(),
            subjects_path: defaults::subjects_path(),
            term_code: defaults::term_code(),
            level: defaults::level(),
            session_id: defaults::session_id(),
        }
    }
}

/// Results table layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// CSS selector for candidate rows
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// Minimum cell count of a row that opens a section
    #[serde(default = "defaults::min_cells")]
    pub min_cells: usize,

    /// Stripe colors painted on section rows
    #[serde(default = "defaults::stripe_colors")]
    pub stripe_colors: Vec<String>,

    /// First-cell width carried by section rows
    #[serde(default = "defaults::lead_cell_width")]
    pub lead_cell_width: Option<String>,

    /// CRN-column texts that mark a header row
    #[serde(default = "defaults::header_signatures")]
    pub header_signatures: Vec<String>,

    /// Column positions of the section row fields
    #[serde(default)]
    pub columns: ColumnMap,
}

impl TableConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_cells == 0 {
            return Err(AppError::validation("table.min_cells must be > 0"));
        }
        if self.stripe_colors.is_empty() && self.lead_cell_width.is_none() {
            return Err(AppError::validation(
                "table needs at least one stripe color or a lead_cell_width",
            ));
        }
        if let Some(index) = self.columns.max_index() {
            if index >= self.min_cells {
                return Err(AppError::validation(format!(
                    "table.columns index {index} is outside min_cells {}",
                    self.min_cells
                )));
            }
        }
        Selector::parse(&self.row_selector)
            .map_err(|e| AppError::selector(&self.row_selector, format!("{e:?}")))?;
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_selector: defaults::row_selector(),
            min_cells: defaults::min_cells(),
            stripe_colors: defaults::stripe_colors(),
            lead_cell_width: defaults::lead_cell_width(),
            header_signatures: defaults::header_signatures(),
            columns: ColumnMap::default(),
        }
    }
}

/// Zero-based cell positions of each field in a section row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "defaults::col_status")]
    pub status: usize,
    #[serde(default = "defaults::col_crn")]
    pub crn: usize,
    #[serde(default = "defaults::col_course_code")]
    pub course_code: usize,
    #[serde(default = "defaults::col_section")]
    pub section: usize,
    #[serde(default = "defaults::col_title")]
    pub title: usize,
    #[serde(default = "defaults::col_credits")]
    pub credits: usize,
    #[serde(default = "defaults::col_schedule_type")]
    pub schedule_type: usize,
    #[serde(default = "defaults::col_instructor")]
    pub instructor: usize,
}

impl ColumnMap {
    fn max_index(&self) -> Option<usize> {
        [
            self.status,
            self.crn,
            self.course_code,
            self.section,
            self.title,
            self.credits,
            self.schedule_type,
            self.instructor,
        ]
        .into_iter()
        .max()
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            status: defaults::col_status(),
            crn: defaults::col_crn(),
            course_code: defaults::col_course_code(),
            section: defaults::col_section(),
            title: defaults::col_title(),
            credits: defaults::col_credits(),
            schedule_type: defaults::col_schedule_type(),
            instructor: defaults::col_instructor(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the generated files
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    #[serde(default = "defaults::markdown_file")]
    pub markdown_file: String,

    #[serde(default = "defaults::json_file")]
    pub json_file: String,

    /// Comma-separated catalog of every course code offered in the term
    #[serde(default = "defaults::codes_file")]
    pub codes_file: String,

    /// Top-level heading of the Markdown course list
    #[serde(default = "defaults::markdown_title")]
    pub markdown_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            markdown_file: defaults::markdown_file(),
            json_file: defaults::json_file(),
            codes_file: defaults::codes_file(),
            markdown_title: defaults::markdown_title(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; course-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Registrar defaults
    pub fn base_url() -> String {
        "https://central.carleton.ca/prod/".into()
    }
    pub fn search_path() -> String {
        "bwysched.p_course_search".into()
    }
    pub fn subjects_path() -> String {
        "bwysched.p_search_fields".into()
    }
    pub fn term_code() -> String {
        "202510".into()
    }
    pub fn level() -> String {
        "UG".into()
    }
    pub fn session_id() -> String {
        "22963932".into()
    }

    // Table defaults
    pub fn row_selector() -> String {
        "tr[bgcolor]".into()
    }
    pub fn min_cells() -> usize {
        11
    }
    pub fn stripe_colors() -> Vec<String> {
        vec!["#C0C0C0".into(), "#DCDCDC".into()]
    }
    pub fn lead_cell_width() -> Option<String> {
        Some("5%".into())
    }
    pub fn header_signatures() -> Vec<String> {
        vec!["CRN".into()]
    }

    // Column defaults
    pub fn col_status() -> usize {
        1
    }
    pub fn col_crn() -> usize {
        2
    }
    pub fn col_course_code() -> usize {
        3
    }
    pub fn col_section() -> usize {
        4
    }
    pub fn col_title() -> usize {
        5
    }
    pub fn col_credits() -> usize {
        6
    }
    pub fn col_schedule_type() -> usize {
        7
    }
    pub fn col_instructor() -> usize {
        10
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from("storage")
    }
    pub fn markdown_file() -> String {
        "courses.md".into()
    }
    pub fn json_file() -> String {
        "courses.json".into()
    }
    pub fn codes_file() -> String {
        "course_codes.txt".into()
    }
    pub fn markdown_title() -> String {
        "Course List".into()
    }
}
