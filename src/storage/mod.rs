//! Storage abstractions for scraped course lists.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml    # Crawler configuration
//! ├── courses.json   # Latest snapshot (records + metadata)
//! ├── courses.md     # Same records rendered for the schedule generator
//! └── course_codes.txt  # Every course code of the term, comma-separated
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::CourseRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Contents of `courses.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSnapshot {
    /// ISO 8601 timestamp of the scrape
    pub generated_at: DateTime<Utc>,
    /// Term the courses belong to
    pub term_code: String,
    /// Total record count
    pub count: usize,
    /// The records, in scrape order
    pub courses: Vec<CourseRecord>,
}

impl CourseSnapshot {
    pub fn new(term_code: impl Into<String>, courses: Vec<CourseRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            term_code: term_code.into(),
            count: courses.len(),
            courses,
        }
    }
}

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    pub count: usize,
    pub json_location: String,
    pub markdown_location: String,
    pub timestamp: DateTime<Utc>,
}

/// Trait for course list storage backends.
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Persist the snapshot as JSON and its Markdown rendering.
    async fn write_snapshot(&self, snapshot: &CourseSnapshot) -> Result<WriteMetadata>;

    /// Load the last written snapshot, if any.
    async fn load_snapshot(&self) -> Result<Option<CourseSnapshot>>;

    /// Persist the course code catalog. Returns its location.
    async fn write_codes(&self, codes: &[String]) -> Result<String>;

    /// Load the course code catalog; empty when none was written.
    async fn load_codes(&self) -> Result<Vec<String>>;
}
