//! Pipeline entry points for crawler operations.
//!
//! - `run_scrape`: Fetch, parse and store courses for a term
//! - `run_parse`: Parse a saved results page offline
//! - `run_codes`: Catalog every course code offered in a term
//! - `run_subjects`, `run_validate`, `run_show`: read-only helpers

pub mod codes;
pub mod filter;
pub mod report;
pub mod scrape;

pub use codes::{catalog_codes, run_codes};
pub use filter::{filter_courses, subjects_of};
pub use report::{run_show, run_subjects, run_validate};
pub use scrape::{ScrapeRequest, run_parse, run_scrape};
