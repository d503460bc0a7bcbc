//! Service layer for the crawler application.
//!
//! This module contains the collaborators around the table parser:
//! - Results row extraction (`RowExtractor`)
//! - Subject dropdown discovery (`extract_subjects`)
//! - Registration site client (`RegistrarClient`)

mod registrar;
mod rows;
mod subjects;

pub use registrar::{RegistrarClient, ScrapeOutcome, search_form};
pub use rows::RowExtractor;
pub use subjects::extract_subjects;
