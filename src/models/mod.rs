// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod course;
mod row;
mod subject;

// Re-export all public types
pub use config::{ColumnMap, Config, HttpConfig, OutputConfig, RegistrarConfig, TableConfig};
pub use course::{CourseRecord, ScheduleType};
pub use row::RawRow;
pub use subject::Subject;
