// src/lib.rs

//! Course Crawler Library

pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod storage;
pub mod utils;
