//! Course Crawler CLI
//!
//! Scrapes the registration site's course search into `courses.json` and
//! `courses.md`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use course_crawler::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, ScrapeRequest},
    storage::LocalStorage,
};

/// Course Crawler - University Course Table Scraper
#[derive(Parser, Debug)]
#[command(
    name = "course-crawler",
    version,
    about = "Scrapes course sections from the registration site"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch courses from the registration site
    Scrape {
        /// Term code override, e.g. 202510
        #[arg(long)]
        term: Option<String>,

        /// Subject codes to fetch (default: prefixes of --courses, else all)
        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,

        /// Keep only these course codes, e.g. COMP1405,MATH1007
        #[arg(long, value_delimiter = ',')]
        courses: Vec<String>,
    },

    /// Parse a saved results page
    Parse {
        /// Path to the HTML file
        html: PathBuf,

        /// Keep only these course codes
        #[arg(long, value_delimiter = ',')]
        courses: Vec<String>,
    },

    /// Write every course code of the term to the code catalog
    Codes {
        /// Subject codes to catalog (default: all)
        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,
    },

    /// List subject codes for the configured term
    Subjects,

    /// Validate configuration file
    Validate,

    /// Show stored snapshot info
    Show,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Course Crawler starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Command::Scrape {
        term: Some(term), ..
    } = &cli.command
    {
        config.registrar.term_code = term.clone();
    }
    log::info!("Loaded configuration from {}", cli.config.display());

    let config = Arc::new(config);
    let storage = LocalStorage::new(&config.output);

    match cli.command {
        Command::Scrape {
            subjects, courses, ..
        } => {
            config.validate()?;
            let request = ScrapeRequest { subjects, courses };
            let summary = pipeline::run_scrape(Arc::clone(&config), &storage, &request).await?;
            log::info!(
                "Saved {} courses to {}",
                summary.count,
                summary.markdown_location
            );
        }

        Command::Parse { html, courses } => {
            if !html.exists() {
                log::error!("HTML file not found at {}", html.display());
                return Err(AppError::config("HTML file not found"));
            }
            config.table.validate()?;
            let summary = pipeline::run_parse(&config, &storage, &html, &courses).await?;
            log::info!(
                "Saved {} courses to {}",
                summary.count,
                summary.markdown_location
            );
        }

        Command::Codes { subjects } => {
            config.validate()?;
            let codes = pipeline::run_codes(Arc::clone(&config), &storage, &subjects).await?;
            log::info!(
                "Cataloged {} course codes in {}",
                codes.len(),
                config.output.codes_file
            );
        }

        Command::Subjects => {
            let subjects = pipeline::run_subjects(Arc::clone(&config)).await?;
            for subject in subjects {
                println!("{}\t{}", subject.code, subject.name);
            }
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }

        Command::Show => {
            log::info!("Output directory: {}", config.output.dir.display());
            pipeline::run_show(&storage).await?;
        }
    }

    log::info!("Done!");

    Ok(())
}
