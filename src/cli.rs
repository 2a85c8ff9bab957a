//! CLI interface for the resume ATS scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "Score how well a resume will survive an applicant tracking system")]
#[command(long_about = "Score a resume on skills, formatting and section completeness, optionally against a job description, and get concrete suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume, optionally against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Skills catalog CSV with a `skill` column
        #[arg(long)]
        skills: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show per-skill counts and formatting signals
        #[arg(short, long)]
        detailed: bool,

        /// Report embedding similarity to the job description (display only)
        #[arg(long)]
        semantic: bool,
    },

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, name or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a downloaded model
    Remove {
        /// Model id to remove
        model: String,
    },

    /// Show model information
    Info {
        /// Model id
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.with_job.skills")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::parse_from([
            "resume-ats", "analyze", "--resume", "cv.pdf", "--job-text", "Rust engineer", "--semantic",
        ]);
        match cli.command {
            Commands::Analyze { resume, job, job_text, semantic, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust engineer"));
                assert!(semantic);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_sources_conflict() {
        let result = Cli::try_parse_from([
            "resume-ats", "analyze", "-r", "cv.pdf", "-j", "job.txt", "--job-text", "Rust",
        ]);
        assert!(result.is_err());
    }
}
