//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Score how well a resume matches a job description")]
#[command(
    long_about = "Compare a resume with a job description using averaged word embeddings, and list the job keywords the resume already covers and the ones it is missing"
)]
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
    /// Match a resume against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// List every matching and missing term
        #[arg(short, long)]
        detailed: bool,

        /// Plain-text word vector file to use instead of a Model2Vec model
        #[arg(long)]
        word_vectors: Option<PathBuf>,

        /// Model2Vec model id, Hugging Face repo id or local directory
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List known and downloaded embedding models
    List,

    /// Download a model into the models directory
    Download {
        /// Model id, display name or Hugging Face repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
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
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_with_inline_job_text() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Rust developer",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                resume,
                job,
                job_text,
                output,
                ..
            } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust developer"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_requires_exactly_one_job_source() {
        assert!(Cli::try_parse_from(["resume-matcher", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--job-text",
            "Rust developer",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
