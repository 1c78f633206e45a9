//! resume-matcher: score a resume against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_matcher::config::{Config, EmbeddingSource};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_matcher::output::{MatchReport, ReportMetadata};
use resume_matcher::processing::embedding_manager::EmbeddingModelManager;
use resume_matcher::processing::{shared_embeddings, MatchAnalyzer};
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        debug!("Command failed: {:?}", e);
        eprintln!("{} {}", "Error:".red().bold(), e.user_message());
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            word_vectors,
            model,
        } => {
            // Command line embedding choice overrides the config file
            let mut config = config;
            if let Some(path) = word_vectors {
                config.embeddings.source = EmbeddingSource::WordVectors;
                config.embeddings.word_vectors_path = Some(path);
            } else if let Some(model) = model {
                config.embeddings.source = EmbeddingSource::Model2Vec;
                config.embeddings.model = model;
            }

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?
                }
                None => config.output.format,
            };

            // Validate input files
            cli::validate_file_extension(&resume, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

            let start_time = Instant::now();
            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;

            let (job_text, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "md", "markdown"]).map_err(
                        |e| ResumeMatcherError::InvalidInput(format!("Job description file: {}", e)),
                    )?;
                    let text = input_manager.extract_text(&path).await?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "inline text".to_string()),
                (None, None) => (String::new(), String::new()),
            };

            if resume_text.trim().is_empty() || job_text.trim().is_empty() {
                return Err(ResumeMatcherError::MissingInput(
                    "resume or job description is blank".to_string(),
                ));
            }
            info!(
                "Resume: {} characters, job description: {} characters",
                resume_text.len(),
                job_text.len()
            );

            // Run the analysis
            let spinner = analysis_spinner();
            let analysis = analyze_texts(config.clone(), resume_text, job_text).await;
            spinner.finish_and_clear();
            let (result, embedding_model) = analysis?;

            let metadata = ReportMetadata::new(
                &resume.display().to_string(),
                &job_source,
                &embedding_model,
            )
            .with_processing_time(start_time.elapsed().as_millis() as u64);
            let report =
                MatchReport::with_term_limit(result, metadata, config.output.max_listed_terms);

            let colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(
                colors,
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            // Generate and output the report
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(
                            output_format,
                            &resume.to_string_lossy(),
                            true,
                        ))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
            match action {
                ModelAction::List => {
                    println!("{}\n", "Embedding Models".bold());
                    for model in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(&model.id) {
                            "downloaded".green()
                        } else {
                            "available".yellow()
                        };
                        println!(
                            "  • {} ({}) - {} MB, {} dims [{}]",
                            model.id, model.repo_id, model.size_mb, model.dimensions, status
                        );
                        println!("    {}", model.description);
                    }

                    let downloaded = manager.list_downloaded_models();
                    if downloaded.is_empty() {
                        println!("\nNo models downloaded yet. Get started with:");
                        println!("   resume-matcher models download {}", config.embeddings.model);
                    }
                }

                ModelAction::Download { model, force } => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message(format!("Downloading {}...", model));
                    spinner.enable_steady_tick(Duration::from_millis(120));
                    let result = manager.download_model(&model, force).await;
                    spinner.finish_and_clear();
                    let path = result?;
                    println!("{} {} -> {}", "Downloaded".green(), model, path.display());
                }

                ModelAction::Info { model } => {
                    let info = manager
                        .get_model_info(&model)
                        .ok_or_else(|| ResumeMatcherError::ModelNotFound(model.clone()))?;
                    println!("{}", info.name.bold());
                    println!("  Id: {}", info.id);
                    println!("  Repository: {}", info.repo_id);
                    println!("  Size: {} MB", info.size_mb);
                    println!("  Dimensions: {}", info.dimensions);
                    println!("  {}", info.description);
                    match manager.get_model_path(&info.id) {
                        Some(path) => println!("  Location: {}", path.display()),
                        None => println!("  Not downloaded"),
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}\n{}", config_path.display(), content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing your match...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Load the shared embedding table off the async runtime and run the analysis.
async fn analyze_texts(
    config: Config,
    resume_text: String,
    job_text: String,
) -> Result<(resume_matcher::MatchResult, String)> {
    tokio::task::spawn_blocking(move || {
        let embeddings = shared_embeddings(&config)?;
        let analyzer = MatchAnalyzer::new(embeddings);
        let result = analyzer.analyze(&resume_text, &job_text)?;
        Ok((result, analyzer.embeddings_name().to_string()))
    })
    .await
    .map_err(|e| ResumeMatcherError::Embedding(format!("Analysis task failed: {}", e)))?
}
