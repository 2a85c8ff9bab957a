//! resume-ats: score resumes the way an applicant tracking system would

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ats::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_ats::config::{Config, OutputFormat};
use resume_ats::error::{Result, ResumeAtsError};
use resume_ats::input::InputManager;
use resume_ats::output::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_ats::processing::analyzer::AnalysisEngine;
use resume_ats::processing::document::Document;
use resume_ats::processing::embedding_manager::EmbeddingModelManager;
use resume_ats::processing::shared::SharedResources;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        match e {
            ResumeAtsError::InsufficientText { .. } => eprintln!("❌ {}", e),
            e if e.is_extraction_failure() => {
                eprintln!("❌ Could not extract usable text from this document: {}", e)
            }
            e => eprintln!("❌ {}", e),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            skills,
            output,
            save,
            detailed,
            semantic,
        } => {
            let mut config = config;
            if skills.is_some() {
                config.skills.catalog_path = skills;
            }
            if semantic {
                config.models.semantic_similarity = true;
            }
            let detailed = detailed || config.output.detailed;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAtsError::InvalidInput)?,
                None => config.output.format,
            };

            analyze(&config, &resume, job.as_deref(), job_text, output_format, save, detailed).await?;
        }

        Commands::Models { action } => run_models_command(action, &config).await?,

        Commands::Config { action } => run_config_command(action, config, config_path)?,
    }

    Ok(())
}

async fn analyze(
    config: &Config,
    resume_path: &Path,
    job_path: Option<&Path>,
    job_text: Option<String>,
    output_format: OutputFormat,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    info!("Starting ATS analysis of {}", resume_path.display());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut input_manager = InputManager::new(Duration::from_secs(config.processing.extraction_timeout_secs))
        .with_cache(config.processing.enable_caching);

    spinner.set_message("Extracting resume text...");
    let resume = match input_manager
        .load_resume(resume_path, config.processing.min_text_length)
        .await
    {
        Ok(resume) => resume,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    let job = match (job_path, job_text) {
        (Some(path), _) => {
            spinner.set_message("Extracting job description...");
            match input_manager.load_job_description(path).await {
                Ok(job) => Some(job),
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            }
        }
        (None, Some(text)) => Some(Document::job_description(text, "<inline>".to_string())),
        (None, None) => None,
    };

    spinner.set_message("Scoring resume...");
    let result = async {
        let engine = AnalysisEngine::from_shared(config, SharedResources::global()).await?;
        engine.analyze(resume, job).await
    }
    .await;
    spinner.finish_and_clear();
    let report = result?;

    // Colors never go into saved files
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed);
    let content = generator.generate_report(&report, output_format)?;

    match save {
        Some(path) => {
            let path = resolve_save_path(&path, output_format, resume_path);
            save_report_to_file(&content, &path)?;
            println!("✅ Score {}/100, report saved to {}", report.total_score, path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

async fn run_models_command(action: ModelAction, config: &Config) -> Result<()> {
    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

    match action {
        ModelAction::List => {
            println!("📚 Embedding Models\n");
            for model in manager.list_available_models() {
                let status = if manager.is_model_downloaded(model.id) {
                    "✅ Downloaded"
                } else {
                    "⬇️  Available"
                };
                println!("  • {} ({}) - {} MB [{}]", model.id, model.repo_id, model.size_mb, status);
                println!("    {}", model.description);
            }

            if manager.list_downloaded_models().is_empty() {
                println!("\n💡 Semantic similarity needs a model. Get started with:");
                println!("   resume-ats models download {}", config.models.embedding_model);
            }
        }

        ModelAction::Download { model, force } => {
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| ResumeAtsError::ModelError(format!("Unknown embedding model: {}", model)))?;

            if manager.is_model_downloaded(model_id) {
                if !force {
                    println!("✅ Model '{}' is already downloaded!", model_id);
                    println!("💡 Use --force to re-download");
                    return Ok(());
                }
                manager.remove_model(model_id).await?;
            }

            println!("⬇️  Downloading model: {}", model_id);
            let model_path = manager.download_model(model_id).await?;
            println!("✅ Model '{}' downloaded successfully!", model_id);
            println!("📁 Location: {}", model_path.display());
        }

        ModelAction::Remove { model } => {
            let model_id = manager.resolve_model_id(&model).unwrap_or(model.as_str()).to_string();
            manager.remove_model(&model_id).await?;
            println!("✅ Model '{}' removed successfully!", model_id);
        }

        ModelAction::Info { model } => {
            let info = manager
                .resolve_model_id(&model)
                .and_then(|id| manager.get_model_info(id))
                .ok_or_else(|| ResumeAtsError::ModelError(format!("Unknown embedding model: {}", model)))?;

            println!("📋 Model Information for '{}'\n", info.id);
            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Dimensions: {}", info.dimensions);
            println!("Description: {}", info.description);

            match manager.get_model_path(info.id) {
                Some(path) => println!("Status: ✅ Downloaded ({})", path.display()),
                None => {
                    println!("Status: ⬇️  Available for download");
                    println!("\n💡 To download this model, run:");
                    println!("   resume-ats models download {}", info.id);
                }
            }
        }
    }

    Ok(())
}

fn run_config_command(action: Option<ConfigAction>, mut config: Config, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ResumeAtsError::Configuration(format!("Failed to render config: {}", e)))?;
            println!("⚙️  Current Configuration ({})\n", config_path.display());
            println!("{}", rendered);
        }

        Some(ConfigAction::Reset) => {
            Config::default().save_to(config_path)?;
            println!("✅ Configuration reset to defaults");
        }

        Some(ConfigAction::Path) => println!("{}", config_path.display()),

        Some(ConfigAction::Set { key, value }) => {
            config.set_value(&key, &value)?;
            config.save_to(config_path)?;
            println!("✅ {} = {}", key, value);
        }
    }

    Ok(())
}
