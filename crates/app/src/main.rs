use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use orna_core::{AssessConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Assess Orna item screenshots", long_about = None)]
struct Args {
    /// Config file; defaults to config.toml in the user config directory.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print assessments as JSON.
    #[arg(long)]
    json: bool,

    /// Assess already-recognized text instead of screenshots.
    #[arg(long, value_name = "FILE", conflicts_with = "images")]
    text: Option<PathBuf>,

    /// Screenshots to assess. Each one is an independent run.
    #[arg(required_unless_present = "text")]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when at least one assessment failed.
async fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = load_config(args.config.as_deref())?;
    if args.json {
        config.output.format = OutputFormat::Json;
    }

    match args.text {
        Some(path) => commands::assess_text_file(&path, config.output.format).await,
        None => commands::assess_images(args.images, &config).await,
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<AssessConfig> {
    if let Some(path) = explicit {
        return AssessConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let Some(project_dirs) = directories::ProjectDirs::from("com", "orna", "OrnaAssess") else {
        tracing::debug!("no home directory, using default config");
        return Ok(AssessConfig::default());
    };
    let path = project_dirs.config_dir().join("config.toml");
    tracing::debug!("Loading config: {}", path.display());
    AssessConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn images_or_text_required() {
        assert!(Args::try_parse_from(["orna-assess"]).is_err());
        assert!(Args::try_parse_from(["orna-assess", "--text", "card.txt"]).is_ok());
        assert!(Args::try_parse_from(["orna-assess", "a.png", "b.png"]).is_ok());
        assert!(Args::try_parse_from(["orna-assess", "--text", "card.txt", "a.png"]).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assess.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().output.format, OutputFormat::Json);
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
