//! Studio Control - command line front end for Rewrite Studio
//!
//! Runs one rewrite or summary per invocation using the same lifecycle as the
//! web daemon.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use studio_common::{wrap_text, Config, GenerateForm, HttpLlmClient, Mode, Outcome, Studio};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "studioctl")]
#[command(about = "Rewrite Studio - rewrite or summarize text with a language model", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite text in a target tone
    Rewrite {
        /// Friendly, Confident, Concise or Playful
        #[arg(long, default_value = "Confident")]
        tone: String,

        /// Text to rewrite; read from stdin when omitted or "-"
        text: Option<String>,
    },

    /// Summarize text
    Summarize {
        /// Short, Medium or Detailed
        #[arg(long, default_value = "Medium")]
        length: String,

        /// Text to summarize; read from stdin when omitted or "-"
        text: Option<String>,
    },

    /// Show the effective configuration (API key masked)
    Config,
}

fn main() -> Result<ExitCode> {
    // .env first so RUST_LOG from it reaches the filter
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Config => {
            print!("{}", render_config(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let form = build_form(command, std::io::stdin().lock())?;
            match form {
                Some(form) => generate(&config, form),
                None => Ok(ExitCode::SUCCESS),
            }
        }
    }
}

/// Form for a generate subcommand; `None` for subcommands that do not generate
fn build_form<R: Read>(command: Commands, stdin: R) -> Result<Option<GenerateForm>> {
    let form = match command {
        Commands::Rewrite { tone, text } => GenerateForm {
            mode: Some(Mode::Rewrite.label().to_string()),
            text: read_text(text, stdin)?,
            tone: Some(tone),
            length: None,
        },
        Commands::Summarize { length, text } => GenerateForm {
            mode: Some(Mode::Summarize.label().to_string()),
            text: read_text(text, stdin)?,
            tone: None,
            length: Some(length),
        },
        Commands::Config => return Ok(None),
    };
    Ok(Some(form))
}

fn read_text<R: Read>(arg: Option<String>, mut stdin: R) -> Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

fn generate(config: &Config, form: GenerateForm) -> Result<ExitCode> {
    let client = HttpLlmClient::new(&config.llm)?;
    let studio = Studio::new(Arc::new(client));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Talking to the model...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = studio.generate(&form);
    spinner.finish_and_clear();

    report(&outcome);
    Ok(ExitCode::from(exit_status(&outcome)))
}

/// 0 on success, 2 for rejected input, 1 for a provider failure
fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Succeeded { .. } => 0,
        Outcome::Rejected { .. } => 2,
        Outcome::Failed { .. } => 1,
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Succeeded { text, .. } => println!("{}", wrap_text(text)),
        Outcome::Rejected { error } => eprintln!("{}", error.to_string().yellow()),
        Outcome::Failed { .. } => {
            if let Some(message) = outcome.message() {
                eprintln!("{}", message.red());
            }
            if let Some(diagnostic) = outcome.diagnostic() {
                eprintln!("{}", diagnostic.dimmed());
            }
        }
    }
}

/// Effective config as TOML, with the API key shown masked as a comment
fn render_config(config: &Config) -> Result<String> {
    let key = config
        .llm
        .api_key
        .as_ref()
        .map(|k| k.masked())
        .unwrap_or_else(|| "(not set)".to_string());
    Ok(format!(
        "{}\n# {} = {}\n",
        toml::to_string_pretty(config)?,
        studio_common::config::API_KEY_ENV,
        key
    ))
}
