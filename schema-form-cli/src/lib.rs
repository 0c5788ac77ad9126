//! Command-line front end for schema-form.
//!
//! Loads a form from the REST store (or a local JSON file), applies answers
//! given on the command line, and then checks, renders or submits it.

mod commands;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub use commands::{CheckReport, check_report};
pub use source::{apply_answers, parse_assignment, read_answers, read_definition};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Conditional dynamic forms from the command line.
#[derive(Debug, Parser)]
#[command(name = "schema-form", version, about = "Check, render and submit dynamic forms")]
pub struct Cli {
    /// Base URL of the form service
    #[arg(long, global = true, env = "SCHEMA_FORM_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token for the form service
    #[arg(long, global = true, env = "SCHEMA_FORM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// JSON client config file (base_url, timeout, credential)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the form comes from and which answers to apply.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Form id. Optional with --file, where it defaults to the file's id
    pub form_id: Option<String>,

    /// Read the definition from a JSON file (store envelope or bare definition)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Answer a field, as name=value (checkbox groups: comma-separated)
    #[arg(long = "set", short = 's', value_parser = parse_assignment)]
    pub answers: Vec<(String, String)>,

    /// Read answers from a JSON object file, applied before --set
    #[arg(long)]
    pub answers_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which fields are visible and which required fields are missing
    Check {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Render the form as HTML
    Render {
        #[command(flatten)]
        form: FormArgs,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Emit only the <form> element
        #[arg(long)]
        fragment: bool,
        /// Leave out the default stylesheet
        #[arg(long)]
        no_styles: bool,
        /// List missing required fields above the form
        #[arg(long)]
        show_validation: bool,
    },

    /// Validate and submit the answers
    Submit {
        #[command(flatten)]
        form: FormArgs,
        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    commands::run(cli)
}
