use std::process::ExitCode;

use anyhow::Context;
use schema_form::{FieldId, FormEngine, MemoryStore};
use schema_form_html::{HtmlOptions, render_form};
use schema_form_http::{ClientConfig, HttpFormClient};
use serde_json::json;
use tracing::info;

use crate::source::{apply_answers, read_answers_file, read_definition_file};
use crate::{Cli, Command, FormArgs, OutputFormat};

/// Visibility and validation outcome of a form, for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub visible: Vec<FieldId>,
    pub hidden: Vec<FieldId>,
    pub missing: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "valid": self.is_valid(),
            "visible": self.visible,
            "hidden": self.hidden,
            "missing": self.missing,
        })
    }

    fn print(&self, output: OutputFormat) {
        match output {
            OutputFormat::Json => println!("{}", self.to_json()),
            OutputFormat::Text => {
                println!("visible: {}", join(&self.visible));
                println!("hidden:  {}", join(&self.hidden));
                if self.is_valid() {
                    println!("ok: all required fields answered");
                } else {
                    println!("missing: {}", self.missing.join(", "));
                }
            }
        }
    }
}

fn join(ids: &[FieldId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(FieldId::as_str).collect::<Vec<_>>().join(", ")
}

/// Summarize an engine's visibility and validation, in render order.
pub fn check_report(engine: &FormEngine) -> CheckReport {
    let (visible, hidden) = engine
        .definition()
        .map(|d| d.fields())
        .unwrap_or_default()
        .iter()
        .map(|field| field.id().clone())
        .partition(|id| engine.field_is_visible(id));
    CheckReport {
        visible,
        hidden,
        missing: engine.validate().labels(),
    }
}

pub(crate) fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let client = Client::from_cli(&cli)?;
    match &cli.command {
        Command::Check { form } => {
            let engine = load(&client, form)?;
            let report = check_report(&engine);
            report.print(cli.output);
            Ok(exit_code(report.is_valid()))
        }

        Command::Render {
            form,
            out,
            fragment,
            no_styles,
            show_validation,
        } => {
            let engine = load(&client, form)?;
            let options = HtmlOptions::new()
                .full_document(!fragment)
                .with_styles(!no_styles)
                .with_validation(*show_validation);
            let html = render_form(&engine, &options)?;
            match out {
                Some(path) => {
                    std::fs::write(path, &html)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    info!(path = %path.display(), "form rendered");
                }
                None => print!("{html}"),
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Submit { form, dry_run } => {
            let mut engine = load(&client, form)?;
            let report = check_report(&engine);
            if !report.is_valid() {
                report.print(cli.output);
                return Ok(exit_code(false));
            }

            let form_id = engine
                .form_id()
                .cloned()
                .context("no form loaded")?;
            let payload = engine.build_submission(form_id);

            if *dry_run {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(ExitCode::SUCCESS);
            }

            let http = client.http()?;
            engine.submit(http, &payload)?;
            match cli.output {
                OutputFormat::Json => println!("{}", json!({ "submitted": true })),
                OutputFormat::Text => println!("submitted {}", payload.form_id),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// The HTTP client, if the command line or config names a service.
struct Client {
    http: Option<HttpFormClient>,
}

impl Client {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Some(ClientConfig::from_file(path)?),
            None => None,
        };
        if let Some(base_url) = &cli.base_url {
            let base = config
                .take()
                .map(|c| ClientConfig { base_url: base_url.clone(), ..c })
                .unwrap_or_else(|| ClientConfig::new(base_url.clone()));
            config = Some(base);
        }

        let http = match config {
            Some(mut config) => {
                if let Some(secs) = cli.timeout {
                    config = config.with_timeout_secs(secs);
                }
                if let Some(token) = &cli.token {
                    config = config.with_credential(token.as_str());
                }
                Some(HttpFormClient::new(config)?)
            }
            None => None,
        };
        Ok(Self { http })
    }

    fn http(&self) -> anyhow::Result<&HttpFormClient> {
        self.http
            .as_ref()
            .context("no form service configured; pass --base-url or set SCHEMA_FORM_BASE_URL")
    }
}

/// Load the form named by `args` and apply its answers.
fn load(client: &Client, args: &FormArgs) -> anyhow::Result<FormEngine> {
    let mut engine = FormEngine::new();

    match &args.file {
        Some(path) => {
            let definition = read_definition_file(path)?;
            let form_id = args
                .form_id
                .clone()
                .unwrap_or_else(|| definition.id.to_string());
            let store = MemoryStore::new().with_form(definition);
            engine.load(&store, form_id)?;
        }
        None => {
            let form_id = args
                .form_id
                .clone()
                .context("a form id is required unless --file is given")?;
            engine.load(client.http()?, form_id)?;
        }
    }

    let file_answers = match &args.answers_file {
        Some(path) => Some(read_answers_file(path)?),
        None => None,
    };
    apply_answers(&mut engine, file_answers, &args.answers)?;
    Ok(engine)
}
