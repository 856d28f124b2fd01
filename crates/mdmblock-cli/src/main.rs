//! CLI entry point for mdmblock.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `mdmblock-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use mdmblock_app::{
    CheckInput, ExplainOutput, decision_exit_code, detect_format, format_explanation,
    format_not_found, render_markdown, run_check, run_explain, serialize_report, write_report,
};
use mdmblock_settings::ConfigFormat;
use std::io::{IsTerminal, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mdmblock",
    version,
    about = "Decide whether MDM matching is blocked for a resource"
)]
struct Cli {
    /// Log filter (e.g. "debug", "mdmblock_domain=trace"). Defaults to RUST_LOG, then "warn".
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the blocklist against one resource.
    #[command(after_help = "\
Exit status:
  0  MDM matching is allowed
  2  MDM matching is blocked
  1  runtime error

Usage errors (bad or missing arguments) also exit with 2 and print usage to stderr;
a blocked decision always prints a report to stdout.")]
    Check {
        /// Blocklist file (JSON or TOML). Omitted or missing means no rules are configured.
        #[arg(long)]
        rules: Option<Utf8PathBuf>,

        /// Resource JSON file.
        #[arg(long)]
        record: Utf8PathBuf,

        /// Blocklist format (json|toml). Detected from the file extension when omitted.
        #[arg(long)]
        format: Option<String>,

        /// Also write the JSON report to this file.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Print a Markdown summary to stdout instead of the JSON report.
        #[arg(long)]
        markdown: bool,
    },

    /// Explain an outcome code with remediation guidance.
    Explain {
        /// The outcome code (e.g. "ambiguous_result").
        code: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.cmd {
        Commands::Check {
            rules,
            record,
            format,
            report_out,
            markdown,
        } => cmd_check(
            rules.as_deref(),
            &record,
            format.as_deref(),
            report_out.as_deref(),
            markdown,
        ),
        Commands::Explain { code } => cmd_explain(&code),
    }
}

/// Logs go to stderr; stdout carries only the report.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .init();
}

fn cmd_check(
    rules: Option<&Utf8Path>,
    record: &Utf8Path,
    format: Option<&str>,
    report_out: Option<&Utf8Path>,
    markdown: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let explicit = format
            .map(str::parse::<ConfigFormat>)
            .transpose()
            .context("parse --format")?;

        let (rules_text, rules_format) = match rules {
            Some(path) => (read_rules(path)?, detect_format(path, explicit)),
            None => (None, explicit.unwrap_or_default()),
        };

        let record_text = std::fs::read_to_string(record)
            .with_context(|| format!("read record: {}", record))?;

        let output = run_check(CheckInput {
            rules_text: rules_text.as_deref(),
            rules_format,
            record_text: &record_text,
        })?;

        if let Some(path) = report_out {
            write_report(path, &output.report).context("write report json")?;
        }

        if markdown {
            print!("{}", render_markdown(&output.report));
        } else {
            print!("{}", serialize_report(&output.report)?);
        }
        std::io::stdout().flush().context("flush stdout")?;

        Ok(decision_exit_code(output.blocked()))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mdmblock error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Missing rules file is allowed (no rules are configured).
fn read_rules(path: &Utf8Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path, "blocklist file not found; no rules configured");
            Ok(None)
        }
        Err(err) => Err(err).with_context(|| format!("read blocklist: {}", path)),
    }
}

fn cmd_explain(code: &str) -> anyhow::Result<()> {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&identifier, available_codes));
            std::process::exit(1);
        }
    }
}
