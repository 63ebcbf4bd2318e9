//! Reproducible TLC runs with machine-consumable results.
//!
//! `check` wraps one TLC invocation: deterministic arguments, captured logs,
//! an optional wall-clock timeout, and a JSON run manifest on stdout whose
//! process exit code alone tells calling automation what happened.
//! `summarize` turns a `-dumpTrace json` counterexample into a compact,
//! diff-based summary, standalone.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use workbench::check::{run_check, CheckRequest};
use workbench::core::trace::summarize;
use workbench::core::types::TraceSummary;
use workbench::exit_codes;
use workbench::io::manifest::manifest_json;
use workbench::logging;

#[derive(Parser)]
#[command(
    name = "workbench",
    version,
    about = "Run TLC deterministically and emit machine-readable results"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run TLC on a spec+cfg and emit a run manifest JSON.
    Check(CheckArgs),
    /// Summarize a TLC -dumpTrace json counterexample.
    Summarize(SummarizeArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Path to root .tla module (e.g. Foo.tla).
    #[arg(long)]
    spec: PathBuf,
    /// Path to .cfg file (default: <spec>.cfg).
    #[arg(long)]
    cfg: Option<PathBuf>,
    /// Path to tla2tools.jar (default: $TLA2TOOLS_JAR, then conventional locations).
    #[arg(long)]
    jar: Option<PathBuf>,
    /// Java executable (default: java).
    #[arg(long)]
    java: Option<String>,
    /// TLC workers (default: 1 for determinism).
    #[arg(long)]
    workers: Option<u32>,
    /// Kill TLC after N seconds (default: no timeout).
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Run artifacts root dir (default: <spec-dir>/.tlc-workbench/runs).
    #[arg(long)]
    out_root: Option<PathBuf>,
    /// Max steps to summarize from the JSON trace (default: 50).
    #[arg(long)]
    trace_max_steps: Option<usize>,
}

#[derive(clap::Args)]
struct SummarizeArgs {
    /// Path to counterexample.json produced by TLC -dumpTrace json.
    #[arg(long)]
    trace: PathBuf,
    /// Max steps to emit (default: 50).
    #[arg(long, default_value_t = 50)]
    max_steps: usize,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Check(args) => cmd_check(&args),
        Command::Summarize(args) => match cmd_summarize(&args) {
            Ok(()) => exit_codes::PASS,
            Err(err) => {
                eprintln!("{err:#}");
                exit_codes::INPUT_ERROR
            }
        },
    };
    std::process::exit(code);
}

fn cmd_check(args: &CheckArgs) -> i32 {
    let request = CheckRequest {
        spec: args.spec.clone(),
        cfg: args.cfg.clone(),
        jar: args.jar.clone(),
        java: args.java.clone(),
        workers: args.workers,
        timeout_secs: args.timeout_secs,
        out_root: args.out_root.clone(),
        trace_max_steps: args.trace_max_steps,
    };
    match run_check(&request) {
        Ok(manifest) => {
            match manifest_json(&manifest) {
                Ok(payload) => print!("{payload}"),
                Err(err) => {
                    eprintln!("{err:#}");
                    return exit_codes::ERROR;
                }
            }
            manifest.status.process_exit_code()
        }
        Err(err) => {
            eprintln!("{err:#}");
            if err.is_input_error() {
                exit_codes::INPUT_ERROR
            } else {
                exit_codes::ERROR
            }
        }
    }
}

fn cmd_summarize(args: &SummarizeArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.trace)
        .with_context(|| format!("read {}", args.trace.display()))?;
    let doc: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse {}", args.trace.display()))?;
    let summary = summarize(&doc, Some(args.max_steps)).context("summarize counterexample")?;

    match args.format {
        OutputFormat::Json => {
            let mut payload =
                serde_json::to_string_pretty(&summary).context("serialize summary")?;
            payload.push('\n');
            print!("{payload}");
        }
        OutputFormat::Text => print!("{}", render_text(&summary)),
    }
    Ok(())
}

/// Minimal text mode for quick scanning.
fn render_text(summary: &TraceSummary) -> String {
    let mut out = String::new();
    for step in &summary.steps {
        let changed = if step.changed_vars.is_empty() {
            "(none)".to_string()
        } else {
            step.changed_vars.join(", ")
        };
        out.push_str(&format!("State {}: changed {changed}", step.state_number));
        if let Some(name) = step
            .action
            .as_ref()
            .and_then(|action| action.get("name"))
            .and_then(Value::as_str)
        {
            out.push_str(&format!(" via {name}"));
        }
        out.push('\n');
    }
    if !summary.lasso_edges.is_empty() {
        out.push_str("Lasso:\n");
        for edge in &summary.lasso_edges {
            out.push_str(&format!("  {} -> {}\n", edge.from_state, edge.to_state));
        }
    }
    out
}
