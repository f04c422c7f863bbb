// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;

use crate::config::MxcConfig;
use crate::error::Result;
use crate::model::StructuredCommitData;
use crate::pipeline::assemble;
use crate::storage;

use super::args::{Cli, Commands, InitArgs, OutputFormat, ProcessArgs, SuggestArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    let config = if let Some(config_path) = &cli.config {
        MxcConfig::load_from(config_path)?
    } else {
        MxcConfig::load()?
    };

    match cli.command.clone() {
        Commands::Process(args) => run_process(&cli, &config, args),
        Commands::Suggest(args) => run_suggest(&cli, &config, args),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(args),
    }
}

/// Transform one export and persist or print the structured record.
fn run_process(cli: &Cli, config: &MxcConfig, args: ProcessArgs) -> Result<()> {
    tracing::debug!("Processing export: {:?}", args.input);

    let data = process_export(&args)?;

    if args.stdout {
        let json = serde_json::to_string_pretty(&data).map_err(|e| {
            crate::error::StorageError::SerializeFailed {
                message: e.to_string(),
            }
        })?;
        println!("{}", json);
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.data_paths().structured);
    let destination = storage::save_structured(&data, &output_dir)?;

    match cli.format {
        Some(OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::json!({
                    "commitId": data.commit_id,
                    "output": destination,
                })
            );
        }
        _ => {
            println!(
                "{} structured commit {} ({} file(s), {} model change(s))",
                style("Wrote").green().bold(),
                style(&data.commit_id[..12.min(data.commit_id.len())]).cyan(),
                data.metrics.total_files,
                data.model_summary.total_model_changes
            );
            println!("  {}", destination.display());
        }
    }

    Ok(())
}

/// Print the suggested message context for an export.
fn run_suggest(cli: &Cli, _config: &MxcConfig, args: SuggestArgs) -> Result<()> {
    tracing::debug!("Suggesting message for export: {:?}", args.input);

    let data = process_export(&ProcessArgs {
        input: args.input,
        output_dir: None,
        stdout: false,
    })?;

    if cli.format == Some(OutputFormat::Json) {
        let json = serde_json::to_string_pretty(&data.message_context).map_err(|e| {
            crate::error::StorageError::SerializeFailed {
                message: e.to_string(),
            }
        })?;
        println!("{}", json);
        return Ok(());
    }

    print_suggestion(&data);
    Ok(())
}

fn process_export(args: &ProcessArgs) -> Result<StructuredCommitData> {
    let mut raw = storage::load_export(&args.input)?;
    if raw.timestamp.trim().is_empty() {
        raw.timestamp = chrono::Utc::now().to_rfc3339();
        tracing::debug!("Export carried no timestamp, using current time");
    }
    Ok(assemble(&raw))
}

fn print_suggestion(data: &StructuredCommitData) {
    let context = &data.message_context;

    let header = if let Some(scope) = context.suggested_scopes.first() {
        format!(
            "{}({}): {}",
            context.suggested_type, scope, context.suggested_subject
        )
    } else {
        format!("{}: {}", context.suggested_type, context.suggested_subject)
    };
    println!("{}", style(header).bold());

    if !context.highlights.is_empty() {
        println!();
        for highlight in &context.highlights {
            println!("  {} {}", style("•").dim(), highlight);
        }
    }

    if !context.risks.is_empty() {
        println!();
        for risk in &context.risks {
            println!("  {} {}", style("!").yellow().bold(), risk);
        }
    }
}

fn run_version() -> Result<()> {
    println!("mxc {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let path = std::path::Path::new("mxc.toml");
    if path.exists() && !args.force {
        println!(
            "{} mxc.toml already exists (use --force to overwrite)",
            style("Skipped:").yellow().bold()
        );
        return Ok(());
    }

    std::fs::write(path, crate::config::default::example_config())?;
    println!("{} mxc.toml", style("Created").green().bold());
    Ok(())
}
