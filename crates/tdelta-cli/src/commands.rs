use std::fs;
use std::path::{Path as FsPath, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use tdelta::{ApplyMode, ArrayOp, DiffValue, Engine, EngineConfig, Operation, Patch, Path};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(config, args, cli.format),
        Command::Apply(args) => cmd_apply(config, args, cli.format),
        Command::Check(args) => cmd_check(config, args),
    }
}

fn load_config(path: Option<&FsPath>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    debug!(config = %path.display(), "loaded config");
    Ok(config)
}

fn read_document(path: &FsPath) -> anyhow::Result<DiffValue> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(DiffValue::from(json))
}

fn emit(output: Option<&PathBuf>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green().bold(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn with_epsilon(mut config: EngineConfig, epsilon: Option<f64>) -> EngineConfig {
    if epsilon.is_some() {
        config.diff.number_tolerance = epsilon;
    }
    config
}

fn cmd_diff(config: EngineConfig, args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let engine = Engine::new(with_epsilon(config, args.epsilon));
    let base = read_document(&args.base)?;
    let target = read_document(&args.target)?;
    let patch = engine.diff(&base, &target);

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&patch)?,
        OutputFormat::Text => render_patch(&patch),
    };
    emit(args.output.as_ref(), &text)
}

fn cmd_apply(mut config: EngineConfig, args: ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    if args.strict {
        config.patch.mode = ApplyMode::Strict;
    }
    let engine = Engine::new(config);
    let base = read_document(&args.base)?;
    let patch_text = fs::read_to_string(&args.patch)
        .with_context(|| format!("reading {}", args.patch.display()))?;
    let patch: Patch = serde_json::from_str(&patch_text)
        .with_context(|| format!("parsing patch {}", args.patch.display()))?;

    let result = engine.apply(&base, &patch)?;
    let json = match &result {
        Some(value) => value.to_json()?,
        None => serde_json::Value::Null,
    };
    let text = match format {
        OutputFormat::Json => serde_json::to_string(&json)?,
        OutputFormat::Text => serde_json::to_string_pretty(&json)?,
    };
    if result.is_none() {
        eprintln!("{} patch deleted the root; printing null", "note:".yellow());
    }
    emit(args.output.as_ref(), &text)
}

fn cmd_check(config: EngineConfig, args: CheckArgs) -> anyhow::Result<()> {
    let engine = Engine::new(with_epsilon(config, args.epsilon));
    let base = read_document(&args.base)?;
    let target = read_document(&args.target)?;
    let operations = engine.diff(&base, &target).len();

    if engine.round_trip(&base, &target)? {
        println!(
            "{} Round trip reproduces target ({} operations)",
            "✓".green().bold(),
            operations
        );
        Ok(())
    } else {
        bail!("replaying the diff of {} did not reproduce {}", args.base.display(), args.target.display())
    }
}

fn show_path(path: &Path) -> String {
    if path.is_root() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// One line per operation, plus a summary.
pub(crate) fn render_patch(patch: &Patch) -> String {
    if patch.is_empty() {
        return "No changes.".to_string();
    }

    let mut lines = Vec::new();
    for operation in patch {
        match operation {
            Operation::Set { path, value } => {
                lines.push(format!("{} {} = {}", "+ set".green(), show_path(path).bold(), value));
            }
            Operation::Delete { path } => {
                lines.push(format!("{} {}", "- delete".red(), show_path(path).bold()));
            }
            Operation::ArrayOps { path, ops } => {
                lines.push(format!("{} {}", "~ array".yellow(), show_path(path).bold()));
                for op in ops {
                    lines.push(match op {
                        ArrayOp::Set { index, value } => format!("    set [{index}] = {value}"),
                        ArrayOp::Insert { index, value } => {
                            format!("    {} [{index}] = {value}", "insert".green())
                        }
                        ArrayOp::Delete { index } => format!("    {} [{index}]", "delete".red()),
                    });
                }
            }
        }
    }
    lines.push(format!(
        "{} operations ({} sets, {} deletes, {} array bundles)",
        patch.len(),
        patch.sets(),
        patch.deletes(),
        patch.array_bundles()
    ));
    lines.join("\n")
}
