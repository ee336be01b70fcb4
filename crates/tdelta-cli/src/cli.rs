use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tdelta",
    about = "Tree Delta — structural diff and patch replay for JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[diff]` and `[patch]` settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the patch between two JSON documents
    Diff(DiffArgs),
    /// Replay a JSON patch against a document
    Apply(ApplyArgs),
    /// Check that diff followed by apply reproduces the target
    Check(CheckArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Base document
    pub base: PathBuf,
    /// Target document
    pub target: PathBuf,
    /// Treat numbers within this distance as equal
    #[arg(long)]
    pub epsilon: Option<f64>,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Base document
    pub base: PathBuf,
    /// Patch file, as written by `tdelta diff --format json`
    pub patch: PathBuf,
    /// Fail on the first mismatch instead of degrading
    #[arg(long)]
    pub strict: bool,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Base document
    pub base: PathBuf,
    /// Target document
    pub target: PathBuf,
    /// Treat numbers within this distance as equal
    #[arg(long)]
    pub epsilon: Option<f64>,
}
