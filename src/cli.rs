use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::sbom_generation::domain::Ecosystem;

/// Generate CycloneDX SBOMs from npm, Cargo and Python lock files
#[derive(Parser, Debug)]
#[command(name = "unified-sbom")]
#[command(version)]
#[command(
    about = "Generate CycloneDX SBOMs from npm, Cargo and Python lock files",
    long_about = None
)]
pub struct Cli {
    /// Path to a config file (defaults to ./unified-sbom.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which ecosystems a directory or .zip archive uses (JSON on stdout)
    Detect(DetectArgs),

    /// Generate an SBOM and its companion reports for a directory or .zip archive
    Scan(ScanArgs),
}

/// Options shared by commands that may unpack an archive
#[derive(Args, Debug, Clone, Default)]
pub struct WorkdirArgs {
    /// Keep the extraction directory after the command finishes
    #[arg(long)]
    pub keep_workdir: bool,

    /// Directory in which archives are extracted (defaults to the system temp dir)
    #[arg(long, value_name = "DIR")]
    pub work_base: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Project directory or .zip archive
    pub path: PathBuf,

    #[command(flatten)]
    pub workdir: WorkdirArgs,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project directory or .zip archive
    pub path: PathBuf,

    /// Root directory for scan results (defaults to ./results)
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Ecosystem to scan instead of the detected one: npm, cargo or pypi
    #[arg(short, long)]
    pub ecosystem: Option<Ecosystem>,

    #[command(flatten)]
    pub workdir: WorkdirArgs,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
