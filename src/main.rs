use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use unified_sbom::cli::{Cli, Commands, DetectArgs, ScanArgs};
use unified_sbom::config::{discover_config, load_config_from_path, ConfigFile};
use unified_sbom::prelude::*;
use unified_sbom::shared::error::ExitCode;

const DEFAULT_RESULTS_DIR: &str = "results";

fn main() {
    // clap exits with code 2 on its own for invalid arguments
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        let exit_code = ExitCode::for_error(&e);
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code.as_i32());
    }
}

/// Diagnostics go to stderr; stdout carries only command output.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("unified_sbom=debug")
        } else {
            EnvFilter::new("unified_sbom=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };

    match cli.command {
        Commands::Detect(args) => run_detect(args, &config),
        Commands::Scan(args) => run_scan(args, &config),
    }
}

fn run_detect(args: DetectArgs, config: &ConfigFile) -> Result<()> {
    let use_case = DetectProjectUseCase::new(
        ZipArchiveExtractor::new(),
        MarkerDetector::new(),
        StderrProgressReporter::new(),
        Box::new(SystemClock),
        Box::new(UuidGenerator),
    );

    let request = DetectRequest {
        input_path: args.path,
        work_base: args.workdir.work_base.or_else(|| config.work_base.clone()),
        keep_workdir: args.workdir.keep_workdir || config.keep_workdir.unwrap_or(false),
    };
    let detection = use_case.execute(request)?;

    let mut output = serde_json::to_string_pretty(&detection)?;
    output.push('\n');
    StdoutPresenter::new().present(&output)
}

fn run_scan(args: ScanArgs, config: &ConfigFile) -> Result<()> {
    let use_case = ScanProjectUseCase::new(
        ZipArchiveExtractor::new(),
        MarkerDetector::new(),
        FileSystemReader::new(),
        FileSystemWriter::new(),
        StderrProgressReporter::new(),
        Box::new(SystemClock),
        Box::new(UuidGenerator),
    );

    let results_dir = args
        .results_dir
        .or_else(|| config.results_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));
    let ecosystem = match args.ecosystem {
        Some(ecosystem) => Some(ecosystem),
        None => config.ecosystem()?,
    };

    let request = ScanRequest::new(args.path, results_dir)
        .with_work_base(args.workdir.work_base.or_else(|| config.work_base.clone()))
        .with_ecosystem(ecosystem)
        .with_keep_workdir(args.workdir.keep_workdir || config.keep_workdir.unwrap_or(false));
    let response = use_case.execute(request)?;

    eprintln!(
        "   {} {} component(s), {} direct dependenc{}",
        response.ecosystem.to_string().cyan(),
        response.component_count,
        response.direct_dependency_count,
        if response.direct_dependency_count == 1 { "y" } else { "ies" }
    );
    if let Some(kept) = &response.kept_work_dir {
        eprintln!("   📁 Working directory kept at: {}", kept.display());
    }

    StdoutPresenter::new().present(&format!("{}\n", response.output_dir.display()))
}
