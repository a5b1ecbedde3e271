use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yaml2ducky::{generate_profile, CompileSession};

#[derive(Parser, Debug)]
#[command(author, version, about = "duckyPad Pro YAML profile generator", long_about = None)]
struct Args {
    /// Input YAML profile definition
    input: PathBuf,

    /// Output root for the generated profile directories
    /// (defaults to `profiles/` beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding `<name>.yaml` template files
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// `profile_info.txt` from the SD card, for the profile count check and
    /// GOTO_PROFILE target report
    #[arg(long)]
    index: Option<PathBuf>,

    /// Resolve and validate without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let output = args.output.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("profiles")
    });

    let mut session = match &args.index {
        Some(path) => CompileSession::with_index_file(path),
        None => CompileSession::new(),
    };

    let report = generate_profile(
        &args.input,
        &output,
        &mut session,
        args.templates.as_deref(),
        args.dry_run,
    )
    .with_context(|| format!("Failed to generate {}", args.input.display()))?;

    if args.dry_run {
        for profile in &report.outputs {
            info!("  {} ({} key scripts)", profile.name, profile.scripts.len());
        }
    } else {
        info!("Generated {} profile(s):", report.written.len());
        for dir in &report.written {
            info!("  {}", dir.display());
        }
    }

    for reference in &report.unresolved {
        error!("Unresolved profile reference: {}", reference);
    }

    Ok(report.is_clean())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
