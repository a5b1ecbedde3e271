use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use yaml2ducky::prepare::{assemble_prepared, prepare_profile_dir};
use yaml2ducky::{CommandAssembler, CompileSession};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prepare generated duckyPad Pro profiles and run the bytecode assembler",
    long_about = None
)]
struct Args {
    /// Generated profile directories
    #[arg(required = true)]
    dirs: Vec<PathBuf>,

    /// External duckyScript assembler, run as `<program> [args] <input> <output>`
    #[arg(long)]
    assembler: PathBuf,

    /// Extra argument passed to the assembler before the file names
    #[arg(long = "assembler-arg", allow_hyphen_values = true)]
    assembler_args: Vec<String>,

    /// `profile_info.txt` used to resolve GOTO_PROFILE names
    #[arg(long)]
    index: Option<PathBuf>,

    /// Prepare scripts and report without running the assembler
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
    let mut session = match &args.index {
        Some(path) => CompileSession::with_index_file(path),
        None => CompileSession::new(),
    };
    let assembler = CommandAssembler::new(&args.assembler).with_args(&args.assembler_args);

    let mut unresolved = 0;
    for dir in &args.dirs {
        let index = session
            .profile_index()
            .context("Failed to load profile index")?;
        let prepared = prepare_profile_dir(dir, index)
            .with_context(|| format!("Failed to read {}", dir.display()))?;

        for reference in &prepared.unresolved {
            error!("Unresolved profile reference: {}", reference);
        }
        unresolved += prepared.unresolved.len();

        if args.dry_run {
            info!(
                "{}: {} scripts prepared",
                prepared.name,
                prepared.scripts.len()
            );
            continue;
        }

        assemble_prepared(&prepared, dir, &assembler)
            .with_context(|| format!("Failed to assemble {}", dir.display()))?;
    }

    Ok(unresolved == 0)
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
