use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use symgrep::{Cli, Config, NmDumper, SymbolFinder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("symgrep: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::new(cli.cache_dir.clone())?
        .with_nm_program(cli.nm.clone())
        .with_force_rebuild(cli.rebuild);
    let finder = SymbolFinder::new(&config, NmDumper::new(config.nm_program.clone()));

    if cli.clean {
        finder
            .clean()
            .with_context(|| format!("failed to clear {}", config.cache_dir.display()))?;
        info!("cleared cache directory {}", config.cache_dir.display());
        if !cli.has_patterns() {
            return Ok(ExitCode::SUCCESS);
        }
    }

    let registry = cli.pattern_groups()?;
    let root = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = finder.search(&root, &registry, &mut out)?;

    info!(
        "{} matches in {} ({:?})",
        report.total_matches(),
        report.root.display(),
        report.build
    );

    Ok(ExitCode::from(report.exit_status()))
}
