use anyhow::{Context, Result};
use clap::Parser;
use pydocs_scraper::{
    cli::Args,
    config::Settings,
    fetch::{HttpFetcher, ResponseCache},
    logging, output,
};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // ─── 1) init logging ─────────────────────────────────────────────
    if let Err(e) = logging::init(&settings.log_dir()) {
        eprintln!("failed to set up logging: {:#}", e);
        return ExitCode::FAILURE;
    }
    std::panic::set_hook(Box::new(|info| {
        error!("panic: {}", info);
    }));
    info!("Parser started");

    let args = Args::parse();
    match run(&args, &settings) {
        Ok(()) => {
            info!("Parser finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Parser failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, settings: &Settings) -> Result<()> {
    info!("Command-line arguments: {:?}", args);

    // ─── 2) response cache ───────────────────────────────────────────
    let cache = ResponseCache::open(settings.cache_dir())
        .with_context(|| format!("opening cache {}", settings.cache_dir().display()))?;
    if args.clear_cache {
        let removed = cache.clear().context("clearing response cache")?;
        info!(removed, dir = %cache.dir().display(), "response cache cleared");
    }
    let fetcher = HttpFetcher::new(Some(cache))?;

    // ─── 3) run the selected routine ─────────────────────────────────
    let results = args
        .mode
        .run(&fetcher, settings)
        .with_context(|| format!("running {}", args.mode))?;

    // ─── 4) report ───────────────────────────────────────────────────
    if let Some(table) = results {
        if table.is_empty() {
            warn!(mode = %args.mode, "no rows collected");
        }
        output::control_output(&table, args.output, args.mode, &settings.results_dir())?;
    }
    Ok(())
}
