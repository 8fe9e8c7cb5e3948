use clap::Parser;
use tracing::info;

use juggler::cli::Cli;
use juggler::config::Config;
use juggler::error::Result;
use juggler::juggler::Juggler;
use juggler::render;
use juggler::tracker::jira::JiraTracker;

fn init_logging(loglevel: Option<&str>) {
    let filter = match loglevel {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let tracker = JiraTracker::new(config)?;
    let juggler = Juggler::new(&config.query, tracker);

    let tasks = juggler.juggle()?;
    info!(count = tasks.len(), "converted issues");

    // The output file is only written once the whole conversion succeeded.
    std::fs::write(&config.output, render::render(&tasks))?;
    info!(path = %config.output, "wrote task file");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.loglevel.as_deref());

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
