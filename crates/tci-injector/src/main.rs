//! `tci` command: rewrite the service modules and print one line per file

use clap::Command;
use tci_injector::{run, InjectorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    Command::new("tci")
        .version(tci_injector::VERSION)
        .about("Inject tenant context into entity-creating service modules under src/services")
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = InjectorConfig::default();
    run(&config, &mut std::io::stdout().lock())?;
    Ok(())
}
