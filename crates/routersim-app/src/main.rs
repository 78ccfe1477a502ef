//! routersim entry point.
//!
//! Reads one command per line from stdin and prints IOS-style output.
//! An optional TOML configuration seeds the hostname, interface list and
//! MOTD banner; its path comes from the first argument or `ROUTERSIM_CONFIG`.

mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use routersim_core::RouterCore;
use routersim_terminal::Dispatcher;
use routersim_types::config::RouterSimConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Resolve config from CLI arg, ROUTERSIM_CONFIG env var, or defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ROUTERSIM_CONFIG").ok())
    {
        Some(path) => {
            let path = PathBuf::from(path);
            RouterSimConfig::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?
        },
        None => RouterSimConfig::default(),
    };
    log::info!(
        "Starting {} ({} interfaces)",
        config.hostname,
        config.interfaces.len()
    );

    let mut router = RouterCore::new(&config);
    let mut dispatcher = Dispatcher::with_builtins();

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut dispatcher, &mut router, stdin.lock(), stdout.lock())?;

    log::info!("Session ended");
    Ok(())
}
