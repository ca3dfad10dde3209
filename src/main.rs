//! YantraIO - MCU link daemon for a mecanum chassis with a pan-tilt
//! gimbal

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use yantra_io::app::App;
use yantra_io::config::AppConfig;
use yantra_io::error::{Error, Result};
use yantra_io::transport::{LoopbackTransport, SerialTransport, Transport};

/// Parse the config path from command line arguments.
///
/// Supports:
/// - `yantra-io <path>` (positional)
/// - `yantra-io --config <path>` (flag-based)
/// - `yantra-io -c <path>` (short flag)
///
/// Defaults to `/etc/yantraio.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/yantraio.toml".to_string()
}

fn dry_run_requested() -> bool {
    env::args().any(|a| a == "--dry-run")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("YantraIO v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = parse_config_path();
    let config = match AppConfig::from_file(&config_path) {
        Ok(config) => {
            log::info!("Using config: {config_path}");
            config
        }
        Err(e) => {
            log::warn!("Config {config_path} unusable ({e}), using defaults");
            AppConfig::default()
        }
    };

    let transport: Box<dyn Transport> = if dry_run_requested() {
        log::info!("Dry run: loopback transport, no hardware");
        Box::new(LoopbackTransport::new())
    } else {
        Box::new(SerialTransport::open(&config.link.port, config.link.baud)?)
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {e}")))?;

    let (app, _commands) = App::new(config, transport);
    app.run(running)
}
