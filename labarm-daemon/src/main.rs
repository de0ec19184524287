//! labarm - Sample Transfer Arm Daemon
//!
//! Host binary that drives the transfer arm from a remote command server.
//! Polls the server once per tick, dispatches one operation at a time
//! against the live station inventory and reports every change back.
//!
//! Configuration:
//! - `HOST` / `PORT`: command server endpoint (default `http://localhost:5000`)
//! - `RUST_LOG`: log filter (default `info`)
//! - `arm.toml`: station layout and timing, compiled in

use embassy_executor::Spawner;
use labarm_hal::LinkConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{load_machine_config, Endpoint};
use crate::link::{FramedSource, TcpLink};
use crate::tasks::dispatch::EXIT_FAILURE;

mod arm;
mod channels;
mod config;
mod link;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "labarm daemon starting");

    // Must precede every other thread
    if let Err(e) = tasks::block_shutdown_signals() {
        fatal("Failed to block termination signals", &e);
    }

    let config = load_machine_config();

    let endpoint = match Endpoint::from_env() {
        Ok(endpoint) => endpoint,
        Err(e) => fatal("Invalid endpoint configuration", &e),
    };

    info!(address = %endpoint, "Connecting to command server");
    let link = match TcpLink::connect(&endpoint.socket_address(), &LinkConfig::default()) {
        Ok(link) => link,
        Err(e) => fatal("Failed to connect to command server", &e),
    };
    info!(peer = %link.peer(), "Connected");

    if let Err(e) = tasks::spawn_signal_listener() {
        fatal("Failed to start signal listener", &e);
    }

    let source = FramedSource::new(link);
    if let Err(e) = spawner.spawn(tasks::dispatch_task(config, source)) {
        fatal("Failed to spawn dispatch task", &e);
    }
}

/// Install the fmt subscriber, filtered by `RUST_LOG`
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn fatal(context: &str, error: &dyn std::fmt::Debug) -> ! {
    error!(error = ?error, "{}", context);
    std::process::exit(EXIT_FAILURE);
}
