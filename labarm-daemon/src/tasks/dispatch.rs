//! Dispatch task
//!
//! Owns the dispatcher for the life of the process. Publishes the initial
//! model, runs the tick loop until shutdown or a transport failure, then
//! exits the process with the matching code.

use std::fmt::Display;

use labarm_core::config::MachineConfig;
use labarm_core::traits::{ArmActuator, CommandSource, TickSource};
use labarm_core::{Dispatcher, Outcome, OutcomeKind, ShutdownToken};
use tracing::{error, info, warn};

use crate::arm::SimulatedArm;
use crate::channels::{SHUTDOWN, SHUTDOWN_WAKE};
use crate::link::{FramedSource, TcpLink};
use crate::tasks::ShutdownAwareTicker;

/// Exit code after a graceful stop
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code after a fatal error
pub const EXIT_FAILURE: i32 = 1;

/// Dispatch task - runs the arm until shutdown, then exits the process
#[embassy_executor::task]
pub async fn dispatch_task(config: MachineConfig, mut source: FramedSource<TcpLink>) {
    info!("Dispatch task started");

    let mut arm = SimulatedArm::new();
    let mut ticks = ShutdownAwareTicker::new(config.dispatcher.tick_ms, &SHUTDOWN, &SHUTDOWN_WAKE);

    let code = serve(&config, &mut source, &mut arm, &mut ticks, &SHUTDOWN).await;
    info!(code, transits = arm.transits(), "Exiting");
    std::process::exit(code);
}

/// Run one dispatcher session and return the process exit code
pub async fn serve<S, A, T>(
    config: &MachineConfig,
    source: &mut S,
    arm: &mut A,
    ticks: &mut T,
    shutdown: &ShutdownToken,
) -> i32
where
    S: CommandSource,
    S::Error: Display,
    A: ArmActuator,
    T: TickSource,
{
    let mut dispatcher = Dispatcher::new(config);

    if let Err(e) = dispatcher.publish(source) {
        error!(error = %e, "Failed to publish initial state");
        return EXIT_FAILURE;
    }
    info!(
        samples = dispatcher.inventory().sample_count(),
        "Listening for operations"
    );

    match dispatcher
        .run_with(source, arm, ticks, shutdown, log_outcome)
        .await
    {
        Ok(()) => {
            info!("Dispatcher stopped");
            if let Err(e) = source.close() {
                warn!(error = %e, "Failed to close session");
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Dispatcher stopped on fatal error");
            EXIT_FAILURE
        }
    }
}

fn log_outcome(outcome: &Outcome) {
    let op = &outcome.operation;
    match &outcome.result {
        OutcomeKind::Completed => info!(%op, "Operation completed"),
        OutcomeKind::Rebooted => info!("Rebooted"),
        OutcomeKind::Rejected(e) => warn!(%op, status = %e, "Operation rejected"),
        OutcomeKind::CompletedWithConflict(e) => {
            warn!(%op, conflict = %e, "Operation completed despite conflict")
        }
    }
}
