//! Embassy tasks and their helpers

pub mod dispatch;
pub mod signals;
pub mod tick;

pub use dispatch::dispatch_task;
pub use signals::{block_shutdown_signals, spawn_signal_listener};
pub use tick::ShutdownAwareTicker;
