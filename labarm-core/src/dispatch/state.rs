//! Dispatcher state machine

/// Dispatcher states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchState {
    /// Waiting for the next tick
    #[default]
    Idle,
    /// Handling one operation
    Executing,
    /// Shutdown requested, finishing the current tick
    Draining,
    /// Terminal
    Stopped,
}

/// Events that drive the dispatcher state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchEvent {
    /// A poll returned an operation
    OperationReceived,
    /// The operation was handled or abandoned
    OperationFinished,
    /// External shutdown request
    ShutdownRequested,
    /// Nothing left in flight after a shutdown request
    Drained,
    /// Poll or report failed
    TransportFailed,
}

impl DispatchState {
    /// True while the loop should keep ticking
    pub fn is_running(&self) -> bool {
        matches!(self, DispatchState::Idle | DispatchState::Executing)
    }

    /// True once the loop has ended
    pub fn is_stopped(&self) -> bool {
        matches!(self, DispatchState::Stopped)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: DispatchEvent) -> Self {
        use DispatchEvent::*;
        use DispatchState::*;

        match (self, event) {
            (Stopped, _) => Stopped,
            (_, TransportFailed) => Stopped,

            (Idle, OperationReceived) => Executing,
            (Executing, OperationFinished) => Idle,

            (Idle | Executing, ShutdownRequested) => Draining,
            (Draining, Drained) => Stopped,

            // Default: stay in current state
            _ => self,
        }
    }
}
