//! Dispatch loop
//!
//! One tick polls the command source for at most one operation, checks it
//! against the inventory and arm, drives the actuator and relays every
//! change back upstream. The actuator is awaited to completion before the
//! tick returns, so operations never overlap.

use super::state::{DispatchEvent, DispatchState};
use crate::arm::{ArmState, IDLE_STATUS};
use crate::config::{ConflictPolicy, DispatcherConfig, MachineConfig};
use crate::error::{DispatchError, InventoryError, OperationError, PreconditionError};
use crate::inventory::Inventory;
use crate::operation::{Operation, Target, TransferKind};
use crate::shutdown::ShutdownToken;
use crate::traits::{ArmActuator, CommandSource, Motion, TickSource};

/// How a handled operation ended
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutcomeKind {
    /// Take or put finished without conflict
    Completed,
    /// Reboot reset the status
    Rebooted,
    /// Nothing moved; the error is the reported status
    Rejected(OperationError),
    /// Take or put finished despite a reported conflict (advisory policy)
    CompletedWithConflict(PreconditionError),
}

/// Result of one tick that carried an operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// The decoded operation
    pub operation: Operation,
    /// What happened
    pub result: OutcomeKind,
}

impl Outcome {
    /// True if the inventory and arm were changed
    pub fn mutated(&self) -> bool {
        matches!(
            self.result,
            OutcomeKind::Completed | OutcomeKind::CompletedWithConflict(_)
        )
    }
}

/// Owner of the inventory and arm models
pub struct Dispatcher {
    inventory: Inventory,
    arm: ArmState,
    config: DispatcherConfig,
    state: DispatchState,
}

impl Dispatcher {
    /// Build a dispatcher in its power-on state
    pub fn new(config: &MachineConfig) -> Self {
        Self {
            inventory: Inventory::from_layout(&config.layout),
            arm: ArmState::new(),
            config: config.dispatcher,
            state: DispatchState::Idle,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn arm(&self) -> &ArmState {
        &self.arm
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Relay the complete model: every station, the carrying flag, the status
    pub fn publish<S: CommandSource>(&mut self, source: &mut S) -> Result<(), DispatchError<S::Error>> {
        let result = self.publish_all(source);
        self.check(result)
    }

    fn publish_all<S: CommandSource>(&self, source: &mut S) -> Result<(), S::Error> {
        for station in self.inventory.stations() {
            source.report_slots(station.id(), station.slots())?;
        }
        source.report_carrying(self.arm.carrying())?;
        source.report_status(self.arm.status())
    }

    /// Run one tick
    ///
    /// Returns `Ok(None)` if nothing was pending. A transport error stops
    /// the dispatcher for good.
    pub async fn tick<S, A>(
        &mut self,
        source: &mut S,
        actuator: &mut A,
    ) -> Result<Option<Outcome>, DispatchError<S::Error>>
    where
        S: CommandSource,
        A: ArmActuator,
    {
        if !self.state.is_running() {
            return Ok(None);
        }

        let polled = source.poll();
        let raw = match self.check(polled)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let operation = Operation::decode(&raw.name, &raw.arg);
        self.state = self.state.transition(DispatchEvent::OperationReceived);

        let result = self.execute(&operation, source, actuator).await;
        let result = self.check(result)?;

        self.state = self.state.transition(DispatchEvent::OperationFinished);
        Ok(Some(Outcome { operation, result }))
    }

    /// Tick until shutdown or a transport error
    pub async fn run<S, A, T>(
        &mut self,
        source: &mut S,
        actuator: &mut A,
        ticks: &mut T,
        shutdown: &ShutdownToken,
    ) -> Result<(), DispatchError<S::Error>>
    where
        S: CommandSource,
        A: ArmActuator,
        T: TickSource,
    {
        self.run_with(source, actuator, ticks, shutdown, |_| {}).await
    }

    /// Like [`run`](Self::run), handing every outcome to `observe`
    pub async fn run_with<S, A, T, F>(
        &mut self,
        source: &mut S,
        actuator: &mut A,
        ticks: &mut T,
        shutdown: &ShutdownToken,
        mut observe: F,
    ) -> Result<(), DispatchError<S::Error>>
    where
        S: CommandSource,
        A: ArmActuator,
        T: TickSource,
        F: FnMut(&Outcome),
    {
        loop {
            if shutdown.is_requested() {
                self.state = self
                    .state
                    .transition(DispatchEvent::ShutdownRequested)
                    .transition(DispatchEvent::Drained);
            }
            if !self.state.is_running() {
                return Ok(());
            }

            ticks.next_tick().await;
            if shutdown.is_requested() {
                continue;
            }

            if let Some(outcome) = self.tick(source, actuator).await? {
                observe(&outcome);
            }
        }
    }

    async fn execute<S, A>(
        &mut self,
        operation: &Operation,
        source: &mut S,
        actuator: &mut A,
    ) -> Result<OutcomeKind, S::Error>
    where
        S: CommandSource,
        A: ArmActuator,
    {
        match operation {
            Operation::Take(target) => {
                self.transfer(TransferKind::Take, *target, source, actuator)
                    .await
            }
            Operation::Put(target) => {
                self.transfer(TransferKind::Put, *target, source, actuator)
                    .await
            }
            Operation::Reboot => {
                self.arm.set_status(IDLE_STATUS);
                source.report_status(self.arm.status())?;
                Ok(OutcomeKind::Rebooted)
            }
            Operation::Unknown(name) => self.reject(source, OperationError::Unknown(name.clone())),
            Operation::Malformed { kind, error } => self.reject(
                source,
                OperationError::Argument {
                    kind: *kind,
                    error: error.clone(),
                },
            ),
        }
    }

    async fn transfer<S, A>(
        &mut self,
        kind: TransferKind,
        target: Target,
        source: &mut S,
        actuator: &mut A,
    ) -> Result<OutcomeKind, S::Error>
    where
        S: CommandSource,
        A: ArmActuator,
    {
        let occupied = match self.inventory.occupied(target) {
            Ok(occupied) => occupied,
            Err(e) => return self.reject(source, out_of_range(kind, e)),
        };

        let conflict = self.precondition(kind, target, occupied).err();
        if let Some(conflict) = conflict {
            self.report_error(source, &OperationError::Precondition(conflict))?;
            if self.config.conflict == ConflictPolicy::Abort {
                return Ok(OutcomeKind::Rejected(conflict.into()));
            }
        }

        actuator
            .transit(Motion {
                kind,
                target,
                duration_ms: self.config.transit_ms,
            })
            .await;

        match self.inventory.set_occupied(target, kind.spot_after()) {
            Ok(slots) => source.report_slots(target.station, slots)?,
            Err(e) => return self.reject(source, out_of_range(kind, e)),
        }

        let carrying = self.arm.set_carrying(kind.carrying_after());
        source.report_carrying(carrying)?;

        self.arm.set_status(IDLE_STATUS);
        source.report_status(self.arm.status())?;

        Ok(match conflict {
            Some(conflict) => OutcomeKind::CompletedWithConflict(conflict),
            None => OutcomeKind::Completed,
        })
    }

    /// Spot conflicts first, then arm conflicts
    fn precondition(
        &self,
        kind: TransferKind,
        target: Target,
        occupied: bool,
    ) -> Result<(), PreconditionError> {
        let carrying = self.arm.carrying();
        match kind {
            TransferKind::Take if !occupied => Err(PreconditionError::SpotEmpty(target)),
            TransferKind::Put if occupied => Err(PreconditionError::SpotOccupied(target)),
            TransferKind::Take if carrying => Err(PreconditionError::AlreadyCarrying),
            TransferKind::Put if !carrying => Err(PreconditionError::NotCarrying),
            _ => Ok(()),
        }
    }

    fn reject<S: CommandSource>(
        &mut self,
        source: &mut S,
        error: OperationError,
    ) -> Result<OutcomeKind, S::Error> {
        self.report_error(source, &error)?;
        Ok(OutcomeKind::Rejected(error))
    }

    fn report_error<S: CommandSource>(
        &mut self,
        source: &mut S,
        error: &OperationError,
    ) -> Result<(), S::Error> {
        self.arm.set_status_fmt(format_args!("{}", error));
        source.report_status(self.arm.status())
    }

    fn check<T, E>(&mut self, result: Result<T, E>) -> Result<T, DispatchError<E>> {
        result.map_err(|e| {
            self.state = self.state.transition(DispatchEvent::TransportFailed);
            DispatchError::Transport(e)
        })
    }
}

fn out_of_range(kind: TransferKind, error: InventoryError) -> OperationError {
    OperationError::Argument {
        kind,
        error: error.into(),
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("state", &self.state)
            .field("carrying", &self.arm.carrying())
            .field("status", &self.arm.status())
            .field("samples", &self.inventory.sample_count())
            .finish()
    }
}
