// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    error::{Error, StateError},
    session::SessionState,
    status::StatusSnapshot,
};
use crate::driver::ActivityDriver;
use crate::{ginfo, gwarn};

/// The Idle/Running state machine.
///
/// Pure coordination: no timers live here. All calls are serialized through
/// the daemon control loop, so start/stop/status never interleave.
pub struct SessionController {
    session: SessionState,
    cycle_seconds: u64,
    driver: Box<dyn ActivityDriver>,
}

impl SessionController {
    pub fn new(cycle_seconds: u64, driver: Box<dyn ActivityDriver>) -> Self {
        Self {
            session: SessionState::new(),
            cycle_seconds: cycle_seconds.max(1),
            driver,
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.running()
    }

    /// Begin a session. The driver must come up before the state machine
    /// transitions; a failed driver leaves the controller Idle.
    pub fn start(&mut self, now_ms: u64) -> Result<StatusSnapshot, Error> {
        if self.session.running() {
            return Err(Error::InvalidState(StateError::AlreadyRunning));
        }

        self.driver.start().map_err(Error::Driver)?;

        self.session.begin(now_ms);
        ginfo!("Session", "activity simulation started");

        Ok(self.status(now_ms))
    }

    /// End a session. Driver teardown is best-effort: the state machine
    /// always reaches Idle, so observers never see a stuck "active".
    pub fn stop(&mut self, now_ms: u64) -> Result<StatusSnapshot, Error> {
        if !self.session.running() {
            return Err(Error::InvalidState(StateError::NotRunning));
        }

        if let Err(e) = self.driver.stop() {
            gwarn!("Session", "driver stop failed: {e}");
        }

        self.session.end();
        ginfo!("Session", "activity simulation stopped");

        Ok(self.status(now_ms))
    }

    /// The snapshot that would be published right now, without waiting for
    /// the next tick.
    pub fn status(&self, now_ms: u64) -> StatusSnapshot {
        StatusSnapshot::compute(&self.session, self.cycle_seconds, now_ms)
    }
}
