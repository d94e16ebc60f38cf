// Author: Dustin Pilgrim
// License: MIT

pub mod command;

use crate::core::error::DriverError;
use crate::gwarn;

/// Capability interface for the platform keep-alive side effect.
///
/// Implementations are pure effectors: they never read session state.
/// Both operations are idempotent, and `stop` must guarantee that no
/// further nudges happen after it returns.
pub trait ActivityDriver: Send {
    fn start(&mut self) -> Result<(), DriverError>;
    fn stop(&mut self) -> Result<(), DriverError>;
}

/// No-op driver for platforms without a nudge mechanism and for tests.
#[derive(Debug, Default)]
pub struct NullDriver;

impl ActivityDriver for NullDriver {
    fn start(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Build the driver for this host: a command driver when a nudge command is
/// configured or the platform has a default, the null driver otherwise.
pub fn for_host(nudge_command: Option<String>, cycle_seconds: u64) -> Box<dyn ActivityDriver> {
    let command = nudge_command.or_else(crate::app::platform::default_nudge_command);

    match command {
        Some(cmd) => Box::new(command::CommandDriver::new(cmd, cycle_seconds)),
        None => {
            gwarn!("Driver", "no nudge command for this platform; using the null driver");
            Box::new(NullDriver)
        }
    }
}
