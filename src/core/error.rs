// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A control operation was rejected because it is invalid in the
    /// current state.
    ///
    /// Examples:
    /// - start while a session is already running
    /// - stop while idle
    InvalidState(StateError),

    /// The activity driver misbehaved.
    Driver(DriverError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    AlreadyRunning,
    NotRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The platform keep-alive action could not be initiated.
    StartFailed(String),

    /// Best-effort teardown of the keep-alive action failed.
    StopFailed(String),
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(e) => write!(f, "{e}"),
            Error::Driver(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyRunning =>
                write!(f, "already running"),
            StateError::NotRunning =>
                write!(f, "not running"),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::StartFailed(reason) =>
                write!(f, "failed to start activity driver: {reason}"),
            DriverError::StopFailed(reason) =>
                write!(f, "failed to stop activity driver: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for DriverError {}
