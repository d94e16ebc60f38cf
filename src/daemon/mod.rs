// Author: Dustin Pilgrim
// License: MIT

mod run;

use crate::core::controller::SessionController;
use crate::driver::ActivityDriver;
use crate::services::reporter::StatusReporter;

use tokio::task::JoinHandle;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// The one owner of all mutable session state. Control commands, ticks and
/// subscriptions are serialized through the message loop in `run`.
pub struct Daemon {
    controller: SessionController,
    reporter: StatusReporter,
    ticker: Option<JoinHandle<()>>,
}

impl Daemon {
    pub fn new(cycle_seconds: u64, driver: Box<dyn ActivityDriver>) -> Self {
        Self {
            controller: SessionController::new(cycle_seconds, driver),
            reporter: StatusReporter::new(),
            ticker: None,
        }
    }
}
