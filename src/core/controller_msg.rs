// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{error::Error, status::StatusSnapshot};
use crate::services::reporter::{SubscriberId, Subscription};

#[derive(Debug)]
pub enum ControllerMsg {
    Tick {
        now_ms: u64,
    },

    Start {
        reply: oneshot::Sender<Result<StatusSnapshot, Error>>,
    },

    Stop {
        reply: oneshot::Sender<Result<StatusSnapshot, Error>>,
    },

    /// Start when idle, stop when running; the reply snapshot tells the
    /// caller which way it went.
    Toggle {
        reply: oneshot::Sender<Result<StatusSnapshot, Error>>,
    },

    GetStatus {
        reply: oneshot::Sender<StatusSnapshot>,
    },

    Subscribe {
        reply: oneshot::Sender<Subscription>,
    },

    Unsubscribe {
        id: SubscriberId,
    },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
