// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::controller_msg::ControllerMsg;
use crate::core::error::{Error, StateError};

const CHANNEL_CLOSED: &str = "ERROR: daemon control channel closed";

/// Handle `staygreen start`.
///
/// "Already running" is a recoverable no-op, reported as plain text so a
/// caller can tell it apart from a real failure.
pub async fn handle_start(tx: &mpsc::Sender<ControllerMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(ControllerMsg::Start { reply: reply_tx }).await.is_err() {
        return CHANNEL_CLOSED.to_string();
    }

    match reply_rx.await {
        Ok(Ok(_)) => "Activity simulation started".to_string(),
        Ok(Err(Error::InvalidState(StateError::AlreadyRunning))) => {
            "Stay Green is already running".to_string()
        }
        Ok(Err(e)) => format!("ERROR: {e}"),
        Err(_) => "ERROR: no response from daemon".to_string(),
    }
}

/// Handle `staygreen stop`.
pub async fn handle_stop(tx: &mpsc::Sender<ControllerMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(ControllerMsg::Stop { reply: reply_tx }).await.is_err() {
        return CHANNEL_CLOSED.to_string();
    }

    match reply_rx.await {
        Ok(Ok(_)) => "Activity simulation stopped".to_string(),
        Ok(Err(Error::InvalidState(StateError::NotRunning))) => {
            "Stay Green is not running".to_string()
        }
        Ok(Err(e)) => format!("ERROR: {e}"),
        Err(_) => "ERROR: no response from daemon".to_string(),
    }
}

/// Handle `staygreen toggle`: start when idle, stop when running.
pub async fn handle_toggle(tx: &mpsc::Sender<ControllerMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(ControllerMsg::Toggle { reply: reply_tx }).await.is_err() {
        return CHANNEL_CLOSED.to_string();
    }

    match reply_rx.await {
        Ok(Ok(snapshot)) if snapshot.is_active => "Activity simulation started".to_string(),
        Ok(Ok(_)) => "Activity simulation stopped".to_string(),
        Ok(Err(e)) => format!("ERROR: {e}"),
        Err(_) => "ERROR: no response from daemon".to_string(),
    }
}
