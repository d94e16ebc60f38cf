// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::controller_msg::ControllerMsg;

/// Handle `staygreen shutdown` (no args).
///
/// Semantics:
/// - Ask the daemon to exit cleanly (stopping any active session).
/// - Reply once the daemon has acknowledged the request.
pub async fn handle_shutdown(tx: &mpsc::Sender<ControllerMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx
        .send(ControllerMsg::StopDaemon { reply: reply_tx })
        .await
        .is_err()
    {
        return "Stay Green daemon not running".to_string();
    }

    match reply_rx.await {
        Ok(Ok(msg)) => {
            let out = msg.trim_end();
            if out.is_empty() {
                "Stopping Stay Green daemon".to_string()
            } else {
                out.to_string()
            }
        }
        Ok(Err(e)) => {
            let out = e.trim_end();
            if out.is_empty() {
                "ERROR: shutdown failed".to_string()
            } else {
                format!("ERROR: {out}")
            }
        }
        Err(_) => "ERROR: No response from daemon".to_string(),
    }
}
