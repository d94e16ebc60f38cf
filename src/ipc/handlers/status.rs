// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::controller_msg::ControllerMsg;

/// Handle `staygreen status [--json]`: the snapshot computed on demand,
/// without waiting for the next tick.
pub async fn handle_status(tx: &mpsc::Sender<ControllerMsg>, as_json: bool) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(ControllerMsg::GetStatus { reply: reply_tx }).await.is_err() {
        return "ERROR: daemon control channel closed".to_string();
    }

    match reply_rx.await {
        Ok(snapshot) => {
            if as_json {
                snapshot.to_json()
            } else {
                snapshot.pretty_text()
            }
        }
        Err(_) => "ERROR: no response from daemon".to_string(),
    }
}
