// Author: Dustin Pilgrim
// License: MIT

use crate::core::controller_msg::ControllerMsg;
use crate::core::utils::now_ms;
use crate::{gdebug, gwarn};

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};

/// 1 Hz status tick. The daemon arms this task when a session starts and
/// aborts it on stop, so no ticking happens while idle.
pub async fn run_ticker(tx: Sender<ControllerMsg>) {
    gdebug!("Ticker", "started");

    loop {
        sleep(Duration::from_secs(1)).await;

        // If the daemon is gone, stop.
        if tx.send(ControllerMsg::Tick { now_ms: now_ms() }).await.is_err() {
            gwarn!("Ticker", "stopping (receiver dropped)");
            break;
        }
    }
}
