// Author: Dustin Pilgrim
// License: MIT

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::UnixStream,
    sync::{mpsc, oneshot},
};

use crate::core::controller_msg::ControllerMsg;
use crate::core::status::StatusSnapshot;
use crate::gdebug;

/// Handle `staygreen watch`: one JSON snapshot per line until the client
/// hangs up, then detach its subscription.
pub async fn handle_watch(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<ControllerMsg>,
) -> std::io::Result<()> {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(ControllerMsg::Subscribe { reply: reply_tx }).await.is_err() {
        stream.write_all(b"ERROR: daemon control channel closed\n").await?;
        return Ok(());
    }

    let Ok(mut subscription) = reply_rx.await else {
        stream.write_all(b"ERROR: no response from daemon\n").await?;
        return Ok(());
    };

    gdebug!("Ipc", "watch attached (subscriber {})", subscription.id);

    // Attach-time answer first, published snapshots after.
    let mut alive = write_line(stream, &subscription.initial.to_json()).await.is_ok();
    let mut buf = [0u8; 64];

    while alive {
        let next: Option<StatusSnapshot> = tokio::select! {
            maybe = subscription.rx.recv() => {
                match maybe {
                    Some(snapshot) => Some(snapshot),
                    None => break,
                }
            }

            // The client never speaks after "watch"; reads only complete
            // when it hangs up.
            res = stream.read(&mut buf) => {
                if matches!(res, Ok(0) | Err(_)) {
                    break;
                }
                None
            }
        };

        if let Some(snapshot) = next {
            alive = write_line(stream, &snapshot.to_json()).await.is_ok();
        }
    }

    let _ = tx.send(ControllerMsg::Unsubscribe { id: subscription.id }).await;
    gdebug!("Ipc", "watch detached (subscriber {})", subscription.id);

    Ok(())
}

async fn write_line(stream: &mut UnixStream, line: &str) -> std::io::Result<()> {
    stream.write_all(line.as_bytes()).await?;
    stream.write_all(b"\n").await?;
    stream.flush().await
}
