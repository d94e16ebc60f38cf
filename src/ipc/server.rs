use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{Duration, timeout},
};

use crate::core::controller_msg::ControllerMsg;
use crate::{gdebug, gerror};

use super::router::route_command;

/// Binds the control socket and spawns the accept loop.
pub async fn spawn_ipc_server(tx: mpsc::Sender<ControllerMsg>) -> Result<(), String> {
    let path = super::socket_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    // The instance lock guarantees any leftover socket here is ours.
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)
        .map_err(|e| format!("failed to bind {}: {e}", path.display()))?;

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(&mut stream, tx).await {
                            gerror!("Ipc", "error handling connection: {e}");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => gerror!("Ipc", "failed to accept connection: {e}"),
            }
        }
    });

    Ok(())
}

/// Handles a single connection: one command in, one response out — except
/// `watch`, which holds the stream open for as long as the client reads.
async fn handle_connection(
    stream: &mut UnixStream,
    tx: mpsc::Sender<ControllerMsg>,
) -> std::io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();
    gdebug!("Ipc", "received command: {}", cmd);

    if cmd == "watch" {
        return super::handlers::watch::handle_watch(stream, &tx).await;
    }

    let response = timeout(Duration::from_secs(10), route_command(&cmd, &tx))
        .await
        .unwrap_or_else(|_| "ERROR: daemon did not respond within 10 seconds".to_string());

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
