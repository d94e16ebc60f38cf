use tokio::sync::mpsc;

use crate::core::controller_msg::ControllerMsg;
use crate::gwarn;

use super::handlers::{control, shutdown, status, window};

/// Routes incoming command strings to the appropriate handlers.
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<ControllerMsg>) -> String {
    match cmd {
        // Control
        "start" => control::handle_start(tx).await,
        "stop" => control::handle_stop(tx).await,
        "toggle" => control::handle_toggle(tx).await,

        // Window-visibility side channel
        "hide" => window::handle_hide(),
        "show" => window::handle_show(),

        // Daemon lifecycle
        "shutdown" => shutdown::handle_shutdown(tx).await,

        // Status
        cmd if cmd.starts_with("status") => {
            let args = cmd.strip_prefix("status").unwrap_or("").trim();
            status::handle_status(tx, args.contains("--json")).await
        }

        // Unknown
        _ => {
            gwarn!("Ipc", "unknown command: {}", cmd);
            format!("ERROR: Unknown command '{cmd}'")
        }
    }
}
