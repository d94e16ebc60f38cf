// Author: Dustin Pilgrim
// License: MIT

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::error::DriverError;
use crate::{gdebug, gerror, ginfo};

use super::ActivityDriver;

/// Gap between the paired press/release runs of one nudge.
const PULSE_MS: u64 = 50;

/// Runs the configured nudge command on a fixed cycle from a background
/// task. Children are spawned with kill-on-drop, so aborting the task also
/// terminates an in-flight nudge.
pub struct CommandDriver {
    command: String,
    cycle: Duration,
    task: Option<NudgeTask>,
}

struct NudgeTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CommandDriver {
    pub fn new(command: impl Into<String>, cycle_seconds: u64) -> Self {
        Self {
            command: command.into(),
            cycle: Duration::from_secs(cycle_seconds.max(1)),
            task: None,
        }
    }
}

impl ActivityDriver for CommandDriver {
    fn start(&mut self) -> Result<(), DriverError> {
        if self.task.is_some() {
            return Ok(());
        }

        let command = self.command.trim().to_string();
        if command.is_empty() {
            return Err(DriverError::StartFailed("nudge command is empty".to_string()));
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_nudge_cycle(command, self.cycle, shutdown_rx));

        self.task = Some(NudgeTask { shutdown, handle });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        // The signal lets a sleeping loop exit cleanly; the abort tears
        // down an in-flight child via kill-on-drop.
        let _ = task.shutdown.send(true);
        task.handle.abort();

        Ok(())
    }
}

impl Drop for CommandDriver {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

async fn run_nudge_cycle(command: String, cycle: Duration, mut shutdown: watch::Receiver<bool>) {
    ginfo!("Driver", "nudge cycle started ({}s): {}", cycle.as_secs(), command);

    loop {
        nudge_once(&command).await;
        tokio::time::sleep(Duration::from_millis(PULSE_MS)).await;
        nudge_once(&command).await;

        tokio::select! {
            _ = tokio::time::sleep(cycle) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    gdebug!("Driver", "nudge cycle stopping");
                    break;
                }
            }
        }
    }
}

async fn nudge_once(command: &str) {
    let child = Command::new("sh")
        .arg("-lc")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();

    match child {
        Ok(mut child) => {
            if let Err(e) = child.wait().await {
                gerror!("Driver", "nudge did not exit cleanly: {e}");
            }
        }
        Err(e) => gerror!("Driver", "failed to spawn nudge: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ActivityDriver;

    #[tokio::test]
    async fn start_and_stop_are_idempotent() {
        let mut driver = CommandDriver::new("true", 300);

        assert!(driver.start().is_ok());
        assert!(driver.start().is_ok());

        assert!(driver.stop().is_ok());
        assert!(driver.stop().is_ok());
    }

    #[tokio::test]
    async fn blank_command_cannot_start() {
        let mut driver = CommandDriver::new("   ", 300);

        assert!(matches!(
            driver.start(),
            Err(DriverError::StartFailed(_))
        ));
    }
}
