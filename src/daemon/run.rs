// Author: Dustin Pilgrim
// License: MIT

use crate::core::controller_msg::ControllerMsg;
use crate::core::error::Error;
use crate::core::status::StatusSnapshot;
use crate::core::utils::now_ms;
use crate::{gdebug, ginfo, gwarn};

use tokio::sync::{mpsc, watch};

use super::{AnyError, Daemon};

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        ginfo!("Daemon", "starting");

        let (tx, mut rx) = mpsc::channel::<ControllerMsg>(256);

        if let Err(e) = crate::ipc::server::spawn_ipc_server(tx.clone()).await {
            gwarn!("Daemon", "ipc: failed to start: {e}");
        }

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        ginfo!("Daemon", "stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        ginfo!("Daemon", "stopping (control channel closed)");
                        break;
                    };

                    match msg {
                        ControllerMsg::Tick { now_ms } => {
                            self.handle_tick(now_ms);
                        }

                        ControllerMsg::Start { reply } => {
                            let _ = reply.send(self.start_session(&tx));
                        }

                        ControllerMsg::Stop { reply } => {
                            let _ = reply.send(self.stop_session());
                        }

                        ControllerMsg::Toggle { reply } => {
                            let result = if self.controller.is_running() {
                                self.stop_session()
                            } else {
                                self.start_session(&tx)
                            };
                            let _ = reply.send(result);
                        }

                        ControllerMsg::GetStatus { reply } => {
                            let _ = reply.send(self.controller.status(now_ms()));
                        }

                        ControllerMsg::Subscribe { reply } => {
                            let initial = self.controller.status(now_ms());
                            let _ = reply.send(self.reporter.subscribe(initial));
                        }

                        ControllerMsg::Unsubscribe { id } => {
                            self.reporter.unsubscribe(id);
                            gdebug!("Daemon", "subscriber {id} detached");
                        }

                        ControllerMsg::StopDaemon { reply } => {
                            ginfo!("Daemon", "stopping (shutdown via ipc)");
                            let _ = reply.send(Ok("Stopping Stay Green daemon".to_string()));
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                    }
                }
            }
        }

        // A session still running at shutdown takes its nudge process down
        // with it.
        if self.controller.is_running() {
            let _ = self.stop_session();
        }
        self.disarm_ticker();

        Ok(())
    }

    /// Recompute and publish while a session runs. A tick can still land
    /// after stop disarms the ticker; idle snapshots are never published.
    fn handle_tick(&mut self, now_ms: u64) {
        if self.controller.is_running() {
            let snapshot = self.controller.status(now_ms);
            self.reporter.publish(&snapshot);
        }
    }

    /// Start the session, arm the ticker, and push the transition snapshot
    /// so subscribers see the change without waiting for a tick.
    fn start_session(&mut self, tx: &mpsc::Sender<ControllerMsg>) -> Result<StatusSnapshot, Error> {
        let snapshot = self.controller.start(now_ms())?;
        self.arm_ticker(tx);
        self.reporter.publish(&snapshot);
        Ok(snapshot)
    }

    fn stop_session(&mut self) -> Result<StatusSnapshot, Error> {
        let snapshot = self.controller.stop(now_ms())?;
        self.disarm_ticker();
        self.reporter.publish(&snapshot);
        Ok(snapshot)
    }

    fn arm_ticker(&mut self, tx: &mpsc::Sender<ControllerMsg>) {
        if self.ticker.is_none() {
            self.ticker = Some(tokio::spawn(crate::services::ticker::run_ticker(tx.clone())));
        }
    }

    fn disarm_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}
