// Author: Dustin Pilgrim
// License: MIT

use std::io;

use crate::cli::Args;
use crate::daemon::Daemon;
use crate::{gdebug, ginfo};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("{e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    // logging
    crate::log::set_verbose(args.verbose);
    if args.verbose {
        gdebug!("Daemon", "debug logging enabled");
    }

    ginfo!(
        "Daemon",
        "staygreen starting (cycle: {}s, log: {})",
        args.cycle_seconds,
        crate::log::log_path().display()
    );

    let driver = crate::driver::for_host(args.nudge_command.clone(), args.cycle_seconds);

    // shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(args.cycle_seconds, driver);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }?;
            Ok(())
        }

        _ = tokio::signal::ctrl_c() => {
            ginfo!("Daemon", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err)),
            }
        }
    }
}
