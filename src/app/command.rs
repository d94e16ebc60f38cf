// Author: Dustin Pilgrim
// License: MIT

use crate::cli::{Args, Command};
use crate::core::status::StatusSnapshot;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // command mode: args.command is Some
    let cmd = args.command.as_ref().expect("command mode");

    match cmd {
        Command::Start => {
            match crate::ipc::client::send_raw("start").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Activity simulation started");
                    } else {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Stop => {
            match crate::ipc::client::send_raw("stop").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Activity simulation stopped");
                    } else {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Toggle => {
            match crate::ipc::client::send_raw("toggle").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Toggled activity simulation");
                    } else {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Status { json } => {
            let msg = if *json { "status --json" } else { "status" };

            match crate::ipc::client::send_raw(msg).await {
                Ok(resp) => {
                    if !resp.is_empty() {
                        println!("{resp}");
                    }
                    Ok(())
                }
                Err(e) => {
                    if *json {
                        // Keep stdout valid JSON even when the daemon isn't running.
                        println!("{}", StatusSnapshot::inactive(args.cycle_seconds).to_json());
                    } else {
                        eprintln!("staygreen: {e}");
                    }
                    Ok(())
                }
            }
        }

        Command::Watch => {
            match crate::ipc::client::watch_raw(|line| println!("{line}")).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Hide => {
            match crate::ipc::client::send_raw("hide").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if !out.is_empty() {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Show => {
            match crate::ipc::client::send_raw("show").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if !out.is_empty() {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }

        Command::Shutdown => {
            match crate::ipc::client::send_raw("shutdown").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Stopping Stay Green daemon");
                    } else {
                        println!("{out}");
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("staygreen: {e}");
                    Ok(())
                }
            }
        }
    }
}
