// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

// ---------------- single-instance lock ----------------

fn runtime_dir() -> Result<PathBuf, String> {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| "XDG_RUNTIME_DIR is not set (cannot create instance lock)".to_string())
}

fn lock_path() -> Result<PathBuf, String> {
    Ok(runtime_dir()?.join("staygreen").join("staygreen.lock"))
}

pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    let path = lock_path()?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(&path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            match UnixStream::connect(&path) {
                Ok(_) => Err(format!(
                    "staygreen is already running (another instance holds {})",
                    path.display()
                )),
                Err(_) => {
                    let _ = std::fs::remove_file(&path);
                    UnixListener::bind(&path)
                        .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
                }
            }
        }
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

// ---------------- platform nudge ----------------

/// Default keep-alive nudge for this host, if it has one. The command runs
/// twice per cycle as a short press/release-style pulse.
pub fn default_nudge_command() -> Option<String> {
    if cfg!(target_os = "linux") {
        // F15 is unmapped on virtually every layout, so the tap is invisible.
        Some("xdotool key F15".to_string())
    } else if cfg!(target_os = "macos") {
        Some("caffeinate -u -t 1".to_string())
    } else {
        None
    }
}
