// Author: Dustin Pilgrim
// License: MIT

use crate::gdebug;

// Window-visibility side channel. The daemon hosts no window of its own;
// the requests are acknowledged for UI collaborators that multiplex window
// control through the socket.

pub fn handle_hide() -> String {
    gdebug!("Ipc", "hide requested (no window host attached)");
    "OK".to_string()
}

pub fn handle_show() -> String {
    gdebug!("Ipc", "show requested (no window host attached)");
    "OK".to_string()
}
