// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};

use crate::core::status::DEFAULT_CYCLE_SECONDS;

#[derive(Parser, Debug)]
#[command(
    name = "staygreen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stay Green keep-alive daemon"
)]
pub struct Args {
    /// Seconds between keep-alive nudges.
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_CYCLE_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub cycle_seconds: u64,

    /// Shell command run as one keep-alive nudge (platform default if unset).
    #[arg(long, value_name = "CMD")]
    pub nudge_command: Option<String>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Start simulating activity")]
    Start,

    #[command(about = "Stop simulating activity")]
    Stop,

    #[command(about = "Start when idle, stop when running")]
    Toggle,

    #[command(about = "Display the current session status")]
    Status {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Stream status snapshots as JSON lines")]
    Watch,

    #[command(about = "Ask an attached UI to minimize to the tray")]
    Hide,

    #[command(about = "Ask an attached UI to restore from the tray")]
    Show,

    #[command(about = "Stop the Stay Green daemon")]
    Shutdown,
}
