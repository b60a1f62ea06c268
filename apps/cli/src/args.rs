//! # CLI Argument Definitions
//!
//! Subcommands, arguments and flags of the `resbook` binary.

use clap::{Parser, Subcommand, ValueEnum};
use resbook::booking::ResourceKind;
use resbook::identity::AuthState;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "resbook")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Reservation client for laboratory equipment, cages and experiment services")]
pub struct Cli {
    /// Config file; an optional `resbook.*` in the working directory is used otherwise
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Transform and format wire time slots ("YYYY-MM-DD HH:mm-HH:mm")
    Slots {
        #[command(subcommand)]
        action: SlotAction,
    },
    /// Describe a reservation period; omit the end for a long-term reservation
    Period { start: String, end: Option<String> },
    /// Show the dates a resource can be booked for
    Window {
        /// equipment, cage or experiment
        kind: ResourceKind,
        /// Reference date (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
    },
    /// Evaluate the navigation guard for a path
    Guard {
        path: String,
        #[arg(short, long, value_enum, default_value_t = StateArg::Anonymous)]
        state: StateArg,
    },
    /// List pages with their titles and access requirements
    Routes {},
    /// Inspect, refresh or end the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Request an SMS verification code
    SendCode {
        phone: String,
        /// Request a registration code instead of a login code
        #[arg(long)]
        register: bool,
    },
    /// Log in with a phone number and verification code
    Login { phone: String, code: String },
}

#[derive(Debug, Subcommand)]
pub enum SlotAction {
    /// Group slots by date and print the JSON object
    Group { slots: Vec<String> },
    /// Flatten a date-grouped JSON object back into sorted wire slots
    Flatten { json: String },
    /// Print the distinct dates
    Dates { slots: Vec<String> },
    /// Print the per-date detail lines
    Display { slots: Vec<String> },
    /// Print the confirmation text with its summary
    Confirm { slots: Vec<String> },
    /// Print the short date summary used in order lists
    Range { slots: Vec<String> },
    /// Print the date of the first slot
    First { slots: Vec<String> },
}

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Print the authorization state of the persisted session
    Status {},
    /// Fetch the profile from the server into the session
    Refresh {},
    /// End the session (the server is told when reachable)
    Logout {},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Anonymous,
    Disabled,
    PendingAudit,
    Rejected,
    Passed,
    Indeterminate,
}

impl From<StateArg> for AuthState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Anonymous => Self::Anonymous,
            StateArg::Disabled => Self::Disabled,
            StateArg::PendingAudit => Self::PendingAudit,
            StateArg::Rejected => Self::Rejected,
            StateArg::Passed => Self::Passed,
            StateArg::Indeterminate => Self::Indeterminate,
        }
    }
}
