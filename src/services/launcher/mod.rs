//! Launcher service: responsibility and boundaries
//!
//! This module is responsible ONLY for starting the reconfiguration command.
//! Launching is fire-and-forget: the child runs in its own session, nothing
//! waits for it and its exit status is never inspected. Whether an event
//! deserves a launch is decided exclusively by the screen listener.

mod command;
mod dry_launcher;
mod process_launcher;
mod r#trait;

pub use self::command::LaunchCommand;
#[cfg(test)]
pub use self::dry_launcher::DryRunLauncher;
pub use self::r#trait::{create_launcher, Launcher};
