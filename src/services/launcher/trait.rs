use crate::error::Result;
use std::sync::Arc;

use super::command::LaunchCommand;

/// Trait for launchers that start the reconfiguration command
pub trait Launcher: Send + Sync {
    /// Start `command` and return immediately without waiting for it
    fn launch(&self, command: &LaunchCommand) -> Result<()>;
}

/// Factory function to create an appropriate launcher based on the dry_run flag
pub fn create_launcher(dry_run: bool) -> Arc<dyn Launcher> {
    if dry_run {
        Arc::new(super::dry_launcher::DryRunLauncher::new())
    } else {
        Arc::new(super::process_launcher::ProcessLauncher::new())
    }
}
