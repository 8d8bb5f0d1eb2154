use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use super::command::LaunchCommand;
use super::r#trait::Launcher;

/// Ничего не запускает, только пишет в лог
pub struct DryRunLauncher {
    launches: AtomicU64,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        info!("Инициализация DryRunLauncher");
        Self {
            launches: AtomicU64::new(0),
        }
    }

    #[cfg(test)]
    pub fn launches(&self) -> u64 {
        self.launches.load(Ordering::Relaxed)
    }
}

impl Default for DryRunLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for DryRunLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<()> {
        let count = self.launches.fetch_add(1, Ordering::Relaxed) + 1;
        info!("[DRY RUN] Запуск #{}: {}", count, command);
        Ok(())
    }
}
