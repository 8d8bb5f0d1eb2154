use crate::error::{LauncherError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use super::command::LaunchCommand;
use super::r#trait::Launcher;

/// Запускает команду как отдельный процесс в собственной сессии
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    fn build_command(command: &LaunchCommand) -> Command {
        let mut process = Command::new(command.program());
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        // Новая сессия: сигналы демона не доходят до autorandr и наоборот
        unsafe {
            process.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }

        process
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<()> {
        debug!("Запуск процесса: {}", command);

        let child = Self::build_command(command)
            .spawn()
            .map_err(|source| LauncherError::Spawn {
                command: command.to_string(),
                source,
            })?;

        info!("Запущен '{}' (pid: {:?})", command, child.id());

        // Отпускаем дочерний процесс: tokio сам соберёт его статус после завершения
        drop(child);
        Ok(())
    }
}
