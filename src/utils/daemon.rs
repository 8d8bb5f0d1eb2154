use crate::config::DaemonConfig;
use crate::error::Result;
use daemonize::Daemonize;

/// Отсоединиться от терминала.
///
/// Вызывается до запуска рантайма tokio и до инициализации логов:
/// fork() в многопоточном процессе небезопасен. После возврата stdin/stdout/stderr
/// указывают на /dev/null, процесс - лидер новой сессии.
/// Если pid-файл уже заблокирован другим экземпляром, возвращается ошибка.
pub fn daemonize(config: &DaemonConfig) -> Result<()> {
    let mut daemon = Daemonize::new()
        .working_directory(&config.working_directory)
        .umask(0o027u32);

    if let Some(pid_file) = &config.pid_file {
        daemon = daemon.pid_file(pid_file);
    }

    daemon.start()?;
    Ok(())
}
