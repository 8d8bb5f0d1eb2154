use crate::error::{LauncherError, Result};
use crate::events::Notification;
use crate::services::debounce::{Debouncer, Decision};
use crate::services::event_source::EventSource;
use crate::services::launcher::{LaunchCommand, Launcher};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Счётчики для логов. На решения не влияют.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub accepted: u64,
    pub launched: u64,
    pub launch_failures: u64,
    pub suppressed: u64,
    pub ignored: u64,
}

impl fmt::Display for ListenerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "принято: {}, запущено: {}, ошибок запуска: {}, подавлено: {}, пропущено: {}",
            self.accepted, self.launched, self.launch_failures, self.suppressed, self.ignored
        )
    }
}

/// Цикл приёма уведомлений: антидребезг и запуск команды
pub struct ScreenChangeListener {
    source: Box<dyn EventSource + Send>,
    launcher: Arc<dyn Launcher>,
    command: LaunchCommand,
    debouncer: Debouncer,
    stats: ListenerStats,
}

impl ScreenChangeListener {
    pub fn new(
        debounce_window: Duration,
        source: Box<dyn EventSource + Send>,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        info!("Инициализация ScreenChangeListener (окно: {:?})", debounce_window);

        Self {
            source,
            launcher,
            command: LaunchCommand::autorandr(),
            debouncer: Debouncer::new(debounce_window, Instant::now()),
            stats: ListenerStats::default(),
        }
    }

    pub fn with_command(mut self, command: LaunchCommand) -> Self {
        self.command = command;
        self
    }

    #[cfg(test)]
    pub fn stats(&self) -> ListenerStats {
        self.stats
    }

    /// Работает, пока не закроется соединение или не придёт отмена.
    /// Закрытие соединения - всегда ошибка `ConnectionClosed`.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<ListenerStats> {
        self.start_loop(Instant::now());
        info!(
            "Ожидание изменений экрана, команда: {}, окно: {:?}",
            self.command,
            self.debouncer.window()
        );

        loop {
            debug!("Ожидание события...");

            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Получена отмена, останавливаем ScreenChangeListener");
                    if let Err(e) = self.source.close().await {
                        warn!("Ошибка при закрытии источника событий: {}", e);
                    }
                    info!("Статистика: {}", self.stats);
                    return Ok(self.stats);
                }
                next = self.source.next_event() => next,
            };

            match next {
                Ok(Some(notification)) => self.handle_notification(notification, Instant::now()),
                Ok(None) => {
                    error!("Соединение закрыто!");
                    info!("Статистика: {}", self.stats);
                    return Err(LauncherError::ConnectionClosed);
                }
                Err(e) => {
                    error!("Ошибка источника событий: {}", e);
                    if let Err(close_err) = self.source.close().await {
                        warn!("Ошибка при закрытии источника событий: {}", close_err);
                    }
                    info!("Статистика: {}", self.stats);
                    return Err(e);
                }
            }
        }
    }

    /// Состояние антидребезга живёт с момента старта цикла, а не создания объекта
    fn start_loop(&mut self, now: Instant) {
        self.debouncer.restart(now);
    }

    fn handle_notification(&mut self, notification: Notification, now: Instant) {
        match self.debouncer.observe(&notification, now) {
            Decision::Accept => {
                self.stats.accepted += 1;
                info!("Изменение экрана: {} - запускаем {}", notification, self.command);
                self.launch();
            }
            Decision::Ignored => {
                self.stats.ignored += 1;
                trace!("Пропущено: {}", notification);
            }
            Decision::DuplicateTimestamp => {
                self.stats.suppressed += 1;
                debug!("Подавлено: {} - та же метка сервера", notification);
            }
            Decision::WithinWindow { elapsed } => {
                self.stats.suppressed += 1;
                debug!(
                    "Подавлено: {} - прошло {:?} из {:?}",
                    notification,
                    elapsed,
                    self.debouncer.window()
                );
            }
        }
    }

    fn launch(&mut self) {
        match self.launcher.launch(&self.command) {
            Ok(()) => self.stats.launched += 1,
            Err(e) => {
                // Без повтора: следующее изменение экрана само вызовет новый запуск
                self.stats.launch_failures += 1;
                error!("{}", e);
            }
        }
    }
}
