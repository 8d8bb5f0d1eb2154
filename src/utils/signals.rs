use crate::error::Result;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tracing::info;

/// Обработчики сигналов завершения.
///
/// Регистрируются заранее, чтобы ошибка установки обработчика стала ошибкой
/// запуска, а не сигналом к остановке.
pub struct ShutdownSignals {
    terminate: Signal,
    interrupt: Signal,
    quit: Signal,
    hangup: Signal,
}

impl ShutdownSignals {
    pub fn install() -> Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
            quit: signal(SignalKind::quit())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    /// Ждёт SIGTERM, SIGINT или SIGQUIT и возвращает имя сигнала.
    /// SIGHUP игнорируется: демон не должен умирать вместе с терминалом.
    pub async fn recv(&mut self) -> &'static str {
        loop {
            tokio::select! {
                _ = self.terminate.recv() => return "SIGTERM",
                _ = self.interrupt.recv() => return "SIGINT",
                _ = self.quit.recv() => return "SIGQUIT",
                _ = self.hangup.recv() => info!("Получен SIGHUP - игнорируем"),
            }
        }
    }
}
