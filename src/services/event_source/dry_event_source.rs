use crate::error::Result;
use crate::events::Notification;
use std::collections::VecDeque;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::info;

/// Пауза между эмулируемыми подключениями монитора
const DRY_RUN_PERIOD: Duration = Duration::from_secs(10);

/// Эмулирует X-сервер: раз в период присылает пачку уведомлений,
/// как при реальном подключении монитора
pub struct DryRunEventSource {
    interval: Interval,
    pending: VecDeque<Notification>,
    next_timestamp: u32,
}

impl DryRunEventSource {
    pub fn new() -> Self {
        Self::with_period(DRY_RUN_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        info!("Dry-run режим - EventSource работает в режиме эмуляции");

        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            interval,
            pending: VecDeque::new(),
            next_timestamp: 1,
        }
    }

    /// Одно физическое изменение: повтор той же метки, ещё одна метка
    /// для второго разъёма и постороннее событие
    fn burst(&mut self) -> [Notification; 4] {
        let ts = self.next_timestamp;
        self.next_timestamp = self.next_timestamp.wrapping_add(2);

        [
            Notification::screen_change(ts).with_geometry(1920, 1080),
            Notification::screen_change(ts).with_geometry(1920, 1080),
            Notification::screen_change(ts.wrapping_add(1)).with_geometry(3840, 1080),
            Notification::other(),
        ]
    }
}

impl Default for DryRunEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl super::r#trait::EventSource for DryRunEventSource {
    async fn next_event(&mut self) -> Result<Option<Notification>> {
        if self.pending.is_empty() {
            self.interval.tick().await;
            let burst = self.burst();
            info!("Dry-run: эмулируем изменение экрана (ts={})", burst[0].server_timestamp);
            self.pending.extend(burst);
        }

        Ok(self.pending.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::event_source::EventSource;

    #[tokio::test(start_paused = true)]
    async fn test_dry_run_emits_bursts() {
        let mut source = DryRunEventSource::with_period(Duration::from_secs(1));

        let mut first = Vec::new();
        for _ in 0..4 {
            first.push(source.next_event().await.unwrap().unwrap());
        }
        assert_eq!(first[0].server_timestamp, 1);
        assert_eq!(first[1].server_timestamp, 1);
        assert_eq!(first[2].server_timestamp, 2);
        assert!(!first[3].is_screen_change());

        let next = source.next_event().await.unwrap().unwrap();
        assert_eq!(next.server_timestamp, 3);
    }
}
