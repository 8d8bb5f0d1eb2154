//! Правило антидребезга для уведомлений об изменении экрана.
//!
//! X-сервер часто присылает несколько уведомлений на одно физическое
//! изменение (по одному на разъём). Новое событие принимается, только если
//! у него другая метка времени сервера И с момента последнего принятого
//! события прошло больше окна антидребезга. Первое событие принимается всегда.

use crate::events::{Notification, ServerTimestamp};
use std::time::Duration;
use tokio::time::Instant;

/// Состояние, переживающее итерации цикла
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    /// Метка последнего принятого уведомления (`None` - ещё ничего не принято)
    pub last_timestamp: Option<ServerTimestamp>,
    /// Когда было принято последнее уведомление
    pub last_accept_time: Instant,
}

impl DebounceState {
    pub fn new(started_at: Instant) -> Self {
        Self {
            last_timestamp: None,
            last_accept_time: started_at,
        }
    }
}

/// Решение по одному уведомлению
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Новое физическое событие - запускаем команду
    Accept,
    /// Не изменение экрана
    Ignored,
    /// Та же метка сервера, что и у последнего принятого
    DuplicateTimestamp,
    /// Другая метка, но окно антидребезга ещё не истекло
    WithinWindow { elapsed: Duration },
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept)
    }
}

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(window: Duration, started_at: Instant) -> Self {
        Self {
            window,
            state: DebounceState::new(started_at),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Сбрасывает состояние: отсчёт начинается заново с `started_at`
    pub fn restart(&mut self, started_at: Instant) {
        self.state = DebounceState::new(started_at);
    }

    #[cfg(test)]
    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Решает судьбу уведомления и при принятии обновляет состояние
    pub fn observe(&mut self, notification: &Notification, now: Instant) -> Decision {
        if !notification.is_screen_change() {
            return Decision::Ignored;
        }

        let ts = notification.server_timestamp;
        let decision = match self.state.last_timestamp {
            None => Decision::Accept,
            Some(last) if last == ts => Decision::DuplicateTimestamp,
            Some(_) => {
                let elapsed = now.saturating_duration_since(self.state.last_accept_time);
                if elapsed > self.window {
                    Decision::Accept
                } else {
                    Decision::WithinWindow { elapsed }
                }
            }
        };

        if decision.is_accept() {
            self.state.last_timestamp = Some(ts);
            // Не даём времени последнего принятия откатиться назад
            self.state.last_accept_time = self.state.last_accept_time.max(now);
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(3);

    fn at(start: Instant, secs: u64) -> Instant {
        start + Duration::from_secs(secs)
    }

    #[test]
    fn test_first_event_always_accepted() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert_eq!(
            debouncer.observe(&Notification::screen_change(100), start),
            Decision::Accept
        );
        assert_eq!(debouncer.state().last_timestamp, Some(100));
    }

    #[test]
    fn test_first_event_with_zero_timestamp_accepted() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(0), start).is_accept());
        assert_eq!(
            debouncer.observe(&Notification::screen_change(0), at(start, 60)),
            Decision::DuplicateTimestamp
        );
    }

    #[test]
    fn test_duplicate_timestamp_suppressed_at_any_spacing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(5), start).is_accept());
        for secs in [0, 1, 4, 3600] {
            assert_eq!(
                debouncer.observe(&Notification::screen_change(5), at(start, secs)),
                Decision::DuplicateTimestamp
            );
        }
    }

    #[test]
    fn test_within_window_suppressed() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(1), start).is_accept());
        assert_eq!(
            debouncer.observe(&Notification::screen_change(2), at(start, 2)),
            Decision::WithinWindow {
                elapsed: Duration::from_secs(2)
            }
        );
        // Отклонённое событие не меняет состояние
        assert_eq!(debouncer.state().last_timestamp, Some(1));
        assert_eq!(debouncer.state().last_accept_time, start);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(1), start).is_accept());
        assert!(!debouncer
            .observe(&Notification::screen_change(2), at(start, 3))
            .is_accept());
        assert!(debouncer
            .observe(&Notification::screen_change(2), start + Duration::from_millis(3001))
            .is_accept());
    }

    #[test]
    fn test_rearm_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(1), start).is_accept());
        assert!(debouncer
            .observe(&Notification::screen_change(2), at(start, 4))
            .is_accept());
        assert_eq!(debouncer.state().last_timestamp, Some(2));
        assert_eq!(debouncer.state().last_accept_time, at(start, 4));
    }

    #[test]
    fn test_other_kinds_ignored() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert_eq!(
            debouncer.observe(&Notification::other(), start),
            Decision::Ignored
        );
        assert_eq!(debouncer.state().last_timestamp, None);

        assert!(debouncer.observe(&Notification::screen_change(9), start).is_accept());
        assert_eq!(
            debouncer.observe(&Notification::other(), at(start, 100)),
            Decision::Ignored
        );
    }

    #[test]
    fn test_restart_resets_state() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        assert!(debouncer.observe(&Notification::screen_change(1), start).is_accept());
        debouncer.restart(at(start, 10));

        assert_eq!(debouncer.state(), &DebounceState::new(at(start, 10)));
        // После сброса та же метка снова считается первым событием
        assert!(debouncer
            .observe(&Notification::screen_change(1), at(start, 10))
            .is_accept());
    }

    #[test]
    fn test_reference_scenario() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW, start);

        let script = [(0, 0xA), (1, 0xA), (2, 0xB), (5, 0xC)];
        let accepted: Vec<u64> = script
            .iter()
            .filter(|(secs, ts)| {
                debouncer
                    .observe(&Notification::screen_change(*ts), at(start, *secs))
                    .is_accept()
            })
            .map(|(secs, _)| *secs)
            .collect();

        assert_eq!(accepted, vec![0, 5]);
    }
}
