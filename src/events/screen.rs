use std::fmt;

/// Метка времени, назначенная X-сервером событию
pub type ServerTimestamp = u32;

/// Тип уведомления от дисплейного сервера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Изменилась геометрия экрана (RRScreenChangeNotify)
    ScreenChange,
    /// Любое другое событие, на которое мы не реагируем
    Other,
}

/// Размер экрана в пикселях. Только для логов, не сравнивается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenGeometry {
    pub width: u16,
    pub height: u16,
}

impl fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Уведомление, полученное от источника событий
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub server_timestamp: ServerTimestamp,
    pub geometry: Option<ScreenGeometry>,
}

impl Notification {
    pub fn screen_change(server_timestamp: ServerTimestamp) -> Self {
        Self {
            kind: NotificationKind::ScreenChange,
            server_timestamp,
            geometry: None,
        }
    }

    pub fn other() -> Self {
        Self {
            kind: NotificationKind::Other,
            server_timestamp: 0,
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, width: u16, height: u16) -> Self {
        self.geometry = Some(ScreenGeometry { width, height });
        self
    }

    pub fn is_screen_change(&self) -> bool {
        self.kind == NotificationKind::ScreenChange
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.geometry) {
            (NotificationKind::ScreenChange, Some(geometry)) => {
                write!(f, "ScreenChange ts={} ({})", self.server_timestamp, geometry)
            }
            (NotificationKind::ScreenChange, None) => {
                write!(f, "ScreenChange ts={}", self.server_timestamp)
            }
            (NotificationKind::Other, _) => write!(f, "Other"),
        }
    }
}
