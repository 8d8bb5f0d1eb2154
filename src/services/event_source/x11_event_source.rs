use crate::error::{LauncherError, Result};
use crate::events::Notification;
use std::io::ErrorKind;
use std::os::unix::io::{AsRawFd, RawFd};
use tokio::io::unix::AsyncFd;
use tracing::{debug, info, trace, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::ConnectionError;
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

/// Минимальная версия RandR с RRScreenChangeNotify
const RANDR_MAJOR: u32 = 1;
const RANDR_MINOR: u32 = 2;

/// Дескриптор сокета X-соединения для регистрации в реакторе tokio.
/// Сокетом владеет `RustConnection`.
struct ConnectionFd(RawFd);

impl AsRawFd for ConnectionFd {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

/// Источник событий RandR из X-сервера
pub struct X11EventSource {
    // Порядок полей важен: fd снимается с регистрации раньше, чем закрывается соединение
    fd: AsyncFd<ConnectionFd>,
    conn: RustConnection,
    root: u32,
}

impl X11EventSource {
    /// Подключается к X-серверу и подписывается на изменения экрана корневого окна
    pub fn connect(display_name: Option<&str>) -> Result<Self> {
        let shown_name = display_name.unwrap_or("(из $DISPLAY)");
        info!("Подключение к X-серверу {}", shown_name);

        let (conn, screen_num) = x11rb::connect(display_name)?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| LauncherError::Internal(format!("Экран #{} не найден", screen_num)))?;

        if conn.extension_information(randr::X11_EXTENSION_NAME)?.is_none() {
            return Err(LauncherError::ServiceUnavailable(
                "X-сервер не поддерживает расширение RandR".to_string(),
            ));
        }

        let version = conn.randr_query_version(RANDR_MAJOR, RANDR_MINOR)?.reply()?;
        info!(
            "Подключено к X-серверу: экран #{}, RandR {}.{}",
            screen_num, version.major_version, version.minor_version
        );

        conn.randr_select_input(root, randr::NotifyMask::SCREEN_CHANGE)?
            .check()?;
        conn.flush()?;
        debug!("Подписка на RRScreenChangeNotify для окна 0x{:x}", root);

        let fd = AsyncFd::new(ConnectionFd(conn.stream().as_raw_fd()))?;

        Ok(Self { fd, conn, root })
    }

    fn to_notification(event: Event) -> Notification {
        match event {
            Event::RandrScreenChangeNotify(event) => {
                Notification::screen_change(event.timestamp).with_geometry(event.width, event.height)
            }
            other => {
                trace!("Пропускаем событие X11: {:?}", other);
                Notification::other()
            }
        }
    }

    fn is_disconnect(err: &ConnectionError) -> bool {
        match err {
            ConnectionError::IoError(e) => matches!(
                e.kind(),
                ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}

#[async_trait::async_trait]
impl super::r#trait::EventSource for X11EventSource {
    async fn next_event(&mut self) -> Result<Option<Notification>> {
        loop {
            match self.conn.poll_for_event() {
                Ok(Some(event)) => return Ok(Some(Self::to_notification(event))),
                Ok(None) => {}
                Err(e) if Self::is_disconnect(&e) => {
                    debug!("X-сервер закрыл соединение: {}", e);
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }

            // Сначала сбрасываем готовность, потом снова читаем: событие не теряется
            let mut guard = self.fd.readable().await?;
            guard.clear_ready();
        }
    }

    async fn close(&mut self) -> Result<()> {
        info!("Закрытие соединения с X-сервером (корневое окно 0x{:x})", self.root);
        if let Err(e) = self.conn.flush() {
            warn!("Не удалось сбросить буфер X-соединения: {}", e);
        }
        Ok(())
    }
}

impl Drop for X11EventSource {
    fn drop(&mut self) {
        debug!("X11EventSource завершает работу");
    }
}
