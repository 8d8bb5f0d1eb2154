use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Не удалось подключиться к X-серверу: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),

    #[error("Ошибка соединения с X-сервером: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error("Ошибка ответа X-сервера: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),

    #[error("Соединение с X-сервером закрыто")]
    ConnectionClosed,

    #[error("Не удалось запустить '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Ошибка демонизации: {0}")]
    Daemonize(#[from] daemonize::Error),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_names_command() {
        let err = LauncherError::Spawn {
            command: "autorandr --change".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("autorandr --change"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_connection_closed_message() {
        assert_eq!(
            LauncherError::ConnectionClosed.to_string(),
            "Соединение с X-сервером закрыто"
        );
    }
}
