use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Проверить окружение перед подключением к X-серверу.
/// Только предупреждения: настоящие ошибки вернут подключение и запуск команды.
pub fn check_environment(display: Option<&str>, program: &str) {
    info!("Проверка окружения...");

    check_display(display);

    match find_in_path(program) {
        Some(path) => info!("Команда {} найдена: {}", program, path.display()),
        None => warn!("Команда {} не найдена в $PATH, запуск будет завершаться ошибкой", program),
    }
}

fn check_display(display: Option<&str>) {
    if let Some(name) = display {
        info!("Используется дисплей из конфигурации: {}", name);
        return;
    }

    match env::var("DISPLAY") {
        Ok(name) if !name.is_empty() => info!("Используется дисплей из $DISPLAY: {}", name),
        _ => warn!("$DISPLAY не задан и display.name не указан, подключение к X-серверу скорее всего не удастся"),
    }
}

/// Найти исполняемый файл в $PATH (или проверить путь, если он содержит '/')
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = Path::new(program);
        return is_executable(path).then(|| path.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_path() {
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("autorandr-launcher-test-no-such-binary").is_none());
    }

    #[test]
    fn test_find_absolute_path() {
        assert_eq!(find_in_path("/bin/sh"), Some(PathBuf::from("/bin/sh")));
        assert!(find_in_path("/nonexistent/autorandr").is_none());
        // Каталог не является исполняемым файлом
        assert!(find_in_path("/").is_none());
    }
}
