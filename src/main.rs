use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::{Config, LogTarget, LoggingConfig};
use services::{create_event_source, create_launcher, ScreenChangeListener};
use services::launcher::LaunchCommand;
use utils::signals::ShutdownSignals;

#[derive(Parser, Debug)]
#[command(name = "autorandr_launcher", version)]
#[command(about = "Слушает события изменения экрана X-сервера и запускает autorandr после каждого события")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "autorandr-launcher.toml")]
    config: PathBuf,

    /// Отсоединиться от терминала и работать как демон
    #[arg(short, long)]
    daemonize: bool,

    /// Подробный вывод (уровень debug)
    #[arg(long)]
    verbose: bool,

    /// Уровень логирования (имеет приоритет над --verbose)
    #[arg(long)]
    log_level: Option<String>,

    /// Окно антидребезга в миллисекундах
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Режим сухого запуска (эмуляция событий, без запуска autorandr)
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    /// Параметры командной строки перекрывают файл и переменные окружения
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        } else if self.verbose {
            config.logging.level = "debug".to_string();
        }

        if let Some(window_ms) = self.debounce_ms {
            config.debounce.window_ms = window_ms;
        }
    }
}

/// Файл и окружение, поверх них командная строка, валидация в самом конце
fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации (ошибки пока видны в терминале)
    let config = load_config(&args)?;

    // Демонизация до запуска рантайма: fork() в многопоточном процессе небезопасен
    if args.daemonize {
        utils::daemon::daemonize(&config.daemon).context("Не удалось запустить демон")?;
    }

    // Инициализация системы логирования
    init_tracing(&config.logging, args.daemonize)?;

    info!("Запуск autorandr_launcher v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {:?}", args.config);
    if args.daemonize {
        info!("Работаем как демон");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Не удалось создать рантайм tokio")?;

    let result = runtime.block_on(run(Arc::new(config), args.dry_run));
    drop(runtime);

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: Arc<Config>, dry_run: bool) -> Result<()> {
    let command = LaunchCommand::autorandr();

    if dry_run {
        warn!("Режим сухого запуска - события эмулируются, {} не запускается", command.program());
    } else {
        utils::environment::check_environment(config.display.name.as_deref(), command.program());
    }

    // Подключение к X-серверу и подписка на события
    let source = create_event_source(&config, dry_run).context("Ошибка подключения к X-серверу")?;
    let launcher = create_launcher(dry_run);
    let listener = ScreenChangeListener::new(config.debounce.window(), source, launcher)
        .with_command(command);

    info!("Все компоненты инициализированы");

    // Ожидание сигнала завершения
    let mut signals = ShutdownSignals::install().context("Не удалось установить обработчики сигналов")?;
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    let signal_handle = tokio::spawn(async move {
        let name = signals.recv().await;
        info!("Получен сигнал завершения ({})", name);
        signal_token.cancel();
    });

    let result = listener.run(shutdown).await;
    signal_handle.abort();

    let stats = result?;
    info!("autorandr_launcher завершил работу ({})", stats);
    Ok(())
}

fn init_tracing(logging: &LoggingConfig, daemonized: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.filter_directive()))?;

    let registry = tracing_subscriber::registry().with(filter);

    match logging.resolve_target(daemonized) {
        LogTarget::Journald => match tracing_journald::layer() {
            Ok(journal_layer) => {
                registry
                    .with(journal_layer.with_syslog_identifier("autorandr-service".to_string()))
                    .init();
            }
            Err(err) => {
                registry
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
                warn!("journald недоступен ({}), логи идут в stderr", err);
            }
        },
        LogTarget::Console => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
