// ログ出力機能
// tracingの購読者を初期化する（ログは標準エラー出力へ）

mod config;
mod error;

pub use config::{LoggerConfig, LoggerFormat};
pub use error::LoggerError;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.level)?;
    match cfg.format {
        LoggerFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(cfg.use_color)
                .with_target(cfg.with_targets);
            init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
        LoggerFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(cfg.with_targets);
            init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
    }
}

fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn as_error(e: impl std::fmt::Display) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("global default") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}

fn init_with<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(as_error)
}
