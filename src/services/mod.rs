// サービス層 - 機能別のビジネスロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod logging;
pub mod monitoring;
pub mod outcome;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{validate_config, DefaultPipelineConfig, DEFAULT_TARGET_COUNT};
pub use logging::{logger_init, LoggerConfig, LoggerError, LoggerFormat};
pub use monitoring::{ConsoleReporter, MemoryReporter, NoOpReporter, ReportEvent};
pub use outcome::{OrderWork, RandomOutcomeDecider, ScriptedOutcomeDecider};
