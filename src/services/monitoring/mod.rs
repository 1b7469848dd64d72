// 進行状況監視機能
// 注文ごとの進行表示、警告、最終サマリーの報告

pub mod implementations;

// 公開API
pub use implementations::{ConsoleReporter, MemoryReporter, NoOpReporter, ReportEvent};
