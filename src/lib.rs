//! 注文パイプライン
//!
//! バックグラウンドのProducerが1..=Nの注文を作り、呼び出し側のConsumerが
//! 集計して、N件を受け取ったら停止要求と確認のハンドシェイクで止める。

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    Item, PipelineConfig, PipelineError, PipelineReporter, RunStatistics, RunSummary, Verdict,
};
pub use crate::engine::OrderPipeline;
