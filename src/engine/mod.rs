// エンジン層 - Producer-Consumerとオーケストレーション
// サービス層を組み合わせて1回分の実行を提供

pub mod api;
pub mod consumer;
pub mod handshake;
mod pipeline;
pub mod producer;

// 公開API - 主要エンジンクラス
pub use api::{create_default_pipeline, create_quiet_pipeline, run_with_seed};
pub use consumer::run_consumer;
pub use handshake::{
    handoff_channels, ConsumerGone, ItemSender, PendingHandoff, ProducerEnds, ProducerHandle,
    ShutdownAck,
};
pub use pipeline::OrderPipeline;
pub use producer::spawn_producer;
