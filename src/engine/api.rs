// 高レベル公開API
// OrderPipelineを簡単に使用できるようにするための便利な関数

use super::OrderPipeline;
use crate::{
    core::{PipelineConfig, PipelineReporter, PipelineResult, RunSummary},
    services::{ConsoleReporter, DefaultPipelineConfig, NoOpReporter, RandomOutcomeDecider},
};

/// デフォルト設定・コンソール出力のパイプラインを作成
pub fn create_default_pipeline() -> OrderPipeline<DefaultPipelineConfig, ConsoleReporter> {
    OrderPipeline::new(DefaultPipelineConfig::default(), ConsoleReporter::new())
}

/// 出力なしのパイプラインを作成（テスト・バックグラウンド用）
pub fn create_quiet_pipeline(
    config: DefaultPipelineConfig,
) -> OrderPipeline<DefaultPipelineConfig, NoOpReporter> {
    OrderPipeline::new(config, NoOpReporter::new())
}

/// 乱数判定でパイプラインを実行
///
/// シードを指定すると結果を再現できる。
pub async fn run_with_seed<C, R>(
    pipeline: &OrderPipeline<C, R>,
    seed: Option<u64>,
) -> PipelineResult<RunSummary>
where
    C: PipelineConfig + 'static,
    R: PipelineReporter + 'static,
{
    let decider = match seed {
        Some(seed) => RandomOutcomeDecider::seeded(seed),
        None => RandomOutcomeDecider::new(),
    };
    pipeline.run(decider).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_create_default_pipeline() {
        let pipeline = create_default_pipeline();

        assert_eq!(pipeline.config().target_count(), 10);
        assert_eq!(pipeline.config().delay_unit(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_run_with_same_seed_is_reproducible() {
        let config = DefaultPipelineConfig::new(4).with_delay_unit(Duration::from_millis(1));
        let pipeline = create_quiet_pipeline(config);

        let first = run_with_seed(&pipeline, Some(99)).await.unwrap();
        let second = run_with_seed(&pipeline, Some(99)).await.unwrap();

        assert_eq!(first.tally, second.tally);
        assert_eq!(first.statistics, second.statistics);
    }
}
