// Pipeline - Producer-Consumer パイプライン
// 1回分の実行とオーケストレーション

use super::{consumer::run_consumer, handshake::handoff_channels, producer::spawn_producer};
use crate::{
    core::{
        OutcomeDecider, PipelineConfig, PipelineError, PipelineReporter, PipelineResult,
        RunSummary, Verdict,
    },
    services::config::validate_config,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// 注文パイプライン
///
/// 設定と報告先はコンストラクタで注入し、判定器は実行ごとに渡す。
pub struct OrderPipeline<C, R> {
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<C, R> OrderPipeline<C, R>
where
    C: PipelineConfig + 'static,
    R: PipelineReporter + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(config: C, reporter: R) -> Self {
        Self {
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 1回分の実行
    ///
    /// Producerを起動し、呼び出し元のタスクでConsumerを実行する。
    /// Producerのjoin後に両者の集計を突き合わせる。
    pub async fn run<D>(&self, decider: D) -> PipelineResult<RunSummary>
    where
        D: OutcomeDecider + 'static,
    {
        validate_config(self.config.as_ref())?;

        let target_count = self.config.target_count();
        let started_at = Utc::now();
        let start_time = Instant::now();

        info!(target_count, "パイプラインを開始");
        self.reporter.report_started(target_count).await;

        let (ends, mut handle) = handoff_channels();
        let producer_handle = spawn_producer(
            Arc::clone(&self.config),
            decider,
            Arc::clone(&self.reporter),
            ends,
        );

        let report = run_consumer(&mut handle, target_count, self.reporter.as_ref()).await;
        // 停止要求を経ずに終わった場合もProducerが終了できるよう受信側を閉じる
        drop(handle);

        let statistics = producer_handle.await.map_err(PipelineError::task)?;

        if !report.tally.agrees_with(&statistics) {
            error!(
                produced = statistics.total_count(),
                consumed = report.tally.total(),
                "ProducerとConsumerの集計が一致しません"
            );
            return Err(PipelineError::tally_mismatch(
                statistics.total_count(),
                report.tally.total(),
            ));
        }

        let summary = RunSummary {
            target_count,
            statistics,
            verdict: Verdict::from_failed_count(statistics.failed_count()),
            tally: report.tally,
            end: report.end,
            started_at,
            finished_at: Utc::now(),
            total_processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            made = statistics.made_count(),
            failed = statistics.failed_count(),
            verdict = ?summary.verdict,
            "パイプラインが完了"
        );
        self.reporter.report_finished(&summary).await;

        Ok(summary)
    }
}
