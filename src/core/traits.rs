// パイプラインのトレイト定義
// 全ての抽象化インターフェースを定義

use super::types::{Item, OutcomeThresholds, RunSummary};
use async_trait::async_trait;
use mockall::automock;
use std::ops::RangeInclusive;
use std::time::Duration;

/// パイプライン設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// 目標注文数（N）
    fn target_count(&self) -> u32;

    /// 作業時間の抽選範囲（単位数）
    fn delay_range(&self) -> RangeInclusive<u32>;

    /// 結果抽選値の範囲
    fn roll_range(&self) -> RangeInclusive<u32>;

    /// 結果分類の閾値
    fn thresholds(&self) -> OutcomeThresholds;

    /// 作業時間1単位の長さ
    fn delay_unit(&self) -> Duration;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn target_count(&self) -> u32 {
        self.as_ref().target_count()
    }

    fn delay_range(&self) -> RangeInclusive<u32> {
        self.as_ref().delay_range()
    }

    fn roll_range(&self) -> RangeInclusive<u32> {
        self.as_ref().roll_range()
    }

    fn thresholds(&self) -> OutcomeThresholds {
        self.as_ref().thresholds()
    }

    fn delay_unit(&self) -> Duration {
        self.as_ref().delay_unit()
    }
}

/// 乱数による判定を差し替え可能にするトレイト
///
/// テストでは固定値を返す実装を注入して結果を決定的にする。
#[automock]
pub trait OutcomeDecider: Send {
    /// 作業時間（単位数）を範囲内から抽選
    fn draw_delay(&mut self, range: RangeInclusive<u32>) -> u32;

    /// 結果抽選値を範囲内から抽選
    fn draw_roll(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// 進行状況の報告を抽象化するトレイト
#[automock]
#[async_trait]
pub trait PipelineReporter: Send + Sync {
    /// 実行開始時の報告
    async fn report_started(&self, target_count: u32);

    /// 注文受付の報告（Producer側）
    async fn report_received(&self, sequence_number: u32);

    /// 注文作成開始の報告（Producer側）
    async fn report_making(&self, sequence_number: u32, delay: u32);

    /// 成功した注文の報告（Consumer側）
    async fn report_delivered(&self, item: &Item);

    /// 失敗した注文の報告（Consumer側）
    async fn report_spoiled(&self, item: &Item);

    /// 致命的でない問題の報告
    async fn report_warning(&self, message: &str);

    /// 実行完了時の報告
    async fn report_finished(&self, summary: &RunSummary);
}

// PipelineReporter for Box<dyn PipelineReporter>
#[async_trait]
impl PipelineReporter for Box<dyn PipelineReporter> {
    async fn report_started(&self, target_count: u32) {
        self.as_ref().report_started(target_count).await
    }

    async fn report_received(&self, sequence_number: u32) {
        self.as_ref().report_received(sequence_number).await
    }

    async fn report_making(&self, sequence_number: u32, delay: u32) {
        self.as_ref().report_making(sequence_number, delay).await
    }

    async fn report_delivered(&self, item: &Item) {
        self.as_ref().report_delivered(item).await
    }

    async fn report_spoiled(&self, item: &Item) {
        self.as_ref().report_spoiled(item).await
    }

    async fn report_warning(&self, message: &str) {
        self.as_ref().report_warning(message).await
    }

    async fn report_finished(&self, summary: &RunSummary) {
        self.as_ref().report_finished(summary).await
    }
}
