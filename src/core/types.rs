// パイプラインで扱うデータ型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 失敗の種類（ドメイン上の失敗であり、エラーではない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// リソース不足による失敗（クラスA）
    ResourceExhausted,
    /// ワーカー中断による失敗（クラスB）
    WorkerAborted,
}

/// 1件の注文の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure(FailureKind),
}

impl Outcome {
    /// 結果に対応するステータスメッセージを生成
    pub fn status_message(&self, sequence_number: u32) -> String {
        match self {
            Self::Success => format!("item #{sequence_number} ready"),
            Self::Failure(FailureKind::ResourceExhausted) => {
                format!("resource exhausted for item #{sequence_number}")
            }
            Self::Failure(FailureKind::WorkerAborted) => {
                format!("worker aborted item #{sequence_number}")
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// 抽選値から結果を決める閾値
///
/// `roll <= resource_exhausted_max` ならクラスA、
/// `roll <= worker_aborted_max` ならクラスB、それ以外は成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeThresholds {
    pub resource_exhausted_max: u32,
    pub worker_aborted_max: u32,
}

impl OutcomeThresholds {
    pub fn new(resource_exhausted_max: u32, worker_aborted_max: u32) -> Self {
        Self {
            resource_exhausted_max,
            worker_aborted_max,
        }
    }

    /// 抽選値を結果に分類（純粋関数）
    pub fn classify(&self, roll: u32) -> Outcome {
        if roll <= self.resource_exhausted_max {
            Outcome::Failure(FailureKind::ResourceExhausted)
        } else if roll <= self.worker_aborted_max {
            Outcome::Failure(FailureKind::WorkerAborted)
        } else {
            Outcome::Success
        }
    }
}

impl Default for OutcomeThresholds {
    fn default() -> Self {
        Self::new(2, 4)
    }
}

/// チャンネルで受け渡される注文
///
/// 生成後は不変。所有権はProducerからConsumerへ移動する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    sequence_number: u32,
    status_message: String,
    succeeded: bool,
}

impl Item {
    pub fn from_outcome(sequence_number: u32, outcome: Outcome) -> Self {
        Self {
            sequence_number,
            status_message: outcome.status_message(sequence_number),
            succeeded: outcome.is_success(),
        }
    }

    /// 終端を示す番兵（目標件数+1の番号、空メッセージ）
    pub fn sentinel(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            status_message: String::new(),
            succeeded: false,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// 目標件数を超えた番号か（= 番兵か）
    pub fn is_beyond(&self, target_count: u32) -> bool {
        self.sequence_number > target_count
    }
}

/// Producer側の集計
///
/// Producerタスクが単独で所有し、join後に値として引き渡される。
/// 常に `total_count == made_count + failed_count` を満たす。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    made_count: u32,
    failed_count: u32,
    total_count: u32,
}

impl RunStatistics {
    pub fn record(&mut self, succeeded: bool) {
        if succeeded {
            self.made_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.total_count += 1;
    }

    pub fn made_count(&self) -> u32 {
        self.made_count
    }

    pub fn failed_count(&self) -> u32 {
        self.failed_count
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }
}

/// Consumer側の集計（Producerの集計とは独立）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerTally {
    pub delivered: u32,
    pub spoiled: u32,
    /// 受信した順の通し番号
    pub observed: Vec<u32>,
}

impl ConsumerTally {
    pub fn record(&mut self, item: &Item) {
        if item.succeeded() {
            self.delivered += 1;
        } else {
            self.spoiled += 1;
        }
        self.observed.push(item.sequence_number());
    }

    pub fn total(&self) -> u32 {
        self.delivered + self.spoiled
    }

    /// Producer側の集計と一致するか
    pub fn agrees_with(&self, statistics: &RunStatistics) -> bool {
        self.delivered == statistics.made_count()
            && self.spoiled == statistics.failed_count()
            && self.total() == statistics.total_count()
    }
}

/// ストリームの終わり方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEnd {
    /// 番兵を受信し、停止要求が確認された
    Acknowledged,
    /// 番兵を受信したが、停止の確認に失敗した（警告扱い）
    AcknowledgementFailed(String),
    /// 番兵より先にチャンネルが閉じられた
    ClosedEarly,
}

/// Consumerループの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerReport {
    pub tally: ConsumerTally,
    pub end: StreamEnd,
}

/// 失敗件数から決まる一日の評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Awful,
    NotVeryGood,
    Okay,
    PrettyGood,
    Great,
}

impl Verdict {
    /// 失敗件数のみから決まる決定的な評価
    pub fn from_failed_count(failed_count: u32) -> Self {
        match failed_count {
            0..=1 => Self::Great,
            2..=3 => Self::PrettyGood,
            4..=5 => Self::Okay,
            6..=9 => Self::NotVeryGood,
            _ => Self::Awful,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Awful => "It was an awful day...",
            Self::NotVeryGood => "It was not a very good day...",
            Self::Okay => "It was an okay day.",
            Self::PrettyGood => "It was a pretty good day!",
            Self::Great => "It was a great day!",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// 1回の実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub target_count: u32,
    pub statistics: RunStatistics,
    pub tally: ConsumerTally,
    pub end: StreamEnd,
    pub verdict: Verdict,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let thresholds = OutcomeThresholds::default();

        assert_eq!(
            thresholds.classify(0),
            Outcome::Failure(FailureKind::ResourceExhausted)
        );
        assert_eq!(
            thresholds.classify(2),
            Outcome::Failure(FailureKind::ResourceExhausted)
        );
        assert_eq!(
            thresholds.classify(3),
            Outcome::Failure(FailureKind::WorkerAborted)
        );
        assert_eq!(
            thresholds.classify(4),
            Outcome::Failure(FailureKind::WorkerAborted)
        );
        assert_eq!(thresholds.classify(5), Outcome::Success);
        assert_eq!(thresholds.classify(12), Outcome::Success);
    }

    #[test]
    fn test_item_messages() {
        let ready = Item::from_outcome(7, Outcome::Success);
        assert_eq!(ready.status_message(), "item #7 ready");
        assert!(ready.succeeded());

        let exhausted = Item::from_outcome(3, Outcome::Failure(FailureKind::ResourceExhausted));
        assert_eq!(exhausted.status_message(), "resource exhausted for item #3");
        assert!(!exhausted.succeeded());

        let aborted = Item::from_outcome(4, Outcome::Failure(FailureKind::WorkerAborted));
        assert_eq!(aborted.status_message(), "worker aborted item #4");
        assert!(!aborted.succeeded());
    }

    #[test]
    fn test_sentinel_is_beyond_target() {
        let sentinel = Item::sentinel(11);

        assert!(sentinel.is_beyond(10));
        assert!(sentinel.status_message().is_empty());
        assert!(!sentinel.succeeded());
        assert!(!Item::from_outcome(10, Outcome::Success).is_beyond(10));
    }

    #[test]
    fn test_run_statistics_invariant() {
        let mut stats = RunStatistics::default();
        for succeeded in [true, false, false, true, true] {
            stats.record(succeeded);
            assert_eq!(
                stats.total_count(),
                stats.made_count() + stats.failed_count()
            );
        }

        assert_eq!(stats.made_count(), 3);
        assert_eq!(stats.failed_count(), 2);
        assert_eq!(stats.total_count(), 5);
    }

    #[test]
    fn test_consumer_tally_agrees_with_statistics() {
        let items = [
            Item::from_outcome(1, Outcome::Success),
            Item::from_outcome(2, Outcome::Failure(FailureKind::WorkerAborted)),
        ];

        let mut tally = ConsumerTally::default();
        let mut stats = RunStatistics::default();
        for item in &items {
            tally.record(item);
            stats.record(item.succeeded());
        }

        assert!(tally.agrees_with(&stats));
        assert_eq!(tally.observed, vec![1, 2]);

        stats.record(true);
        assert!(!tally.agrees_with(&stats));
    }

    #[test]
    fn test_verdict_buckets() {
        assert_eq!(Verdict::from_failed_count(0), Verdict::Great);
        assert_eq!(Verdict::from_failed_count(1), Verdict::Great);
        assert_eq!(Verdict::from_failed_count(2), Verdict::PrettyGood);
        assert_eq!(Verdict::from_failed_count(3), Verdict::PrettyGood);
        assert_eq!(Verdict::from_failed_count(4), Verdict::Okay);
        assert_eq!(Verdict::from_failed_count(5), Verdict::Okay);
        assert_eq!(Verdict::from_failed_count(6), Verdict::NotVeryGood);
        assert_eq!(Verdict::from_failed_count(9), Verdict::NotVeryGood);
        assert_eq!(Verdict::from_failed_count(10), Verdict::Awful);
        assert_eq!(Verdict::from_failed_count(u32::MAX), Verdict::Awful);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(
            Verdict::NotVeryGood.to_string(),
            "It was not a very good day..."
        );
        assert_eq!(Verdict::from_failed_count(9).to_string(), "It was not a very good day...");
        assert_eq!(Verdict::Great.to_string(), "It was a great day!");
    }
}
