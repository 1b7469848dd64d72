// パイプライン専用のカスタムエラー型定義
// 注文の失敗はドメインデータであり、ここには含まれない

use thiserror::Error;

/// 停止ハンドシェイクのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShutdownError {
    #[error("停止要求は既に送信済みです")]
    AlreadyRequested,

    #[error("Producerは既に終了しています")]
    ProducerGone,

    #[error("停止確認を受け取る前に確認チャンネルが閉じられました")]
    AcknowledgementDropped,

    #[error("Producerが停止処理に失敗しました: {0}")]
    Producer(String),
}

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {field} - {reason}")]
    ConfigurationError { field: String, reason: String },

    #[error("停止ハンドシェイクエラー: {source}")]
    ShutdownError {
        #[from]
        source: ShutdownError,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("集計不一致: Producer {produced}件 / Consumer {consumed}件")]
    TallyMismatchError { produced: u32, consumed: u32 },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 集計不一致エラーの作成
    pub fn tally_mismatch(produced: u32, consumed: u32) -> Self {
        Self::TallyMismatchError { produced, consumed }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::ShutdownError { .. } => ErrorSeverity::Low,
            Self::TaskError { .. } => ErrorSeverity::High,
            Self::TallyMismatchError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 処理を続行できるエラーか
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ShutdownError { .. })
    }
}

/// エラーの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// パイプライン処理の結果型
pub type PipelineResult<T> = Result<T, PipelineError>;
