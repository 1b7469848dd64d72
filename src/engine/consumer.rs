// Consumer - 注文の受信、集計、停止要求

use super::handshake::ProducerHandle;
use crate::core::{ConsumerReport, ConsumerTally, PipelineReporter, StreamEnd};
use tracing::{debug, warn};

/// Consumer: 番兵を受信するまで注文を集計し、停止要求を送って確認を待つ
///
/// 停止要求の後は注文チャンネルから読まない。
/// 確認の失敗は警告として報告し、処理は続行する。
pub async fn run_consumer<R>(
    handle: &mut ProducerHandle,
    target_count: u32,
    reporter: &R,
) -> ConsumerReport
where
    R: PipelineReporter + ?Sized,
{
    let mut tally = ConsumerTally::default();

    while let Some(item) = handle.recv().await {
        if item.is_beyond(target_count) {
            debug!(
                sequence_number = item.sequence_number(),
                "番兵を受信、停止要求を送信"
            );

            let end = match handle.request_shutdown().await {
                Ok(()) => StreamEnd::Acknowledged,
                Err(error) => {
                    warn!(%error, "Producerの停止確認に失敗しました");
                    reporter
                        .report_warning(&format!("shutdown was not acknowledged cleanly: {error}"))
                        .await;
                    StreamEnd::AcknowledgementFailed(error.to_string())
                }
            };

            return ConsumerReport { tally, end };
        }

        if item.succeeded() {
            reporter.report_delivered(&item).await;
        } else {
            reporter.report_spoiled(&item).await;
        }
        tally.record(&item);
    }

    debug!(received = tally.total(), "番兵の前に注文チャンネルが閉じられました");
    ConsumerReport {
        tally,
        end: StreamEnd::ClosedEarly,
    }
}
