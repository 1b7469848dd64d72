// Producer - 注文生成と停止要求への応答

use super::handshake::{ConsumerGone, ItemSender, ProducerEnds, ShutdownAck};
use crate::{
    core::{Item, OutcomeDecider, PipelineConfig, PipelineReporter, RunStatistics},
    services::outcome::OrderWork,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 受け渡しと停止要求の競合結果
enum Race {
    Sent(Result<(), ConsumerGone>),
    Quit(Option<ShutdownAck>),
}

/// Producer: 1..=N の注文を生成して送信し、最後に番兵を送って停止要求を待つ
///
/// 集計はConsumerが受領した時点で記録し、停止後にJoinHandle経由で返す。
pub fn spawn_producer<C, D, R>(
    config: Arc<C>,
    mut decider: D,
    reporter: Arc<R>,
    ends: ProducerEnds,
) -> tokio::task::JoinHandle<RunStatistics>
where
    C: PipelineConfig + 'static,
    D: OutcomeDecider + 'static,
    R: PipelineReporter + 'static,
{
    tokio::spawn(async move {
        let ProducerEnds {
            item_tx,
            mut quit_rx,
        } = ends;
        let target_count = config.target_count();
        let delay_unit = config.delay_unit();
        let mut statistics = RunStatistics::default();
        let mut cursor: u32 = 0;

        loop {
            cursor += 1;
            if cursor > target_count {
                break;
            }

            reporter.report_received(cursor).await;
            let work = OrderWork::draw(cursor, config.as_ref(), &mut decider);
            reporter.report_making(cursor, work.delay()).await;
            let item = work.perform(delay_unit).await;
            let succeeded = item.succeeded();

            // 受け渡し中も停止要求を監視（どちらが先かは非決定的）
            let mut pending = item_tx.prepare(item);
            let race = tokio::select! {
                sent = pending.complete() => Race::Sent(sent),
                request = quit_rx.recv() => Race::Quit(request),
            };

            match race {
                Race::Sent(Ok(())) => {
                    statistics.record(succeeded);
                    debug!(sequence_number = cursor, succeeded, "注文を受け渡し");
                }
                Race::Sent(Err(_)) => {
                    debug!(sequence_number = cursor, "Consumerが受信を終了したためProducerを終了");
                    return statistics;
                }
                Race::Quit(request) => {
                    // 受領と停止要求が同時に揃った場合も集計は受領に合わせる
                    if pending.was_received() {
                        statistics.record(succeeded);
                    }
                    drop(pending);
                    return finish(item_tx, request, statistics);
                }
            }
        }

        // 番兵（N+1）は作業なしで送信
        let race = tokio::select! {
            sent = item_tx.hand_over(Item::sentinel(cursor)) => Race::Sent(sent),
            request = quit_rx.recv() => Race::Quit(request),
        };

        let request = match race {
            Race::Sent(Ok(())) => quit_rx.recv().await,
            Race::Sent(Err(_)) => {
                debug!("番兵の送信前にConsumerが受信を終了しました");
                return statistics;
            }
            Race::Quit(request) => request,
        };

        finish(item_tx, request, statistics)
    })
}

/// 注文チャンネルを閉じてから停止確認を返す
fn finish(
    item_tx: ItemSender,
    request: Option<ShutdownAck>,
    statistics: RunStatistics,
) -> RunStatistics {
    drop(item_tx);

    match request {
        Some(ack) => {
            if ack.send(Ok(())).is_err() {
                warn!("停止確認の受信側が既に閉じられています");
            }
            info!(
                made = statistics.made_count(),
                failed = statistics.failed_count(),
                total = statistics.total_count(),
                "Producerを停止しました"
            );
        }
        None => debug!("停止要求チャンネルが閉じられたためProducerを終了"),
    }

    statistics
}
