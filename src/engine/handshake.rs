// Handshake - 注文チャンネルと停止要求チャンネル
//
// 注文は受領通知用のoneshotと組で送られ、Producerは受領されるまで次へ進まない。
// 停止要求は確認用のoneshotチャンネルを運ぶ。Producerは注文チャンネルを閉じてから
// 確認を一度だけ返す。

use crate::core::{Item, ShutdownError};
use tokio::sync::{mpsc, oneshot};

/// 停止確認の送信口（停止要求として送られる）
pub type ShutdownAck = oneshot::Sender<Result<(), ShutdownError>>;

/// 注文と受領通知の組
pub(crate) struct Handoff {
    item: Item,
    receipt: oneshot::Sender<()>,
}

/// 受け渡し相手のConsumerが既に居ない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerGone;

/// Producer側の注文送信口
pub struct ItemSender {
    tx: mpsc::Sender<Handoff>,
}

impl ItemSender {
    /// 注文を渡し、Consumerが受け取るまで待つ
    pub async fn hand_over(&self, item: Item) -> Result<(), ConsumerGone> {
        self.prepare(item).complete().await
    }

    /// 受け渡しを準備する（停止要求と競合させる場合に使う）
    pub fn prepare(&self, item: Item) -> PendingHandoff<'_> {
        let (receipt, receipt_rx) = oneshot::channel();
        PendingHandoff {
            tx: &self.tx,
            handoff: Some(Handoff { item, receipt }),
            receipt_rx,
        }
    }
}

/// 受領待ちの受け渡し
///
/// `complete` が途中で破棄されても、受領済みかどうかは `was_received` で確認できる。
pub struct PendingHandoff<'a> {
    tx: &'a mpsc::Sender<Handoff>,
    handoff: Option<Handoff>,
    receipt_rx: oneshot::Receiver<()>,
}

impl PendingHandoff<'_> {
    pub async fn complete(&mut self) -> Result<(), ConsumerGone> {
        if let Some(handoff) = self.handoff.take() {
            self.tx.send(handoff).await.map_err(|_| ConsumerGone)?;
        }
        (&mut self.receipt_rx).await.map_err(|_| ConsumerGone)
    }

    pub fn was_received(&mut self) -> bool {
        self.receipt_rx.try_recv().is_ok()
    }
}

/// Producer側が所有するチャンネル端
pub struct ProducerEnds {
    pub(crate) item_tx: ItemSender,
    pub(crate) quit_rx: mpsc::Receiver<ShutdownAck>,
}

/// Consumer側が所有するチャンネル端
pub struct ProducerHandle {
    item_rx: mpsc::Receiver<Handoff>,
    quit_tx: Option<mpsc::Sender<ShutdownAck>>,
}

/// 注文チャンネルと停止要求チャンネルを作成
///
/// tokioのmpscは容量0を持てないため容量1で作成し、受領通知で同期を取る。
pub fn handoff_channels() -> (ProducerEnds, ProducerHandle) {
    let (item_tx, item_rx) = mpsc::channel::<Handoff>(1);
    let (quit_tx, quit_rx) = mpsc::channel::<ShutdownAck>(1);

    (
        ProducerEnds {
            item_tx: ItemSender { tx: item_tx },
            quit_rx,
        },
        ProducerHandle {
            item_rx,
            quit_tx: Some(quit_tx),
        },
    )
}

impl ProducerHandle {
    /// 次の注文を受信し、受領を通知する（チャンネルが閉じられた場合はNone）
    pub async fn recv(&mut self) -> Option<Item> {
        while let Some(Handoff { item, receipt }) = self.item_rx.recv().await {
            // 受領を返せない注文はProducerが送信を取り下げたもの
            if receipt.send(()).is_ok() {
                return Some(item);
            }
        }
        None
    }

    /// 停止要求を送信し、Producerの確認を待つ
    ///
    /// 要求は一度だけ。2回目以降は待機せずに `AlreadyRequested` を返す。
    pub async fn request_shutdown(&mut self) -> Result<(), ShutdownError> {
        let quit_tx = self
            .quit_tx
            .take()
            .ok_or(ShutdownError::AlreadyRequested)?;

        let (ack_tx, ack_rx) = oneshot::channel();
        quit_tx
            .send(ack_tx)
            .await
            .map_err(|_| ShutdownError::ProducerGone)?;

        ack_rx
            .await
            .map_err(|_| ShutdownError::AcknowledgementDropped)?
    }

    pub fn shutdown_requested(&self) -> bool {
        self.quit_tx.is_none()
    }

    /// 故障注入テスト用: 一度きりの制約を経由しない送信口
    #[cfg(test)]
    pub(crate) fn raw_quit_sender(&self) -> Option<mpsc::Sender<ShutdownAck>> {
        self.quit_tx.clone()
    }
}
