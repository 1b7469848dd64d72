// 進行状況報告の具象実装

use crate::core::{Item, PipelineReporter, RunSummary};
use async_trait::async_trait;
use colored::Colorize;
use std::sync::{Arc, Mutex};

/// コンソール出力による報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件ごとの進行表示を抑止（サマリーのみ表示）
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl PipelineReporter for ConsoleReporter {
    async fn report_started(&self, target_count: u32) {
        println!("{}", "The Order Pipeline is open for business!".cyan());
        println!("{}", "----------------------------------------".cyan());
        if !self.quiet {
            println!("Expecting {target_count} orders today.");
        }
    }

    async fn report_received(&self, sequence_number: u32) {
        if !self.quiet {
            println!("Received order #{sequence_number}!");
        }
    }

    async fn report_making(&self, sequence_number: u32, delay: u32) {
        if !self.quiet {
            println!("Making order #{sequence_number}. It will take {delay} seconds....");
        }
    }

    async fn report_delivered(&self, item: &Item) {
        if !self.quiet {
            println!("{}", item.status_message().green());
            println!(
                "{}",
                format!("Order #{} is out for delivery!", item.sequence_number()).green()
            );
        }
    }

    async fn report_spoiled(&self, item: &Item) {
        if !self.quiet {
            println!("{}", item.status_message().red());
            println!("{}", "The customer is really mad!".red());
        }
    }

    async fn report_warning(&self, message: &str) {
        eprintln!("{}", format!("⚠️  {message}").yellow());
    }

    async fn report_finished(&self, summary: &RunSummary) {
        let statistics = &summary.statistics;
        println!("{}", "----------------------------------------".cyan());
        println!("{}", "Done making orders for today.".cyan());
        println!(
            "We made {} orders, but failed to make {}, with {} attempts in total.",
            statistics.made_count(),
            statistics.failed_count(),
            statistics.total_count()
        );

        let verdict = summary.verdict.message();
        if statistics.failed_count() > 5 {
            println!("{}", verdict.red());
        } else {
            println!("{}", verdict.green());
        }
    }
}

/// 何もしない報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineReporter for NoOpReporter {
    async fn report_started(&self, _target_count: u32) {
        // 何もしない
    }

    async fn report_received(&self, _sequence_number: u32) {
        // 何もしない
    }

    async fn report_making(&self, _sequence_number: u32, _delay: u32) {
        // 何もしない
    }

    async fn report_delivered(&self, _item: &Item) {
        // 何もしない
    }

    async fn report_spoiled(&self, _item: &Item) {
        // 何もしない
    }

    async fn report_warning(&self, _message: &str) {
        // 何もしない
    }

    async fn report_finished(&self, _summary: &RunSummary) {
        // 何もしない
    }
}

/// 記録された報告イベント
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Started(u32),
    Received(u32),
    Making { sequence_number: u32, delay: u32 },
    Delivered(Item),
    Spoiled(Item),
    Warning(String),
    Finished(RunSummary),
}

/// 報告をメモリに記録する実装（検証用）
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みイベントのスナップショット
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ReportEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait]
impl PipelineReporter for MemoryReporter {
    async fn report_started(&self, target_count: u32) {
        self.push(ReportEvent::Started(target_count));
    }

    async fn report_received(&self, sequence_number: u32) {
        self.push(ReportEvent::Received(sequence_number));
    }

    async fn report_making(&self, sequence_number: u32, delay: u32) {
        self.push(ReportEvent::Making {
            sequence_number,
            delay,
        });
    }

    async fn report_delivered(&self, item: &Item) {
        self.push(ReportEvent::Delivered(item.clone()));
    }

    async fn report_spoiled(&self, item: &Item) {
        self.push(ReportEvent::Spoiled(item.clone()));
    }

    async fn report_warning(&self, message: &str) {
        self.push(ReportEvent::Warning(message.to_string()));
    }

    async fn report_finished(&self, summary: &RunSummary) {
        self.push(ReportEvent::Finished(summary.clone()));
    }
}
