use crate::services::{DefaultPipelineConfig, LoggerConfig, LoggerFormat, DEFAULT_TARGET_COUNT};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "order_pipeline")]
#[command(about = "Runs a producer-consumer order pipeline and reports how the day went")]
#[command(version)]
pub struct Cli {
    /// Number of orders to make
    #[arg(short = 'n', long, default_value_t = DEFAULT_TARGET_COUNT)]
    pub orders: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Length of one unit of simulated work in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Log filter directive (e.g. "info", "order_pipeline=debug")
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    pub log_format: LoggerFormat,

    /// Print the run summary as JSON when finished
    #[arg(long)]
    pub json: bool,

    /// Suppress per-order narration
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> DefaultPipelineConfig {
        DefaultPipelineConfig::new(self.orders)
            .with_delay_unit(Duration::from_millis(self.delay_ms))
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            ..LoggerConfig::default()
        }
    }
}
