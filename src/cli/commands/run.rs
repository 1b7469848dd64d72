use crate::cli::Cli;
use crate::core::{PipelineReporter, RunSummary};
use crate::engine::{run_with_seed, OrderPipeline};
use crate::services::ConsoleReporter;
use anyhow::{Context, Result};

/// コマンドライン引数に従って1回分の実行を行う
pub async fn execute_run(cli: &Cli) -> Result<RunSummary> {
    let reporter = if cli.quiet {
        ConsoleReporter::quiet()
    } else {
        ConsoleReporter::new()
    };

    execute_run_with_reporter(cli, reporter).await
}

/// 報告先を指定して実行（テスト用に分離）
pub async fn execute_run_with_reporter<R>(cli: &Cli, reporter: R) -> Result<RunSummary>
where
    R: PipelineReporter + 'static,
{
    let pipeline = OrderPipeline::new(cli.pipeline_config(), reporter);
    let summary = run_with_seed(&pipeline, cli.seed)
        .await
        .context("パイプラインの実行に失敗しました")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("サマリーのJSON変換に失敗しました")?;
        println!("{json}");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StreamEnd;
    use crate::services::NoOpReporter;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_run_with_flags() {
        let cli = Cli::try_parse_from([
            "order_pipeline",
            "--orders",
            "2",
            "--delay-ms",
            "1",
            "--seed",
            "5",
        ])
        .unwrap();

        let summary = execute_run_with_reporter(&cli, NoOpReporter::new())
            .await
            .unwrap();

        assert_eq!(summary.target_count, 2);
        assert_eq!(summary.tally.observed, vec![1, 2]);
        assert_eq!(summary.end, StreamEnd::Acknowledged);
    }

    #[tokio::test]
    async fn test_execute_run_rejects_zero_orders() {
        let cli = Cli::try_parse_from(["order_pipeline", "--orders", "0", "--delay-ms", "1"])
            .unwrap();

        let error = execute_run_with_reporter(&cli, NoOpReporter::new())
            .await
            .unwrap_err();
        assert!(format!("{error:#}").contains("target_count"));
    }
}
