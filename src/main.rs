use anyhow::Result;
use clap::Parser;

use order_pipeline::{
    cli::{execute_run, Cli},
    services::logger_init,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger_init(&cli.logger_config())?;

    // 評価が悪い日でも終了コードは0
    execute_run(&cli).await?;

    Ok(())
}
