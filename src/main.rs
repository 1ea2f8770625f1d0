use anyhow::Result;
use clap::Parser;

use deepreport_rs::cli::Args;
use deepreport_rs::launch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let industry = args.industry.clone();
    let config = args.into_config();

    launch(config, &industry).await
}
