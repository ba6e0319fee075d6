use anyhow::Result;

use aws_sns_slack::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    CliApp::run().await
}
