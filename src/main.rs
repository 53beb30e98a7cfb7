use chat_relay::cli::Cli;
use clap::Parser;
use std::error::Error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    chat_relay::init_tracing();
    info!("Starting chat relay");

    chat_relay::run(cli).await
}
