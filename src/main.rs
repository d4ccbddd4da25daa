mod cli;

use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse_args();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    info!("Starting grabbit ...");
    cli.run().await?;

    Ok(())
}
