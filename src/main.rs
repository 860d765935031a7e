use clap::Parser;
use yubin_api::utils::{logger, validation::Validate};
use yubin_api::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    logger::init_logger(config.verbose);

    tracing::info!("starting yubin-api");
    if config.verbose {
        tracing::debug!("config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    yubin_api::server::run(&config).await?;

    Ok(())
}
