use app_scraper::utils::{logger, validation::Validate};
use app_scraper::{CliConfig, EtlEngine, LocalStorage, ScrapePipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting app-scraper");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Usage: app-scraper <input.xlsx|input.csv> [output.xlsx]");
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = ScrapePipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
