pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "app-scraper")]
#[command(about = "Enrich app-store identifiers with storefront metadata")]
pub struct CliConfig {
    /// Tabular input file (.xlsx or .csv) with a 'site' identifier column
    pub input: String,

    /// Output workbook path
    #[arg(default_value = "AppScraper_Output.xlsx")]
    pub output: String,

    #[arg(long, default_value = "https://itunes.apple.com/lookup")]
    pub itunes_endpoint: String,

    #[arg(long, default_value = "https://play.google.com/store/apps/details")]
    pub play_endpoint: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn itunes_endpoint(&self) -> &str {
        &self.itunes_endpoint
    }

    fn play_endpoint(&self) -> &str {
        &self.play_endpoint
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_url("itunes_endpoint", &self.itunes_endpoint)?;
        validate_url("play_endpoint", &self.play_endpoint)?;
        Ok(())
    }
}
