use crate::core::{classify, export, input, itunes, playstore};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{AppId, RawCell, ScrapeResult};
use crate::utils::error::Result;
use reqwest::Client;

/// The whole batch: read identifiers, fetch each one sequentially from its
/// storefront, export the two result sets as a workbook. One HTTP request
/// per identifier, no retries, no caching.
pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawCell>> {
        input::read_identifiers(self.config.input_path())
    }

    async fn transform(&self, cells: Vec<RawCell>) -> Result<ScrapeResult> {
        let mut result = ScrapeResult::default();

        for cell in cells {
            match classify::classify(&cell) {
                Some(AppId::Numeric(id)) => {
                    tracing::info!("Working on: {}", id);
                    let record = itunes::fetch(&self.client, self.config.itunes_endpoint(), id)
                        .await?;
                    result.apple.push(record);
                }
                Some(AppId::Package(package)) => {
                    tracing::info!("Working on: {}", package);
                    let record =
                        playstore::fetch(&self.client, self.config.play_endpoint(), &package)
                            .await?;
                    result.play.push(record);
                }
                None => result.skipped += 1,
            }
        }

        Ok(result)
    }

    async fn load(&self, result: ScrapeResult) -> Result<String> {
        let buffer = export::build_workbook(&result)?;
        tracing::debug!(
            "Writing workbook ({} bytes) to {}",
            buffer.len(),
            self.config.output_path()
        );
        self.storage
            .write_file(self.config.output_path(), &buffer)
            .await?;
        Ok(self.config.output_path().to_string())
    }
}
