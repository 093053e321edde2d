use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();

        tracing::info!("Reading identifiers...");
        let cells = self.pipeline.extract().await?;
        tracing::info!("Read {} identifiers", cells.len());

        let result = self.pipeline.transform(cells).await?;
        tracing::info!(
            "Scraped {} Apple and {} Google records ({} skipped)",
            result.apple.len(),
            result.play.len(),
            result.skipped
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        tracing::info!("{:.6} seconds", started.elapsed().as_secs_f64());

        Ok(output_path)
    }
}
