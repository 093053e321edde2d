use crate::domain::model::{RawCell, ScrapeResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn itunes_endpoint(&self) -> &str;
    fn play_endpoint(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawCell>>;
    async fn transform(&self, cells: Vec<RawCell>) -> Result<ScrapeResult>;
    async fn load(&self, result: ScrapeResult) -> Result<String>;
}
