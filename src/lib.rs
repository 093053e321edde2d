pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{etl::EtlEngine, pipeline::ScrapePipeline};
pub use domain::model::{AppleRecord, AuthorUrl, PlayRecord, RawCell, ScrapeResult};
pub use utils::error::{EtlError, Result};
