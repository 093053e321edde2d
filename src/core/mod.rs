pub mod classify;
pub mod etl;
pub mod export;
pub mod input;
pub mod itunes;
pub mod pipeline;
pub mod playstore;

pub use crate::domain::model::{AppId, RawCell, ScrapeResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

/// Ratings are reported to two decimal places in both storefront schemas.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
