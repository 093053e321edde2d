use serde::Serialize;

/// Placeholder rendered into spreadsheet cells for fields that could not be
/// extracted. Missing values are `None` in the typed records below and only
/// become this string at export time.
pub const NOT_AVAILABLE: &str = "N/A";

/// One raw cell from the identifier column of the input file, before routing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Integer cell: an iTunes track id.
    Int(i64),
    /// Text cell: a Play-Store package name.
    Text(String),
    /// Anything else (fractional number, empty cell, bool). Reported as a
    /// classification failure and dropped from both result sets.
    Other(String),
}

/// A classified identifier, routed to exactly one storefront extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum AppId {
    Numeric(i64),
    Package(String),
}

/// Metadata extracted for one iTunes track id. Every field is part of the
/// schema for every record; `None` marks a field the lookup did not provide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppleRecord {
    pub id: i64,
    pub app_name: Option<String>,
    pub author: Option<String>,
    pub seller: Option<String>,
    pub link: Option<String>,
    pub age_rating: Option<String>,
    pub languages: Option<Vec<String>>,
    /// Derived: whether the language-code list contains "EN". Carried on the
    /// record but not an output column.
    pub english: Option<bool>,
    pub rate_reasons: Option<Vec<String>>,
    pub author_url: Option<String>,
    pub star_rating: Option<f64>,
    pub rating_volume: Option<i64>,
    /// Already reformatted to MM/DD/YYYY.
    pub last_update: Option<String>,
    pub category: Option<String>,
}

impl AppleRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Outcome of the developer-link parse, an ordered fallback chain. The final
/// tier is distinguishable from a legitimately absent link (which is `None`
/// on the record).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AuthorUrl {
    /// Host extracted from the dev-link href.
    Host(String),
    /// Structural split failed; raw anchor text.
    LinkText(String),
    /// Link present but unusable either way.
    Unparseable,
}

impl AuthorUrl {
    pub fn as_cell(&self) -> &str {
        match self {
            AuthorUrl::Host(s) | AuthorUrl::LinkText(s) => s,
            AuthorUrl::Unparseable => "Error",
        }
    }
}

/// Metadata scraped from one Play-Store app page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayRecord {
    pub id: String,
    pub app_name: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<AuthorUrl>,
    pub link: Option<String>,
    /// Already reformatted to MM/DD/YYYY.
    pub last_update: Option<String>,
    pub download_range: Option<String>,
    pub star_rating: Option<f64>,
    pub rating_volume: Option<i64>,
    pub age_rating: Option<String>,
    pub rate_reason: Option<String>,
    pub top_developer: Option<String>,
    pub ad_supported: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

impl PlayRecord {
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// The two ordered result sets, accumulated in input order, plus the number
/// of rows dropped by classification.
#[derive(Debug, Default)]
pub struct ScrapeResult {
    pub apple: Vec<AppleRecord>,
    pub play: Vec<PlayRecord>,
    pub skipped: usize,
}
