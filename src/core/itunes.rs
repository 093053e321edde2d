//! iTunes lookup extractor: one GET per track id against the JSON lookup
//! endpoint, mapped field-by-field into an [`AppleRecord`].

use crate::core::round2;
use crate::domain::model::AppleRecord;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde_json::Value;

const LOOKUP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const OUTPUT_DATE_FORMAT: &str = "%m/%d/%Y";

pub async fn fetch(client: &Client, endpoint: &str, id: i64) -> Result<AppleRecord> {
    let url = format!("{}?id={}", endpoint, id);
    tracing::debug!("GET {}", url);
    let body: Value = client.get(&url).send().await?.json().await?;
    Ok(record_from_lookup(id, &body))
}

/// Map one lookup response body into a record. Pure and deterministic: the
/// same body always yields the same record. Each absent key degrades to
/// `None` individually; an empty results list leaves only the id set.
pub fn record_from_lookup(id: i64, body: &Value) -> AppleRecord {
    let mut record = AppleRecord::new(id);

    let entry = match body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
    {
        Some(entry) => entry,
        None => return record,
    };

    record.app_name = str_field(entry, "trackName");
    record.author = str_field(entry, "artistName");
    record.seller = str_field(entry, "sellerName");
    record.link = str_field(entry, "trackViewUrl");
    record.age_rating = str_field(entry, "contentAdvisoryRating");
    record.languages = str_list_field(entry, "languageCodesISO2A");
    record.english = record
        .languages
        .as_ref()
        .map(|codes| codes.iter().any(|c| c == "EN"));
    record.rate_reasons = str_list_field(entry, "advisories");
    record.author_url = str_field(entry, "sellerUrl")
        .as_deref()
        .and_then(seller_host);
    record.star_rating = entry
        .get("averageUserRating")
        .and_then(Value::as_f64)
        .map(round2);
    record.rating_volume = entry.get("userRatingCount").and_then(int_value);
    record.last_update = str_field(entry, "currentVersionReleaseDate")
        .as_deref()
        .and_then(|raw| reformat_release_date(id, raw));
    record.category = entry
        .get("genres")
        .and_then(Value::as_array)
        .and_then(|genres| genres.first())
        .and_then(Value::as_str)
        .map(str::to_owned);

    record
}

fn str_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn str_list_field(entry: &Value, key: &str) -> Option<Vec<String>> {
    entry.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

// userRatingCount is usually an integer but has been observed as a float.
fn int_value(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Everything after the second '/' of the seller URL, so
/// "https://www.example.com/app" becomes "www.example.com/app". A URL with
/// fewer segments degrades to `None` rather than aborting the record.
fn seller_host(seller_url: &str) -> Option<String> {
    let rest = seller_url.splitn(3, '/').nth(2)?;
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

fn reformat_release_date(id: i64, raw: &str) -> Option<String> {
    match NaiveDateTime::parse_from_str(raw, LOOKUP_DATE_FORMAT) {
        Ok(dt) => Some(dt.format(OUTPUT_DATE_FORMAT).to_string()),
        Err(e) => {
            tracing::warn!("Unparseable release date for {}: '{}' ({})", id, raw, e);
            None
        }
    }
}
