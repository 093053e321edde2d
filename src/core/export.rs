//! Workbook exporter: one sheet per storefront with a fixed column order,
//! skipping (with a warning) any storefront that produced no records.

use crate::domain::model::{AppleRecord, PlayRecord, ScrapeResult, NOT_AVAILABLE};
use crate::utils::error::Result;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

pub const APPLE_SHEET: &str = "Apple_Apps";
pub const GOOGLE_SHEET: &str = "Google_Apps";

const APPLE_COLUMNS: [&str; 13] = [
    "App.iOS.Raw.ID",
    "App.iOS.Raw.Author",
    "App.iOS.Raw.AuthorURL",
    "App.iOS.Raw.CategoryString",
    "App.iOS.Raw.AgeRating",
    "App.iOS.Raw.Language",
    "App.iOS.Raw.LastUpdate",
    "App.iOS.Raw.RateReasonString",
    "App.iOS.Raw.RatingVolume",
    "App.iOS.Raw.StarRating",
    "App.iOS.Raw.Seller",
    "App.iOS.Raw.AppName",
    "App.iOS.Raw.Link",
];

const GOOGLE_COLUMNS: [&str; 15] = [
    "App.Android.Raw.ID",
    "App.Android.Raw.AdSupported",
    "App.Android.Raw.Author",
    "App.Android.Raw.AuthorURL",
    "App.Android.Raw.ContentCategory",
    "App.Android.Raw.AgeRating",
    "App.Android.Raw.DownloadRange",
    "App.Android.Raw.LastUpdate",
    "App.Android.Raw.Seller",
    "App.Android.Raw.RatingReasonString",
    "App.Android.Raw.RatingVolume",
    "App.Android.Raw.StarRating",
    "App.Android.Raw.AppName",
    "App.Android.Raw.TopDeveloper",
    "App.Android.Raw.Link",
];

/// Build the output workbook in memory. An empty workbook (both result sets
/// empty) is still produced so the invocation always yields an output file.
pub fn build_workbook(result: &ScrapeResult) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut sheets_written = 0;

    if result.apple.is_empty() {
        tracing::warn!("No Apple ID provided. No Apple sheet will be provided");
    } else {
        let sheet = workbook.add_worksheet();
        sheet.set_name(APPLE_SHEET)?;
        write_header(sheet, &APPLE_COLUMNS)?;
        for (i, record) in result.apple.iter().enumerate() {
            write_apple_row(sheet, i as u32 + 1, record)?;
        }
        sheets_written += 1;
    }

    if result.play.is_empty() {
        tracing::warn!("No Google ID provided. No Google sheet will be provided");
    } else {
        let sheet = workbook.add_worksheet();
        sheet.set_name(GOOGLE_SHEET)?;
        write_header(sheet, &GOOGLE_COLUMNS)?;
        for (i, record) in result.play.iter().enumerate() {
            write_play_row(sheet, i as u32 + 1, record)?;
        }
        sheets_written += 1;
    }

    // A valid workbook needs at least one sheet even when both storefronts
    // came up empty.
    if sheets_written == 0 {
        workbook.add_worksheet();
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> std::result::Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

fn write_apple_row(
    sheet: &mut Worksheet,
    row: u32,
    record: &AppleRecord,
) -> std::result::Result<(), XlsxError> {
    sheet.write_number(row, 0, record.id as f64)?;
    write_text(sheet, row, 1, record.author.as_deref())?;
    write_text(sheet, row, 2, record.author_url.as_deref())?;
    write_text(sheet, row, 3, record.category.as_deref())?;
    write_text(sheet, row, 4, record.age_rating.as_deref())?;
    write_text(sheet, row, 5, record.languages.as_ref().map(join).as_deref())?;
    write_text(sheet, row, 6, record.last_update.as_deref())?;
    write_text(
        sheet,
        row,
        7,
        record.rate_reasons.as_ref().map(join).as_deref(),
    )?;
    write_int(sheet, row, 8, record.rating_volume)?;
    write_number(sheet, row, 9, record.star_rating)?;
    write_text(sheet, row, 10, record.seller.as_deref())?;
    write_text(sheet, row, 11, record.app_name.as_deref())?;
    write_text(sheet, row, 12, record.link.as_deref())?;
    Ok(())
}

fn write_play_row(
    sheet: &mut Worksheet,
    row: u32,
    record: &PlayRecord,
) -> std::result::Result<(), XlsxError> {
    sheet.write_string(row, 0, &record.id)?;
    write_text(sheet, row, 1, record.ad_supported.as_deref())?;
    write_text(sheet, row, 2, record.author.as_deref())?;
    write_text(
        sheet,
        row,
        3,
        record.author_url.as_ref().map(|u| u.as_cell()),
    )?;
    write_text(sheet, row, 4, record.category.as_deref())?;
    write_text(sheet, row, 5, record.age_rating.as_deref())?;
    write_text(sheet, row, 6, record.download_range.as_deref())?;
    write_text(sheet, row, 7, record.last_update.as_deref())?;
    write_text(sheet, row, 8, record.seller.as_deref())?;
    write_text(sheet, row, 9, record.rate_reason.as_deref())?;
    write_int(sheet, row, 10, record.rating_volume)?;
    write_number(sheet, row, 11, record.star_rating)?;
    write_text(sheet, row, 12, record.app_name.as_deref())?;
    write_text(sheet, row, 13, record.top_developer.as_deref())?;
    write_text(sheet, row, 14, record.link.as_deref())?;
    Ok(())
}

fn join(items: &Vec<String>) -> String {
    items.join(", ")
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> std::result::Result<(), XlsxError> {
    sheet.write_string(row, col, value.unwrap_or(NOT_AVAILABLE))?;
    Ok(())
}

fn write_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> std::result::Result<(), XlsxError> {
    match value {
        Some(n) => sheet.write_number(row, col, n)?,
        None => sheet.write_string(row, col, NOT_AVAILABLE)?,
    };
    Ok(())
}

fn write_int(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<i64>,
) -> std::result::Result<(), XlsxError> {
    write_number(sheet, row, col, value.map(|n| n as f64))
}
