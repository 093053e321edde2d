//! Play-Store extractor: one GET per package name against the app details
//! page, with fields located by tag plus CSS class or itemprop attribute.

use crate::core::round2;
use crate::domain::model::{AuthorUrl, PlayRecord};
use crate::utils::error::Result;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const PAGE_DATE_FORMAT: &str = "%B %d, %Y";
const OUTPUT_DATE_FORMAT: &str = "%m/%d/%Y";

pub async fn fetch(client: &Client, endpoint: &str, package: &str) -> Result<PlayRecord> {
    let url = format!("{}?id={}", endpoint, package);
    tracing::debug!("GET {}", url);
    let body = client.get(&url).send().await?.text().await?;
    Ok(record_from_html(package, &body))
}

/// Extract the full field schema from one app page. Every locator that finds
/// nothing yields `None` for its field; the optional badges (top developer,
/// ads) never fail a record.
pub fn record_from_html(package: &str, html: &str) -> PlayRecord {
    let document = Html::parse_document(html);
    let mut record = PlayRecord::new(package.to_string());

    record.app_name = text_of(&document, "div.id-app-title");
    record.author = text_of(&document, r#"span[itemprop="name"]"#);
    record.link = attr_of(&document, r#"meta[itemprop="url"]"#, "content");
    record.last_update = text_of(&document, r#"div.content[itemprop="datePublished"]"#)
        .and_then(|raw| reformat_page_date(package, &raw));
    record.download_range = text_of(&document, r#"div[itemprop="numDownloads"]"#);
    record.star_rating = attr_of(&document, r#"meta[itemprop="ratingValue"]"#, "content")
        .and_then(|raw| raw.parse::<f64>().ok())
        .map(round2);
    record.rating_volume = attr_of(&document, r#"meta[itemprop="ratingCount"]"#, "content")
        .and_then(|raw| raw.parse::<i64>().ok());
    record.age_rating = text_of(&document, r#"div.content[itemprop="contentRating"]"#);
    record.rate_reason = select_first(&document, r#"div.content[itemprop="contentRating"]"#)
        .and_then(next_sibling_div)
        .map(element_text);
    record.category = text_of(&document, r#"span[itemprop="genre"]"#);
    record.top_developer = text_of(&document, "span.badge-title");
    record.ad_supported = text_of(&document, "span.ads-supported-label-msg");
    record.author_url = select_first(&document, "a.dev-link").map(author_url_from_link);
    record.seller = offered_by(&document);

    record
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).unwrap();
    document.select(&sel).next()
}

fn text_of(document: &Html, selector: &str) -> Option<String> {
    select_first(document, selector).map(element_text)
}

fn attr_of(document: &Html, selector: &str, attr: &str) -> Option<String> {
    select_first(document, selector)
        .and_then(|el| el.value().attr(attr))
        .map(str::to_owned)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn next_sibling_div<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "div")
}

/// The "Offered By" seller sits in a generic title/value pair: scan all
/// title cells for one containing "Offered" and read its adjacent sibling.
fn offered_by(document: &Html) -> Option<String> {
    let sel = Selector::parse("div.title").unwrap();
    for cell in document.select(&sel) {
        if element_text(cell).contains("Offered") {
            return next_sibling_div(cell).map(element_text);
        }
    }
    None
}

/// Ordered fallback chain for the developer link: structural split of the
/// href first, raw anchor text second, explicit error marker last.
fn author_url_from_link(link: ElementRef) -> AuthorUrl {
    if let Some(host) = link.value().attr("href").and_then(split_dev_link) {
        return AuthorUrl::Host(host);
    }
    let text = element_text(link);
    if text.is_empty() {
        AuthorUrl::Unparseable
    } else {
        AuthorUrl::LinkText(text)
    }
}

/// Dev links route through a redirect like
/// "https://www.google.com/url?q=http://www.example.com&sa=D": take the value
/// after '=', trim trailing query parameters at '&', then the host segment
/// after the scheme's two slashes.
fn split_dev_link(href: &str) -> Option<String> {
    let target = href.split('=').nth(1)?.split('&').next()?;
    let host = target.split('/').nth(2)?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn reformat_page_date(package: &str, raw: &str) -> Option<String> {
    match NaiveDate::parse_from_str(raw, PAGE_DATE_FORMAT) {
        Ok(date) => Some(date.format(OUTPUT_DATE_FORMAT).to_string()),
        Err(e) => {
            tracing::warn!("Unparseable update date for {}: '{}' ({})", package, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const FULL_PAGE: &str = r#"<html><body>
        <div class="id-app-title">Example App</div>
        <span itemprop="name">Example Studios</span>
        <a class="dev-link" href="https://www.google.com/url?q=http://www.example.com&amp;sa=D">Visit website</a>
        <meta itemprop="url" content="https://play.google.com/store/apps/details?id=com.example.app">
        <div class="content" itemprop="datePublished">April 5, 2017</div>
        <div itemprop="numDownloads"> 1,000,000 - 5,000,000 </div>
        <meta itemprop="ratingValue" content="4.333333">
        <meta itemprop="ratingCount" content="54321">
        <div class="content" itemprop="contentRating">Everyone 10+</div>
        <div>Mild Fantasy Violence</div>
        <span itemprop="genre">Arcade</span>
        <span class="badge-title">Top Developer</span>
        <span class="ads-supported-label-msg"> Contains Ads </span>
        <div class="title">Offered By</div>
        <div>Example Studios Ltd</div>
    </body></html>"#;

    #[test]
    fn test_full_page_maps_every_field() {
        let record = record_from_html("com.example.app", FULL_PAGE);

        assert_eq!(record.id, "com.example.app");
        assert_eq!(record.app_name.as_deref(), Some("Example App"));
        assert_eq!(record.author.as_deref(), Some("Example Studios"));
        assert_eq!(
            record.author_url,
            Some(AuthorUrl::Host("www.example.com".to_string()))
        );
        assert_eq!(
            record.link.as_deref(),
            Some("https://play.google.com/store/apps/details?id=com.example.app")
        );
        assert_eq!(record.last_update.as_deref(), Some("04/05/2017"));
        assert_eq!(
            record.download_range.as_deref(),
            Some("1,000,000 - 5,000,000")
        );
        assert_eq!(record.star_rating, Some(4.33));
        assert_eq!(record.rating_volume, Some(54321));
        assert_eq!(record.age_rating.as_deref(), Some("Everyone 10+"));
        assert_eq!(record.rate_reason.as_deref(), Some("Mild Fantasy Violence"));
        assert_eq!(record.category.as_deref(), Some("Arcade"));
        assert_eq!(record.top_developer.as_deref(), Some("Top Developer"));
        assert_eq!(record.ad_supported.as_deref(), Some("Contains Ads"));
        assert_eq!(record.seller.as_deref(), Some("Example Studios Ltd"));
    }

    #[test]
    fn test_missing_ads_badge_is_sentinel_only() {
        let page = FULL_PAGE.replace(
            r#"<span class="ads-supported-label-msg"> Contains Ads </span>"#,
            "",
        );
        let record = record_from_html("com.example.app", &page);

        assert!(record.ad_supported.is_none());
        assert_eq!(record.app_name.as_deref(), Some("Example App"));
        assert_eq!(record.star_rating, Some(4.33));
    }

    #[test]
    fn test_empty_page_is_all_sentinel_except_id() {
        let record = record_from_html("com.example.app", "<html><body></body></html>");

        assert_eq!(record, PlayRecord::new("com.example.app".to_string()));
        assert!(record.app_name.is_none());
        assert!(record.author_url.is_none());
        assert!(record.seller.is_none());
    }

    #[test]
    fn test_author_url_falls_back_to_link_text() {
        let page = r#"<html><body>
            <a class="dev-link" href="mailto:dev@example.com">dev@example.com</a>
        </body></html>"#;
        let record = record_from_html("com.example.app", page);

        assert_eq!(
            record.author_url,
            Some(AuthorUrl::LinkText("dev@example.com".to_string()))
        );
    }

    #[test]
    fn test_author_url_unparseable_marker() {
        let page = r#"<html><body><a class="dev-link" href="mailto:x"></a></body></html>"#;
        let record = record_from_html("com.example.app", page);

        assert_eq!(record.author_url, Some(AuthorUrl::Unparseable));
        assert_eq!(record.author_url.unwrap().as_cell(), "Error");
    }

    #[test]
    fn test_split_dev_link() {
        assert_eq!(
            split_dev_link("https://www.google.com/url?q=http://www.example.com&sa=D"),
            Some("www.example.com".to_string())
        );
        assert_eq!(
            split_dev_link("https://www.google.com/url?q=http://example.org/about&sa=D"),
            Some("example.org".to_string())
        );
        assert_eq!(split_dev_link("mailto:dev@example.com"), None);
        assert_eq!(split_dev_link("https://example.com"), None);
    }

    #[test]
    fn test_malformed_update_date_degrades_to_none() {
        let page = FULL_PAGE.replace("April 5, 2017", "5 avril 2017");
        let record = record_from_html("com.example.app", &page);

        assert!(record.last_update.is_none());
        assert_eq!(record.age_rating.as_deref(), Some("Everyone 10+"));
    }

    #[test]
    fn test_rate_reason_requires_content_rating_sibling() {
        let page = r#"<html><body>
            <div class="content" itemprop="contentRating">Everyone</div>
            <span>not a div</span>
            <div>Gambling References</div>
        </body></html>"#;
        let record = record_from_html("com.example.app", page);

        assert_eq!(record.age_rating.as_deref(), Some("Everyone"));
        assert_eq!(record.rate_reason.as_deref(), Some("Gambling References"));
    }

    #[test]
    fn test_offered_by_scan_ignores_other_titles() {
        let page = r#"<html><body>
            <div class="title">Updated</div>
            <div>April 5, 2017</div>
            <div class="title">Offered By</div>
            <div>Some Seller</div>
        </body></html>"#;
        let record = record_from_html("com.example.app", page);

        assert_eq!(record.seller.as_deref(), Some("Some Seller"));
    }

    #[tokio::test]
    async fn test_fetch_against_mock_page() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/store/apps/details")
                .query_param("id", "com.example.app");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(FULL_PAGE);
        });

        let client = Client::new();
        let record = fetch(&client, &server.url("/store/apps/details"), "com.example.app")
            .await
            .unwrap();

        page_mock.assert();
        assert_eq!(record.app_name.as_deref(), Some("Example App"));
        assert_eq!(record.seller.as_deref(), Some("Example Studios Ltd"));
    }
}
