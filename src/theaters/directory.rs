//! Directory scraper: discovers departments and scrapes them one by one.

use super::department::{scrape_department, selector};
use super::types::Theater;
use crate::config::Endpoints;
use crate::error::TheaterError;
use crate::http::HttpClient;
use regex::Regex;
use scraper::Html;

const DEPARTMENT_LINK_SELECTOR: &str = r#"a[href^="/salle/cinema/departement-"]"#;

/// Department codes linked from the directory page, in document order.
///
/// Duplicated links are kept; anchors whose href has no numeric code are skipped.
pub fn department_codes(html: &str) -> Result<Vec<String>, TheaterError> {
    let link_sel = selector(DEPARTMENT_LINK_SELECTOR)?;
    let code_re = Regex::new(r"departement-(?P<code>\d+)")?;

    let document = Html::parse_document(html);
    let codes = document
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| code_re.captures(href))
        .filter_map(|caps| caps.name("code").map(|m| m.as_str().to_string()))
        .collect();

    Ok(codes)
}

/// Scrape every theater in the directory.
///
/// Departments are scraped sequentially and their theaters concatenated in
/// the order the directory lists them.
pub fn scrape_all_theaters(
    client: &dyn HttpClient,
    endpoints: &Endpoints,
) -> Result<Vec<Theater>, TheaterError> {
    let html = client.get_text(&endpoints.directory_url())?;
    let codes = department_codes(&html)?;
    tracing::info!(departments = codes.len(), "Found departments");

    let mut theaters = Vec::new();
    for code in &codes {
        theaters.extend(scrape_department(client, endpoints, code)?);
    }
    Ok(theaters)
}
