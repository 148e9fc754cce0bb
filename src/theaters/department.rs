//! Department listing scraper.
//!
//! Walks `departement-<code>/?page=1, 2, …` until a page carries no theater
//! cards, geocoding each card's address along the way.

use super::geocoder;
use super::types::{truthy_id, RawTheaterRecord, Theater};
use crate::config::Endpoints;
use crate::error::TheaterError;
use crate::http::HttpClient;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const CARD_SELECTOR: &str = ".theater-card .meta-theater";
const DATA_SELECTOR: &str = "[data-theater]";
const ADDRESS_SELECTOR: &str = "address";

/// What one listing page yielded.
#[derive(Debug, Default)]
pub struct ListingPage {
    /// Number of card elements on the page, kept or not. Zero ends pagination.
    pub card_count: usize,
    /// Cards with a truthy id and an address, in document order.
    pub records: Vec<RawTheaterRecord>,
}

pub(crate) fn selector(css: &str) -> Result<Selector, TheaterError> {
    Selector::parse(css).map_err(|_| TheaterError::Selector(css.to_string()))
}

/// Extract theater cards from one department listing page.
pub fn parse_theater_cards(html: &str) -> Result<ListingPage, TheaterError> {
    let card_sel = selector(CARD_SELECTOR)?;
    let data_sel = selector(DATA_SELECTOR)?;
    let address_sel = selector(ADDRESS_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for card in document.select(&card_sel) {
        page.card_count += 1;
        if let Some(record) = parse_card(card, &data_sel, &address_sel)? {
            page.records.push(record);
        }
    }

    Ok(page)
}

fn parse_card(
    card: ElementRef<'_>,
    data_sel: &Selector,
    address_sel: &Selector,
) -> Result<Option<RawTheaterRecord>, TheaterError> {
    let data = card
        .select(data_sel)
        .next()
        .and_then(|el| el.value().attr("data-theater"))
        .ok_or_else(|| TheaterError::MalformedCard("no data-theater attribute".into()))?;

    let meta: Value = serde_json::from_str(data).map_err(TheaterError::TheaterJson)?;

    let Some(id) = meta.get("id").and_then(truthy_id) else {
        return Ok(None);
    };
    let Some(address) = card.select(address_sel).next() else {
        return Ok(None);
    };

    let name = meta
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Some(RawTheaterRecord {
        id,
        name,
        address: address.text().collect::<String>().trim().to_string(),
    }))
}

/// Scrape every listing page of one department.
///
/// Cards whose address can't be geocoded are dropped. Any fetch failure or
/// malformed card aborts the whole department.
pub fn scrape_department(
    client: &dyn HttpClient,
    endpoints: &Endpoints,
    code: &str,
) -> Result<Vec<Theater>, TheaterError> {
    let mut theaters = Vec::new();
    let mut page_no = 1;

    loop {
        tracing::debug!(department = code, page = page_no, "Fetching listing page");
        let html = client.get_text(&endpoints.department_url(code, page_no))?;
        let page = parse_theater_cards(&html)?;
        if page.card_count == 0 {
            break;
        }

        for record in page.records {
            if let Some(at) = geocoder::geocode(client, endpoints, &record.address)? {
                theaters.push(record.into_theater(at));
            }
        }
        page_no += 1;
    }

    tracing::info!(department = code, theaters = theaters.len(), "Department scraped");
    Ok(theaters)
}
