//! Extract listings from the full listings page.

use scraper::{Html, Selector};

use crate::error::ParseError;
use crate::listing::Listing;

/// Result of scanning one page: listings that parsed, and the errors of
/// those that didn't.
#[derive(Debug, Default)]
pub struct ParsedPage {
    pub listings: Vec<Listing>,
    pub rejected: Vec<ParseError>,
}

/// CSS selector scoping listings to one data centre.
pub fn listings_selector(data_centre: &str) -> anyhow::Result<Selector> {
    let escaped = data_centre.replace('\\', "\\\\").replace('\'', "\\'");
    let css = format!("div#listings div.listing[data-centre='{escaped}']");
    Selector::parse(&css).map_err(|e| anyhow::anyhow!("invalid listing selector {css:?}: {e:?}"))
}

/// Parse every listing for `data_centre` in document order.
///
/// A malformed listing is skipped with a warning instead of failing the page.
pub fn parse_page(markup: &str, data_centre: &str) -> anyhow::Result<ParsedPage> {
    let selector = listings_selector(data_centre)?;
    let document = Html::parse_document(markup);

    let mut page = ParsedPage::default();
    for (index, element) in document.select(&selector).enumerate() {
        match Listing::from_element(element) {
            Ok(listing) => page.listings.push(listing),
            Err(e) => {
                tracing::warn!(index, "skipping malformed listing: {e}");
                page.rejected.push(e);
            }
        }
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(centre: &str, duty: &str, description: &str, creator: &str) -> String {
        format!(
            r#"<div class="listing" data-centre="{centre}">
  <div class="duty">{duty}</div>
  <div class="description">{description}</div>
  <div class="party"><div class="slot dps" title="MNK"></div></div>
  <div class="item creator"><span class="text">{creator}</span></div>
  <div class="item updated"><span class="text">now</span></div>
</div>"#
        )
    }

    fn page(body: &str) -> String {
        format!(r#"<html><body><div id="listings" class="list">{body}</div></body></html>"#)
    }

    #[test]
    fn keeps_only_requested_data_centre() {
        let markup = page(&[
            listing("Light", "Recollection (Extreme)", "6m", "A@Lich"),
            listing("Chaos", "Recollection (Extreme)", "6m", "B@Omega"),
            listing("Light", "AAC Cruiserweight M1 (Savage)", "7m", "C@Odin"),
        ]
        .concat());

        let parsed = parse_page(&markup, "Light").unwrap();
        let creators: Vec<_> = parsed.listings.iter().map(|l| l.creator.as_str()).collect();
        assert_eq!(creators, vec!["A", "C"]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn ignores_listings_outside_container() {
        let markup = format!(
            "<html><body>{}{}</body></html>",
            listing("Light", "Recollection (Extreme)", "6m", "Outside"),
            r#"<div id="listings"></div>"#
        );
        assert!(parse_page(&markup, "Light").unwrap().listings.is_empty());
    }

    #[test]
    fn malformed_listing_is_skipped() {
        let broken = r#"<div class="listing" data-centre="Light"><div class="duty">X</div></div>"#;
        let markup = page(&[
            listing("Light", "Recollection (Extreme)", "6m", "A"),
            broken.to_string(),
            listing("Light", "Recollection (Extreme)", "8m", "B"),
        ]
        .concat());

        let parsed = parse_page(&markup, "Light").unwrap();
        assert_eq!(parsed.listings.len(), 2);
        assert_eq!(
            parsed.rejected,
            vec![ParseError::MissingField {
                field: "description"
            }]
        );
    }

    #[test]
    fn empty_page_has_no_listings() {
        let parsed = parse_page("<html></html>", "Light").unwrap();
        assert!(parsed.listings.is_empty());
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn data_centre_with_quote_is_escaped() {
        assert!(listings_selector("Light'] div, div[x='").is_ok());
    }
}
