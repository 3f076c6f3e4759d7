//! Party finder listings parsed from the listings page.

pub mod classify;
pub mod render;
pub mod slot;
pub mod updated;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::error::ParseError;

pub use slot::Slot;

fn selector(cell: &'static OnceLock<Selector>, css: &'static str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("listing selector is valid"))
}

fn sel_duty() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.duty")
}

fn sel_description() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.description")
}

fn sel_creator() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.item.creator span.text")
}

fn sel_updated() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.updated span.text")
}

fn sel_party() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.party")
}

fn sel_slot() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "div.slot")
}

/// One party finder posting.
///
/// Identity is `(duty, description, creator)`. The update text and the
/// roster are left out of equality and hashing, so a listing whose slots fill
/// up or whose timestamp refreshes is still the same listing.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub duty: String,
    pub description: String,
    pub creator: String,
    pub updated: String,
    pub slots: Vec<Slot>,
}

impl Listing {
    /// Extract a listing from a `div.listing` element.
    ///
    /// Every text field and the party container are required. Missing any of
    /// them is a [`ParseError`]; slots themselves never fail.
    pub fn from_element(element: ElementRef<'_>) -> Result<Self, ParseError> {
        let duty = first_text(element, sel_duty(), "duty")?;
        let description =
            first_text(element, sel_description(), "description")?.replace('\r', "\n");
        let creator = first_text(element, sel_creator(), "creator")?;
        let creator = creator.split('@').next().unwrap_or_default().trim().to_string();
        let updated = first_text(element, sel_updated(), "updated")?;

        let party = element
            .select(sel_party())
            .next()
            .ok_or(ParseError::MissingField { field: "party" })?;
        let slots = party.select(sel_slot()).map(Slot::from_element).collect();

        Ok(Self {
            duty,
            description,
            creator,
            updated,
            slots,
        })
    }

    /// Parse a standalone listing fragment.
    #[cfg(test)]
    pub fn from_html(fragment: &str) -> Result<Self, ParseError> {
        let html = scraper::Html::parse_fragment(fragment);
        Self::from_element(html.root_element())
    }

    pub fn is_merc_run(&self) -> bool {
        classify::is_merc_run(&self.description)
    }

    pub fn is_allowed_duty(&self) -> bool {
        classify::is_allowed_duty(&self.duty)
    }

    pub fn is_valid(&self) -> bool {
        self.is_merc_run() && self.is_allowed_duty()
    }

    pub fn seconds_since_update(&self) -> u64 {
        updated::seconds_since_update(&self.updated)
    }

    pub fn render(&self, now: chrono::DateTime<chrono::Utc>) -> String {
        render::render(self, now)
    }
}

fn first_text(
    element: ElementRef<'_>,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ParseError> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect())
        .ok_or(ParseError::MissingField { field })
}

impl PartialEq for Listing {
    fn eq(&self, other: &Self) -> bool {
        self.duty == other.duty
            && self.description == other.description
            && self.creator == other.creator
    }
}

impl Eq for Listing {}

impl Hash for Listing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.duty.hash(state);
        self.description.hash(state);
        self.creator.hash(state);
    }
}

/// Renders against the current wall clock.
impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(chrono::Utc::now()))
    }
}
