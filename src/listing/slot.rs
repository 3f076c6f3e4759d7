use std::collections::BTreeSet;
use std::fmt;

use scraper::ElementRef;
use serde::Serialize;

pub const CLASS_FILLED: &str = "filled";
pub const CLASS_TANK: &str = "tank";
pub const CLASS_HEALER: &str = "healer";
pub const CLASS_DPS: &str = "dps";

const GLYPH_FILLED: &str = ":x:";
const GLYPH_TANK: &str = ":blue_heart:";
const GLYPH_HEALER: &str = ":green_heart:";
const GLYPH_DPS: &str = ":heart:";

/// One roster position inside a listing's party.
///
/// Parsing is permissive: a slot without a `class` attribute has no classes
/// (and is therefore open), and a slot without a `title` has no jobs. Job
/// codes are taken as-is from the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub classes: BTreeSet<String>,
    pub is_filled: bool,
    pub jobs: Vec<String>,
}

impl Slot {
    pub fn new<I, S>(classes: I, jobs: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = classes.into_iter().map(Into::into).collect();
        let is_filled = classes.contains(CLASS_FILLED);
        Self {
            classes,
            is_filled,
            jobs,
        }
    }

    /// Build a slot from a `div.slot` element.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let classes = element.value().classes();
        let jobs = element
            .value()
            .attr("title")
            .map(|title| title.split(' ').map(str::to_string).collect())
            .unwrap_or_default();
        Self::new(classes, jobs)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Discord glyph for this slot: `:x:` when filled, otherwise one heart
    /// per eligible role joined with `/`.
    pub fn glyph(&self) -> String {
        if self.is_filled {
            return GLYPH_FILLED.to_string();
        }

        let mut roles = Vec::new();
        if self.has_class(CLASS_TANK) {
            roles.push(GLYPH_TANK);
        }
        if self.has_class(CLASS_HEALER) {
            roles.push(GLYPH_HEALER);
        }
        if self.has_class(CLASS_DPS) {
            roles.push(GLYPH_DPS);
        }
        roles.join("/")
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyph())
    }
}
