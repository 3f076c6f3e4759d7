//! Fixed policy deciding which listings are worth a notification.
//!
//! Both predicates are noisy on their own, so a listing only counts when it
//! advertises a merc run *and* is for an allowed duty.

use std::sync::OnceLock;

/// Duties eligible for notification. Matched by exact string equality.
pub const ALLOWED_DUTIES: &[&str] = &[
    "Recollection (Extreme)",
    "AAC Cruiserweight M1 (Savage)",
    "AAC Cruiserweight M2 (Savage)",
    "AAC Cruiserweight M3 (Savage)",
    "AAC Cruiserweight M4 (Savage)",
];

// A digit (optionally after other digits, periods, spaces or newlines), an
// optional space, then "m" that ends the token. "mi" counts unless it continues
// into "min", so "6m", "6 m" and "6mil" match while "10 min" and "6man" don't.
fn re_merc_run() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"(?i)(^|[\d. \n])\d ?m($|i($|[^n])|[^a-zA-Z0-9])")
            .expect("merc run pattern is valid")
    })
}

pub fn is_merc_run(description: &str) -> bool {
    re_merc_run().is_match(description)
}

pub fn is_allowed_duty(duty: &str) -> bool {
    ALLOWED_DUTIES.contains(&duty)
}
