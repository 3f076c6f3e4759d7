//! Relative "last updated" text to elapsed seconds.

use std::sync::OnceLock;

use crate::error::TimeParseError;

/// Seconds reported for text that cannot be parsed: one year, so the listing
/// reads as maximally stale instead of failing the cycle.
pub const STALE_SECS: u64 = 31_536_000;

fn re_time_passed() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^((?-u:\d)+) (second|minute)s? ago").expect("time pattern is valid")
    })
}

/// Parse `now`, `N second(s) ago` or `N minute(s) ago`.
pub fn parse_relative(text: &str) -> Result<u64, TimeParseError> {
    if text == "now" {
        return Ok(0);
    }

    let err = || TimeParseError {
        text: text.to_string(),
    };
    let caps = re_time_passed().captures(text).ok_or_else(err)?;
    let value: u64 = caps[1].parse().map_err(|_| err())?;

    match &caps[2] {
        "second" => Ok(value),
        "minute" => value.checked_mul(60).ok_or_else(err),
        _ => Err(err()),
    }
}

/// Elapsed seconds for `text`, or [`STALE_SECS`] with a warning when it
/// cannot be parsed.
pub fn seconds_since_update(text: &str) -> u64 {
    parse_relative(text).unwrap_or_else(|e| {
        tracing::warn!(text, "couldn't parse time passed: {e}");
        STALE_SECS
    })
}
