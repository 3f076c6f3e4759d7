use chrono::{DateTime, Utc};

use super::Listing;

/// Discord relative timestamp marker, re-rendered by the client against its
/// own clock.
pub fn discord_relative(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

/// Format a listing as a notification message, with the "updated" marker
/// anchored at `now`.
pub fn render(listing: &Listing, now: DateTime<Utc>) -> String {
    let elapsed = i64::try_from(listing.seconds_since_update()).unwrap_or(i64::MAX);
    let updated_at = chrono::TimeDelta::try_seconds(elapsed)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let open_slots: Vec<String> = listing
        .slots
        .iter()
        .filter(|slot| !slot.is_filled)
        .map(|slot| slot.glyph())
        .collect();

    format!(
        "**{}** | {} | Updated {}\n{}\n{}",
        listing.duty,
        listing.creator,
        discord_relative(updated_at),
        listing.description,
        open_slots.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::listing::Slot;

    fn listing(updated: &str, slots: Vec<Slot>) -> Listing {
        Listing {
            duty: "Recollection (Extreme)".into(),
            description: "6m clear\nfast".into(),
            creator: "Alpha Beta".into(),
            updated: updated.into(),
            slots,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn renders_header_description_and_open_slots() {
        let l = listing(
            "5 minutes ago",
            vec![
                Slot::new(["slot", "filled", "tank"], vec!["PLD".into()]),
                Slot::new(["slot", "tank"], vec!["WAR".into()]),
                Slot::new(["slot", "healer", "dps"], vec![]),
            ],
        );
        let ts = now().timestamp() - 300;
        assert_eq!(
            render(&l, now()),
            format!(
                "**Recollection (Extreme)** | Alpha Beta | Updated <t:{ts}:R>\n6m clear\nfast\n:blue_heart: :green_heart:/:heart:"
            )
        );
    }

    #[test]
    fn now_marker_uses_current_time() {
        let text = render(&listing("now", vec![]), now());
        assert!(text.contains(&format!("<t:{}:R>", now().timestamp())));
        assert!(text.ends_with("fast\n"));
    }

    #[test]
    fn unparseable_update_is_a_year_old() {
        let text = render(&listing("3 hours ago", vec![]), now());
        let ts = now().timestamp() - 31_536_000;
        assert!(text.contains(&format!("<t:{ts}:R>")));
    }
}
