use std::sync::OnceLock;

use regex::Regex;

/// Phrases that introduce a redemption or expiry date in SKU feature text.
pub const TRIGGER_PHRASES: &[&str] = &[
    "redeem by",
    "redeemed by",
    "redemption begins",
    "completed by",
    "redeemed on",
    "booked by",
    "redeem on",
    "must be used by",
    "valid from",
];

static EXPIRATION_RE: OnceLock<Regex> = OnceLock::new();

fn expiration_regex() -> &'static Regex {
    EXPIRATION_RE.get_or_init(|| {
        let pattern = format!(
            r"(?i)(?:{})(?P<date>[\w, ]*\d{{4}})",
            TRIGGER_PHRASES.join("|")
        );
        Regex::new(&pattern).expect("expiration pattern is a valid regex")
    })
}

/// Pull the date that follows the first trigger phrase, ending at a 4-digit year.
///
/// Zero-width no-break spaces and non-breaking spaces are removed first.
/// Returns `None` when nothing matches.
pub fn extract_expiration_date(features: &str) -> Option<String> {
    let cleaned: String = features
        .chars()
        .filter(|c| *c != '\u{feff}' && *c != '\u{a0}')
        .collect();
    let caps = expiration_regex().captures(&cleaned)?;
    Some(caps.name("date")?.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_date_after_redeem_by() {
        assert_eq!(
            extract_expiration_date("Voucher: redeem by March 1, 2024").as_deref(),
            Some("March 1, 2024")
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            extract_expiration_date("MUST BE USED BY December 31, 2025.").as_deref(),
            Some("December 31, 2025")
        );
    }

    #[test]
    fn stops_at_punctuation_outside_the_class() {
        let text = "Valid from Jan 5, 2024 - see terms. Redeemed by 2026";
        assert_eq!(extract_expiration_date(text).as_deref(), Some("Jan 5, 2024"));
    }

    #[test]
    fn strips_invisible_spaces_before_matching() {
        let text = "Must be redeemed\u{a0} by\u{feff} June 30, 2024";
        // "redeemed by" only appears once the NBSP is removed
        assert_eq!(extract_expiration_date(text).as_deref(), Some("June 30, 2024"));
    }

    #[test]
    fn no_year_means_no_date() {
        assert_eq!(extract_expiration_date("redeem by the end of summer"), None);
        assert_eq!(extract_expiration_date("No restrictions apply"), None);
    }
}
