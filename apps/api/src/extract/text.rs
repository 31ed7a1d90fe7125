use once_cell::sync::Lazy;
use regex::Regex;

// "512 connections", "500+ followers", "3 contacts" and similar variations.
static CONTEXT_COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s*(?:connection|follower|contact)").expect("context count regex")
});

static ANY_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").expect("number regex"));

/// Extracts a count from free text like "500+ connections" or
/// "1,234 followers". Thousands separators are stripped first; the
/// context-sensitive pattern wins over a bare number anywhere in the text,
/// and `default` is returned when no digits are present.
pub fn extract_count(text: &str, default: u64) -> u64 {
    if text.is_empty() {
        return default;
    }

    let cleaned = text.replace(',', "");

    if let Some(caps) = CONTEXT_COUNT_RE.captures(&cleaned) {
        if let Ok(count) = caps[1].parse::<u64>() {
            return count;
        }
    }

    if let Some(caps) = ANY_NUMBER_RE.captures(&cleaned) {
        if let Ok(count) = caps[1].parse::<u64>() {
            return count;
        }
    }

    default
}

/// First integer anywhere in the text, after stripping thousands separators.
pub fn first_number(text: &str) -> Option<u64> {
    let cleaned = text.replace(',', "");
    ANY_NUMBER_RE
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

/// Parses "solved / needed" progress text like "12 / 50". Returns the pair
/// (first number, second number of a N / M pattern) with zero defaults.
pub fn progress_pair(text: &str) -> (u64, u64) {
    static PAIR_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").expect("progress pair regex"));

    let cleaned = text.replace(',', "");
    let solved = first_number(&cleaned).unwrap_or(0);
    let needed = PAIR_RE
        .captures(&cleaned)
        .and_then(|caps| caps[2].parse::<u64>().ok())
        .unwrap_or(0);
    (solved, needed)
}
