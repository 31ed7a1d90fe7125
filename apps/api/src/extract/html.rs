use scraper::{ElementRef, Html, Selector};

/// Returns the trimmed inner text of `element`, collapsed to single spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tries each candidate CSS selector in order against the whole document and
/// returns the first non-empty text match. Selectors that fail to parse are
/// skipped rather than treated as errors.
pub fn first_text(doc: &Html, candidates: &[&str]) -> Option<String> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for element in doc.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Like `first_text` but scoped to a single element's subtree.
pub fn first_text_in(element: ElementRef<'_>, candidates: &[&str]) -> Option<String> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for inner in element.select(&selector) {
            let text = element_text(inner);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Collects the elements matched by the first candidate selector that
/// produces any matches at all. An empty result means every candidate missed.
pub fn first_matches<'a>(doc: &'a Html, candidates: &[&str]) -> Vec<ElementRef<'a>> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        let matches: Vec<_> = doc.select(&selector).collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

/// Counts matches for a selector within an element subtree (zero when the
/// selector is invalid or misses).
pub fn count_in(element: ElementRef<'_>, candidate: &str) -> usize {
    match Selector::parse(candidate) {
        Ok(selector) => element.select(&selector).count(),
        Err(_) => 0,
    }
}
