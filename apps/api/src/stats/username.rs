//! Username normalization and validation, applied before any network call.
//!
//! Accepts either a bare handle or a full profile URL: scheme, `www.`, the
//! platform's path prefix, and a trailing slash are stripped in that order,
//! then the remainder must match the platform's allowed character class.
//! A miss here is the one failure that surfaces to the caller as a 400.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;
use crate::stats::models::Platform;

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("scheme regex"));
static WWW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^www\.").expect("www regex"));

static LEETCODE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"leetcode\.com/(u/)?").expect("leetcode prefix regex"));
static CODECHEF_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"codechef\.com/users/").expect("codechef prefix regex"));
static HACKERRANK_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"hackerrank\.com/(profile/)?").expect("hackerrank prefix regex"));

static HANDLE_WITH_HYPHEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("handle regex"));
static HANDLE_NO_HYPHEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("handle regex"));

static LINKEDIN_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/([a-zA-Z0-9_-]+)").expect("linkedin url regex"));

const LEETCODE_MAX_LEN: usize = 39;

/// Strips URL decoration and validates the remaining handle for the given
/// coding platform.
pub fn normalize(platform: Platform, raw: &str) -> Result<String, AppError> {
    let cleaned = SCHEME_RE.replace(raw, "").into_owned();
    let cleaned = WWW_RE.replace(&cleaned, "").into_owned();
    let cleaned = match platform {
        Platform::LeetCode => LEETCODE_PREFIX_RE.replace(&cleaned, "").into_owned(),
        Platform::CodeChef => CODECHEF_PREFIX_RE.replace(&cleaned, "").into_owned(),
        Platform::HackerRank => HACKERRANK_PREFIX_RE.replace(&cleaned, "").into_owned(),
        Platform::LinkedIn => cleaned,
    };
    let cleaned = cleaned.trim_end_matches('/').trim().to_string();

    let valid = match platform {
        Platform::LeetCode => {
            !cleaned.is_empty()
                && cleaned.len() <= LEETCODE_MAX_LEN
                && HANDLE_WITH_HYPHEN_RE.is_match(&cleaned)
        }
        Platform::CodeChef => !cleaned.is_empty() && HANDLE_NO_HYPHEN_RE.is_match(&cleaned),
        Platform::HackerRank | Platform::LinkedIn => {
            !cleaned.is_empty() && HANDLE_WITH_HYPHEN_RE.is_match(&cleaned)
        }
    };

    if valid {
        Ok(cleaned)
    } else {
        Err(AppError::Validation(validation_message(platform)))
    }
}

fn validation_message(platform: Platform) -> String {
    match platform {
        Platform::LeetCode => "Invalid username format. Username should only contain letters, numbers, underscores, and hyphens.".to_string(),
        Platform::CodeChef => "Invalid CodeChef username format. Username should only contain letters, numbers, and underscores.".to_string(),
        Platform::HackerRank => "Invalid HackerRank username format. Username should only contain letters, numbers, underscores, and hyphens.".to_string(),
        Platform::LinkedIn => "Invalid LinkedIn profile URL format".to_string(),
    }
}

/// Extracts the handle from a LinkedIn profile URL (`linkedin.com/in/<handle>`).
pub fn linkedin_username(profile_url: &str) -> Option<String> {
    LINKEDIN_URL_RE
        .captures(profile_url)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_leetcode_url_yields_bare_handle() {
        let handle = normalize(Platform::LeetCode, "https://leetcode.com/u/alice/").unwrap();
        assert_eq!(handle, "alice");
    }

    #[test]
    fn test_leetcode_url_without_u_segment() {
        let handle = normalize(Platform::LeetCode, "https://www.leetcode.com/alice").unwrap();
        assert_eq!(handle, "alice");
    }

    #[test]
    fn test_bare_handle_passes_through() {
        assert_eq!(normalize(Platform::LeetCode, "alice_42").unwrap(), "alice_42");
    }

    #[test]
    fn test_leetcode_length_cap() {
        let long = "a".repeat(40);
        assert!(normalize(Platform::LeetCode, &long).is_err());
        let ok = "a".repeat(39);
        assert_eq!(normalize(Platform::LeetCode, &ok).unwrap(), ok);
    }

    #[test]
    fn test_disallowed_characters_rejected() {
        for bad in ["al ice", "alice!", "a/b", ""] {
            let err = normalize(Platform::LeetCode, bad).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_codechef_rejects_hyphen() {
        assert!(normalize(Platform::CodeChef, "ab-cd").is_err());
        assert_eq!(normalize(Platform::CodeChef, "ab_cd").unwrap(), "ab_cd");
    }

    #[test]
    fn test_codechef_url_prefix_stripped() {
        let handle =
            normalize(Platform::CodeChef, "https://www.codechef.com/users/gennady/").unwrap();
        assert_eq!(handle, "gennady");
    }

    #[test]
    fn test_hackerrank_profile_and_bare_prefixes() {
        assert_eq!(
            normalize(Platform::HackerRank, "https://hackerrank.com/profile/bob").unwrap(),
            "bob"
        );
        assert_eq!(
            normalize(Platform::HackerRank, "https://www.hackerrank.com/bob").unwrap(),
            "bob"
        );
    }

    #[test]
    fn test_linkedin_username_from_url() {
        assert_eq!(
            linkedin_username("https://www.linkedin.com/in/jane-doe-123/").as_deref(),
            Some("jane-doe-123")
        );
        assert!(linkedin_username("https://example.com/jane").is_none());
    }
}
