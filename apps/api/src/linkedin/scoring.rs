//! Heuristic profile scores as named pure functions over the extracted
//! counts. The weights and floors are hand-tuned values carried over from
//! long-running production behavior; they live here as named constants so a
//! tuning pass is a constant edit.

use crate::linkedin::models::{Improvement, ImprovementKind};

// Overall profile strength: weighted average of the four component scores.
pub const WEIGHT_URL_QUALITY: f64 = 0.10;
pub const WEIGHT_COMPLETENESS: f64 = 0.40;
pub const WEIGHT_ENGAGEMENT: f64 = 0.25;
pub const WEIGHT_NETWORK: f64 = 0.25;

/// A reachable profile with a name never scores below this.
pub const NAMED_PROFILE_STRENGTH_FLOOR: u32 = 7;
/// Strength floor once the network clears `STRONG_CONNECTION_THRESHOLD`.
pub const STRONG_CONNECTION_STRENGTH_FLOOR: u32 = 25;
pub const STRONG_CONNECTION_THRESHOLD: u64 = 300;
/// Minimal-profile fallback strength (URL reachability alone).
pub const MINIMAL_PROFILE_STRENGTH_FLOOR: u32 = 7;

/// Network strength saturates at this connection count.
pub const NETWORK_CAP_CONNECTIONS: u64 = 500;

// Engagement score split: network size component + content component.
pub const ENGAGEMENT_NETWORK_CAP: f64 = 60.0;
pub const ENGAGEMENT_CONTENT_CAP: f64 = 40.0;
pub const ENGAGEMENT_CONTENT_POINTS: f64 = 8.0;
pub const ENGAGEMENT_NO_NETWORK_POINTS: f64 = 4.0;
pub const ENGAGEMENT_NO_NETWORK_CAP: f64 = 20.0;
pub const ENGAGEMENT_CONNECTIONS_ONLY_CAP: f64 = 30.0;

// Estimated interaction rates for a typical profile.
pub const VIEW_RATE: f64 = 0.10;
pub const LIKE_RATE: f64 = 0.025;
pub const COMMENT_RATE: f64 = 0.008;
pub const SHARE_RATE: f64 = 0.003;
pub const CONNECTIONS_ONLY_LIKE_RATE: f64 = 0.01;
pub const CONNECTIONS_ONLY_COMMENT_RATE: f64 = 0.003;
pub const CONNECTIONS_ONLY_SHARE_RATE: f64 = 0.001;
pub const PROFILE_VIEW_RATE: f64 = 0.25;
pub const FOLLOWER_RATE: f64 = 0.90;

/// Counts fed into the scoring pass, as extracted from the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCounts {
    pub has_name: bool,
    pub has_headline: bool,
    pub connections: u64,
    pub experience_count: usize,
    pub education_count: usize,
    pub skills_count: usize,
    pub content_count: usize,
}

/// Profile URL quality, 0..=100 in four 25-point rules: hyphenated name
/// form, sensible length, clean character set, no trailing digits.
pub fn url_quality(username: &str) -> u32 {
    let mut score = 0;

    if username.contains('-') {
        score += 25;
    }
    if (5..=30).contains(&username.len()) {
        score += 25;
    }
    if !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        score += 25;
    }
    if !username
        .chars()
        .last()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
    {
        score += 25;
    }

    score
}

/// Profile completeness, 0..=100: name and headline 15 points each,
/// experience 6 points apiece capped at 30, education 10 apiece capped at
/// 20, skills 2 apiece capped at 20. A profile that at least yielded a name
/// never reports zero.
pub fn completeness(counts: &ProfileCounts) -> u32 {
    let mut score = 0u32;

    if counts.has_name {
        score += 15;
    }
    if counts.has_headline {
        score += 15;
    }
    score += (counts.experience_count as u32 * 6).min(30);
    score += (counts.education_count as u32 * 10).min(20);
    score += (counts.skills_count as u32 * 2).min(20);

    if counts.has_name && score == 0 {
        score = 1;
    }
    score
}

/// Network strength, 0..=100: linear in connections up to the 500 cap.
pub fn network_strength(connections: u64) -> u32 {
    if connections == 0 {
        return 0;
    }
    if connections >= NETWORK_CAP_CONNECTIONS {
        return 100;
    }
    ((connections as f64 / NETWORK_CAP_CONNECTIONS as f64) * 100.0) as u32
}

/// Engagement score, 0..=100, from network size and visible content volume.
pub fn engagement_score(connections: u64, content_count: usize) -> u32 {
    if connections == 0 {
        return ((content_count as f64 * ENGAGEMENT_NO_NETWORK_POINTS)
            .min(ENGAGEMENT_NO_NETWORK_CAP)) as u32;
    }
    if content_count == 0 {
        return ((connections as f64 / 10.0).min(ENGAGEMENT_CONNECTIONS_ONLY_CAP)) as u32;
    }
    let network_component = (connections as f64 / 10.0).min(ENGAGEMENT_NETWORK_CAP);
    let content_component =
        (content_count as f64 * ENGAGEMENT_CONTENT_POINTS).min(ENGAGEMENT_CONTENT_CAP);
    (network_component + content_component) as u32
}

/// Estimated likes / comments / shares for the profile's content, derived
/// from typical interaction rates.
pub fn estimated_engagement(connections: u64, content_count: usize) -> (u64, u64, u64) {
    if connections > 0 && content_count > 0 {
        let total_views = connections as f64 * VIEW_RATE * content_count as f64;
        (
            (total_views * LIKE_RATE) as u64,
            (total_views * COMMENT_RATE) as u64,
            (total_views * SHARE_RATE) as u64,
        )
    } else if connections > 0 {
        (
            (connections as f64 * CONNECTIONS_ONLY_LIKE_RATE) as u64,
            (connections as f64 * CONNECTIONS_ONLY_COMMENT_RATE) as u64,
            (connections as f64 * CONNECTIONS_ONLY_SHARE_RATE) as u64,
        )
    } else {
        (0, 0, 0)
    }
}

/// Estimated profile views and followers from the connection count.
pub fn estimated_reach(connections: u64) -> (u64, u64) {
    (
        (connections as f64 * PROFILE_VIEW_RATE) as u64,
        (connections as f64 * FOLLOWER_RATE) as u64,
    )
}

/// Overall profile strength: the weighted component average, floored at 7%
/// for any profile with a name and at 25% once the connection count shows a
/// substantial network.
pub fn profile_strength(
    url_quality: u32,
    completeness: u32,
    engagement: u32,
    network: u32,
    has_name: bool,
    connections: u64,
) -> u32 {
    let mut strength = (url_quality as f64 * WEIGHT_URL_QUALITY
        + completeness as f64 * WEIGHT_COMPLETENESS
        + engagement as f64 * WEIGHT_ENGAGEMENT
        + network as f64 * WEIGHT_NETWORK) as u32;

    if has_name && strength < NAMED_PROFILE_STRENGTH_FLOOR {
        strength = NAMED_PROFILE_STRENGTH_FLOOR;
    }
    if connections >= STRONG_CONNECTION_THRESHOLD && strength < STRONG_CONNECTION_STRENGTH_FLOOR {
        strength = STRONG_CONNECTION_STRENGTH_FLOOR;
    }
    strength
}

/// Ordered improvement suggestions derived from what the page did and did
/// not yield. Near-empty profiles get at most five so the caller is not
/// flooded.
pub fn improvements(
    name: &str,
    username: &str,
    counts: &ProfileCounts,
    completeness: u32,
) -> Vec<Improvement> {
    let mut out = Vec::new();
    let is_minimal = completeness < 15;
    let placeholder = crate::linkedin::models::name_from_username(username);

    if name.is_empty() || name == placeholder {
        out.push(Improvement::new(
            ImprovementKind::Critical,
            "Add your full name",
            "Update your profile with your professional name for better discoverability",
        ));
    }

    if counts.connections == 0 {
        out.push(Improvement::new(
            ImprovementKind::Critical,
            "Start building your network",
            "Connect with colleagues, classmates, and industry professionals",
        ));
    } else if counts.connections < 100 && !is_minimal {
        out.push(Improvement::new(
            ImprovementKind::High,
            "Grow your professional network",
            "Aim for at least 100 connections to improve your reach and visibility",
        ));
    }

    if counts.experience_count == 0 {
        out.push(Improvement::new(
            ImprovementKind::Critical,
            "Add your work experience",
            "Include your current and past positions with descriptions of your responsibilities",
        ));
    } else if counts.experience_count < 2 && !is_minimal {
        out.push(Improvement::new(
            ImprovementKind::High,
            "Add more work experiences",
            "Include previous roles to show your career progression and versatility",
        ));
    }

    if counts.education_count == 0 {
        out.push(Improvement::new(
            ImprovementKind::High,
            "Add your education background",
            "Include your degrees, certifications, and relevant coursework",
        ));
    }

    if counts.skills_count == 0 {
        out.push(Improvement::new(
            ImprovementKind::High,
            "Add your key skills",
            "List at least 5 relevant skills that showcase your expertise",
        ));
    } else if counts.skills_count < 5 && !is_minimal {
        out.push(Improvement::new(
            ImprovementKind::Medium,
            "Add more skills",
            "LinkedIn profiles with 5+ skills get significantly more views",
        ));
    }

    if !is_minimal && (username.contains("user") || username.chars().last().is_some_and(|c| c.is_ascii_digit())) {
        out.push(Improvement::new(
            ImprovementKind::Medium,
            "Customize your profile URL",
            "Use your professional name in your profile URL for better personal branding",
        ));
    }

    if completeness < 40 {
        out.push(Improvement::new(
            ImprovementKind::Critical,
            "Complete your basic profile information",
            "Add the essential elements: photo, headline, current position, and education",
        ));
    } else if completeness < 70 && !is_minimal {
        out.push(Improvement::new(
            ImprovementKind::Medium,
            "Add more details to your profile",
            "Include certifications, projects, and a summary section to tell your professional story",
        ));
    }

    if is_minimal && out.len() > 5 {
        out.truncate(5);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_strength_boundaries() {
        assert_eq!(network_strength(0), 0);
        assert_eq!(network_strength(250), 50);
        assert_eq!(network_strength(500), 100);
        assert_eq!(network_strength(750), 100);
    }

    #[test]
    fn test_url_quality_component_rules() {
        // Hyphenated, 8 chars, clean charset, no trailing digit.
        assert_eq!(url_quality("jane-doe"), 100);
        // No hyphen.
        assert_eq!(url_quality("janedoe"), 75);
        // Trailing digits lose a component.
        assert_eq!(url_quality("jane-doe-123"), 75);
        // Underscore breaks the clean-charset rule and the hyphen rule.
        assert_eq!(url_quality("jane_doe"), 50);
        // Too short.
        assert_eq!(url_quality("jd"), 50);
    }

    #[test]
    fn test_completeness_caps() {
        let counts = ProfileCounts {
            has_name: true,
            has_headline: true,
            experience_count: 10, // capped at 30 points
            education_count: 5,   // capped at 20 points
            skills_count: 40,     // capped at 20 points
            ..Default::default()
        };
        assert_eq!(completeness(&counts), 100);
    }

    #[test]
    fn test_completeness_named_profile_never_zero() {
        let counts = ProfileCounts {
            has_name: true,
            ..Default::default()
        };
        assert!(completeness(&counts) >= 1);
    }

    #[test]
    fn test_engagement_score_branches() {
        // No connections: content-only fallback, capped at 20.
        assert_eq!(engagement_score(0, 3), 12);
        assert_eq!(engagement_score(0, 10), 20);
        // Connections but no content: capped at 30.
        assert_eq!(engagement_score(200, 0), 20);
        assert_eq!(engagement_score(400, 0), 30);
        // Both components, each capped.
        assert_eq!(engagement_score(1000, 10), 100);
        assert_eq!(engagement_score(300, 2), 46);
    }

    #[test]
    fn test_estimated_engagement_rates() {
        // 400 connections, 5 content items: views = 400*0.1*5 = 200.
        let (likes, comments, shares) = estimated_engagement(400, 5);
        assert_eq!(likes, 5);
        assert_eq!(comments, 1);
        assert_eq!(shares, 0);

        // Connections only.
        let (likes, comments, shares) = estimated_engagement(1000, 0);
        assert_eq!((likes, comments, shares), (10, 3, 1));

        assert_eq!(estimated_engagement(0, 0), (0, 0, 0));
    }

    #[test]
    fn test_estimated_reach() {
        assert_eq!(estimated_reach(400), (100, 360));
        assert_eq!(estimated_reach(0), (0, 0));
    }

    #[test]
    fn test_profile_strength_weighted_average() {
        // 100 everywhere → 100.
        assert_eq!(profile_strength(100, 100, 100, 100, true, 500), 100);
        // Weighted: 0.1*80 + 0.4*50 + 0.25*40 + 0.25*60 = 53.
        assert_eq!(profile_strength(80, 50, 40, 60, true, 100), 53);
    }

    #[test]
    fn test_profile_strength_named_floor() {
        assert_eq!(profile_strength(0, 0, 0, 0, true, 0), 7);
        assert_eq!(profile_strength(0, 0, 0, 0, false, 0), 0);
    }

    #[test]
    fn test_profile_strength_strong_connection_floor() {
        // Weighted formula alone would be far below 25.
        let strength = profile_strength(0, 10, 0, 0, true, 300);
        assert!(strength >= 25, "got {strength}");
        // Just below the threshold the floor does not apply.
        let below = profile_strength(0, 10, 0, 0, true, 299);
        assert!(below < 25);
    }

    #[test]
    fn test_improvements_for_empty_profile_capped_at_five() {
        let counts = ProfileCounts::default();
        let out = improvements("", "user12345", &counts, 0);
        assert!(out.len() <= 5);
        assert!(out.iter().any(|i| i.message == "Add your full name"));
        assert!(out
            .iter()
            .any(|i| i.message == "Start building your network"));
    }

    #[test]
    fn test_improvements_for_partial_profile() {
        let counts = ProfileCounts {
            has_name: true,
            has_headline: true,
            connections: 50,
            experience_count: 1,
            education_count: 1,
            skills_count: 3,
            content_count: 2,
        };
        let score = completeness(&counts);
        let out = improvements("Jane A. Doe", "jane-doe", &counts, score);
        assert!(out
            .iter()
            .any(|i| i.message == "Grow your professional network"));
        assert!(out.iter().any(|i| i.message == "Add more work experiences"));
        assert!(out.iter().any(|i| i.message == "Add more skills"));
        // Name is real, so no rename suggestion.
        assert!(!out.iter().any(|i| i.message == "Add your full name"));
    }

    #[test]
    fn test_placeholder_name_counts_as_missing() {
        let counts = ProfileCounts {
            has_name: true,
            has_headline: true,
            connections: 500,
            experience_count: 3,
            education_count: 1,
            skills_count: 6,
            content_count: 4,
        };
        // A name equal to the title-cased handle is the fallback we
        // synthesized ourselves, so it still warrants the suggestion.
        let out = improvements("Jane Doe", "jane-doe", &counts, 80);
        assert!(out.iter().any(|i| i.message == "Add your full name"));

        let out = improvements("Jane A. Doe", "jane-doe", &counts, 80);
        assert!(!out.iter().any(|i| i.message == "Add your full name"));
    }
}
