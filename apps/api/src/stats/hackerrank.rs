//! HackerRank adapter: badge-centric profile scrape. The profile page
//! exposes no rating, rank, or submission feed, so those fields stay at
//! their defaults and `total` is omitted entirely.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use scraper::Html;
use tracing::debug;

use crate::config::Config;
use crate::extract::html::{count_in, first_matches, first_text_in};
use crate::extract::text::first_number;
use crate::fetch::{FetchError, HttpFetcher};
use crate::stats::models::{Badge, MonthlyProgress, Platform, PlatformStats};

const PROFILE_URL: &str = "https://www.hackerrank.com/profile";

const BADGE_SELECTORS: &[&str] = &[".hacker-badge, .badge-container"];
const BADGE_NAME_SELECTORS: &[&str] = &[".badge-title", ".title"];
const BADGE_STAR_SELECTOR: &str = ".badge-star, .star-filled";
const BADGE_SOLVED_SELECTORS: &[&str] = &[".badge-solved", ".solved-count"];

pub async fn fetch_stats(
    fetcher: &HttpFetcher,
    config: &Config,
    username: &str,
) -> Result<PlatformStats, FetchError> {
    let url = format!("{PROFILE_URL}/{username}");
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let body = fetcher
        .get_text(
            &url,
            Some(headers),
            Duration::from_secs(config.html_timeout_secs),
        )
        .await?;
    Ok(parse_profile(&body, username))
}

fn parse_profile(body: &str, username: &str) -> PlatformStats {
    let doc = Html::parse_document(body);

    let mut badges: Vec<Badge> = first_matches(&doc, BADGE_SELECTORS)
        .into_iter()
        .filter_map(|element| {
            let name = first_text_in(element, BADGE_NAME_SELECTORS)?;
            let stars = count_in(element, BADGE_STAR_SELECTOR) as u32;
            let solved = first_text_in(element, BADGE_SOLVED_SELECTORS)
                .and_then(|t| first_number(&t))
                .unwrap_or(0) as u32;
            Some(Badge {
                name,
                level: None,
                stars: Some(stars),
                solved,
                needed: None,
            })
        })
        .collect();

    // Highest-progress badges first.
    badges.sort_by(|a, b| b.solved.cmp(&a.solved));

    let solved = badges.iter().map(|b| b.solved).sum();

    debug!(username, badge_count = badges.len(), "Parsed HackerRank profile");

    PlatformStats {
        platform: Platform::HackerRank,
        username: username.to_string(),
        solved,
        total: None,
        rank: "N/A".to_string(),
        rating: 0,
        badges,
        recent_submissions: Vec::new(),
        monthly_progress: MonthlyProgress::default(),
    }
}
