//! CodeChef adapter: profile-page scrape with selector fallback chains.
//!
//! The selector tables mirror what the live profile page has served
//! historically; they are deliberately plain constant lists so a markup
//! change is a table edit, not a logic change.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::Config;
use crate::extract::html::{element_text, first_matches, first_text, first_text_in};
use crate::extract::text::{first_number, progress_pair};
use crate::extract::time::parse_submission_time;
use crate::fetch::{FetchError, HttpFetcher};
use crate::stats::models::{
    codechef_total_default, Badge, MonthlyProgress, Platform, PlatformStats, Submission,
};

const PROFILE_URL: &str = "https://www.codechef.com/users";
const RECENT_LIMIT: usize = 10;

const RATING_SELECTORS: &[&str] = &[".rating-header .rating", ".rating-number"];
const RANK_SELECTORS: &[&str] = &[".rating-header .rank", ".rating-ranks strong"];
const BADGE_SELECTORS: &[&str] = &[".badge-card, .rating-data-section"];
const BADGE_NAME_SELECTORS: &[&str] = &[".badge-title", "h4"];
const BADGE_LEVEL_SELECTORS: &[&str] = &[".badge-level", ".rating-star"];
const BADGE_PROGRESS_SELECTORS: &[&str] = &[".badge-progress", ".problems-solved"];
const SUBMISSION_ROW_SELECTORS: &[&str] = &[".submissions-table tbody tr", ".dataTable tbody tr"];

pub async fn fetch_stats(
    fetcher: &HttpFetcher,
    config: &Config,
    username: &str,
) -> Result<PlatformStats, FetchError> {
    let url = format!("{PROFILE_URL}/{username}");
    let body = fetcher
        .get_text(&url, None, Duration::from_secs(config.html_timeout_secs))
        .await?;
    parse_profile(&body, username)
}

/// Parses a fetched profile page. Split from the fetch so the whole
/// extraction path is exercisable against fixture markup.
fn parse_profile(body: &str, username: &str) -> Result<PlatformStats, FetchError> {
    let doc = Html::parse_document(body);

    if !first_matches(&doc, &[".error-message"]).is_empty() || body.contains("Invalid username") {
        return Err(FetchError::NotFound);
    }

    let rating_text = first_text(&doc, RATING_SELECTORS).unwrap_or_else(|| "0".to_string());
    let rating = rating_text.parse::<i64>().unwrap_or(0);
    let rank = first_text(&doc, RANK_SELECTORS).unwrap_or_else(|| "N/A".to_string());

    let solved = count_solved(&doc);
    let badges = extract_badges(&doc);
    let recent_submissions = extract_submissions(&doc);

    // Only submissions that actually got accepted count toward the monthly
    // histogram.
    let mut monthly_progress = MonthlyProgress::default();
    for submission in &recent_submissions {
        if submission.status.to_lowercase().contains("accepted") {
            monthly_progress.record(&submission.timestamp);
        }
    }

    debug!(username, rating, solved, "Parsed CodeChef profile");

    Ok(PlatformStats {
        platform: Platform::CodeChef,
        username: username.to_string(),
        solved,
        total: Some(codechef_total_default()),
        rank,
        rating,
        badges,
        recent_submissions,
        monthly_progress,
    })
}

/// Sums the counts under every "Fully Solved" / "Partially Solved" heading
/// inside the problems-solved section.
fn count_solved(doc: &Html) -> u32 {
    let Ok(section_sel) = Selector::parse(".problems-solved") else {
        return 0;
    };
    let Ok(header_sel) = Selector::parse("h5") else {
        return 0;
    };
    let Ok(content_sel) = Selector::parse(".content") else {
        return 0;
    };

    let mut total = 0u32;
    let mut matched_sections = false;

    for section in doc.select(&section_sel) {
        matched_sections = true;
        let headers: Vec<_> = section.select(&header_sel).collect();
        let contents: Vec<_> = section.select(&content_sel).collect();
        for (i, header) in headers.iter().enumerate() {
            let header_text = element_text(*header);
            if header_text.contains("Fully Solved") || header_text.contains("Partially Solved") {
                if let Some(content) = contents.get(i) {
                    if let Some(n) = first_number(&element_text(*content)) {
                        total += n as u32;
                    }
                }
            }
        }
    }

    if !matched_sections {
        // Older layout: a single "Problems Solved" heading with a content
        // block beside it.
        if let Some(text) = first_text(doc, &[".content h5 + .content", ".content h5 ~ .content"]) {
            if let Some(n) = first_number(&text) {
                total = n as u32;
            }
        }
    }

    total
}

fn extract_badges(doc: &Html) -> Vec<Badge> {
    let mut badges = Vec::new();
    for element in first_matches(doc, BADGE_SELECTORS) {
        let Some(name) = first_text_in(element, BADGE_NAME_SELECTORS) else {
            continue;
        };
        let level = first_text_in(element, BADGE_LEVEL_SELECTORS)
            .unwrap_or_else(|| "Beginner".to_string());

        let (solved, needed) = first_text_in(element, BADGE_PROGRESS_SELECTORS)
            .map(|progress| progress_pair(&progress))
            .unwrap_or((0, 0));

        badges.push(Badge {
            name,
            level: Some(level),
            stars: None,
            solved: solved as u32,
            needed: Some(needed as u32),
        });
    }
    badges
}

fn extract_submissions(doc: &Html) -> Vec<Submission> {
    let Ok(cell_sel) = Selector::parse("td") else {
        return Vec::new();
    };
    let Ok(link_sel) = Selector::parse("a") else {
        return Vec::new();
    };
    let Ok(difficulty_sel) = Selector::parse(".difficulty") else {
        return Vec::new();
    };

    let mut submissions = Vec::new();
    for row in first_matches(doc, SUBMISSION_ROW_SELECTORS) {
        if submissions.len() >= RECENT_LIMIT {
            break;
        }
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 3 {
            continue;
        }

        let raw_time = element_text(cells[0]);
        let problem = cells[1]
            .select(&link_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let status = element_text(cells[2]);

        let difficulty = cells
            .get(3)
            .map(|c| element_text(*c))
            .filter(|t| !t.is_empty())
            .or_else(|| cells[1].select(&difficulty_sel).next().map(element_text))
            .unwrap_or_else(|| "Unknown".to_string());

        if raw_time.is_empty() || problem.is_empty() {
            continue;
        }

        // A timestamp neither format understands drops the row, not the
        // request.
        let Some(timestamp) = parse_submission_time(&raw_time) else {
            debug!(raw_time, "Failed to parse submission date");
            continue;
        };

        submissions.push(Submission {
            problem,
            difficulty,
            status: if status.is_empty() {
                "Unknown".to_string()
            } else {
                status
            },
            timestamp,
        });
    }
    submissions
}
