//! LeetCode adapter: two GraphQL reads against a single upstream endpoint,
//! folded into the uniform statistics record.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::extract::time::from_unix;
use crate::fetch::{FetchError, HttpFetcher};
use crate::stats::models::{MonthlyProgress, Platform, PlatformStats, Submission};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const RECENT_LIMIT: usize = 10;

const PROFILE_QUERY: &str = r#"
    query userPublicProfile($username: String!) {
        matchedUser(username: $username) {
            username
            submitStats: submitStatsGlobal {
                acSubmissionNum {
                    difficulty
                    count
                    submissions
                }
            }
            profile {
                ranking
                reputation
            }
            submissionCalendar
        }
        allQuestionsCount {
            difficulty
            count
        }
    }
"#;

const RECENT_QUERY: &str = r#"
    query recentSubmissions($username: String!) {
        recentSubmissionList(username: $username, limit: 10) {
            title
            timestamp
            statusDisplay
        }
    }
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    data: Option<ProfileData>,
}

#[derive(Deserialize)]
struct ProfileData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
    #[serde(rename = "allQuestionsCount", default)]
    all_questions_count: Vec<DifficultyCount>,
}

#[derive(Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
    profile: UserProfile,
    #[serde(rename = "submissionCalendar")]
    submission_calendar: Option<String>,
}

#[derive(Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum", default)]
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Deserialize)]
struct DifficultyCount {
    count: u32,
}

#[derive(Deserialize)]
struct UserProfile {
    ranking: Option<i64>,
    reputation: Option<i64>,
}

#[derive(Deserialize)]
struct RecentEnvelope {
    data: Option<RecentData>,
}

#[derive(Deserialize)]
struct RecentData {
    #[serde(rename = "recentSubmissionList")]
    recent_submission_list: Option<Vec<RecentSubmission>>,
}

#[derive(Deserialize)]
struct RecentSubmission {
    title: String,
    timestamp: String,
    #[serde(rename = "statusDisplay")]
    status_display: String,
}

/// Fetches LeetCode statistics for an already-normalized username. The two
/// GraphQL reads are independent, so they run concurrently.
pub async fn fetch_stats(
    fetcher: &HttpFetcher,
    config: &Config,
    username: &str,
) -> Result<PlatformStats, FetchError> {
    let timeout = Duration::from_secs(config.graphql_timeout_secs);

    let profile_req = GraphQlRequest {
        operation_name: "userPublicProfile",
        query: PROFILE_QUERY,
        variables: Variables { username },
    };
    let recent_req = GraphQlRequest {
        operation_name: "recentSubmissions",
        query: RECENT_QUERY,
        variables: Variables { username },
    };

    let (profile, recent) = tokio::join!(
        fetcher.post_graphql::<_, ProfileEnvelope>(GRAPHQL_URL, &profile_req, timeout),
        fetcher.post_graphql::<_, RecentEnvelope>(GRAPHQL_URL, &recent_req, timeout),
    );

    let profile = profile?;
    let data = profile.data.ok_or(FetchError::NotFound)?;
    let user = data.matched_user.ok_or(FetchError::NotFound)?;

    let solved: u32 = user
        .submit_stats
        .ac_submission_num
        .iter()
        .map(|d| d.count)
        .sum();
    let total: u32 = data.all_questions_count.iter().map(|d| d.count).sum();

    let monthly_progress = user
        .submission_calendar
        .as_deref()
        .map(decode_calendar)
        .unwrap_or_default();

    // Recent submissions are a nice-to-have: a failed second read leaves the
    // list empty rather than failing the whole request.
    let recent_submissions = match recent {
        Ok(envelope) => format_recent(envelope),
        Err(e) => {
            debug!(username, error = %e, "Recent submissions read failed");
            Vec::new()
        }
    };

    Ok(PlatformStats {
        platform: Platform::LeetCode,
        username: username.to_string(),
        solved,
        total: Some(total),
        rank: user
            .profile
            .ranking
            .map(|r| r.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        rating: user.profile.reputation.unwrap_or(0),
        badges: Vec::new(),
        recent_submissions,
        monthly_progress,
    })
}

/// Decodes the JSON-encoded submission calendar (Unix-day timestamp →
/// submission count) into the monthly histogram. Malformed entries are
/// skipped, never fatal.
fn decode_calendar(raw: &str) -> MonthlyProgress {
    let mut progress = MonthlyProgress::default();
    let Ok(calendar) = serde_json::from_str::<HashMap<String, u32>>(raw) else {
        return progress;
    };
    for (stamp, count) in calendar {
        let Ok(seconds) = stamp.parse::<i64>() else {
            continue;
        };
        if let Some(instant) = from_unix(seconds) {
            use chrono::Datelike;
            progress.add(instant.month0() as usize, count);
        }
    }
    progress
}

fn format_recent(envelope: RecentEnvelope) -> Vec<Submission> {
    let list = envelope
        .data
        .and_then(|d| d.recent_submission_list)
        .unwrap_or_default();

    list.into_iter()
        .take(RECENT_LIMIT)
        .filter_map(|sub| {
            let seconds = sub.timestamp.parse::<i64>().ok()?;
            let timestamp = from_unix(seconds)?;
            Some(Submission {
                problem: sub.title,
                // The recent-submission endpoint does not expose difficulty.
                difficulty: "Unknown".to_string(),
                status: sub.status_display,
                timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_calendar_buckets_by_month() {
        // Jan 1 2021 (x3), Feb 1 2021 (x2)
        let raw = r#"{"1609459200": 3, "1612137600": 2}"#;
        let progress = decode_calendar(raw);
        assert_eq!(progress.get(0), 3);
        assert_eq!(progress.get(1), 2);
        assert_eq!(progress.total(), 5);
    }

    #[test]
    fn test_decode_calendar_skips_malformed_keys() {
        let raw = r#"{"not-a-number": 3, "1609459200": 1}"#;
        let progress = decode_calendar(raw);
        assert_eq!(progress.total(), 1);
    }

    #[test]
    fn test_decode_calendar_garbage_is_all_zero() {
        let progress = decode_calendar("not json at all");
        assert_eq!(progress.total(), 0);
    }

    #[test]
    fn test_format_recent_caps_and_converts() {
        let envelope = RecentEnvelope {
            data: Some(RecentData {
                recent_submission_list: Some(
                    (0..15)
                        .map(|i| RecentSubmission {
                            title: format!("Problem {i}"),
                            timestamp: "1609459200".to_string(),
                            status_display: "Accepted".to_string(),
                        })
                        .collect(),
                ),
            }),
        };
        let subs = format_recent(envelope);
        assert_eq!(subs.len(), 10);
        assert_eq!(subs[0].difficulty, "Unknown");
        assert_eq!(subs[0].status, "Accepted");
    }

    #[test]
    fn test_format_recent_drops_unparseable_timestamps() {
        let envelope = RecentEnvelope {
            data: Some(RecentData {
                recent_submission_list: Some(vec![
                    RecentSubmission {
                        title: "Good".to_string(),
                        timestamp: "1609459200".to_string(),
                        status_display: "Accepted".to_string(),
                    },
                    RecentSubmission {
                        title: "Bad".to_string(),
                        timestamp: "garbage".to_string(),
                        status_display: "Accepted".to_string(),
                    },
                ]),
            }),
        };
        let subs = format_recent(envelope);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].problem, "Good");
    }

    #[test]
    fn test_format_recent_missing_list_is_empty() {
        let envelope = RecentEnvelope { data: None };
        assert!(format_recent(envelope).is_empty());
    }
}
