use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::fetch::FetchError;
use crate::state::AppState;
use crate::stats::models::{Platform, PlatformStats};
use crate::stats::username::normalize;
use crate::stats::{codechef, hackerrank, leetcode};

/// Shared degrade policy: after validation, an upstream user-not-found is a
/// real 404; every other failure is logged and replaced with the platform's
/// all-defaults record under a 200.
fn degrade(
    platform: Platform,
    username: &str,
    result: Result<PlatformStats, FetchError>,
) -> Result<Json<PlatformStats>, AppError> {
    match result {
        Ok(stats) => Ok(Json(stats)),
        Err(FetchError::NotFound) => Err(AppError::NotFound(
            "User not found. Please check the username and try again.".to_string(),
        )),
        Err(e) => {
            warn!(?platform, %username, error = %e, "Upstream fetch failed; returning default record");
            Ok(Json(PlatformStats::defaults(platform, username)))
        }
    }
}

/// GET /api/leetcode/:username
pub async fn handle_leetcode(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlatformStats>, AppError> {
    let username = normalize(Platform::LeetCode, &username)?;
    info!(%username, "Fetching LeetCode stats");
    let result = leetcode::fetch_stats(&state.http, &state.config, &username).await;
    degrade(Platform::LeetCode, &username, result)
}

/// GET /api/codechef/:username
pub async fn handle_codechef(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlatformStats>, AppError> {
    let username = normalize(Platform::CodeChef, &username)?;
    info!(%username, "Fetching CodeChef stats");
    let result = codechef::fetch_stats(&state.http, &state.config, &username).await;
    degrade(Platform::CodeChef, &username, result)
}

/// GET /api/hackerrank/:username
pub async fn handle_hackerrank(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlatformStats>, AppError> {
    let username = normalize(Platform::HackerRank, &username)?;
    info!(%username, "Fetching HackerRank stats");
    let result = hackerrank::fetch_stats(&state.http, &state.config, &username).await;
    degrade(Platform::HackerRank, &username, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_masks_transport_failures() {
        for err in [
            FetchError::Timeout,
            FetchError::Network("connection refused".to_string()),
            FetchError::RateLimited,
            FetchError::Forbidden,
            FetchError::Upstream(502),
            FetchError::Decode("bad json".to_string()),
        ] {
            let result = degrade(Platform::LeetCode, "alice", Err(err));
            let Ok(Json(stats)) = result else {
                panic!("expected a default record");
            };
            assert_eq!(stats, PlatformStats::defaults(Platform::LeetCode, "alice"));
            assert_eq!(stats.solved, 0);
            assert_eq!(stats.total, Some(0));
            assert!(stats.badges.is_empty());
            assert!(stats.recent_submissions.is_empty());
            assert_eq!(stats.monthly_progress.total(), 0);
        }
    }

    #[test]
    fn test_degrade_surfaces_not_found() {
        let result = degrade(Platform::CodeChef, "ghost", Err(FetchError::NotFound));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_degrade_passes_through_success() {
        let stats = PlatformStats::defaults(Platform::HackerRank, "alice");
        let result = degrade(Platform::HackerRank, "alice", Ok(stats.clone()));
        let Ok(Json(returned)) = result else {
            panic!("expected success");
        };
        assert_eq!(returned, stats);
    }
}
