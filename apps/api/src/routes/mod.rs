pub mod health;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::careers::handlers as careers;
use crate::linkedin::handlers as linkedin;
use crate::state::AppState;
use crate::stats::handlers as stats;

/// GET /
/// Service index: name, version, and the routes worth knowing about.
async fn index() -> Json<Value> {
    Json(json!({
        "name": "Coding Stats API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            {"path": "/api/leetcode/{username}", "description": "Get LeetCode user statistics"},
            {"path": "/api/codechef/{username}", "description": "Get CodeChef user statistics"},
            {"path": "/api/hackerrank/{username}", "description": "Get HackerRank user statistics"},
            {"path": "/api/linkedin/scrape", "description": "Analyze LinkedIn profile"},
            {"path": "/career-recommendations", "description": "Rank job roles against a skill list"}
        ]
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_handler))
        // Coding-platform statistics
        .route("/api/leetcode/:username", get(stats::handle_leetcode))
        .route("/api/codechef/:username", get(stats::handle_codechef))
        .route("/api/hackerrank/:username", get(stats::handle_hackerrank))
        // LinkedIn profile analysis
        .route("/api/linkedin/scrape", post(linkedin::handle_scrape))
        // Career recommendations
        .route(
            "/career-recommendations",
            post(careers::handle_recommendations),
        )
        .route("/available-skills", get(careers::handle_available_skills))
        .route("/job-categories", get(careers::handle_job_categories))
        .with_state(state)
}
