use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::linkedin::extract::{extract_profile, ExtractedProfile};
use crate::linkedin::models::{minimal_profile, ActivityItem, AnalysisSection, ProfileRecord};
use crate::linkedin::scoring::{self, ProfileCounts};
use crate::linkedin::session::BrowserSession;
use crate::state::AppState;
use crate::stats::username::linkedin_username;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
    #[serde(rename = "useProxy", default)]
    pub use_proxy: bool,
}

/// POST /api/linkedin/scrape
///
/// Deep analysis when a browser session can be had; the minimal profile
/// otherwise. Only a malformed URL is an error to the caller.
pub async fn handle_scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ProfileRecord>, AppError> {
    if req.profile_url.is_empty() {
        return Err(AppError::Validation(
            "Missing LinkedIn profile URL".to_string(),
        ));
    }
    let username = linkedin_username(&req.profile_url).ok_or_else(|| {
        AppError::Validation("Invalid LinkedIn profile URL format".to_string())
    })?;

    info!(%username, "Analyzing LinkedIn profile");
    if req.use_proxy {
        // No proxy pool is configured in this deployment; the flag is
        // accepted for API compatibility.
        info!(%username, "Proxy requested but no proxy pool is configured");
    }

    let mut minimal = minimal_profile(&username);
    minimal.profile.url = req.profile_url.clone();

    let session = match BrowserSession::launch(&state.config).await {
        Ok(session) => session,
        Err(e) => {
            warn!(%username, error = %e, "Browser session unavailable; returning minimal profile");
            return Ok(Json(minimal));
        }
    };

    match analyze(&session, &state, &req.profile_url, &username).await {
        Ok(record) => {
            session.close().await;
            info!(
                username,
                strength = record.analysis.profile_strength,
                "Deep profile analysis complete"
            );
            Ok(Json(record))
        }
        Err(e) => {
            warn!(%username, error = %e, "Deep extraction failed; returning minimal profile");
            // Teardown must not delay the response on the fallback path.
            tokio::spawn(session.close());
            Ok(Json(minimal))
        }
    }
}

async fn analyze(
    session: &BrowserSession,
    state: &AppState,
    profile_url: &str,
    username: &str,
) -> anyhow::Result<ProfileRecord> {
    let capture = session
        .capture_profile(profile_url, &state.config)
        .await?;
    let extracted = extract_profile(&capture, username);
    Ok(assemble_record(extracted, profile_url, username))
}

/// Folds the extracted sections and the derived scores into the response
/// record. Pure, so the whole scoring path is testable without a browser.
fn assemble_record(
    extracted: ExtractedProfile,
    profile_url: &str,
    username: &str,
) -> ProfileRecord {
    let mut record = minimal_profile(username);
    record.profile.url = profile_url.to_string();
    record.profile.name = extracted.name.clone();
    record.profile.headline = extracted.headline.clone();
    record.profile.location = extracted.location.clone();

    // Experience entries double as visible posts, education as articles:
    // the closest public proxy for content volume.
    record.activity.posts = extracted
        .experiences
        .iter()
        .enumerate()
        .map(|(id, exp)| {
            let company = if exp.company.is_empty() {
                "Company"
            } else {
                exp.company.as_str()
            };
            let title = if exp.title.is_empty() {
                "Role"
            } else {
                exp.title.as_str()
            };
            ActivityItem {
                id,
                title: format!("Experience at {company}: {title}"),
            }
        })
        .collect();
    record.activity.articles = extracted
        .educations
        .iter()
        .enumerate()
        .map(|(id, institution)| ActivityItem {
            id,
            title: format!("Education at {institution}"),
        })
        .collect();
    let content_count = record.activity.posts.len() + record.activity.articles.len();
    record.activity.total_activity_count = content_count;

    record.connections.count = extracted.connections;

    let counts = ProfileCounts {
        has_name: !extracted.name.is_empty(),
        has_headline: !extracted.headline.is_empty(),
        connections: extracted.connections,
        experience_count: extracted.experiences.len(),
        education_count: extracted.educations.len(),
        skills_count: extracted.skills.len(),
        content_count,
    };

    let completeness = scoring::completeness(&counts);
    let url_quality = scoring::url_quality(username);
    let engagement = scoring::engagement_score(counts.connections, counts.content_count);
    let network = scoring::network_strength(counts.connections);
    let strength = scoring::profile_strength(
        url_quality,
        completeness,
        engagement,
        network,
        counts.has_name,
        counts.connections,
    );

    let (likes, comments, shares) =
        scoring::estimated_engagement(counts.connections, counts.content_count);
    let (views, followers) = scoring::estimated_reach(counts.connections);
    record.profile.views = views;
    record.profile.followers = followers;
    record.engagement.score = engagement;
    record.engagement.likes = likes;
    record.engagement.comments = comments;
    record.engagement.shares = shares;

    record.analysis = AnalysisSection {
        profile_strength: strength,
        url_quality,
        profile_completeness: completeness,
        engagement,
        network_strength: network,
        improvements: scoring::improvements(&extracted.name, username, &counts, completeness),
    };

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkedin::extract::ExperienceItem;
    use crate::linkedin::models::name_from_username;

    fn full_extraction() -> ExtractedProfile {
        ExtractedProfile {
            name: "Jane A. Doe".to_string(),
            headline: "Staff Engineer".to_string(),
            location: "Berlin".to_string(),
            connections: 512,
            experiences: vec![
                ExperienceItem {
                    title: "Staff Engineer".to_string(),
                    company: "Example Corp".to_string(),
                },
                ExperienceItem {
                    title: "Engineer".to_string(),
                    company: "Startup GmbH".to_string(),
                },
            ],
            educations: vec!["TU Berlin".to_string()],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
        }
    }

    #[test]
    fn test_assemble_record_scores_and_estimates() {
        let record = assemble_record(
            full_extraction(),
            "https://linkedin.com/in/jane-doe",
            "jane-doe",
        );
        assert_eq!(record.profile.name, "Jane A. Doe");
        assert_eq!(record.connections.count, 512);
        assert_eq!(record.analysis.network_strength, 100);
        assert_eq!(record.activity.total_activity_count, 3);
        assert!(record.analysis.profile_strength >= 25);
        // views = 512 * 0.25, followers = 512 * 0.9
        assert_eq!(record.profile.views, 128);
        assert_eq!(record.profile.followers, 460);
        assert_eq!(record.activity.posts[0].title, "Experience at Example Corp: Staff Engineer");
        assert_eq!(record.activity.articles[0].title, "Education at TU Berlin");
    }

    #[test]
    fn test_assemble_record_empty_extraction_still_complete() {
        let extracted = ExtractedProfile {
            name: name_from_username("jane-doe"),
            ..Default::default()
        };
        let record = assemble_record(extracted, "https://linkedin.com/in/jane-doe", "jane-doe");
        assert_eq!(record.connections.count, 0);
        assert_eq!(record.analysis.network_strength, 0);
        assert_eq!(record.engagement.likes, 0);
        // Named profile floor applies.
        assert!(record.analysis.profile_strength >= 7);
        assert!(!record.analysis.improvements.is_empty());
    }

    #[test]
    fn test_strong_network_floor_via_assembly() {
        let extracted = ExtractedProfile {
            name: name_from_username("jane-doe"),
            connections: 300,
            ..Default::default()
        };
        let record = assemble_record(extracted, "https://linkedin.com/in/jane-doe", "jane-doe");
        assert!(record.analysis.profile_strength >= 25);
    }
}
