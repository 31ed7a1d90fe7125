use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::careers::catalog::{all_skills, JOB_ROLES, SKILL_CATEGORIES};
use crate::careers::matching::RoleRecommendation;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillsInput {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailableSkills {
    pub categories: BTreeMap<String, Vec<String>>,
    pub all_skills: Vec<String>,
}

/// POST /career-recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(input): Json<SkillsInput>,
) -> Result<Json<Vec<RoleRecommendation>>, AppError> {
    if input.skills.is_empty() {
        return Err(AppError::Validation("No skills provided".to_string()));
    }
    info!(skill_count = input.skills.len(), "Ranking career recommendations");
    let recommendations = state.role_matcher.rank(&input.skills).await?;
    Ok(Json(recommendations))
}

/// GET /available-skills
pub async fn handle_available_skills() -> Json<AvailableSkills> {
    let categories = SKILL_CATEGORIES
        .iter()
        .map(|(name, skills)| {
            (
                name.to_string(),
                skills.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();
    let all_skills = all_skills().into_iter().map(str::to_string).collect();
    Json(AvailableSkills {
        categories,
        all_skills,
    })
}

/// GET /job-categories
pub async fn handle_job_categories() -> Json<BTreeMap<String, Vec<String>>> {
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for role in JOB_ROLES {
        categories
            .entry(role.category.to_string())
            .or_default()
            .push(role.name.to_string());
    }
    Json(categories)
}
