//! Role matching: pluggable, trait-based scorer over the fixed catalog.
//!
//! Default: `TokenOverlapMatcher`, a pure-Rust term-frequency cosine over the
//! joined skill texts. Fast, deterministic, fully testable, and close enough
//! to the embedding-similarity behavior it replaces for a fixed catalog of
//! this size. `AppState` holds an `Arc<dyn RoleMatcher>`, so a semantic
//! backend can be swapped in at startup without touching callers.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::careers::catalog::JOB_ROLES;
use crate::errors::AppError;

const TOP_RECOMMENDATIONS: usize = 10;

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation regex"));

/// One ranked recommendation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub job_role: String,
    pub category: String,
    pub similarity_score: f64,
    pub missing_skills: String,
}

/// The role matcher trait. Implement this to swap scoring backends without
/// touching the endpoint or handler code.
#[async_trait]
pub trait RoleMatcher: Send + Sync {
    async fn rank(&self, skills: &[String]) -> Result<Vec<RoleRecommendation>, AppError>;
}

/// Default backend: token-frequency cosine between the user's skill text and
/// each role's skill text.
pub struct TokenOverlapMatcher;

#[async_trait]
impl RoleMatcher for TokenOverlapMatcher {
    async fn rank(&self, skills: &[String]) -> Result<Vec<RoleRecommendation>, AppError> {
        Ok(rank_roles(skills))
    }
}

/// Lowercases, strips punctuation, and trims a raw skill label.
pub fn clean_skill(skill: &str) -> String {
    PUNCTUATION_RE
        .replace_all(skill, "")
        .to_lowercase()
        .trim()
        .to_string()
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in text.split_whitespace() {
        *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity between the term-frequency vectors of two skill texts,
/// in 0.0..=1.0.
fn cosine_similarity(a: &str, b: &str) -> f64 {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);
    if tf_a.is_empty() || tf_b.is_empty() {
        return 0.0;
    }

    let dot: f64 = tf_a
        .iter()
        .filter_map(|(token, weight)| tf_b.get(token).map(|other| weight * other))
        .sum();
    let norm_a: f64 = tf_a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = tf_b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn rank_roles(skills: &[String]) -> Vec<RoleRecommendation> {
    let cleaned: Vec<String> = skills
        .iter()
        .map(|s| clean_skill(s))
        .filter(|s| !s.is_empty())
        .collect();
    let user_set: BTreeSet<&str> = cleaned.iter().map(String::as_str).collect();
    let user_text = cleaned.join(" ");

    let mut recommendations: Vec<RoleRecommendation> = JOB_ROLES
        .iter()
        .map(|role| {
            let role_text = role
                .skills
                .iter()
                .map(|s| clean_skill(s))
                .collect::<Vec<_>>()
                .join(" ");
            let similarity_score = cosine_similarity(&user_text, &role_text) * 100.0;

            let missing: BTreeSet<&str> = role
                .skills
                .iter()
                .copied()
                .filter(|s| !user_set.contains(clean_skill(s).as_str()))
                .collect();
            let missing_skills = if missing.is_empty() {
                "None".to_string()
            } else {
                missing.into_iter().collect::<Vec<_>>().join(", ")
            };

            RoleRecommendation {
                job_role: role.name.to_string(),
                category: role.category.to_string(),
                similarity_score,
                missing_skills,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations.truncate(TOP_RECOMMENDATIONS);
    recommendations
}
