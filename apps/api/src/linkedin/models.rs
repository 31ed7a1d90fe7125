use serde::{Deserialize, Serialize};

use crate::linkedin::scoring::{self, MINIMAL_PROFILE_STRENGTH_FLOOR};

/// Full profile-analysis response: identity, activity, network, engagement
/// estimates, and the derived analysis block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile: ProfileSection,
    pub activity: ActivitySection,
    pub connections: ConnectionsSection,
    pub engagement: EngagementSection,
    pub analysis: AnalysisSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    pub username: String,
    pub url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub industry: String,
    pub views: u64,
    pub followers: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivitySection {
    pub posts: Vec<ActivityItem>,
    pub articles: Vec<ActivityItem>,
    pub total_activity_count: usize,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: usize,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionsSection {
    pub count: u64,
    pub new: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementSection {
    pub score: u32,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSection {
    #[serde(rename = "profileStrength")]
    pub profile_strength: u32,
    #[serde(rename = "urlQuality")]
    pub url_quality: u32,
    #[serde(rename = "profileCompleteness")]
    pub profile_completeness: u32,
    pub engagement: u32,
    #[serde(rename = "networkStrength")]
    pub network_strength: u32,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    #[serde(rename = "type")]
    pub kind: ImprovementKind,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementKind {
    Critical,
    High,
    Medium,
}

impl Improvement {
    pub fn new(kind: ImprovementKind, message: &str, action: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            action: action.to_string(),
        }
    }
}

/// Title-cases a hyphenated handle into a display name ("jane-doe" →
/// "Jane Doe"): the placeholder used whenever the real name is unreachable.
pub fn name_from_username(username: &str) -> String {
    username
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The all-defaults profile produced when deep browser-based extraction is
/// unavailable or fails: placeholder name from the handle, URL quality from
/// the handle alone, and the canned critical improvement list.
pub fn minimal_profile(username: &str) -> ProfileRecord {
    ProfileRecord {
        profile: ProfileSection {
            username: username.to_string(),
            url: format!("https://linkedin.com/in/{username}"),
            name: name_from_username(username),
            headline: String::new(),
            location: String::new(),
            industry: String::new(),
            views: 0,
            followers: 0,
        },
        activity: ActivitySection::default(),
        connections: ConnectionsSection::default(),
        engagement: EngagementSection::default(),
        analysis: AnalysisSection {
            profile_strength: MINIMAL_PROFILE_STRENGTH_FLOOR,
            url_quality: scoring::url_quality(username),
            profile_completeness: 0,
            engagement: 0,
            network_strength: 0,
            improvements: vec![
                Improvement::new(
                    ImprovementKind::Critical,
                    "Add your full name",
                    "Update your profile with your professional name for better discoverability",
                ),
                Improvement::new(
                    ImprovementKind::Critical,
                    "Start building your network",
                    "Connect with colleagues, classmates, and industry professionals",
                ),
                Improvement::new(
                    ImprovementKind::Critical,
                    "Add your work experience",
                    "Include your current and past positions with descriptions of your responsibilities",
                ),
                Improvement::new(
                    ImprovementKind::High,
                    "Add your education background",
                    "Include your degrees, certifications, and relevant coursework",
                ),
                Improvement::new(
                    ImprovementKind::High,
                    "Add your key skills",
                    "List at least 5 relevant skills that showcase your expertise",
                ),
                Improvement::new(
                    ImprovementKind::Critical,
                    "Complete your basic profile information",
                    "Add the essential elements: photo, headline, current position, and education",
                ),
            ],
        },
    }
}
