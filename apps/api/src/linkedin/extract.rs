//! Profile-section extraction over captured DOM snapshots.
//!
//! Every field runs through an ordered selector chain; a section that yields
//! nothing is a valid empty section, never an error. The connection count
//! gets the deepest fallback: scoped selector chain, then a page-wide text
//! scan, then a regex pass over the raw page source.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extract::html::{element_text, first_text, first_text_in};
use crate::extract::text::extract_count;
use crate::linkedin::models::name_from_username;
use crate::linkedin::session::PageCapture;

const NAME_SELECTORS: &[&str] = &[
    "h1.text-heading-xlarge",
    "h1.inline",
    "h1",
    "div.pv-text-details__left-panel > div",
];

const HEADLINE_SELECTORS: &[&str] = &[
    "div.text-body-medium",
    "div.pv-text-details__left-panel > div:nth-of-type(2)",
    "div.text-body-small.break-words",
];

const LOCATION_SELECTORS: &[&str] = &[
    "span.text-body-small.inline",
    "div.pv-text-details__left-panel > span",
    "span.text-body-small.break-words",
];

// Places the connection count tends to live, most specific first.
const CONNECTION_SELECTORS: &[&str] = &[
    "ul.pv-top-card--list > li",
    "li.text-body-small",
    "div.ph5.pb5 span",
    "div.pvs-header__subtitle span",
    "span.t-bold",
];

const CONNECTION_SCAN_SELECTORS: &[&str] = &["span", "div.text-body-small"];

static CONNECTION_SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\+?\s*connections").expect("connection source regex"));

const EXPERIENCE_SECTION_SELECTORS: &[&str] = &[
    "section#experience-section",
    "section[id*=experience]",
    "div#experience",
    "div[id*=experience]",
];
const EDUCATION_SECTION_SELECTORS: &[&str] = &[
    "section#education-section",
    "section[id*=education]",
    "div#education",
    "div[id*=education]",
];
const SKILLS_SECTION_SELECTORS: &[&str] = &[
    "section#skills-section",
    "section[id*=skills]",
    "div#skills",
    "div[id*=skills]",
];

const TITLE_SELECTORS: &[&str] = &[
    "span.mr1.t-bold",
    "span.text-heading-small",
    "h3",
    "div.t-bold",
];
const COMPANY_SELECTORS: &[&str] = &[
    "span.t-14.t-normal",
    "span.text-body-medium",
    "p.pv-entity__secondary-title",
    "div.t-normal",
];
const INSTITUTION_SELECTORS: &[&str] = &["h3", "div.t-bold", "span.text-heading-small"];
const SKILL_NAME_SELECTORS: &[&str] = &[
    "span.text-body-small",
    "span.pv-skill-category-entity__name-text",
    "div.t-bold",
    "span",
];

const MAX_EXPERIENCES: usize = 5;
const MAX_EDUCATIONS: usize = 3;
const MAX_SKILLS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
}

/// Everything the page yielded, with empty defaults for whatever it did not.
#[derive(Debug, Clone, Default)]
pub struct ExtractedProfile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub connections: u64,
    pub experiences: Vec<ExperienceItem>,
    pub educations: Vec<String>,
    pub skills: Vec<String>,
}

pub fn extract_profile(capture: &PageCapture, username: &str) -> ExtractedProfile {
    let header = Html::parse_document(&capture.header);

    let mut profile = ExtractedProfile {
        name: first_text(&header, NAME_SELECTORS).unwrap_or_default(),
        headline: first_text(&header, HEADLINE_SELECTORS).unwrap_or_default(),
        location: first_text(&header, LOCATION_SELECTORS).unwrap_or_default(),
        ..Default::default()
    };

    // A profile we reached at all gets at least the title-cased handle.
    if profile.name.is_empty() {
        profile.name = name_from_username(username);
        debug!(username, fallback = %profile.name, "Using username as name fallback");
    }

    profile.connections = extract_connections(&header, &capture.header);

    profile.experiences = extract_experiences(&capture.experience);
    profile.educations = extract_educations(&capture.education);
    profile.skills = extract_skills(&capture.skills);

    debug!(
        username,
        connections = profile.connections,
        experiences = profile.experiences.len(),
        educations = profile.educations.len(),
        skills = profile.skills.len(),
        "Extracted profile sections"
    );

    profile
}

/// Connection count, in three widening passes: the scoped selector chain,
/// then any text element on the page mentioning connections, then a regex
/// over the raw source.
fn extract_connections(doc: &Html, source: &str) -> u64 {
    for candidate in CONNECTION_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for element in doc.select(&selector) {
            let text = element_text(element);
            if text.to_lowercase().contains("connection")
                || text.to_lowercase().contains("follower")
            {
                let count = extract_count(&text, 0);
                if count > 0 {
                    return count;
                }
            }
        }
    }

    for candidate in CONNECTION_SCAN_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for element in doc.select(&selector) {
            let text = element_text(element);
            if text.to_lowercase().contains("connection") {
                let count = extract_count(&text, 0);
                if count > 0 {
                    debug!(%text, "Connection count found in page-wide scan");
                    return count;
                }
            }
        }
    }

    if let Some(caps) = CONNECTION_SOURCE_RE.captures(source) {
        if let Ok(count) = caps[1].parse::<u64>() {
            debug!(count, "Connection count found in page source");
            return count;
        }
    }

    0
}

/// Finds a profile section either by its id-based selectors or, failing
/// that, by scanning `section`/`div` headings for the given title word.
fn section_items<'a>(
    doc: &'a Html,
    selectors: &[&str],
    heading: &str,
) -> Vec<ElementRef<'a>> {
    let Ok(item_sel) = Selector::parse("li") else {
        return Vec::new();
    };

    for candidate in selectors {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for section in doc.select(&selector) {
            let items: Vec<_> = section.select(&item_sel).collect();
            if !items.is_empty() {
                return items;
            }
        }
    }

    // Heading scan: any section whose first heading mentions the word.
    let Ok(section_sel) = Selector::parse("section") else {
        return Vec::new();
    };
    let Ok(heading_sel) = Selector::parse("h2, div") else {
        return Vec::new();
    };
    for section in doc.select(&section_sel) {
        let has_heading = section
            .select(&heading_sel)
            .take(5)
            .any(|h| element_text(h).contains(heading));
        if has_heading {
            let items: Vec<_> = section.select(&item_sel).collect();
            if !items.is_empty() {
                return items;
            }
        }
    }

    Vec::new()
}

fn extract_experiences(snapshot: &str) -> Vec<ExperienceItem> {
    let doc = Html::parse_document(snapshot);
    section_items(&doc, EXPERIENCE_SECTION_SELECTORS, "Experience")
        .into_iter()
        .take(MAX_EXPERIENCES)
        .filter_map(|item| {
            let title = first_text_in(item, TITLE_SELECTORS).unwrap_or_default();
            let company = first_text_in(item, COMPANY_SELECTORS).unwrap_or_default();
            if title.is_empty() && company.is_empty() {
                None
            } else {
                Some(ExperienceItem { title, company })
            }
        })
        .collect()
}

fn extract_educations(snapshot: &str) -> Vec<String> {
    let doc = Html::parse_document(snapshot);
    section_items(&doc, EDUCATION_SECTION_SELECTORS, "Education")
        .into_iter()
        .take(MAX_EDUCATIONS)
        .filter_map(|item| first_text_in(item, INSTITUTION_SELECTORS))
        .collect()
}

fn extract_skills(snapshot: &str) -> Vec<String> {
    let doc = Html::parse_document(snapshot);
    section_items(&doc, SKILLS_SECTION_SELECTORS, "Skills")
        .into_iter()
        .take(MAX_SKILLS)
        .filter_map(|item| first_text_in(item, SKILL_NAME_SELECTORS))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_with_header(header: &str) -> PageCapture {
        PageCapture {
            header: header.to_string(),
            ..Default::default()
        }
    }

    const HEADER_FIXTURE: &str = r#"
        <html><body>
            <h1 class="text-heading-xlarge">Jane Doe</h1>
            <div class="text-body-medium">Staff Engineer at Example</div>
            <span class="text-body-small inline">Berlin, Germany</span>
            <ul class="pv-top-card--list"><li>512 connections</li></ul>
        </body></html>
    "#;

    #[test]
    fn test_header_extraction() {
        let profile = extract_profile(&capture_with_header(HEADER_FIXTURE), "jane-doe");
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.headline, "Staff Engineer at Example");
        assert_eq!(profile.location, "Berlin, Germany");
        assert_eq!(profile.connections, 512);
    }

    #[test]
    fn test_name_falls_back_to_username() {
        let profile = extract_profile(
            &capture_with_header("<html><body></body></html>"),
            "jane-doe",
        );
        assert_eq!(profile.name, "Jane Doe");
    }

    #[test]
    fn test_connections_from_page_wide_scan() {
        let header = r#"
            <html><body>
                <h1>Jane</h1>
                <span>Contact info</span>
                <span>304 connections</span>
            </body></html>
        "#;
        let profile = extract_profile(&capture_with_header(header), "jane");
        assert_eq!(profile.connections, 304);
    }

    #[test]
    fn test_connections_from_raw_source() {
        // No matching elements at all, only inline script text.
        let header = r#"
            <html><body><h1>Jane</h1>
            <script>var blob = "\"connectionCount\": 287 connections";</script>
            </body></html>
        "#;
        let profile = extract_profile(&capture_with_header(header), "jane");
        assert_eq!(profile.connections, 287);
    }

    #[test]
    fn test_no_connections_anywhere_is_zero() {
        let profile = extract_profile(
            &capture_with_header("<html><body><h1>Jane</h1></body></html>"),
            "jane",
        );
        assert_eq!(profile.connections, 0);
    }

    const EXPERIENCE_FIXTURE: &str = r#"
        <html><body>
            <section id="experience-section">
                <ul>
                    <li><h3>Staff Engineer</h3><span class="text-body-medium">Example Corp</span></li>
                    <li><h3>Engineer</h3><span class="text-body-medium">Startup GmbH</span></li>
                    <li><div class="decoration"></div></li>
                </ul>
            </section>
        </body></html>
    "#;

    #[test]
    fn test_experience_extraction() {
        let items = extract_experiences(EXPERIENCE_FIXTURE);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Staff Engineer");
        assert_eq!(items[0].company, "Example Corp");
    }

    #[test]
    fn test_experience_section_found_by_heading_scan() {
        let html = r#"
            <html><body>
                <section>
                    <h2>Experience</h2>
                    <ul><li><h3>Engineer</h3></li></ul>
                </section>
            </body></html>
        "#;
        let items = extract_experiences(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Engineer");
    }

    #[test]
    fn test_education_and_skills_caps() {
        let edu_html = format!(
            "<html><body><div id=\"education\"><ul>{}</ul></div></body></html>",
            (0..5)
                .map(|i| format!("<li><h3>School {i}</h3></li>"))
                .collect::<String>()
        );
        assert_eq!(extract_educations(&edu_html).len(), MAX_EDUCATIONS);

        let skills_html = format!(
            "<html><body><div id=\"skills\"><ul>{}</ul></div></body></html>",
            (0..15)
                .map(|i| format!("<li><span class=\"text-body-small\">Skill {i}</span></li>"))
                .collect::<String>()
        );
        assert_eq!(extract_skills(&skills_html).len(), MAX_SKILLS);
    }

    #[test]
    fn test_missing_sections_are_empty_not_errors() {
        assert!(extract_experiences("<html><body></body></html>").is_empty());
        assert!(extract_educations("<html><body></body></html>").is_empty());
        assert!(extract_skills("<html><body></body></html>").is_empty());
    }
}
