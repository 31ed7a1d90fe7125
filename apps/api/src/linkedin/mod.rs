// LinkedIn profile analysis: one browser session per request, tolerant
// section extraction, heuristic scoring, and a minimal-profile fallback for
// every failure past URL validation.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod session;
