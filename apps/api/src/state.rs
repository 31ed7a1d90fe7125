use std::sync::Arc;

use crate::careers::matching::{RoleMatcher, TokenOverlapMatcher};
use crate::config::Config;
use crate::fetch::HttpFetcher;

/// Shared application state injected into all route handlers via Axum
/// extractors. No mutable state lives here: requests share only the HTTP
/// client, the config, and the matcher.
#[derive(Clone)]
pub struct AppState {
    pub http: HttpFetcher,
    pub config: Config,
    /// Pluggable role matcher. Default: TokenOverlapMatcher.
    pub role_matcher: Arc<dyn RoleMatcher>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            http: HttpFetcher::new(),
            config,
            role_matcher: Arc::new(TokenOverlapMatcher),
        }
    }
}
