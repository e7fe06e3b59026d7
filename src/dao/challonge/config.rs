//! Connection settings for the Challonge backend.

/// Default root of the Challonge v1 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.challonge.com/v1";

/// Runtime configuration describing how to reach one Challonge tournament.
#[derive(Debug, Clone)]
pub struct ChallongeConfig {
    /// API root without trailing slash, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Challonge account name used for basic auth.
    pub username: String,
    /// API key used as the basic auth password.
    pub api_key: String,
    /// Tournament key as used in API paths (`foo` or `subdomain-foo`).
    pub tournament: String,
}

impl ChallongeConfig {
    /// Settings for `tournament` against the public API.
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
        tournament: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            api_key: api_key.into(),
            tournament: tournament.into(),
        }
    }

    /// Point the client at another API root (self-hosted mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
