use rand::seq::IndexedRandom;

pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.0) Opera 12.14",
    "Mozilla/5.0 (X11; Ubuntu; Linux i686; rv:26.0) Gecko/20100101 Firefox/26.0",
    "Mozilla/5.0 (X11; U; Linux x86_64; en-US; rv:1.9.1.3) Gecko/20090913 Firefox/3.5.3",
    "Mozilla/5.0 (Windows; U; Windows NT 6.1; en; rv:1.9.1.3) Gecko/20090824 Firefox/3.5.3 (.NET CLR 3.5.30729)",
    "Mozilla/5.0 (Windows NT 6.2) AppleWebKit/535.7 (KHTML, like Gecko) Comodo_Dragon/16.1.1.0 Chrome/16.0.912.63 Safari/535.7",
    "Mozilla/5.0 (Windows; U; Windows NT 5.2; en-US; rv:1.9.1.3) Gecko/20090824 Firefox/3.5.3 (.NET CLR 3.5.30729)",
    "Mozilla/5.0 (Windows; U; Windows NT 6.1; en-US; rv:1.9.1.1) Gecko/20090718 Firefox/3.5.1",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:63.0) Gecko/20100101 Firefox/63.0",
];

const ABUSE_TOKEN_PARAM: &str = "google_abuse";

/// Per-run search state threaded through every query.
#[derive(Debug, Clone)]
pub struct SearchSession {
    abuse_token: String,
    user_agents: Vec<String>,
    custom_format: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::with_user_agents(DEFAULT_USER_AGENTS.iter().map(ToString::to_string).collect())
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_user_agents(user_agents: Vec<String>) -> Self {
        Self {
            abuse_token: String::new(),
            user_agents,
            custom_format: None,
        }
    }

    /// Starts the session of a repeated run, keeping the solved challenge
    /// and the custom format.
    #[must_use]
    pub fn rerun(&self) -> Self {
        self.clone()
    }

    /// Query-string fragment to append to every search URL, empty until a
    /// challenge has been solved.
    pub fn abuse_token(&self) -> &str {
        &self.abuse_token
    }

    pub fn set_abuse_token(&mut self, token: &str) {
        self.abuse_token = format!("&{ABUSE_TOKEN_PARAM}={}", token.trim());
    }

    pub fn custom_format(&self) -> Option<&str> {
        self.custom_format.as_deref()
    }

    pub fn set_custom_format(&mut self, custom_format: &str) {
        let custom_format = custom_format.trim();
        self.custom_format = (!custom_format.is_empty()).then(|| custom_format.to_string());
    }

    pub fn random_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map_or(DEFAULT_USER_AGENTS[0], String::as_str)
    }
}
