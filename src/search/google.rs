use url::form_urlencoded;

use super::{
    HttpResponse, HttpTransport, SearchError, SearchSession, Searcher, parse, recover,
    transport::browser_headers,
};
use crate::io::{
    prompt::{PromptError, Prompter},
    report::{ReportKind, Reporter},
};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const ABUSE_COOKIE: &str = "GOOGLE_ABUSE_EXEMPTION";

/// Scrapes the HTML results page, asking the operator to solve any
/// captcha the engine puts in front of it.
pub struct GoogleSearchClient<T> {
    transport: T,
    search_url: String,
}

impl<T: HttpTransport> GoogleSearchClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            search_url: GOOGLE_SEARCH_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_search_url(mut self, search_url: &str) -> Self {
        self.search_url = search_url.to_string();
        self
    }

    pub fn build_url(&self, query: &str, stop: usize) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("tbs", "li:1")
            .append_pair("q", query)
            .append_pair("num", &stop.to_string())
            .append_pair("hl", "en")
            .append_pair("gws_rd", "ssl")
            .append_pair("gl", "us")
            .finish();
        format!("{}?{params}", self.search_url)
    }

    fn fetch(&self, url: &str, session: &SearchSession) -> Result<HttpResponse, SearchError> {
        let request_url = format!("{url}{}", session.abuse_token());
        self.transport
            .get(&request_url, &browser_headers(session.random_user_agent()))
    }

    fn is_blocked(response: &HttpResponse) -> bool {
        !response.is_success() || parse::is_challenge_page(&response.body)
    }

    fn solve_challenge(
        url: &str,
        session: &mut SearchSession,
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<(), SearchError> {
        if !prompter.is_interactive() {
            reporter.report(
                ReportKind::Warning,
                "You are temporarily blocked by the search engine. Skipping this query.",
            );
            return Err(SearchError::ChallengeUnsolved);
        }

        reporter.report(
            ReportKind::Warning,
            &format!(
                "You are temporarily blocked by the search engine. Complete the captcha at the following URL and paste the content of the {ABUSE_COOKIE} cookie: {url}"
            ),
        );

        let token = prompter.ask(&format!("{ABUSE_COOKIE}=")).map_err(|err| match err {
            PromptError::Interrupted => SearchError::Interrupted,
            PromptError::Unavailable | PromptError::Io(_) => SearchError::ChallengeUnsolved,
        })?;

        session.set_abuse_token(&token);
        reporter.report(ReportKind::Info, "Retrying with the new abuse exemption token...");
        Ok(())
    }

    fn run_search(
        &self,
        query: &str,
        stop: usize,
        session: &mut SearchSession,
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<String>, SearchError> {
        let url = self.build_url(query, stop);
        let mut response = self.fetch(&url, session)?;

        while Self::is_blocked(&response) {
            Self::solve_challenge(&url, session, prompter, reporter)?;
            response = self.fetch(&url, session)?;
        }

        Ok(parse::extract_results(&response.body, stop))
    }
}

impl<T: HttpTransport> Searcher for GoogleSearchClient<T> {
    fn search(
        &mut self,
        query: &str,
        stop: usize,
        session: &mut SearchSession,
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<String>, SearchError> {
        let result = self.run_search(query, stop, session, prompter, reporter);
        recover(result, reporter)
    }
}
