use serde::Deserialize;
use url::form_urlencoded;

use super::{
    HttpTransport, SearchError, SearchSession, Searcher, recover, transport::browser_headers,
};
use crate::io::{prompt::Prompter, report::Reporter};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
const MAX_RESULTS_PER_REQUEST: usize = 10;

#[derive(Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct CustomSearchItem {
    link: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

/// Google Custom Search JSON API backend. No captcha, but a daily quota.
pub struct CustomSearchClient<T> {
    transport: T,
    api_key: String,
    engine_id: String,
    endpoint: String,
}

impl<T: HttpTransport> CustomSearchClient<T> {
    pub fn new(transport: T, api_key: &str, engine_id: &str) -> Self {
        Self {
            transport,
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            endpoint: CUSTOM_SEARCH_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn build_url(&self, query: &str, stop: usize) -> String {
        let num = stop.clamp(1, MAX_RESULTS_PER_REQUEST);
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("num", &num.to_string())
            .finish();
        format!("{}?{params}", self.endpoint)
    }

    fn run_search(
        &self,
        query: &str,
        stop: usize,
        session: &SearchSession,
    ) -> Result<Vec<String>, SearchError> {
        let url = self.build_url(query, stop);
        let response = self
            .transport
            .get(&url, &browser_headers(session.random_user_agent()))?;

        let payload: CustomSearchResponse = serde_json::from_str(&response.body)?;
        if let Some(error) = payload.error {
            return Err(SearchError::Api(format!(
                "{} (code {}). Maybe usage limit? Please verify your keys.",
                error.message, error.code
            )));
        }
        if !response.is_success() {
            return Err(SearchError::Api(format!(
                "Received non-success status code: {}",
                response.status
            )));
        }

        Ok(payload
            .items
            .into_iter()
            .filter_map(|item| item.link)
            .take(stop)
            .collect())
    }
}

impl<T: HttpTransport> Searcher for CustomSearchClient<T> {
    fn search(
        &mut self,
        query: &str,
        stop: usize,
        session: &mut SearchSession,
        _prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<String>, SearchError> {
        recover(self.run_search(query, stop, session), reporter)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        io::{prompt::testing::ScriptedPrompter, report::testing::RecordingReporter},
        search::transport::testing::ScriptedTransport,
    };

    fn client(body: &serde_json::Value, status: u16) -> CustomSearchClient<ScriptedTransport> {
        CustomSearchClient::new(
            ScriptedTransport::new([ScriptedTransport::ok(status, &body.to_string())]),
            "api-key",
            "engine-id",
        )
    }

    #[test]
    fn extracts_links() {
        let body = json!({
            "items": [
                {"link": "https://a.example/"},
                {"title": "no link"},
                {"link": "https://b.example/"}
            ]
        });
        let mut client = client(&body, 200);
        let urls = client
            .search(
                "q",
                10,
                &mut SearchSession::new(),
                &mut ScriptedPrompter::new([]),
                &mut RecordingReporter::default(),
            )
            .unwrap();
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }

    #[test]
    fn no_items_is_empty() {
        let mut client = client(&json!({"searchInformation": {"totalResults": "0"}}), 200);
        let urls = client
            .search(
                "q",
                10,
                &mut SearchSession::new(),
                &mut ScriptedPrompter::new([]),
                &mut RecordingReporter::default(),
            )
            .unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn api_error_is_not_fatal() {
        let body = json!({"error": {"code": 429, "message": "Quota exceeded"}});
        let mut client = client(&body, 429);
        let mut reporter = RecordingReporter::default();
        let urls = client
            .search("q", 10, &mut SearchSession::new(), &mut ScriptedPrompter::new([]), &mut reporter)
            .unwrap();
        assert!(urls.is_empty());
        assert!(reporter.lines[0].1.contains("Quota exceeded (code 429)"));
    }

    #[test]
    fn api_error_message() {
        let body = json!({"error": {"code": 403, "message": "API key not valid"}});
        let client = client(&body, 403);
        let err = client.run_search("q", 10, &SearchSession::new()).unwrap_err();
        assert!(err.to_string().contains("API key not valid (code 403)"));
    }

    #[test]
    fn page_size_is_clamped() {
        let client = client(&json!({}), 200).with_endpoint("https://api.test/v1");
        assert_eq!(
            client.build_url("\"33651580074\"", 25),
            "https://api.test/v1?q=%2233651580074%22&key=api-key&cx=engine-id&num=10"
        );
        assert!(client.build_url("q", 0).ends_with("&num=1"));
    }

    #[test]
    fn stop_caps_links() {
        let items: Vec<_> = (0..8).map(|i| json!({"link": format!("https://l{i}.example/")})).collect();
        let mut client = client(&json!({ "items": items }), 200);
        let urls = client
            .search(
                "q",
                2,
                &mut SearchSession::new(),
                &mut ScriptedPrompter::new([]),
                &mut RecordingReporter::default(),
            )
            .unwrap();
        assert_eq!(urls, vec!["https://l0.example/", "https://l1.example/"]);
    }
}
