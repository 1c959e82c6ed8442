pub mod custom_search;
pub mod error;
pub mod google;
pub mod parse;
pub mod session;
pub mod transport;

pub use custom_search::CustomSearchClient;
pub use error::SearchError;
pub use google::GoogleSearchClient;
pub use session::SearchSession;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use crate::io::{
    prompt::Prompter,
    report::{ReportKind, Reporter},
};

/// A search backend executing one textual query.
pub trait Searcher {
    /// Returns at most `stop` result URLs in the order the engine ranked
    /// them. Failures are reported and produce an empty list; only
    /// [`SearchError::Interrupted`] is returned as an error.
    fn search(
        &mut self,
        query: &str,
        stop: usize,
        session: &mut SearchSession,
        prompter: &mut dyn Prompter,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<String>, SearchError>;
}

/// Turns every failure except an interrupt into "no results".
fn recover(
    result: Result<Vec<String>, SearchError>,
    reporter: &mut dyn Reporter,
) -> Result<Vec<String>, SearchError> {
    match result {
        Err(SearchError::Interrupted) => Err(SearchError::Interrupted),
        Err(err) => {
            reporter.report(ReportKind::Error, &format!("Request failed: {err}"));
            Ok(Vec::new())
        }
        Ok(urls) => Ok(urls),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::report::testing::RecordingReporter;

    #[test]
    fn recover_keeps_interrupts_only() {
        let mut reporter = RecordingReporter::default();
        assert!(matches!(
            recover(Err(SearchError::Interrupted), &mut reporter),
            Err(SearchError::Interrupted)
        ));
        assert_eq!(
            recover(Err(SearchError::ChallengeUnsolved), &mut reporter).unwrap(),
            Vec::<String>::new()
        );
        assert_eq!(
            recover(Err(SearchError::Api("quota".into())), &mut reporter).unwrap(),
            Vec::<String>::new()
        );
        assert_eq!(
            recover(Ok(vec!["https://a.example/".into()]), &mut reporter).unwrap(),
            vec!["https://a.example/"]
        );
    }

    #[test]
    fn failures_are_reported() {
        let mut reporter = RecordingReporter::default();
        recover(Err(SearchError::Api("quota".into())), &mut reporter).unwrap();
        recover(Err(SearchError::Interrupted), &mut reporter).unwrap_err();
        assert_eq!(
            reporter.of_kind(ReportKind::Error),
            vec!["Request failed: Search API error: quota"]
        );
    }
}
