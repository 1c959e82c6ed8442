use std::mem;

use super::{DisposableProbe, Footprint, FootprintKind, ReconError, probe};
use crate::{
    dorks::{DorkCatalog, DorkCategory, DorkTemplate, RenderedDork},
    io::{
        interrupt::Interrupt,
        prompt::{self, PromptError, Prompter},
        report::{ReportKind, Reporter},
    },
    number::{NumberProfile, formats},
    search::{SearchError, SearchSession, Searcher},
};

const WEB_PAGES_STOP: usize = 10;
const DOCUMENTS_STOP: usize = 10;
const FORMAT_RECON_STOP: usize = 5;

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "doc", "docx", "odt", "pdf", "rtf", "sxw", "psw", "ppt", "pptx", "pps", "csv", "txt", "xls",
];

const WHITEPAGES_URL: &str = "https://www.411.com/phone/";
const TRUE_PEOPLE_URL: &str = "https://www.truepeoplesearch.com/results?phoneno=";
const SCAM_CALL_FIGHTERS_URL: &str = "http://www.scamcallfighters.com/search-phone-";

const CUSTOM_FORMAT_QUESTION: &str = "Would you like to use an additional format for this number ? (y/N) ";
const CUSTOM_FORMAT_INPUT: &str = "Custom format: ";
const TEMP_PROVIDERS_QUESTION: &str =
    "Would you like to search for temporary number providers footprints ? (Y/n) ";
const CONTINUE_QUESTION: &str = "Continue scanning ? (y/N) ";
const RERUN_QUESTION: &str = "Would you like to rerun OSINT scan ? (e.g to use a different format) (y/N) ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    WhitepagesUrl,
    CustomFormatPrompt,
    WebPages,
    Documents,
    Reputation,
    TempProvidersPrompt,
    TempProviders,
    SocialMedia,
    PhoneBooks,
    RerunPrompt,
    End,
}

/// Runs the footprint reconnaissance of one number, category by category.
pub struct ReconEngine<'a> {
    catalog: &'a DorkCatalog,
    searcher: &'a mut dyn Searcher,
    probe: &'a dyn DisposableProbe,
    prompter: &'a mut dyn Prompter,
    reporter: &'a mut dyn Reporter,
    interrupt: Interrupt,
    verbose: bool,
    footprints: Vec<Footprint>,
}

impl<'a> ReconEngine<'a> {
    pub fn new(
        catalog: &'a DorkCatalog,
        searcher: &'a mut dyn Searcher,
        probe: &'a dyn DisposableProbe,
        prompter: &'a mut dyn Prompter,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            catalog,
            searcher,
            probe,
            prompter,
            reporter,
            interrupt: Interrupt::new(),
            verbose: false,
            footprints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs full passes over `profile` until the operator declines a rerun.
    pub fn run(
        &mut self,
        profile: &NumberProfile,
        session: &mut SearchSession,
    ) -> Result<Vec<Footprint>, ReconError> {
        let mut rerun = false;
        let mut stage = Stage::Start;

        while stage != Stage::End {
            self.check_interrupt()?;

            stage = match stage {
                Stage::Start => {
                    self.reporter
                        .report(ReportKind::Info, "Running OSINT footprint reconnaissance...");
                    if rerun {
                        Stage::CustomFormatPrompt
                    } else {
                        Stage::WhitepagesUrl
                    }
                }
                Stage::WhitepagesUrl => {
                    self.whitepages_url(profile);
                    Stage::CustomFormatPrompt
                }
                Stage::CustomFormatPrompt => {
                    self.custom_format_prompt(profile, session, rerun)?;
                    Stage::WebPages
                }
                Stage::WebPages => {
                    self.web_pages(profile, session)?;
                    Stage::Documents
                }
                Stage::Documents => {
                    self.documents(profile, session)?;
                    Stage::Reputation
                }
                Stage::Reputation => {
                    self.reporter
                        .report(ReportKind::Section, "Reputation footprints");
                    self.search_category(
                        DorkCategory::Reputation,
                        FootprintKind::Reputation,
                        profile,
                        session,
                    )?;
                    self.scam_call_fighters_url(profile);
                    Stage::TempProvidersPrompt
                }
                Stage::TempProvidersPrompt => {
                    if self.confirm(TEMP_PROVIDERS_QUESTION, true)? {
                        Stage::TempProviders
                    } else {
                        Stage::SocialMedia
                    }
                }
                Stage::TempProviders => {
                    self.temporary_providers(profile, session)?;
                    Stage::SocialMedia
                }
                Stage::SocialMedia => {
                    self.reporter
                        .report(ReportKind::Section, "Social media footprints");
                    self.search_category(
                        DorkCategory::SocialMedias,
                        FootprintKind::SocialMedia,
                        profile,
                        session,
                    )?;
                    Stage::PhoneBooks
                }
                Stage::PhoneBooks => {
                    self.phone_books(profile, session)?;
                    Stage::RerunPrompt
                }
                Stage::RerunPrompt => {
                    if self.confirm(RERUN_QUESTION, false)? {
                        rerun = true;
                        *session = session.rerun();
                        Stage::Start
                    } else {
                        Stage::End
                    }
                }
                Stage::End => Stage::End,
            };
        }

        Ok(mem::take(&mut self.footprints))
    }

    /// Searches every generated representation of the number as an exact phrase.
    pub fn run_format_recon(
        &mut self,
        profile: &NumberProfile,
        session: &mut SearchSession,
    ) -> Result<Vec<Footprint>, ReconError> {
        self.reporter
            .report(ReportKind::Section, "Custom format reconnaissance");

        let representations = match formats::generate(profile) {
            Ok(representations) => representations,
            Err(err) => {
                self.reporter.report(ReportKind::Error, &err.to_string());
                return Ok(Vec::new());
            }
        };

        for representation in representations {
            self.check_interrupt()?;
            self.reporter.report(
                ReportKind::Info,
                &format!("Searching for footprints of {representation}..."),
            );

            let dork = RenderedDork {
                query: format!("\"{representation}\""),
                stop: FORMAT_RECON_STOP,
            };
            for url in self.run_query(&dork, session)? {
                self.found(FootprintKind::Formats, &representation, url);
            }
        }

        Ok(mem::take(&mut self.footprints))
    }

    fn check_interrupt(&self) -> Result<(), ReconError> {
        if self.interrupt.is_set() {
            return Err(ReconError::Interrupted);
        }
        Ok(())
    }

    fn found(&mut self, category: FootprintKind, source: &str, url: String) {
        self.reporter
            .report(ReportKind::Found, &format!("URL: {url}"));
        self.footprints.push(Footprint {
            category,
            source: source.to_string(),
            url,
        });
    }

    /// Asks a yes/no question; unanswered or empty questions take `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, ReconError> {
        if !self.prompter.is_interactive() {
            return Ok(default);
        }

        match self.prompter.ask(question) {
            Ok(answer) if answer.trim().is_empty() => Ok(default),
            Ok(answer) if default => Ok(!prompt::is_negative(&answer)),
            Ok(answer) => Ok(prompt::is_affirmative(&answer)),
            Err(PromptError::Unavailable) => Ok(default),
            Err(err) => Err(err.into()),
        }
    }

    /// Stops the whole run unless the operator chooses to continue.
    /// Always continues when prompts are unavailable.
    fn early_exit(&mut self) -> Result<(), ReconError> {
        if !self.prompter.is_interactive() {
            return Ok(());
        }

        if self.confirm(CONTINUE_QUESTION, false)? {
            Ok(())
        } else {
            Err(ReconError::UserAbort)
        }
    }

    /// Sends one query. Only an interrupt escapes; other failures count as no results.
    fn run_query(
        &mut self,
        dork: &RenderedDork,
        session: &mut SearchSession,
    ) -> Result<Vec<String>, ReconError> {
        if self.verbose {
            self.reporter
                .report(ReportKind::Info, &format!("Query: {}", dork.query));
        }

        match self.searcher.search(
            &dork.query,
            dork.stop,
            session,
            &mut *self.prompter,
            &mut *self.reporter,
        ) {
            Ok(urls) => Ok(urls.into_iter().take(dork.stop).collect()),
            Err(SearchError::Interrupted) => Err(ReconError::Interrupted),
            Err(err) => {
                self.reporter.report(ReportKind::Error, &err.to_string());
                Ok(Vec::new())
            }
        }
    }

    fn load_category(&mut self, category: DorkCategory) -> Option<Vec<DorkTemplate>> {
        match self.catalog.load(category) {
            Ok(templates) => Some(templates),
            Err(err) => {
                self.reporter
                    .report(ReportKind::Error, &format!("{err}. Skipping."));
                None
            }
        }
    }

    fn search_category(
        &mut self,
        category: DorkCategory,
        kind: FootprintKind,
        profile: &NumberProfile,
        session: &mut SearchSession,
    ) -> Result<(), ReconError> {
        let Some(templates) = self.load_category(category) else {
            return Ok(());
        };

        for template in templates
            .iter()
            .filter(|template| category != DorkCategory::Individuals || DorkCatalog::applies(template, profile))
        {
            self.check_interrupt()?;
            self.reporter.report(
                ReportKind::Info,
                &format!("Searching for footprints on {}...", template.label),
            );

            let dork = DorkCatalog::render(template, profile, session);
            for url in self.run_query(&dork, session)? {
                self.found(kind, &template.label, url);
            }
        }

        Ok(())
    }

    fn whitepages_url(&mut self, profile: &NumberProfile) {
        self.reporter
            .report(ReportKind::Info, "Generating scan URL on 411.com...");
        let path = profile.international.replace('+', "").replace(' ', "-");
        self.found(FootprintKind::General, "411.com", format!("{WHITEPAGES_URL}{path}"));
    }

    fn scam_call_fighters_url(&mut self, profile: &NumberProfile) {
        self.reporter
            .report(ReportKind::Info, "Generating URL on scamcallfighters.com...");
        self.found(
            FootprintKind::Reputation,
            "scamcallfighters.com",
            format!("{SCAM_CALL_FIGHTERS_URL}{}.html", profile.default),
        );
    }

    fn custom_format_prompt(
        &mut self,
        profile: &NumberProfile,
        session: &mut SearchSession,
        rerun: bool,
    ) -> Result<(), ReconError> {
        if !rerun && !self.confirm(CUSTOM_FORMAT_QUESTION, false)? {
            return Ok(());
        }
        if !self.prompter.is_interactive() {
            return Ok(());
        }

        let [international, without_code] = formats::recommended(profile);
        self.reporter.report(
            ReportKind::Info,
            &format!("We recommend: {international} or {without_code}"),
        );

        match self.prompter.ask(CUSTOM_FORMAT_INPUT) {
            Ok(answer) if !answer.trim().is_empty() => session.set_custom_format(&answer),
            Ok(_) | Err(PromptError::Unavailable) => {}
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn web_pages(&mut self, profile: &NumberProfile, session: &mut SearchSession) -> Result<(), ReconError> {
        self.reporter
            .report(ReportKind::Section, "Web pages footprints");

        let mut query = format!(
            "{default} OR \"{default}\" OR \"{international}\"",
            default = profile.default,
            international = profile.international
        );
        if let Some(custom_format) = session.custom_format() {
            query.push_str(&format!(" OR \"{custom_format}\""));
        }

        self.reporter.report(
            ReportKind::Info,
            &format!("Searching for footprints on web pages... (limit={WEB_PAGES_STOP})"),
        );
        let dork = RenderedDork {
            query,
            stop: WEB_PAGES_STOP,
        };
        for url in self.run_query(&dork, session)? {
            self.found(FootprintKind::WebPages, "web pages", url);
        }
        Ok(())
    }

    fn documents(&mut self, profile: &NumberProfile, session: &mut SearchSession) -> Result<(), ReconError> {
        self.reporter
            .report(ReportKind::Section, "Documents footprints");

        let extensions = DOCUMENT_EXTENSIONS
            .iter()
            .map(|extension| format!("ext:{extension}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let mut forms = vec![
            format!("\"{}\"", profile.international),
            format!("\"{}\"", profile.local),
        ];
        if let Some(custom_format) = session.custom_format() {
            forms.push(format!("\"{custom_format}\""));
        }

        self.reporter.report(
            ReportKind::Info,
            &format!("Searching for documents... (limit={DOCUMENTS_STOP})"),
        );
        let dork = RenderedDork {
            query: format!("[{extensions}] AND [{}]", forms.join(" OR ")),
            stop: DOCUMENTS_STOP,
        };
        for url in self.run_query(&dork, session)? {
            self.found(FootprintKind::Documents, "documents", url);
        }
        Ok(())
    }

    fn temporary_providers(
        &mut self,
        profile: &NumberProfile,
        session: &mut SearchSession,
    ) -> Result<(), ReconError> {
        self.reporter
            .report(ReportKind::Section, "Temporary number providers footprints");

        let provider = self.probe.provider().to_string();
        self.reporter.report(
            ReportKind::Info,
            &format!("Searching for phone number on {provider}..."),
        );
        match self.probe.phones() {
            Ok(phones) if probe::is_listed(&phones, profile) => {
                self.reporter.report(
                    ReportKind::Found,
                    &format!("Found a temporary number provider: {provider}"),
                );
                let website = self.probe.website().to_string();
                self.found(FootprintKind::TemporaryProviders, &provider, website);
                return self.early_exit();
            }
            Ok(_) => {}
            Err(err) => self.reporter.report(
                ReportKind::Error,
                &format!("Unable to reach {provider}: {err}. Skipping."),
            ),
        }

        let Some(templates) = self.load_category(DorkCategory::DisposableNumProviders) else {
            return Ok(());
        };

        for template in &templates {
            self.check_interrupt()?;
            self.reporter.report(
                ReportKind::Info,
                &format!("Searching for footprints on {}...", template.label),
            );

            let dork = DorkCatalog::render(template, profile, session);
            if let Some(url) = self.run_query(&dork, session)?.into_iter().next() {
                self.reporter.report(
                    ReportKind::Found,
                    &format!("Found a temporary number provider: {}", template.label),
                );
                self.found(FootprintKind::TemporaryProviders, &template.label, url);
                return self.early_exit();
            }
        }

        Ok(())
    }

    fn phone_books(&mut self, profile: &NumberProfile, session: &mut SearchSession) -> Result<(), ReconError> {
        self.reporter
            .report(ReportKind::Section, "Phone books footprints");

        if profile.country_code == "+1" {
            self.reporter
                .report(ReportKind::Info, "Generating URL on True People...");
            let number = profile.international.replace(' ', "");
            self.found(
                FootprintKind::PhoneBooks,
                "truepeoplesearch.com",
                format!("{TRUE_PEOPLE_URL}{number}"),
            );
        }

        self.search_category(
            DorkCategory::Individuals,
            FootprintKind::PhoneBooks,
            profile,
            session,
        )
    }
}
