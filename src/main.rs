mod dorks;
mod io;
mod number;
mod recon;
mod search;

use anyhow::Result;
use colored::Colorize;

use crate::dorks::DorkCatalog;
use crate::io::cli::{self, CommandArgs};
use crate::io::interrupt::{self, INTERRUPTED_EXIT_CODE};
use crate::io::json::{FootprintOutput, Output};
use crate::io::numbers;
use crate::io::prompt::{NonInteractivePrompter, Prompter, TerminalPrompter};
use crate::io::report::{ConsoleReporter, FileReporter, Reporter};
use crate::number::{NumberError, NumberProfile};
use crate::recon::{Footprint, ReconEngine, ReconError, TempophoneProbe};
use crate::search::{CustomSearchClient, GoogleSearchClient, ReqwestTransport, SearchSession, Searcher};

fn main() -> Result<()> {
    let args = cli::get_parsed_args();

    if args.no_color {
        colored::control::set_override(false);
    }

    if !args.no_welcome {
        cli::print_ascii_art();
    }

    let interrupt = interrupt::initialize_interrupt_handler()?;

    let inputs = match (&args.number, &args.input) {
        (Some(number), _) => vec![number.clone()],
        (None, Some(path)) => numbers::read_from_file(path)?,
        (None, None) => Vec::new(),
    };
    let batch = args.input.is_some();

    let catalog = args
        .dorks_dir
        .as_ref()
        .map_or_else(DorkCatalog::embedded, DorkCatalog::from_directory);
    let mut prompter: Box<dyn Prompter> = if args.is_interactive() {
        Box::new(TerminalPrompter::new(interrupt.clone()))
    } else {
        Box::new(NonInteractivePrompter)
    };
    let mut reporter: Box<dyn Reporter> = match &args.output {
        Some(path) => Box::new(FileReporter::create(path)?),
        None => Box::new(ConsoleReporter),
    };
    let mut searcher = create_searcher(&args)?;
    let probe = TempophoneProbe::new()?;

    let mut results = FootprintOutput::new();

    for input in &inputs {
        let profile = match NumberProfile::parse(input) {
            Ok(profile) => profile,
            Err(err) if batch => {
                log_error!(format!("{err}. Skipping."));
                continue;
            }
            Err(err) => return Err(invalid_number(err)),
        };

        print_local_scan(&profile);
        if !args.scanner.runs_footprints() {
            results.add_result(profile, Vec::new());
            continue;
        }

        let mut engine = ReconEngine::new(
            &catalog,
            searcher.as_mut(),
            &probe,
            prompter.as_mut(),
            reporter.as_mut(),
        )
        .with_interrupt(interrupt.clone())
        .with_verbose(args.verbose);

        let outcome = scan_number(&mut engine, &profile, args.recon);
        match outcome {
            Ok(footprints) => {
                log_success!(format!(
                    "Done! Found {} footprints for {}",
                    footprints.len(),
                    profile.international.bold()
                ));
                results.add_result(profile, footprints);
            }
            Err(ReconError::UserAbort) => {
                log_info!("Good bye!");
                std::process::exit(0);
            }
            Err(ReconError::Interrupted) => exit_interrupted(),
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(json_file) = &args.json {
        results.write_to_file(json_file)?;
    }

    Ok(())
}

fn scan_number(
    engine: &mut ReconEngine<'_>,
    profile: &NumberProfile,
    recon: bool,
) -> Result<Vec<Footprint>, ReconError> {
    let mut session = SearchSession::new();
    let mut footprints = Vec::new();
    if recon {
        footprints.extend(engine.run_format_recon(profile, &mut session)?);
    }
    footprints.extend(engine.run(profile, &mut session)?);
    Ok(footprints)
}

fn create_searcher(args: &CommandArgs) -> Result<Box<dyn Searcher>> {
    let transport = ReqwestTransport::new()?;
    Ok(match args.custom_search_credentials() {
        Some((api_key, engine_id)) => {
            log_info!("Using the Google Custom Search API");
            Box::new(CustomSearchClient::new(transport, api_key, engine_id))
        }
        None => Box::new(GoogleSearchClient::new(transport)),
    })
}

fn print_local_scan(profile: &NumberProfile) {
    log_section!("Local scan", true);
    log_info!(format!("International format: {}", profile.international.bold()));
    log_info!(format!("Local format: {}", profile.local));
    log_info!(format!("E164 format: +{}", profile.default));
    if profile.country.is_empty() {
        log_info!(format!(
            "Country code: {} ({})",
            profile.country_code, profile.country_iso_code
        ));
    } else {
        log_info!(format!(
            "Country found: {} ({}, {})",
            profile.country, profile.country_code, profile.country_iso_code
        ));
    }

    if profile.possible {
        log_info!("The number is valid and possible.");
    } else {
        log_warn!("The number is valid but might not be possible.");
    }
}

fn invalid_number(err: NumberError) -> anyhow::Error {
    anyhow::Error::new(err).context("Unable to scan the phone number")
}

fn exit_interrupted() -> ! {
    io::logger::clear_line();
    log_warn!("Interrupted by user", true);
    std::process::exit(INTERRUPTED_EXIT_CODE);
}
