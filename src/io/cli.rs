use clap::{Parser, ValueEnum};
use colored::Colorize;

use super::validation;

/// Scanners that can be run against each number
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scanner {
    /// Every scanner
    All,
    /// Number normalization report only
    Local,
    /// Search-engine footprint reconnaissance
    Footprints,
}

impl Scanner {
    pub const fn runs_footprints(self) -> bool {
        matches!(self, Self::All | Self::Footprints)
    }
}

/// Command-line arguments for the program
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    name = "PhoneRecce",
    author = "Alex Ogden",
    version = env!("CARGO_PKG_VERSION"),
    about = "A phone number reconnaissance tool for finding search-engine footprints",
)]
pub struct CommandArgs {
    /// The phone number to scan (E.164 or international format)
    #[arg(short, long, value_parser = validation::validate_phone_input, conflicts_with = "input", env = "PHONERECCE_NUMBER")]
    pub number: Option<String>,

    /// Path to a file of phone numbers to scan, one per line
    #[arg(short, long, required = false, env = "PHONERECCE_INPUT")]
    pub input: Option<String>,

    /// The scanner to run
    #[arg(short, long, value_enum, default_value_t = Scanner::All, ignore_case = true, env = "PHONERECCE_SCANNER")]
    pub scanner: Scanner,

    /// Also search every alternative written format of the number
    #[arg(long, env = "PHONERECCE_RECON")]
    pub recon: bool,

    /// Write results to this file instead of the terminal. Disables interactive prompts
    #[arg(short, long, required = false, env = "PHONERECCE_OUTPUT")]
    pub output: Option<String>,

    /// Path of output file to write JSON results to. Extension is optional.
    #[arg(long, required = false, env = "PHONERECCE_JSON_OUTPUT")]
    pub json: Option<String>,

    /// Directory holding the dork catalog (<category>.json) to use instead of the built-in one
    #[arg(long, value_parser = validation::validate_directory, env = "PHONERECCE_DORKS_DIR")]
    pub dorks_dir: Option<String>,

    /// Google Custom Search API key. Used together with --google-cx instead of scraping
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Google Custom Search engine ID
    #[arg(long, env = "GOOGLECSE_CX")]
    pub google_cx: Option<String>,

    /// Print every generated search query
    #[arg(short, long, default_value_t = false, env = "PHONERECCE_VERBOSE")]
    pub verbose: bool,

    /// Never prompt; answer every question with its default
    #[arg(long, env = "PHONERECCE_NO_INTERACTIVE")]
    pub no_interactive: bool,

    /// Disable coloured output
    #[arg(long, env = "PHONERECCE_NO_COLOR")]
    pub no_color: bool,

    /// Don't show the welcome ASCII art
    #[arg(long, env = "PHONERECCE_NO_WELCOME")]
    pub no_welcome: bool,
}

impl CommandArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.number.is_none() && self.input.is_none() {
            return Err(
                "One of the arguments '--number <NUMBER>' or '--input <INPUT>' is required"
                    .to_string(),
            );
        }

        if self.google_api_key.is_some() != self.google_cx.is_some() {
            return Err(
                "The arguments '--google-api-key' and '--google-cx' must be used together"
                    .to_string(),
            );
        }

        Ok(())
    }

    pub const fn is_interactive(&self) -> bool {
        self.output.is_none() && !self.no_interactive
    }

    pub fn custom_search_credentials(&self) -> Option<(&str, &str)> {
        self.google_api_key
            .as_deref()
            .zip(self.google_cx.as_deref())
    }
}

/// Retrieves and validates the parsed command-line arguments
pub fn get_parsed_args() -> CommandArgs {
    let args = CommandArgs::parse();
    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    args
}

/// Prints the ASCII art banner
pub fn print_ascii_art() {
    let title_art = r"
    ____  __                     ____
   / __ \/ /_  ____  ____  ___  / __ \___  _____________
  / /_/ / __ \/ __ \/ __ \/ _ \/ /_/ / _ \/ ___/ ___/ _ \
 / ____/ / / / /_/ / / / /  __/ _, _/  __/ /__/ /__/  __/
/_/   /_/ /_/\____/_/ /_/\___/_/ |_|\___/\___/\___/\___/
";
    println!("{}", title_art.cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));
}
