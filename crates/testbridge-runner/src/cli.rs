use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use testbridge_common::TestBridgeError;

/// testbridge: resolves test runner options from the build system.
///
/// The `--test_*` flags are consumed before these arguments are parsed.
#[derive(Parser, Debug)]
#[command(name = "testbridge", version, about)]
pub struct Args {
    /// TOML file declaring the known test categories.
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format for the resolved options.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Test targets and any other arguments, handed to the test engine as-is.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse the arguments left over after option scanning.
///
/// `--help` and `--version` print and exit; other failures are returned.
pub fn parse(residue: &[String]) -> Result<Args, TestBridgeError> {
    let argv = std::iter::once("testbridge").chain(residue.iter().map(String::as_str));
    Args::try_parse_from(argv).or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => Err(TestBridgeError::Usage(e.to_string().trim_end().to_string())),
    })
}
