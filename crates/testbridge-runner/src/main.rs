mod cli;
mod report;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use testbridge_common::Result;
use testbridge_options::{args, env, resolve_with_registry};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Registry location when `--registry` is not given.
const TESTBRIDGE_CATEGORY_REGISTRY: &str = "TESTBRIDGE_CATEGORY_REGISTRY";

const DEFAULT_LOG_DIRECTIVE: &str = "testbridge=info";

fn init_logging(log_level: Option<&str>) {
    let directive: Option<Directive> = log_level
        .and_then(|level| level.parse().ok())
        .or_else(|| DEFAULT_LOG_DIRECTIVE.parse().ok());

    let mut filter = EnvFilter::from_default_env();
    if let Some(directive) = directive {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn registry_path(cli: &cli::Args, env_vars: &HashMap<String, String>) -> Option<PathBuf> {
    cli.registry.clone().or_else(|| {
        env_vars
            .get(TESTBRIDGE_CATEGORY_REGISTRY)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

fn run(env_vars: &HashMap<String, String>, raw_args: &[String]) -> Result<()> {
    // The runner's own flags live in the residue, so they are known before
    // the registry they may point at is loaded.
    let scanned = args::scan(raw_args)?;
    let cli = cli::parse(scanned.unparsed())?;

    init_logging(cli.log_level.as_deref());
    tracing::info!("testbridge v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = registry_path(&cli, env_vars);
    match &registry {
        Some(path) => tracing::info!("using category registry {}", path.display()),
        None => tracing::debug!("no category registry configured"),
    }

    let options = resolve_with_registry(env_vars, scanned, registry.as_deref())?;
    if options.fail_fast() {
        tracing::info!("fail-fast enabled");
    }

    report::Report::new(&options, &cli.targets)
        .write_to(&mut std::io::stdout().lock(), cli.format)
}

fn main() -> ExitCode {
    let env_vars = env::capture();
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    match run(&env_vars, &raw_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("testbridge: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_flag_wins_over_env() {
        let cli = cli::parse(&["--registry".to_string(), "flag.toml".to_string()]).unwrap();
        let env_vars = HashMap::from([(
            TESTBRIDGE_CATEGORY_REGISTRY.to_string(),
            "env.toml".to_string(),
        )]);
        assert_eq!(registry_path(&cli, &env_vars), Some(PathBuf::from("flag.toml")));
    }

    #[test]
    fn registry_from_env() {
        let cli = cli::parse(&[]).unwrap();
        let env_vars = HashMap::from([(
            TESTBRIDGE_CATEGORY_REGISTRY.to_string(),
            "env.toml".to_string(),
        )]);
        assert_eq!(registry_path(&cli, &env_vars), Some(PathBuf::from("env.toml")));
        assert_eq!(registry_path(&cli, &HashMap::new()), None);
    }

    #[test]
    fn scan_leaves_runner_flags_for_clap() {
        let raw: Vec<String> = ["--test_filter", "Foo", "--format=json", "a.ATest"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let scanned = args::scan(&raw).unwrap();
        let cli = cli::parse(scanned.unparsed()).unwrap();
        assert_eq!(cli.format, cli::OutputFormat::Json);
        assert_eq!(cli.targets, ["a.ATest"]);
    }

    #[test]
    fn unknown_flags_reach_the_engine_and_the_options() {
        let raw: Vec<String> = ["--some_other_flag", "--test_filter=foo", "positional_value"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let scanned = args::scan(&raw).unwrap();
        let cli = cli::parse(scanned.unparsed()).unwrap();
        assert_eq!(cli.targets, ["--some_other_flag", "positional_value"]);

        let options = resolve_with_registry(&HashMap::new(), scanned, None).unwrap();
        assert_eq!(options.include_filter(), Some("foo"));
        assert_eq!(options.unparsed_args(), ["--some_other_flag", "positional_value"]);
    }
}
