//! CLI command implementations

mod predict;
mod registry;
mod runs;
mod split;
mod validate;


use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_global_overrides, load_or_default, Cli, Command, PipelineSpec};
use crate::data::CsvLoader;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    let mut spec = load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;
    apply_global_overrides(&mut spec, &cli);
    if let Some(path) = &cli.config {
        log(
            log_level,
            LogLevel::Verbose,
            &format!("Loaded configuration from {}", path.display()),
        );
    }

    match cli.command {
        Command::Validate(args) => validate::run_validate(spec, &args, log_level),
        Command::Split(args) => split::run_split(spec, &args, log_level),
        Command::Predict(args) => predict::run_predict(spec, &args, log_level),
        Command::Registry(args) => registry::run_registry(&spec, args, log_level),
        Command::Runs(args) => runs::run_runs(&spec, args, log_level),
    }
}

/// CSV loader honouring the configured delimiter
fn csv_loader(spec: &PipelineSpec) -> CsvLoader {
    // validate_spec only admits ASCII delimiters
    CsvLoader::new().with_delimiter(spec.data.delimiter as u8)
}
