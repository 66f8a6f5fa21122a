use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use tracing::debug;

use crate::domain::commands::Command;
use crate::error::{CliError, CliResult};
use crate::exitcode;
use crate::integrations::dirble_api::{DirbleApi, DirbleClient};
use crate::output::{emit, write_rendered};
use crate::storage::config::RuntimeConfig;

pub const TOKEN_ENV: &str = "DIRBLE_API_TOKEN";

#[derive(Debug, Parser)]
#[command(
    name = "dirble-cli",
    version,
    about = "Fetches information from dirble.com",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        env = TOKEN_ENV,
        hide_env_values = true,
        help = "API token"
    )]
    pub token: Option<String>,

    #[arg(long, global = true, value_name = "PATH", help = "Read API settings from this TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose debug logs")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What a connector needs to build an API client for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSession {
    pub token: String,
    pub config_path: Option<PathBuf>,
}

pub fn run() -> i32 {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with(
        env::args_os(),
        connect_dirble,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Parses `args`, connects through `connect` and runs the selected command.
/// Returns the process exit code; exactly one of `out` or `err` receives output.
pub fn run_with<I, T, F>(args: I, connect: F, out: &mut impl Write, err: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: FnOnce(ApiSession) -> CliResult<Box<dyn DirbleApi>>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(parse_err) => return report_parse_error(parse_err, out, err),
    };

    init_tracing(cli.debug);

    match execute(cli, connect, out) {
        Ok(()) => exitcode::OK,
        Err(failure) => report(&failure, err),
    }
}

fn execute<F>(cli: Cli, connect: F, out: &mut impl Write) -> CliResult<()>
where
    F: FnOnce(ApiSession) -> CliResult<Box<dyn DirbleApi>>,
{
    let token = resolve_token(cli.token.as_deref())?;
    let api = connect(ApiSession {
        token,
        config_path: cli.config,
    })?;

    debug!(command = cli.command.name(), "dispatching");
    let rendered = dispatch(&cli.command, api.as_ref())?;
    write_rendered(out, &rendered)
}

/// `flag` already carries the `DIRBLE_API_TOKEN` fallback applied by clap.
pub fn resolve_token(flag: Option<&str>) -> CliResult<String> {
    flag.map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .ok_or(CliError::MissingToken)
}

/// Runs exactly one API operation and renders its result.
pub fn dispatch(command: &Command, api: &dyn DirbleApi) -> CliResult<Vec<u8>> {
    match command {
        Command::Stations(page) => emit(api.stations((*page).into())),
        Command::Station { id } => emit(api.station(*id)),
        Command::SongHistory { id } => emit(api.station_song_history(*id)),
        Command::SimilarStations { id } => emit(api.similar_stations(*id)),
        Command::Categories => emit(api.categories()),
        Command::PrimaryCategories => emit(api.primary_categories()),
        Command::CategoriesTree => emit(api.categories_tree()),
        Command::CategoryChildren { id } => emit(api.category_children(*id)),
        Command::CategoryStations { id, listing } => {
            emit(api.category_stations(*id, listing.all, listing.page.into()))
        }
        Command::Countries => emit(api.countries()),
        Command::CountryStations {
            country_code,
            listing,
        } => emit(api.country_stations(country_code, listing.all, listing.page.into())),
        Command::Continents => emit(api.continents()),
        Command::ContinentCountries { id } => emit(api.continent_countries(*id)),
        Command::Search { query, page } => emit(api.search(query, *page)),
    }
}

/// Builds the HTTP client from the runtime config.
pub fn connect_dirble(session: ApiSession) -> CliResult<Box<dyn DirbleApi>> {
    let config = match &session.config_path {
        Some(path) if !path.exists() => Err(anyhow!("config file not found: {}", path.display())),
        Some(path) => RuntimeConfig::load_from_path(path),
        None => RuntimeConfig::from_env(),
    }
    .context("load runtime config")
    .map_err(CliError::Config)?;

    debug!(
        base_url = %config.api.base_url,
        timeout_ms = config.api.timeout_ms,
        "connecting to dirble"
    );
    let client =
        DirbleClient::new_with_config(&config.api.base_url, session.token, config.api.timeout())
            .map_err(CliError::Config)?;
    Ok(Box::new(client))
}

pub fn classify_parse_error(parse_err: &clap::Error) -> CliError {
    if parse_err.kind() == ErrorKind::InvalidSubcommand {
        let name = match parse_err.get(ContextKind::InvalidSubcommand) {
            Some(ContextValue::String(name)) => name.clone(),
            _ => String::new(),
        };
        return CliError::UnknownCommand(name);
    }

    let rendered = parse_err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    CliError::BadParameters(first_line.trim_start_matches("error: ").to_string())
}

fn report_parse_error(parse_err: clap::Error, out: &mut impl Write, err: &mut impl Write) -> i32 {
    match parse_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", parse_err.render());
            exitcode::OK
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = write!(err, "{}", parse_err.render());
            exitcode::BAD_PARAMETERS
        }
        _ => report(&classify_parse_error(&parse_err), err),
    }
}

fn report(failure: &CliError, err: &mut impl Write) -> i32 {
    let _ = writeln!(err, "error: {failure}");
    failure.exit_code()
}

fn init_tracing(debug: bool) {
    let filter: tracing_subscriber::EnvFilter = if debug {
        "dirble_cli=debug".into()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "dirble_cli=warn".into())
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}
