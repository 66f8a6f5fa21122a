use thiserror::Error;

use crate::exitcode;

/// Terminal failures of a single invocation. Each variant maps to its own exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("missing API token; pass --token=<TOKEN> or set DIRBLE_API_TOKEN")]
    MissingToken,

    #[error("{0}")]
    BadParameters(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{0:#}")]
    Http(anyhow::Error),

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write result: {0}")]
    Write(#[from] std::io::Error),

    #[error("{0:#}")]
    Config(anyhow::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingToken => exitcode::NO_TOKEN,
            CliError::BadParameters(_) => exitcode::BAD_PARAMETERS,
            CliError::UnknownCommand(_) => exitcode::UNKNOWN_COMMAND,
            CliError::Http(_) => exitcode::HTTP,
            CliError::Serialize(_) | CliError::Write(_) => exitcode::OUTPUT,
            CliError::Config(_) => exitcode::CONFIG,
        }
    }
}
