use std::{io, path::PathBuf};

use miette::Report;

const COMPILE_CONTEXT: &str = "while compiling document";
const PARSE_CONTEXT: &str = "while parsing compile document";
const SETTINGS_CONTEXT: &str = "while reading connection settings";
const FILE_READ_CONTEXT: &str = "while reading compile document";
const STDIN_READ_CONTEXT: &str = "while reading compile document from stdin";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    EmptyInput,
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    ReadStdin(io::Error),
    ParseDocument(serde_yaml::Error),
    Compile(sqlfrost_core::Error),
    Settings(sqlfrost_core::ConfigError),
}

impl From<sqlfrost_core::Error> for CliError {
    fn from(value: sqlfrost_core::Error) -> Self {
        Self::Compile(value)
    }
}

impl From<sqlfrost_core::ConfigError> for CliError {
    fn from(value: sqlfrost_core::ConfigError) -> Self {
        Self::Settings(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::EmptyInput => format!("[usage] {}", empty_input_message()),
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            format!("[io] {}", report_with_context(source, context))
        }
        CliError::ReadStdin(source) => {
            format!("[io] {}", report_with_context(source, STDIN_READ_CONTEXT))
        }
        CliError::ParseDocument(source) => {
            format!("[compile] {}", report_with_context(source, PARSE_CONTEXT))
        }
        CliError::Compile(source) => {
            let category = core_category(&source);
            format!("[{category}] {}", report_with_context(source, COMPILE_CONTEXT))
        }
        CliError::Settings(source) => {
            format!("[config] {}", report_with_context(source, SETTINGS_CONTEXT))
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let anyhow_error = anyhow::Error::new(source).context(context.into());
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &sqlfrost_core::Error) -> &'static str {
    match error {
        sqlfrost_core::Error::Config(_) => "config",
        sqlfrost_core::Error::Compile(_) => "compile",
        sqlfrost_core::Error::Driver(_) => "driver",
        sqlfrost_core::Error::Execute(_) => "execute",
    }
}

fn empty_input_message() -> &'static str {
    "missing compile document: pass a YAML file path or pipe YAML via stdin"
}
