mod error_presentation;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use clap::{Parser, Subcommand, ValueEnum};
use error_presentation::{CliError, CliResult, render_runtime_error};
use sqlfrost_core::{
    CompileDocument, IdentifierCase, Logger, RecordingLogger, Renderer, TracingLogger,
};
use sqlfrost_dialect_snowflake::{SnowflakeConfig, SnowflakeDialect};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sqlfrost", version, about = "Compile query and schema descriptions to Snowflake SQL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a YAML `query:` or `schema:` document and print the SQL.
    Compile {
        /// Document to compile; reads stdin when omitted.
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = CaseArg::Upper)]
        identifier_case: CaseArg,
        /// Fail instead of skipping primary keys over nullable columns.
        #[arg(long)]
        strict_primary_keys: bool,
    },
    /// Print the normalized connection settings of a DSN.
    Settings { dsn: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CaseArg {
    Upper,
    Preserve,
}

impl From<CaseArg> for IdentifierCase {
    fn from(value: CaseArg) -> Self {
        match value {
            CaseArg::Upper => Self::Upper,
            CaseArg::Preserve => Self::Preserve,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Compile {
            file,
            identifier_case,
            strict_primary_keys,
        } => run_compile(file, identifier_case.into(), strict_primary_keys),
        Command::Settings { dsn } => run_settings(&dsn),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_compile(
    file: Option<PathBuf>,
    identifier_case: IdentifierCase,
    strict_primary_keys: bool,
) -> CliResult<String> {
    let source = read_document(file)?;
    if source.trim().is_empty() {
        return Err(CliError::EmptyInput);
    }
    let document: CompileDocument =
        serde_yaml::from_str(&source).map_err(CliError::ParseDocument)?;

    let recorder = Arc::new(RecordingLogger::new());
    let dialect = SnowflakeDialect::new()
        .with_identifier_case(identifier_case)
        .with_strict_primary_keys(strict_primary_keys)
        .with_logger(Arc::clone(&recorder) as Arc<dyn Logger>);

    let compiled = document.compile(&dialect);
    let notices = recorder.notices();
    for notice in &notices {
        TracingLogger.warn(notice.clone());
    }

    let statements = compiled?;
    debug!(statements = statements.len(), notices = notices.len(), "compiled document");
    Ok(Renderer::new(&dialect).render(&statements, &notices))
}

fn read_document(file: Option<PathBuf>) -> CliResult<String> {
    match file {
        Some(path) => {
            fs::read_to_string(&path).map_err(|source| CliError::ReadFile { path, source })
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(CliError::ReadStdin)?;
            Ok(source)
        }
    }
}

fn run_settings(dsn: &str) -> CliResult<String> {
    let config = SnowflakeConfig::from_dsn(dsn)?;
    let settings = config.connection.normalize().redacted();
    debug!(fields = settings.fields().len(), "parsed connection settings");

    let mut output = String::new();
    for (name, value) in settings.fields() {
        output.push_str(name);
        output.push_str(" = ");
        output.push_str(value);
        output.push('\n');
    }
    Ok(output)
}
