//! entitygen CLI - GraphQL schema and SQL template generation from table metadata.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use entitygen::{drivers, ArtifactKind, DialectKind, GenConfig, GenError, Generator};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

/// Long flags that older scripts pass with a single dash (`-dsn=...`).
const LEGACY_FLAGS: &[&str] = &[
    "dsn",
    "entities",
    "motor",
    "schema",
    "artifact",
    "output",
    "stdout",
    "output-json",
    "log-format",
    "verbosity",
];

#[derive(Parser, Debug)]
#[command(name = "entitygen")]
#[command(about = "Generate a GraphQL schema or SQL templates from table column metadata")]
#[command(version)]
struct Cli {
    /// Database connection string
    #[arg(long)]
    dsn: String,

    /// Comma-separated list of tables
    #[arg(long)]
    entities: String,

    /// Database engine: oracle, postgres or mysql
    #[arg(long)]
    motor: String,

    /// Schema (owner) the tables belong to
    #[arg(long)]
    schema: Option<String>,

    /// Artifact to generate: graphql or sql
    #[arg(long, default_value = "graphql")]
    artifact: String,

    /// Output file [default: schema.graphqls for graphql, queries.txt for sql]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the artifact to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), GenError> {
    setup_logging(&cli.verbosity, &cli.log_format).map_err(GenError::Config)?;

    let config = build_config(&cli)?;
    info!(
        "Generating {} for {} entities",
        config.artifact,
        config.entities.len()
    );

    let mut source = drivers::connect(&config).await?;
    let result = Generator::new(&config).run(source.as_mut()).await?;
    source.close().await?;

    if cli.output_json {
        println!("{}", result.to_json()?);
    } else if let Some(ref path) = result.output {
        println!("\nGeneration completed!");
        println!("  Artifact: {}", result.artifact);
        println!("  Output: {}", path.display());
        println!("  Entities: {}", result.entities.len());
        println!("  Bytes: {}", result.bytes_written);
        println!("  Duration: {:.2}s", result.duration_seconds);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GenConfig, GenError> {
    let dialect: DialectKind = cli.motor.parse()?;
    let artifact: ArtifactKind = cli.artifact.parse()?;

    GenConfig::new(cli.dsn.clone(), &cli.entities, dialect)
        .with_schema(cli.schema.clone())
        .with_artifact(artifact)
        .with_output(cli.output.clone())
        .with_stdout(cli.stdout)
        .validated()
}

/// Rewrite single-dash long flags (`-dsn=x`, `-entities x`) to `--dsn=x`.
///
/// Only names in [`LEGACY_FLAGS`] are touched, so short flags such as `-h`
/// and `-V` keep working.
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split('=').next().unwrap_or_default();
            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("Unknown verbosity: '{}'", other)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("Unknown log format: '{}'", other)),
    }

    Ok(())
}
