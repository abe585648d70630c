use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use gsa_exchange::app::{App, BatchSummary, ProgressSink};
use gsa_exchange::assemble::Assembler;
use gsa_exchange::config::ConfigLoader;
use gsa_exchange::error::GsaError;
use gsa_exchange::output::{JsonOutput, LogSink, OutputMode};
use gsa_exchange::sqlite::SqliteAccessorFactory;

#[derive(Parser)]
#[command(name = "gsa2xml")]
#[command(about = "Convert GSA records into BioProject/BioSample and DRA submission XML")]
#[command(version, author)]
struct Cli {
    /// Print the batch summary as JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to ./gsa2xml.json).
    #[arg(long, global = true)]
    config: Option<String>,

    /// SQLite snapshot of the GSA database; overrides the config value.
    #[arg(long, global = true)]
    database: Option<Utf8PathBuf>,

    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Write one BioProject submission for a list of PRJC accessions")]
    Project { list: PathBuf, out: PathBuf },
    #[command(about = "Write one BioSample submission for a list of SAMC accessions")]
    Sample { list: PathBuf, out: PathBuf },
    #[command(about = "Write one DRA submission per CRA accession into a directory")]
    Cra { list: PathBuf, out_dir: PathBuf },
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<GsaError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &GsaError) -> u8 {
    match error {
        GsaError::InvalidAccession { .. }
        | GsaError::InvalidAccessionValue(_)
        | GsaError::AccessionListRead(_)
        | GsaError::MissingConfig
        | GsaError::ConfigRead(_)
        | GsaError::ConfigParse(_)
        | GsaError::InvalidConfig(_) => 2,
        GsaError::Database(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let database = cli.database.or(config.database).ok_or_else(|| {
        GsaError::InvalidConfig("no database given (use --database or the config key)".to_string())
    })?;
    let threads = match cli.threads {
        Some(0) => {
            return Err(GsaError::InvalidConfig("--threads must be at least 1".to_string()).into());
        }
        Some(threads) => threads,
        None => config.threads,
    };

    let assembler = Assembler::new(config.header)
        .with_namespace(config.spuid_namespace)
        .with_relevance(config.emit_relevance);
    let app = App::new(
        SqliteAccessorFactory::new(database),
        assembler,
        threads,
        config.indent,
    );

    let sink: &dyn ProgressSink = match output_mode {
        OutputMode::Json => &JsonOutput,
        OutputMode::Human => &LogSink,
    };
    let summary = match &cli.command {
        Command::Project { list, out } => app.project_batch(list, out, sink)?,
        Command::Sample { list, out } => app.sample_batch(list, out, sink)?,
        Command::Cra { list, out_dir } => app.cra_batch(list, out_dir, sink)?,
    };

    match output_mode {
        OutputMode::Json => JsonOutput::print_summary(&summary).into_diagnostic()?,
        OutputMode::Human => print_summary(&summary),
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    let green = "\x1b[32m";
    let yellow = "\x1b[33m";
    let cyan = "\x1b[36m";
    let reset = "\x1b[0m";

    println!("{cyan}gsa2xml {} summary{reset}", summary.kind);
    println!(
        "{green}converted: {} of {}{reset}",
        summary.converted, summary.requested
    );
    if !summary.existing.is_empty() {
        println!(
            "{cyan}already written: {}{reset}",
            summary.existing.len()
        );
    }
    println!("{yellow}skipped: {}{reset}", summary.skipped.len());
    for skipped in &summary.skipped {
        println!("{yellow}  {} ({}){reset}", skipped.accession, skipped.reason);
    }
    for output in &summary.outputs {
        println!("{green}  wrote {output}{reset}");
    }
}
