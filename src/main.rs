use clap::{Args, Parser, Subcommand, ValueEnum};
use mnxq::backend::Backend;
use mnxq::render::{JsonSink, TextSink};
use mnxq::server::{self, AppState};
use mnxq_core::config::{check_partial_limit, Config};
use mnxq_core::{plan, DisplaySink, InputKind, LookupError, MatchType, SearchOptions, Searcher};
use mnxq_sparql::{xref_link, SparqlProvider};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mnxq", version, about = "Look up compounds and reaction expressions in MetaNetX")]
struct Cli {
    /// Write debug logs to /tmp/mnxq-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Read settings from this file instead of ~/.config/mnxq/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a compound name or every compound in an expression.
    Search {
        /// Compound name, or an expression such as "glucose + O2 -> CO2 + H2O".
        input: String,

        /// exact, partial or both.
        #[arg(long = "match", value_name = "TYPE")]
        match_type: Option<MatchType>,

        /// Partial matches shown per compound (1-50).
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print the extracted compounds without looking anything up.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// List cross-references for a compound.
    Refs {
        compound: String,

        /// SPARQL endpoint URL.
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Serve searches over HTTP.
    Serve {
        /// Listen address, e.g. 127.0.0.1:8080.
        #[arg(long)]
        addr: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Search a local JSON catalog instead of the SPARQL endpoint.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// SPARQL endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
}

impl SourceArgs {
    fn backend(&self, config: &Config) -> anyhow::Result<Backend> {
        let endpoint = self.endpoint.as_deref().unwrap_or(&config.sparql.endpoint);
        Backend::from_source(self.catalog.as_deref(), endpoint)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug, matches!(cli.command, Command::Serve { .. }))?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Search {
            input,
            match_type,
            limit,
            format,
            dry_run,
            source,
        } => {
            let limit = match check_partial_limit(limit.unwrap_or(config.search.partial_limit)) {
                Ok(limit) => limit,
                Err(err) => return Ok(fail(err)),
            };
            let options = SearchOptions {
                match_type: match_type.unwrap_or(config.search.match_type),
                limit,
            };
            if dry_run {
                return print_plan(&input, format);
            }

            let searcher = Searcher::from_config(source.backend(&config)?, &config.search);
            let report = match searcher.search(&input, options).await {
                Ok(report) => report,
                Err(err) => return Ok(fail(err)),
            };

            let stdout = std::io::stdout().lock();
            match format {
                Format::Text => TextSink::new(stdout).render(&report)?,
                Format::Json => JsonSink::new(stdout).render(&report)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Refs { compound, endpoint } => {
            if compound.trim().is_empty() {
                return Ok(fail("please enter a compound name"));
            }
            let endpoint = endpoint.as_deref().unwrap_or(&config.sparql.endpoint);
            let sparql = SparqlProvider::new(endpoint)?;
            let timeout = Duration::from_millis(config.search.lookup_timeout_ms);
            let xrefs = match tokio::time::timeout(timeout, sparql.external_refs(&compound)).await {
                Ok(xrefs) => xrefs?,
                Err(_) => return Ok(fail(LookupError::Timeout(timeout))),
            };

            let mut stdout = std::io::stdout().lock();
            if xrefs.is_empty() {
                writeln!(stdout, "No external references found for '{compound}'")?;
            }
            for xref in &xrefs {
                writeln!(stdout, "{}", xref_link(xref))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { addr, source } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            let searcher = Searcher::from_config(source.backend(&config)?, &config.search);
            let defaults = SearchOptions {
                match_type: config.search.match_type,
                limit: config.search.partial_limit,
            };
            server::serve(&addr, Arc::new(AppState::new(searcher, defaults))).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Report a rejected request on stderr and exit with status 1.
fn fail(err: impl std::fmt::Display) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

fn print_plan(input: &str, format: Format) -> anyhow::Result<ExitCode> {
    let plan = match plan(input) {
        Ok(plan) => plan,
        Err(err) => return Ok(fail(err)),
    };

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, &plan)?;
            writeln!(stdout)?;
        }
        Format::Text => {
            let kind = match plan.kind {
                InputKind::Single => "single compound",
                InputKind::Expression => "expression",
            };
            writeln!(stdout, "Input: {} ({kind})", plan.input)?;
            for query in &plan.compounds {
                writeln!(stdout, "  {} -> {}", query.label, query.normalized)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(debug: bool, serving: bool) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/mnxq-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("mnxq debug log started, tail -f /tmp/mnxq-debug.log");
    } else if serving {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("info"))
            .init();
    }
    Ok(())
}
