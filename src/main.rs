use analyzer::{Discrepancy, LeagueContext, reconcile};
use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use configuration::{LogLevel, Settings, init_logging, load_config};
use exporter::{ConsoleReport, SeasonSummary};
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the GMOTY season report.
fn main() -> ExitCode {
    // A .env file is optional; its variables only feed GMOTY__* overrides and RUST_LOG.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Logging may not be initialized yet, so report on stderr directly.
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Fantasy league trade valuation and General Manager of the Year rankings.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to a TOML configuration file (defaults to ./gmoty.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trade ledger CSV, overriding `inputs.trade_ledger`.
    #[arg(long, global = true)]
    trades: Option<PathBuf>,

    /// Team ledger CSV, overriding `inputs.team_ledger`.
    #[arg(long, global = true)]
    teams: Option<PathBuf>,

    /// Log level, overriding `logging.level`. RUST_LOG still takes precedence.
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full console report, and write the JSON summary if `output.json_path` is set.
    Report,
    /// Write the JSON season summary only.
    Export(ExportArgs),
    /// Cross-check the team ledger against the trade ledger.
    Reconcile(ReconcileArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Destination file. The summary is printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ReconcileArgs {
    /// Print the discrepancies as JSON instead of one line each.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = resolve_settings(&cli.global)?;
    let _log_guard = init_logging(&settings.logging).context("Failed to initialize logging")?;

    let ctx = load_context(&settings)?;

    match cli.command {
        Commands::Report => {
            check_ledgers(&ctx, &settings)?;
            let report = ConsoleReport::new(&ctx, &settings).render()?;
            println!("{report}");

            if let Some(path) = &settings.output.json_path {
                SeasonSummary::build(&ctx, &settings)?
                    .write_json(path)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
            }
        }
        Commands::Export(args) => {
            check_ledgers(&ctx, &settings)?;
            let summary = SeasonSummary::build(&ctx, &settings)?;
            match args.out {
                Some(path) => summary
                    .write_json(&path)
                    .with_context(|| format!("Failed to export to {}", path.display()))?,
                None => print!("{}", summary.to_json_string()?),
            }
        }
        Commands::Reconcile(args) => {
            let found = reconcile(&ctx, settings.reconciliation.tolerance);
            print_discrepancies(&found, args.json)?;
            if !found.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads the configuration and applies command-line overrides on top.
fn resolve_settings(args: &GlobalArgs) -> anyhow::Result<Settings> {
    let mut settings =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(trades) = &args.trades {
        settings.inputs.trade_ledger = trades.clone();
    }
    if let Some(teams) = &args.teams {
        settings.inputs.team_ledger = teams.clone();
    }
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    Ok(settings)
}

fn load_context(settings: &Settings) -> anyhow::Result<LeagueContext> {
    let trades = ledger::load_trade_ledger(&settings.inputs.trade_ledger)
        .context("Failed to load the trade ledger")?;
    let teams = ledger::load_team_ledger(&settings.inputs.team_ledger)
        .context("Failed to load the team ledger")?;

    LeagueContext::build(&trades, teams).context("Failed to value the trade ledger")
}

/// Runs reconciliation ahead of a report. Discrepancies are logged, and abort
/// the run only in strict mode.
fn check_ledgers(ctx: &LeagueContext, settings: &Settings) -> anyhow::Result<()> {
    let found = reconcile(ctx, settings.reconciliation.tolerance);
    if settings.reconciliation.strict && !found.is_empty() {
        bail!(
            "{} ledger discrepancies found and reconciliation.strict is set",
            found.len()
        );
    }
    Ok(())
}

fn print_discrepancies(found: &[Discrepancy], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(found)?);
    } else if found.is_empty() {
        println!("Ledgers are consistent.");
    } else {
        for discrepancy in found {
            println!("{discrepancy}");
        }
    }
    tracing::info!(discrepancies = found.len(), "Reconciliation finished.");
    Ok(())
}
