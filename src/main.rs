use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use agentbto::cli::{
    handle_afford_command, handle_audit_command, handle_budget_command, handle_estimates_command,
    handle_evaluate_command, handle_request_command, AffordArgs, AuditArgs, BudgetArgs, CliContext,
    EstimatesArgs, EvaluateArgs, RequestArgs,
};
use agentbto::config::{paths::AgentPaths, settings::Settings};
use agentbto::display::report::format_rate;
use agentbto::export::{write_json, write_yaml, OutputFormat};

#[derive(Parser)]
#[command(
    name = "agentbto",
    version,
    about = "HDB loan, budget and BTO affordability calculator",
    long_about = "AgentBTO works out how large an HDB loan a household can service, \
                  what total budget that gives with cash and CPF savings, and whether \
                  BTO flats and cost estimates fit within it."
)]
struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, global = true, value_enum, env = "AGENTBTO_FORMAT")]
    format: Option<OutputFormat>,

    /// Do not record this run in the audit log
    #[arg(long, global = true)]
    no_audit: bool,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximum HDB loan and total budget from income and savings
    Budget(BudgetArgs),

    /// Compare a total budget against listing prices
    #[command(alias = "affordability")]
    Afford(AffordArgs),

    /// Budget plus the verdict for one BTO price
    Evaluate(EvaluateArgs),

    /// Assess a budget against cost estimates with confidence intervals
    Estimates(EstimatesArgs),

    /// Answer a JSON request with a JSON response envelope
    Request(RequestArgs),

    /// Show recent audit log entries
    Audit(AuditArgs),

    /// Write a settings file with the default loan policy
    Init(InitArgs),

    /// Show current configuration and paths
    Config,
}

#[derive(Args)]
struct InitArgs {
    /// Overwrite an existing settings file with defaults
    #[arg(long)]
    force: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("AGENTBTO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("agentbto={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = AgentPaths::new()?;
    let settings = Settings::load_or_create(&paths)
        .with_context(|| format!("Failed to load {}", paths.settings_file().display()))?;
    debug!(base_dir = %paths.base_dir().display(), "configuration loaded");

    let ctx = CliContext::new(paths, settings, cli.format, !cli.no_audit);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Budget(args)) => handle_budget_command(&ctx, &args, &mut out)?,
        Some(Commands::Afford(args)) => handle_afford_command(&ctx, &args, &mut out)?,
        Some(Commands::Evaluate(args)) => handle_evaluate_command(&ctx, &args, &mut out)?,
        Some(Commands::Estimates(args)) => handle_estimates_command(&ctx, &args, &mut out)?,
        Some(Commands::Request(args)) => {
            let response = handle_request_command(&ctx, &args, &mut out)?;
            if !response.ok {
                out.flush()?;
                std::process::exit(1);
            }
        }
        Some(Commands::Audit(args)) => handle_audit_command(&ctx, &args, &mut out)?,
        Some(Commands::Init(args)) => {
            let settings_file = ctx.paths.settings_file();
            if ctx.paths.is_initialized() && !args.force {
                writeln!(out, "Already initialized: {}", settings_file.display())?;
                writeln!(out, "Use --force to reset to defaults.")?;
            } else {
                Settings::default().save(&ctx.paths)?;
                writeln!(out, "Wrote default settings to {}", settings_file.display())?;
            }
        }
        Some(Commands::Config) => match ctx.format {
            OutputFormat::Json => write_json(&ctx.settings, &mut out)?,
            OutputFormat::Yaml => write_yaml(&ctx.settings, &mut out)?,
            OutputFormat::Text | OutputFormat::Csv => {
                let policy = ctx.policy();
                writeln!(out, "AgentBTO Configuration")?;
                writeln!(out, "======================")?;
                writeln!(out, "Config directory: {}", ctx.paths.base_dir().display())?;
                writeln!(out, "Settings file:    {}", ctx.paths.settings_file().display())?;
                writeln!(out, "Audit log:        {}", ctx.paths.audit_log().display())?;
                writeln!(out)?;
                writeln!(out, "Loan policy:")?;
                writeln!(out, "  Income ratio:    {}", format_rate(policy.income_ratio))?;
                writeln!(out, "  Interest rate:   {}", format_rate(policy.annual_rate))?;
                writeln!(out, "  Tenure:          {} years", policy.tenure_years)?;
                writeln!(
                    out,
                    "  OA retained:     {}",
                    policy.retain_oa_amount.format_with_symbol(ctx.symbol())
                )?;
                writeln!(out)?;
                writeln!(out, "Audit enabled:     {}", ctx.settings.audit_enabled)?;
                writeln!(out, "Default format:    {:?}", ctx.settings.default_format)?;
            }
        },
        None => {
            writeln!(out, "AgentBTO - HDB loan, budget and BTO affordability calculator")?;
            writeln!(out)?;
            writeln!(out, "Run 'agentbto --help' for usage information.")?;
        }
    }

    Ok(())
}
