use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use cabinet_pulse::alert::engine::{evaluate_alerts, AlertEvent};
use cabinet_pulse::alert::rules::AlertEventKind;
use cabinet_pulse::alert::sink::{AlertSink, StdoutSink};
use cabinet_pulse::clients::dataset::{find_client, load_portfolio};
use cabinet_pulse::clients::sample::{sample_plans, sample_portfolio};
use cabinet_pulse::clients::{ClientRecord, ClientStatus, FactField, FactOverrides};
use cabinet_pulse::config::{Config, ConfigOverrides};
use cabinet_pulse::diagnostic::classifier::{diagnose_client, evaluate_portfolio};
use cabinet_pulse::diagnostic::summary::build_summary;
use cabinet_pulse::diagnostic::whatif::{simulate_whatif, WhatIfReport};
use cabinet_pulse::diagnostic::{ClientDiagnostic, PortfolioSummary};
use cabinet_pulse::kanban::store::PlanStore;
use cabinet_pulse::kanban::{KanbanPlan, PlanStatus};
use cabinet_pulse::listing::{paginate, ClientFilter, Page, SortKey};
use cabinet_pulse::output::csv::{clients_to_csv, diagnostics_to_csv};
use cabinet_pulse::output::json::render_json;
use cabinet_pulse::output::table::{
    render_board_table, render_clients_table, render_diagnostics_table, render_summary,
    render_whatif_table,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "cabinet-pulse",
    about = "Client portfolio intelligence for accounting firms"
)]
struct Cli {
    /// JSON portfolio file (defaults to the configured path, then the
    /// built-in sample)
    #[arg(short, long)]
    data: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Profitability floor in currency units per hour
    #[arg(short, long)]
    seuil: Option<f64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct WhatifArgs {
    #[arg(long = "pourcentage-ca")]
    pourcentage_ca: Option<f64>,
    #[arg(long = "pourcentage-heures")]
    pourcentage_heures: Option<f64>,
    #[arg(long)]
    heures: Option<f64>,
    #[arg(long = "chiffre-affaires")]
    chiffre_affaires: Option<f64>,
}

impl From<WhatifArgs> for FactOverrides {
    fn from(value: WhatifArgs) -> Self {
        Self {
            pourcentage_ca: value.pourcentage_ca,
            pourcentage_heures: value.pourcentage_heures,
            heures: value.heures,
            chiffre_affaires: value.chiffre_affaires,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify the portfolio (or one client) against the diagnostic rules
    Diagnose {
        #[arg(long)]
        client: Option<String>,
    },
    /// Filtered, sorted, paginated client listing
    Clients {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        responsable: Option<String>,
        #[arg(long)]
        statut: Option<String>,
        #[arg(long, default_value = "nom")]
        sort: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long = "page-size")]
        page_size: Option<usize>,
    },
    /// Portfolio aggregates for one evaluation
    Summary,
    /// Re-classify one client under hypothetical fact changes
    Whatif {
        #[arg(long)]
        client: String,
        #[command(flatten)]
        changes: WhatifArgs,
    },
    /// Show the engagement board; --move applies a drop on --to
    Board {
        #[arg(long = "move")]
        move_plan: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Re-evaluate on an interval and dispatch alert events
    Watch {
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
        #[arg(long, default_value_t = 1)]
        iterations: u32,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        dataset_path: cli.data.as_ref().map(|p| p.display().to_string()),
        seuil_rentabilite: cli.seuil,
        page_size: None,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let portfolio = load_configured_portfolio(&config)?;
    let seuil = config.analysis.seuil_rentabilite;

    match &cli.command {
        Commands::Diagnose { client } => {
            let diagnostics = match client {
                Some(selector) => {
                    let record = find_client(&portfolio, selector)
                        .ok_or_else(|| anyhow!("client not found: {selector}"))?;
                    vec![diagnose_client(record, seuil)]
                }
                None => evaluate_portfolio(&portfolio, seuil),
            };
            print_diagnostics(&diagnostics, cli.output)?;
        }
        Commands::Clients {
            search,
            responsable,
            statut,
            sort,
            page,
            page_size,
        } => {
            let filter = ClientFilter {
                search: search.clone(),
                responsable: responsable.clone(),
                statut: statut.as_deref().map(ClientStatus::from_str).transpose()?,
            };
            let sort_key = SortKey::from_str(sort)?;
            let size = page_size.unwrap_or(config.listing.page_size);
            let result = paginate(
                &portfolio,
                &filter.predicates(),
                |a, b| sort_key.compare(a, b),
                *page,
                size,
            );
            print_clients(&result, cli.output)?;
        }
        Commands::Summary => {
            let diagnostics = evaluate_portfolio(&portfolio, seuil);
            let summary = build_summary(&portfolio, &diagnostics);
            print_summary(&summary, cli.output)?;
        }
        Commands::Whatif { client, changes } => {
            let record = find_client(&portfolio, client)
                .ok_or_else(|| anyhow!("client not found: {client}"))?;
            let changes = fact_changes(changes)?;
            let report = simulate_whatif(record, &changes, seuil);
            print_whatif(&report, cli.output)?;
        }
        Commands::Board { move_plan, to } => {
            let mut store = PlanStore::from_plans(sample_plans());
            if let Some(plan_id) = move_plan {
                let Some(to) = to else {
                    return Err(anyhow!("--to <colonne> is required with --move"));
                };
                let target = PlanStatus::from_str(to)?;
                let moved = store.move_plan(plan_id, target)?;
                info!(
                    "plan {} moved to {} at {}%",
                    moved.id,
                    moved.status.as_slug(),
                    moved.progress
                );
            }
            print_board(store.all(), cli.output)?;
        }
        Commands::Watch {
            interval_secs,
            iterations,
        } => {
            run_watch_loop(&config, *interval_secs, *iterations).await?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn load_configured_portfolio(config: &Config) -> Result<Vec<ClientRecord>> {
    match config.resolved_dataset_path() {
        Some(path) => load_portfolio(&path),
        None => {
            info!("no portfolio file configured, using the built-in sample");
            Ok(sample_portfolio())
        }
    }
}

fn fact_changes(args: &WhatifArgs) -> Result<Vec<(FactField, f64)>> {
    let overrides: FactOverrides = args.clone().into();
    let changes = overrides.as_changes();
    if changes.is_empty() {
        return Err(anyhow!("at least one --<champ> change is required for whatif"));
    }
    Ok(changes)
}

async fn run_watch_loop(config: &Config, interval_secs: u64, iterations: u32) -> Result<()> {
    let mut previous: Option<Vec<ClientDiagnostic>> = None;
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    if config.alerts.enable_stdout {
        sinks.push(Box::new(StdoutSink));
    }
    let store = PlanStore::from_plans(sample_plans());

    let interval = Duration::from_secs(interval_secs.max(1));
    let total_iterations = iterations.max(1);
    for i in 0..total_iterations {
        info!("watch iteration {}", i + 1);
        let portfolio = load_configured_portfolio(config)?;
        let diagnostics = evaluate_portfolio(&portfolio, config.analysis.seuil_rentabilite);

        let alerts = evaluate_alerts(previous.as_deref(), &diagnostics, store.all(), Utc::now());
        let alerts = apply_alert_rules(alerts, config);
        for alert in &alerts {
            for sink in &sinks {
                if let Err(err) = sink.send(alert).await {
                    warn!("failed sending alert: {err}");
                }
            }
        }
        previous = Some(diagnostics);

        if i + 1 < total_iterations {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(())
}

fn apply_alert_rules(alerts: Vec<AlertEvent>, config: &Config) -> Vec<AlertEvent> {
    alerts
        .into_iter()
        .filter(|event| match event.kind {
            AlertEventKind::DiagnosticDegrade => config.alerts.rules.diagnostic_degrade,
            AlertEventKind::RetourEquilibre => config.alerts.rules.retour_equilibre,
            AlertEventKind::DiagnosticChange => config.alerts.rules.diagnostic_change,
            AlertEventKind::PlanEnRetard => config.alerts.rules.plan_en_retard,
        })
        .collect()
}

fn print_diagnostics(diagnostics: &[ClientDiagnostic], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_diagnostics_table(diagnostics)),
        OutputFormat::Json => println!("{}", render_json(diagnostics)?),
        OutputFormat::Csv => println!("{}", diagnostics_to_csv(diagnostics)?),
    }
    Ok(())
}

fn print_clients(page: &Page<ClientRecord>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_clients_table(page)),
        OutputFormat::Json => println!("{}", render_json(page)?),
        OutputFormat::Csv => println!("{}", clients_to_csv(&page.items)?),
    }
    Ok(())
}

fn print_summary(summary: &PortfolioSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_summary(summary)),
        OutputFormat::Json => println!("{}", render_json(summary)?),
        OutputFormat::Csv => {
            warn!("CSV output for summary not implemented, using JSON");
            println!("{}", render_json(summary)?);
        }
    }
    Ok(())
}

fn print_whatif(report: &WhatIfReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_whatif_table(report)),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => {
            warn!("CSV output for whatif not implemented, using JSON");
            println!("{}", render_json(report)?);
        }
    }
    Ok(())
}

fn print_board(plans: &[KanbanPlan], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_board_table(plans)),
        OutputFormat::Json => println!("{}", render_json(plans)?),
        OutputFormat::Csv => {
            warn!("CSV output for board not implemented, using JSON");
            println!("{}", render_json(plans)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{fact_changes, WhatifArgs};
    use cabinet_pulse::clients::FactField;

    #[test]
    fn whatif_requires_at_least_one_change() {
        assert!(fact_changes(&WhatifArgs::default()).is_err());
    }

    #[test]
    fn whatif_changes_keep_field_order() {
        let args = WhatifArgs {
            heures: Some(40.0),
            chiffre_affaires: Some(2000.0),
            ..WhatifArgs::default()
        };
        let changes = fact_changes(&args).expect("failed to collect changes");
        assert_eq!(
            changes,
            vec![
                (FactField::Heures, 40.0),
                (FactField::ChiffreAffaires, 2000.0)
            ]
        );
    }
}
