//! FleetPulse CLI: serve the dashboard, run the simulator, score scenarios.
//!
//! Commands:
//! - `serve`: train the model, then host the dashboard and JSON feed
//! - `simulate`: run the fleet simulator headless and print KPIs per tick
//! - `predict`: train the model and score one market scenario
//! - `generate`: write the synthetic market history as CSV

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use fleetpulse_core::fleet::{FleetSimulator, FleetState};
use fleetpulse_core::market::{generate, write_csv, write_csv_file};
use fleetpulse_core::model::{OpportunityModel, OpportunityQuery};
use fleetpulse_core::rng::SeededRandom;
use fleetpulse_server::report::{format_percent, format_revenue, format_rupees};
use fleetpulse_server::{FleetPulseConfig, FleetService};

#[derive(Parser)]
#[command(
    name = "fleetpulse",
    about = "FleetPulse: fleet telemetry simulator and backhaul opportunity predictor"
)]
struct Cli {
    /// Path to a TOML config file. Every section is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and serve the dashboard over HTTP.
    Serve {
        /// Bind host (overrides [server].host).
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides [server].port).
        #[arg(long)]
        port: Option<u16>,

        /// Simulator seed (overrides [simulation].seed).
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the fleet simulator without HTTP and print KPIs per tick.
    Simulate {
        /// Number of ticks to run.
        #[arg(long, default_value_t = 10)]
        ticks: u64,

        /// Simulator seed (overrides [simulation].seed).
        #[arg(long)]
        seed: Option<u64>,

        /// Print the final roster as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Train the model and score one scenario. Unset fields use [scenario].
    Predict {
        /// Month of the trip (1-12).
        #[arg(long)]
        month: Option<u8>,

        /// Truck type: "Open Body", "Container" or "Trailer".
        #[arg(long)]
        truck_type: Option<String>,

        /// Whether the trip falls in a festival period.
        #[arg(long)]
        festival: Option<bool>,

        /// Prevailing market rate.
        #[arg(long)]
        market_rate: Option<f64>,

        /// Diesel price.
        #[arg(long)]
        fuel_price: Option<f64>,
    },
    /// Write the synthetic market history as CSV.
    Generate {
        /// Number of records (overrides [market].records).
        #[arg(long)]
        records: Option<usize>,

        /// Generator seed (overrides [market].seed).
        #[arg(long)]
        seed: Option<u64>,

        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, seed } => run_serve(config, host, port, seed),
        Commands::Simulate { ticks, seed, json } => run_simulate(config, ticks, seed, json),
        Commands::Predict {
            month,
            truck_type,
            festival,
            market_rate,
            fuel_price,
        } => {
            let mut query = config.scenario.clone();
            if let Some(m) = month {
                query.month = m;
            }
            if let Some(t) = truck_type {
                query.truck_type = t;
            }
            if let Some(f) = festival {
                query.is_festival = f;
            }
            if let Some(r) = market_rate {
                query.market_rate = r;
            }
            if let Some(p) = fuel_price {
                query.fuel_price = p;
            }
            run_predict(&config, &query)
        }
        Commands::Generate { records, seed, out } => {
            let mut market = config.market.clone();
            if let Some(n) = records {
                market.records = n;
            }
            if let Some(s) = seed {
                market.seed = s;
            }
            run_generate(market.records, market.seed, out.as_deref())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FleetPulseConfig> {
    match path {
        Some(path) => FleetPulseConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(FleetPulseConfig::default()),
    }
}

fn run_serve(
    mut config: FleetPulseConfig,
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(seed) = seed {
        config.simulation.seed = seed;
    }

    // train before the listener exists so no request sees an untrained model
    let service = FleetService::from_config(&config).context("training opportunity model")?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(fleetpulse_server::serve(&config.server, service))
        .with_context(|| format!("serving on {}", config.server.bind_addr()))
}

fn run_simulate(
    mut config: FleetPulseConfig,
    ticks: u64,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    if let Some(seed) = seed {
        config.simulation.seed = seed;
    }

    let mut fleet = FleetState::seeded();
    let mut sim = FleetSimulator::new(
        config.simulation.tuning.clone(),
        SeededRandom::new(config.simulation.seed),
    );

    println!(
        "{:>6}  {:>6}  {:>6}  {:>9}  {:>6}",
        "tick", "util", "empty", "revenue", "alerts"
    );
    for _ in 0..ticks {
        sim.tick(&mut fleet);
        let kpis = fleet.kpis();
        println!(
            "{:>6}  {:>5}%  {:>5}%  {:>9}  {:>6}",
            fleet.tick_count(),
            kpis.utilization,
            kpis.empty_rate,
            format_revenue(kpis.total_revenue),
            kpis.alert_count
        );
    }

    if !fleet.transitions().is_empty() {
        println!();
        println!("Transitions:");
        for event in fleet.transitions() {
            println!(
                "  tick {:>6}  {}  {} -> {}  ({:?})",
                event.tick, event.truck_id, event.from, event.to, event.anomaly
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(fleet.trucks())?);
    }
    Ok(())
}

fn run_predict(config: &FleetPulseConfig, query: &OpportunityQuery) -> Result<()> {
    if !(1..=12).contains(&query.month) {
        bail!("--month must be between 1 and 12, got {}", query.month);
    }

    let history = config.market.generate();
    let model = OpportunityModel::trained(config.model.clone(), &history)
        .context("training opportunity model")?;
    let prediction = model.predict_query(query)?;

    println!("=== Backhaul Opportunity ===");
    println!(
        "Scenario:      month {}, {}, festival {}, rate {}, fuel {:.2}",
        query.month,
        query.truck_type,
        if query.is_festival { "yes" } else { "no" },
        format_rupees(query.market_rate),
        query.fuel_price
    );
    println!("Probability:   {}", format_percent(prediction.probability_pct));
    println!("Offer:         {}", format_rupees(prediction.recommended_price));
    println!("Strategy:      {}", prediction.strategy.label());
    Ok(())
}

fn run_generate(records: usize, seed: u64, out: Option<&Path>) -> Result<()> {
    let data = generate(records, seed);
    match out {
        Some(path) => {
            write_csv_file(&data, path).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(records = data.len(), path = %path.display(), "market history written");
        }
        None => write_csv(&data, std::io::stdout().lock())?,
    }
    Ok(())
}
