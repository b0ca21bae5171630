use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use portfolio_valuation::{
    AppConfig, PositionStore, PricingAdapter, Valuator,
    api::{FmpPrices, SimulatedPrices, StaticPrices},
    app::{
        import::{import_owners, import_positions},
        utils::expand_path,
    },
    logging::init_logging,
    services::ValuationService,
};

#[derive(Debug, Parser)]
#[command(name = "portfolio-valuation", about = "Value portfolios and roll them up")]
struct Cli {
    /// Holdings CSV: owner_id,symbol,quantity,average_cost[,created_at]
    #[arg(long, global = true, default_value = "positions.csv")]
    positions: String,

    /// Fail instead of reporting unpriced positions
    #[arg(long, global = true)]
    strict_pricing: bool,

    #[command(flatten)]
    pricing: PricingArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct PricingArgs {
    #[arg(long, global = true, value_enum, default_value_t = PriceSource::Static)]
    source: PriceSource,

    /// Price CSV (symbol,price) for the static source
    #[arg(long, global = true)]
    prices: Option<String>,

    /// Seed for the simulated source
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PriceSource {
    Static,
    Simulated,
    Fmp,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Value one owner's portfolio
    Snapshot {
        #[arg(long)]
        owner: String,

        /// Previous close CSV (symbol,price) for the day change
        #[arg(long)]
        previous_prices: Option<String>,
    },
    /// Aggregate statistics across every owner
    Fleet {
        /// Owner registry CSV, includes owners without positions
        #[arg(long)]
        owners: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if cli.strict_pricing {
        config = config.with_strict_pricing(true);
    }

    let positions = import_positions(&expand_path(&cli.positions))?;
    let adapter = build_adapter(&cli.pricing, &config, &positions)?;
    let service = ValuationService::new(Valuator::new(config.valuation().clone()), adapter);

    match cli.command {
        Command::Snapshot {
            owner,
            previous_prices,
        } => {
            let store = PositionStore::new(positions);
            let previous = previous_prices
                .map(|path| StaticPrices::from_csv(&expand_path(&path)))
                .transpose()?;
            let report = service
                .owner_report(&store, &owner, previous.as_ref().map(StaticPrices::prices))
                .await?;
            print_json(&report)
        }
        Command::Fleet { owners } => {
            let mut store = PositionStore::new(positions);
            if let Some(path) = owners {
                store = store.with_owners(import_owners(&expand_path(&path))?);
            }
            let report = service.fleet_report(&store).await?;
            info!(users = report.aggregate().total_users(), "fleet report ready");
            print_json(&report)
        }
    }
}

fn build_adapter(
    args: &PricingArgs,
    config: &AppConfig,
    positions: &[portfolio_valuation::Position],
) -> Result<Arc<dyn PricingAdapter>> {
    let adapter: Arc<dyn PricingAdapter> = match args.source {
        PriceSource::Static => {
            let path = args
                .prices
                .as_deref()
                .context("--prices is required for the static price source")?;
            Arc::new(StaticPrices::from_csv(&expand_path(path))?)
        }
        PriceSource::Simulated => Arc::new(SimulatedPrices::from_cost_basis(
            positions,
            *config.simulated_max_drift(),
            args.seed,
        )?),
        PriceSource::Fmp => {
            let api_key = config
                .fmp_api_key()
                .clone()
                .context("Missing FMP_API_KEY in environment")?;
            Arc::new(FmpPrices::new(api_key, *config.price_timeout()))
        }
    };

    Ok(adapter)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
