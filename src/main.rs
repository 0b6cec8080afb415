use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use orthos::core::io::{create_output, write_json, write_products_csv, write_recommendations_csv};
use orthos::core::recommend::Recommendation;
use orthos::{Config, Product, ProductCatalog, SplitPolicy};

/// Finds every product within a radius of a target product.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product records: a header line, then `id,name,x,y,z` per line
    input: PathBuf,
    /// Where to write the matching products
    output: PathBuf,
    /// Identifier of the target product
    product_id: String,
    /// Search radius; defaults to `default_radius` from the configuration
    #[arg(allow_negative_numbers = true)]
    radius: Option<f64>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the split axis policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Rank results by distance (target excluded unless `exclude_target = false`)
    #[arg(long)]
    recommend: bool,
    /// Skip malformed input records instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Variance,
    RoundRobin,
}

impl From<PolicyArg> for SplitPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Variance => SplitPolicy::Variance,
            PolicyArg::RoundRobin => SplitPolicy::RoundRobin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

enum Matches<'a> {
    Products(Vec<&'a Product>),
    Recommendations(Vec<Recommendation>),
}

impl Matches<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Products(products) => products.len(),
            Self::Recommendations(recs) => recs.len(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(policy) = cli.policy {
        config.split_policy = policy.into();
    }
    if cli.skip_malformed {
        config.skip_malformed = true;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let radius = cli.radius.unwrap_or(config.default_radius);
    let precision = config.coordinate_precision;

    let catalog = ProductCatalog::load(&cli.input, config)
        .with_context(|| format!("failed to read products from {}", cli.input.display()))?;
    let target_name = catalog
        .find(&cli.product_id)
        .map(|p| p.name.clone())
        .with_context(|| format!("target product with id '{}' not found", cli.product_id))?;

    // Query before touching the output file so a rejected radius leaves it alone.
    let matches = if cli.recommend {
        Matches::Recommendations(catalog.recommend(&cli.product_id, radius)?)
    } else {
        Matches::Products(catalog.within_radius(&cli.product_id, radius)?)
    };

    let out = create_output(&cli.output)
        .with_context(|| format!("failed to open output file {}", cli.output.display()))?;
    match (&matches, cli.format) {
        (Matches::Products(products), OutputFormat::Csv) => write_products_csv(out, products, precision)?,
        (Matches::Products(products), OutputFormat::Json) => write_json(out, products)?,
        (Matches::Recommendations(recs), OutputFormat::Csv) => {
            write_recommendations_csv(out, recs, precision)?
        }
        (Matches::Recommendations(recs), OutputFormat::Json) => write_json(out, recs)?,
    }

    println!(
        "Found {} products within radius {:.2} of product {}",
        matches.len(),
        radius,
        target_name
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}
