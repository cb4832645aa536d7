//! Order a JSON array of people by field names given at runtime.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dynorder_config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, FileConfig};
use dynorder_core::{
    JsonFileSource, KeyRegistry, OrderingRule, OrderingRules, Query, Record,
    demo::Person,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dynorderctl", version)]
#[command(about = "Order JSON records by field names resolved at runtime")]
struct Cli {
    /// Path to dynorder.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to a .env file
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print records ordered by one or more fields
    Sort {
        /// JSON file holding an array of people
        #[arg(long, short)]
        input: PathBuf,
        /// Ordering rule such as `Height`, `Name:desc` or `-Id`; repeat to break ties.
        /// A rule without a direction uses the configured default_order
        #[arg(long = "order", short = 'o', allow_hyphen_values = true)]
        orders: Vec<OrderingRule>,
        /// Records to skip after ordering
        #[arg(long)]
        skip: Option<usize>,
        /// Maximum number of records to print
        #[arg(long)]
        take: Option<usize>,
    },
    /// List the fields records can be ordered by
    Fields,
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    })
    .load()
    .context("failed to load configuration")?;

    if load.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    match cli.command {
        Command::Sort {
            input,
            orders,
            skip,
            take,
        } => sort(load, input, orders, skip, take).await,
        Command::Fields => fields(&load),
        Command::Config => print_config(&load),
    }
}

async fn sort(
    load: ConfigLoad,
    input: PathBuf,
    orders: Vec<OrderingRule>,
    skip: Option<usize>,
    take: Option<usize>,
) -> Result<()> {
    let source = Arc::new(JsonFileSource::<Person>::new(&input));
    let mut query = Query::with_config(source, load.config);

    if !orders.is_empty() {
        let rules: OrderingRules = orders.into_iter().collect();
        debug!(rules = rules.len(), "applying ordering rules");
        query = rules.apply(&query)?.into_query();
    }
    if let Some(count) = skip {
        query = query.skip(count);
    }
    if let Some(count) = take {
        query = query.take(count);
    }

    let people = query
        .fetch()
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    println!("{}", serde_json::to_string_pretty(&people)?);
    Ok(())
}

fn fields(load: &ConfigLoad) -> Result<()> {
    let registry = KeyRegistry::<Person>::standard(&load.config);
    for field in Person::FIELDS {
        let key_type = registry
            .key_type(field.kind())
            .and_then(|name| name.rsplit("::").next())
            .unwrap_or("-");
        println!("{:<8} {:<10} {}", field.name(), field.kind().as_str(), key_type);
    }
    Ok(())
}

fn print_config(load: &ConfigLoad) -> Result<()> {
    if let Some(path) = &load.metadata.config_path {
        println!("# loaded from {}", path.display());
    }
    print!("{}", FileConfig::from_config(&load.config).to_toml_string()?);
    Ok(())
}
