//! Infoblox Provider CLI
//!
//! Runs single resource operations against a grid master. Resource
//! configuration and state are JSON files; the resulting state is written
//! to stdout as JSON, logs go to stderr.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use infoblox_provider::{
    Provider, ProviderConfig, ResourceData, ResourceOperation, ResourceState, data_sources, resources,
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Manage Infoblox DNS, IPAM and DTC objects
#[derive(Debug, Parser)]
#[command(name = "infoblox-provider", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the registered resource and data source types
    Types,

    /// Print the attribute schema of a type
    Schema {
        /// Resource or data source type, e.g. infoblox_a_record
        type_name: String,

        /// Show the data source schema instead of the resource schema
        #[arg(long)]
        data_source: bool,
    },

    /// Check the connection settings and credentials
    Validate,

    /// Create a resource from a configuration file
    Create {
        type_name: String,

        /// JSON object with the resource attributes
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Refresh a resource's state
    Read {
        type_name: String,

        /// State file written by a previous operation
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Apply a new configuration to an existing resource
    Update {
        type_name: String,

        #[arg(short, long)]
        state: PathBuf,

        #[arg(short, long)]
        config: PathBuf,
    },

    /// Delete a resource
    Delete {
        type_name: String,

        #[arg(short, long)]
        state: PathBuf,
    },

    /// Adopt an existing object by its WAPI reference
    Import {
        type_name: String,

        /// Object reference, e.g. record:a/ZG5z...:www.example.com/default
        #[arg(short, long = "ref")]
        reference: String,
    },

    /// Search objects with a data source
    Query {
        type_name: String,

        /// JSON object of search fields; "*Name" keys match extensible attributes
        #[arg(short, long)]
        filters: PathBuf,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn read_attributes(path: &Path) -> anyhow::Result<Map<String, Value>> {
    match read_json::<Value>(path)? {
        Value::Object(map) => Ok(map),
        other => bail!("{} must contain a JSON object, got {}", path.display(), other),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect() -> anyhow::Result<Provider> {
    let config = ProviderConfig::from_env()?;
    info!("Configuration:");
    info!("  Server: {}:{}", config.server, config.port);
    info!("  WAPI version: {}", config.wapi_version);
    info!("  TLS verification: {}", config.ssl_verify);
    Ok(Provider::new(Arc::new(config.connect()?)))
}

async fn run_operation(
    provider: &Provider,
    operation: ResourceOperation,
    type_name: &str,
    mut d: ResourceData,
) -> anyhow::Result<()> {
    provider
        .apply(operation, type_name, &mut d)
        .await
        .with_context(|| format!("{} {} failed", operation, type_name))?;
    print_json(&d.into_state())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Types => {
            for resource in resources::all() {
                println!("resource     {}", resource.type_name());
            }
            for source in data_sources::all() {
                println!("data source  {}", source.type_name());
            }
        }
        Command::Schema { type_name, data_source } => {
            let schema = if data_source {
                data_sources::all().into_iter().find(|s| s.type_name() == type_name).map(|s| s.schema())
            } else {
                resources::all().into_iter().find(|r| r.type_name() == type_name).map(|r| r.schema())
            };
            match schema {
                Some(schema) => print_json(&schema)?,
                None => bail!("unknown type '{}'", type_name),
            }
        }
        Command::Validate => {
            connect()?.configure().await?;
            info!("Credentials are valid");
        }
        Command::Create { type_name, config } => {
            let d = ResourceData::new(read_attributes(&config)?);
            run_operation(&connect()?, ResourceOperation::Create, &type_name, d).await?;
        }
        Command::Read { type_name, state } => {
            let d = ResourceData::from_state(read_json::<ResourceState>(&state)?);
            run_operation(&connect()?, ResourceOperation::Read, &type_name, d).await?;
        }
        Command::Update { type_name, state, config } => {
            let provider = connect()?;
            let prior = read_json::<ResourceState>(&state)?;
            let planned = provider.resource_schema(&type_name)?.plan(&prior.attributes, &read_attributes(&config)?);
            let d = ResourceData::with_prior(prior.id, prior.attributes, planned);
            run_operation(&provider, ResourceOperation::Update, &type_name, d).await?;
        }
        Command::Delete { type_name, state } => {
            let d = ResourceData::from_state(read_json::<ResourceState>(&state)?);
            run_operation(&connect()?, ResourceOperation::Delete, &type_name, d).await?;
        }
        Command::Import { type_name, reference } => {
            let d = ResourceData::for_import(reference);
            run_operation(&connect()?, ResourceOperation::Import, &type_name, d).await?;
        }
        Command::Query { type_name, filters } => {
            let mut attributes = Map::new();
            attributes.insert("filters".to_string(), Value::Object(read_attributes(&filters)?));
            let mut d = ResourceData::new(attributes);
            connect()?
                .read_data_source(&type_name, &mut d)
                .await
                .with_context(|| format!("query {} failed", type_name))?;
            print_json(&d.get("results").cloned().unwrap_or(Value::Array(Vec::new())))?;
        }
    }

    Ok(())
}
