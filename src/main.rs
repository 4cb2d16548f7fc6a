use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use paranuara::config::ServerConfig;
use paranuara::import::import_resources;
use paranuara::resources::{JsonDirLoader, Resource};
use paranuara::server::{AppState, create_router};
use paranuara::store::{SqliteStore, Store};
use paranuara::types::EntityCounts;

#[derive(Parser)]
#[command(name = "paranuara")]
#[command(about = "Import and query the citizens of Paranuara", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for the database
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Import companies.json and people.json in one transaction
    Import {
        #[command(flatten)]
        config: ConfigArgs,

        /// Directory holding companies.json and people.json
        #[arg(long)]
        resources_dir: Option<PathBuf>,
    },

    /// Remove all data from the database, so the same files can be imported again
    Purge {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show how many rows of each entity are stored
    Stats {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }

    Ok(config)
}

fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;
    Ok(store)
}

fn print_counts(counts: &EntityCounts) {
    println!("  citizens:    {}", counts.citizens);
    println!("  companies:   {}", counts.companies);
    println!("  eye colors:  {}", counts.eye_colors);
    println!("  addresses:   {}", counts.addresses);
    println!("  tags:        {}", counts.tags);
    println!("  foods:       {}", counts.foods);
    println!("  friendships: {}", counts.friendships);
}

fn run_import(config: &ServerConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let loader = JsonDirLoader::new(&config.resources_dir);

    info!(
        "Importing {} and {}",
        loader.path_of(Resource::Companies).display(),
        loader.path_of(Resource::People).display()
    );
    let summary = import_resources(&store, &loader)?;

    println!(
        "Imported {} companies and {} citizens ({} friendships)",
        summary.companies, summary.citizens, summary.friendships
    );
    Ok(())
}

fn run_purge(config: &ServerConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let removed = store.purge()?;

    info!("Purged database at {}", config.db_path().display());
    println!("Removed:");
    print_counts(&removed);
    Ok(())
}

fn run_stats(config: &ServerConfig, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let counts = store.count_entities()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("Stored:");
        print_counts(&counts);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("paranuara=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            config,
            resources_dir,
        } => {
            let mut config = load_config(&config)?;
            if let Some(resources_dir) = resources_dir {
                config.resources_dir = resources_dir;
            }
            run_import(&config)?;
        }
        Commands::Purge { config } => {
            run_purge(&load_config(&config)?)?;
        }
        Commands::Stats { config, json } => {
            run_stats(&load_config(&config)?, json)?;
        }
        Commands::Serve { config, host, port } => {
            let mut config = load_config(&config)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = open_store(&config)?;
            let state = Arc::new(AppState::new(Arc::new(store)));

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
