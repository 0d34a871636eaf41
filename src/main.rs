use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use permd::config::{ServerConfig, StoreBackend};
use permd::perms::{ensure_server_admins, seed_admins};
use permd::server::{AppState, create_router};
use permd::store::{MemoryStore, SqliteStore, Store};
use permd::types::Principal;

#[derive(Parser)]
#[command(name = "permd")]
#[command(about = "A permission group authorization server", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Namespace whose server_admins group is checked at start-up
        #[arg(long)]
        namespace: Option<String>,

        /// Storage backend (sqlite or memory)
        #[arg(long)]
        backend: Option<StoreBackend>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create the database and the server_admins group
    Init {
        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Namespace to initialize
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Add a principal to server_admins
    Seed {
        /// Principal id (plain or mention form)
        #[arg(long)]
        principal: String,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Namespace to seed
        #[arg(long)]
        namespace: Option<String>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn open_sqlite(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir)?;
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;
    Ok(store)
}

fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        StoreBackend::Sqlite => Arc::new(open_sqlite(config)?),
        StoreBackend::Memory => {
            tracing::warn!("Using the memory backend; groups will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

fn parse_principals(raw: &[String]) -> anyhow::Result<Vec<Principal>> {
    raw.iter()
        .map(|id| Principal::parse(id).map_err(anyhow::Error::from))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("permd=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                namespace,
            } => {
                config.data_dir = data_dir.unwrap_or(config.data_dir);
                config.namespace = namespace.unwrap_or(config.namespace);
                config.validate()?;
                config.require_persistent_backend()?;

                let store = open_sqlite(&config)?;
                let report = ensure_server_admins(&store, &config.namespace)?;
                println!(
                    "Initialized {} (namespace `{}`, {} admin(s))",
                    config.db_path().display(),
                    config.namespace,
                    report.admin_count
                );
            }
            AdminCommands::Seed {
                principal,
                data_dir,
                namespace,
            } => {
                config.data_dir = data_dir.unwrap_or(config.data_dir);
                config.namespace = namespace.unwrap_or(config.namespace);
                config.validate()?;
                config.require_persistent_backend()?;

                let principal = Principal::parse(&principal)?;
                let store = open_sqlite(&config)?;
                seed_admins(&store, &config.namespace, std::slice::from_ref(&principal))?;
                println!(
                    "Added `{}` to server_admins in namespace `{}`",
                    principal, config.namespace
                );
            }
        },
        Commands::Serve {
            host,
            port,
            data_dir,
            namespace,
            backend,
        } => {
            config.host = host.unwrap_or(config.host);
            config.port = port.unwrap_or(config.port);
            config.data_dir = data_dir.unwrap_or(config.data_dir);
            config.namespace = namespace.unwrap_or(config.namespace);
            config.backend = backend.unwrap_or(config.backend);
            config.validate()?;

            let store = open_store(&config)?;

            let admins = parse_principals(&config.admins)?;
            if !admins.is_empty() {
                seed_admins(store.as_ref(), &config.namespace, &admins)?;
            }
            ensure_server_admins(store.as_ref(), &config.namespace)?;

            let state = Arc::new(AppState::new(store));
            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
