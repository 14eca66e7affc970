use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keepnote::api;
use keepnote::config::{CreatedAtPolicy, DatabaseLocation, ServerConfig};

#[derive(Parser)]
#[command(name = "keepnote")]
#[command(about = "Minimal note-taking web application")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the KeepNote server
    Serve {
        /// Host to bind (overrides KEEPNOTE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP (overrides KEEPNOTE_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file (overrides KEEPNOTE_DB_PATH)
        #[arg(long, conflicts_with = "memory")]
        db: Option<PathBuf>,

        /// Keep notes in memory only
        #[arg(long)]
        memory: bool,

        /// What updates do to a note's creation time (overrides KEEPNOTE_CREATED_AT_POLICY)
        #[arg(long, value_enum)]
        created_at_policy: Option<CreatedAtPolicy>,
    },
    /// Print the database path that would be used and exit
    DbPath,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "keepnote=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = config.database.open()?;
    let app = api::create_router(db, config.created_at_policy);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        "KeepNote server listening on http://{} (created-at policy: {:?})",
        listener.local_addr()?,
        config.created_at_policy
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            db,
            memory,
            created_at_policy,
        }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(path) = db {
                config.database = DatabaseLocation::File(path);
            }
            if memory {
                config.database = DatabaseLocation::Memory;
            }
            if let Some(policy) = created_at_policy {
                config.created_at_policy = policy;
            }

            serve(config).await?;
        }
        Some(Commands::DbPath) => match &config.database {
            DatabaseLocation::Default => {
                println!("{}", keepnote::db::Database::default_path()?.display())
            }
            DatabaseLocation::File(path) => println!("{}", path.display()),
            DatabaseLocation::Memory => println!(":memory:"),
        },
        None => {
            tracing::info!("No command given, starting server");
            serve(config).await?;
        }
    }

    Ok(())
}
