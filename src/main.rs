use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;

use message_board::application::errors::BoardError;
use message_board::application::messaging::{QueueDispatcher, SendMessageHandler, SyncDispatcher};
use message_board::application::services::ListingService;
use message_board::domain::traits::{Dispatcher, MessageStore};
use message_board::infrastructure::adapters::http::{self, AppState};
use message_board::infrastructure::config::{Config, QueueMode};
use message_board::infrastructure::database::SqliteStore;
use message_board::infrastructure::storage::InMemoryStore;

#[derive(Parser)]
#[command(name = "message-board")]
#[command(about = "A minimal message board backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bind address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run(cli.config, cli.bind),
        Commands::Version => {
            println!("message-board v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: String, bind_override: Option<String>) -> Result<(), BoardError> {
    // Load config
    let mut config = Config::load_or_env(&config_path)?;

    if let Some(bind) = bind_override {
        config.server.bind_address = bind;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), BoardError> {
    let store: Arc<dyn MessageStore> = if config.database.is_memory() {
        tracing::info!("Using in-memory store");
        Arc::new(InMemoryStore::new())
    } else {
        let store = SqliteStore::open(&config.database.path)?;
        tracing::info!("Database opened at {}", config.database.path.display());
        Arc::new(store)
    };

    let handler = SendMessageHandler::new(Arc::clone(&store));
    let (dispatcher, worker) = match config.queue.mode {
        QueueMode::Sync => {
            let dispatcher: Arc<dyn Dispatcher> = Arc::new(SyncDispatcher::new(handler));
            (dispatcher, None)
        }
        QueueMode::Async => {
            let (queue, worker) = QueueDispatcher::spawn(handler);
            let dispatcher: Arc<dyn Dispatcher> = Arc::new(queue);
            (dispatcher, Some(worker))
        }
    };
    tracing::info!("Send queue mode: {:?}", config.queue.mode);

    let state = AppState::new(dispatcher, ListingService::new(store));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    http::serve(listener, state).await?;

    // Router and dispatcher are gone, so the worker finishes once the queue is empty
    if let Some(worker) = worker {
        tracing::info!("Draining send queue");
        if let Err(e) = worker.await {
            tracing::error!("Send worker ended abnormally: {}", e);
        }
    }

    tracing::info!("Stopped");
    Ok(())
}

fn init_config() -> Result<(), BoardError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
