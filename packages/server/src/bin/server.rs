//! Chat room HTTP server.
//!
//! Participants register with `POST /participants`, keep themselves alive with
//! `PUT /status` and exchange messages through `/messages`. Participants that
//! stop sending keep-alives are removed by a background sweep.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin batepapo-server
//! cargo run --bin batepapo-server -- --host 0.0.0.0 --port 5000
//! cargo run --bin batepapo-server -- --database-path batepapo.db
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use batepapo_server::{
    domain::{MessageRepository, ParticipantRepository, RepositoryError},
    infrastructure::repository::{
        InMemoryMessageRepository, InMemoryParticipantRepository, SqliteDatabase,
        SqliteMessageRepository, SqliteParticipantRepository,
    },
    ui::{Server, spawn_sweeper},
    usecase::{
        GetMessagesUseCase, KeepAliveUseCase, ListParticipantsUseCase, PostMessageUseCase,
        RegisterParticipantUseCase, SweepInactiveParticipantsUseCase,
    },
};
use batepapo_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "batepapo-server")]
#[command(about = "Chat room HTTP server with inactivity sweep", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Milliseconds between two inactivity sweeps
    #[arg(
        long,
        env = "SWEEP_INTERVAL_MS",
        default_value = "15000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    sweep_interval_ms: u64,

    /// Participants without a keep-alive for longer than this are removed
    #[arg(long, env = "INACTIVITY_THRESHOLD_MS", default_value = "10000")]
    inactivity_threshold_ms: u64,

    /// SQLite database file. Without it the room lives in process memory.
    #[arg(long, env = "DATABASE_PATH")]
    database_path: Option<PathBuf>,
}

/// Repositories backed by the SQLite file at `path`, or in-memory ones
fn build_repositories(
    path: Option<&PathBuf>,
) -> Result<(Arc<dyn ParticipantRepository>, Arc<dyn MessageRepository>), RepositoryError> {
    let Some(path) = path else {
        tracing::info!("No database path configured, using the in-memory store");
        let participants: Arc<dyn ParticipantRepository> =
            Arc::new(InMemoryParticipantRepository::new());
        let messages: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
        return Ok((participants, messages));
    };

    let db = Arc::new(SqliteDatabase::open(path)?);
    let participants: Arc<dyn ParticipantRepository> =
        Arc::new(SqliteParticipantRepository::new(db.clone()));
    let messages: Arc<dyn MessageRepository> = Arc::new(SqliteMessageRepository::new(db));
    Ok((participants, messages))
}

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. UseCases
    // 3. Sweeper
    // 4. Server

    // 1. Create Repositories (SQLite file or in-memory store)
    let (participants, messages) = match build_repositories(args.database_path.as_ref()) {
        Ok(repositories) => repositories,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Create UseCases
    let register_participant_usecase = Arc::new(RegisterParticipantUseCase::new(
        participants.clone(),
        messages.clone(),
        clock.clone(),
    ));
    let list_participants_usecase = Arc::new(ListParticipantsUseCase::new(participants.clone()));
    let post_message_usecase = Arc::new(PostMessageUseCase::new(
        participants.clone(),
        messages.clone(),
        clock.clone(),
    ));
    let get_messages_usecase = Arc::new(GetMessagesUseCase::new(messages.clone()));
    let keep_alive_usecase = Arc::new(KeepAliveUseCase::new(participants.clone(), clock.clone()));
    let sweep_usecase = Arc::new(SweepInactiveParticipantsUseCase::new(
        participants,
        messages,
        clock,
        Duration::from_millis(args.inactivity_threshold_ms),
    ));

    // 3. Start the inactivity sweep
    let sweeper = spawn_sweeper(sweep_usecase, Duration::from_millis(args.sweep_interval_ms));

    // 4. Create and run the server
    let server = Server::new(
        register_participant_usecase,
        list_participants_usecase,
        post_message_usecase,
        get_messages_usecase,
        keep_alive_usecase,
    );
    let result = server.run(args.host, args.port).await;
    sweeper.abort();

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
