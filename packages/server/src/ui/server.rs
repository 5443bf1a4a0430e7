//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    GetMessagesUseCase, KeepAliveUseCase, ListParticipantsUseCase, PostMessageUseCase,
    RegisterParticipantUseCase,
};

use super::{
    handler::http::{
        get_messages, health_check, keep_alive, list_participants, post_message,
        register_participant,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat room HTTP server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     register_participant_usecase,
///     list_participants_usecase,
///     post_message_usecase,
///     get_messages_usecase,
///     keep_alive_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `register_participant_usecase` - UseCase for `POST /participants`
    /// * `list_participants_usecase` - UseCase for `GET /participants`
    /// * `post_message_usecase` - UseCase for `POST /messages`
    /// * `get_messages_usecase` - UseCase for `GET /messages`
    /// * `keep_alive_usecase` - UseCase for `PUT /status`
    pub fn new(
        register_participant_usecase: Arc<RegisterParticipantUseCase>,
        list_participants_usecase: Arc<ListParticipantsUseCase>,
        post_message_usecase: Arc<PostMessageUseCase>,
        get_messages_usecase: Arc<GetMessagesUseCase>,
        keep_alive_usecase: Arc<KeepAliveUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                register_participant_usecase,
                list_participants_usecase,
                post_message_usecase,
                get_messages_usecase,
                keep_alive_usecase,
            }),
        }
    }

    /// Build the application router
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/participants",
                get(list_participants).post(register_participant),
            )
            .route("/messages", get(get_messages).post(post_message))
            .route("/status", put(keep_alive))
            .route("/health", get(health_check))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
