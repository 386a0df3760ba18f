//! Phone Verify - A small HTTP server hosting a phone verification page flow
//!
//! This is the main entry point for the phone-verify application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use phone_verify::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::session_sweeper_task,
    utils::{init_tracing, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    init_tracing(
        &format!("phone_verify={},tower_http=info", config.log_level()),
        config.log_file.as_deref(),
    )?;

    info!("Starting phone-verify server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, cooldown={}s, doc_root={}",
        config.host,
        config.port,
        config.cooldown,
        config.doc_root.display()
    );

    if !config.doc_root.is_dir() {
        warn!(
            "Document root {} does not exist, static pages will return 404",
            config.doc_root.display()
        );
    }

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.flow(),
        config.session_ttl(),
    ));

    // Start the idle session sweeper background task
    let sweeper_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_sweeper_task(sweeper_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state, &config.doc_root);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /api/session           - Open a page session");
    info!("  POST /api/send-code         - Validate phone and start resend cooldown");
    info!("  GET  /api/countdown         - Current send control state");
    info!("  GET  /api/countdown/events  - Stream send control updates");
    info!("  POST /api/verify            - Check verification code");
    info!("  GET  /home                  - Redirect to home page");
    info!("  GET  /status                - Server status");
    info!("  GET  /health                - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
