use finance_chat_assistant::{
    api::start_server,
    config::ChatConfig,
    ledger::{InMemoryLedger, TransactionSource},
    session::ChatSession,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ChatConfig::from_env()?;

    info!("Finance Chat Assistant - API Server");
    info!("Port: {}", config.api_port);

    let ledger: Arc<dyn TransactionSource> = match &config.ledger_path {
        Some(path) => Arc::new(InMemoryLedger::load(path, &config.currency).await?),
        None => {
            info!("CHAT_LEDGER_PATH not set, starting with an empty ledger");
            Arc::new(InMemoryLedger::new(config.currency.clone()))
        }
    };

    let session = ChatSession::new(config.user_name.clone());
    info!(session_id = %session.session_id(), user = %config.user_name, "Session initialized");

    start_server(session, ledger, config.api_port).await?;

    Ok(())
}
