//! Common Home terminal shell — campaign dashboard and advisory chat.

use std::sync::Arc;

use tokio::sync::Mutex;

use commonhome_lib::advisor::{AdvisorProvider, AdvisorSession, GeminiClient, UnconfiguredProvider};
use commonhome_lib::error::AdvisorError;
use commonhome_lib::shell;
use commonhome_lib::state::{load_config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config =
        load_config().map_err(|e| anyhow::anyhow!("Failed to load Common Home config: {e}"))?;

    // Without a key the shell still runs; advisory submissions resolve
    // through the failure path and show the in-character fallback.
    let provider: Arc<dyn AdvisorProvider> = match GeminiClient::from_config(&config.advisor) {
        Ok(client) => Arc::new(client),
        Err(AdvisorError::MissingApiKey) => {
            log::warn!("No advisory API key configured; advisor replies will be offline fallbacks");
            Arc::new(UnconfiguredProvider)
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to build advisory client: {e}")),
    };

    let state = AppState::new(config);
    let session = Arc::new(Mutex::new(AdvisorSession::new()));

    shell::run(&state, session, provider).await?;

    Ok(())
}
