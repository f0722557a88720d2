//! Subcommand implementations.

pub mod canonicalize;
pub mod crypto;
pub mod execute;
pub mod status;

use axiom_client::{AxiomClient, ClientConfig, ReqwestTransport};
use axiom_core::ApiKey;

use crate::RemoteArgs;

/// Loads configuration and builds an HTTP client for the remote commands.
fn connect(remote: RemoteArgs) -> Result<AxiomClient<ReqwestTransport>, Box<dyn std::error::Error>> {
    let config = ClientConfig::load(remote.config.as_deref())
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    if remote.api_key.trim().is_empty() {
        return Err("API key must not be empty".into());
    }
    tracing::debug!(endpoint = config.endpoint(), "using endpoint");
    Ok(AxiomClient::from_config(&config, ApiKey::new(remote.api_key))?)
}
