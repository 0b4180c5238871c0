use clap::Args;
use serde::Serialize;

use common::crypto::Passphrase;
use common::provider::{CryptoProvider, ProviderError};

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Identity label for the address key (e.g. an email address)
    #[arg(long, default_value = "Address key")]
    pub identity: String,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    drive_dir: String,
    key_path: String,
    config_path: String,
    identity: String,
    public_key: String,
    /// Only set when no passphrase was supplied and one was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_passphrase: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),

    #[error("failed to generate address key: {0}")]
    KeyGeneration(#[from] ProviderError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (passphrase, generated) = match &ctx.passphrase {
            Some(passphrase) => (passphrase.clone(), false),
            None => (Passphrase::generate(), true),
        };

        let key = ctx
            .keys
            .provider()
            .generate_key_pair(&self.identity, &passphrase)
            .await?;

        let config = AppConfig {
            output: ctx.output,
            ..AppConfig::default()
        };
        let state = AppState::init(ctx.config_path.clone(), Some(config), key.armored())?;
        tracing::info!(path = %state.drive_dir.display(), "initialized drive directory");

        let output = InitOutput {
            drive_dir: state.drive_dir.display().to_string(),
            key_path: state.key_path.display().to_string(),
            config_path: state.config_path.display().to_string(),
            identity: key.identity().to_string(),
            public_key: key.public_key().to_hex(),
            generated_passphrase: generated.then(|| passphrase.as_str().to_string()),
        };
        Ok(ctx.render(&output)?)
    }
}
