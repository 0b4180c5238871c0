use std::error::Error;
use std::path::PathBuf;

use serde::Serialize;

use common::crypto::Passphrase;
use common::drive::DriveKeys;
use common::provider::{CryptoProvider, KeyPair, LocalProvider, ProviderError};

use crate::state::{AppState, OutputFormat, StateError};

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.drive)
    pub config_path: Option<PathBuf>,
    /// Passphrase for the address key, from --passphrase or DRIVE_KEY_PASSWORD
    pub passphrase: Option<Passphrase>,
    pub output: OutputFormat,
    pub keys: DriveKeys<LocalProvider>,
}

impl OpContext {
    pub fn new(
        config_path: Option<PathBuf>,
        passphrase: Option<String>,
        output: OutputFormat,
    ) -> Self {
        Self {
            config_path,
            passphrase: passphrase.map(Passphrase::from),
            output,
            keys: DriveKeys::local(),
        }
    }

    /// Serialize a command result in the configured output format
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        match self.output {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }

    /// Load and unlock the address key from the drive directory
    pub async fn address_key(&self) -> Result<KeyPair, AddressKeyError> {
        let passphrase = self
            .passphrase
            .as_ref()
            .ok_or(AddressKeyError::MissingPassphrase)?;
        let state = AppState::load(self.config_path.clone())?;
        let armored = state.read_key()?;

        let key = self
            .keys
            .provider()
            .decrypt_private_key(&armored, passphrase)
            .await?;
        tracing::debug!(identity = key.identity(), "unlocked address key");
        Ok(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AddressKeyError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("no passphrase given. Pass --passphrase or set DRIVE_KEY_PASSWORD")]
    MissingPassphrase,

    #[error("failed to unlock address key: {0}")]
    Unlock(#[from] ProviderError),
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
