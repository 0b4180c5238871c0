use clap::Args;
use serde::Serialize;

use common::drive::{DriveKeysError, NodeKeys};

use crate::op::AddressKeyError;

/// Create a file node under the address key with a fresh content key
#[derive(Args, Debug, Clone)]
pub struct ContentKey {
    /// Also print the raw session key (hex)
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ContentKeyOutput {
    node_key: String,
    node_passphrase: String,
    node_passphrase_signature: String,
    content_key_packet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentKeyError {
    #[error(transparent)]
    AddressKey(#[from] AddressKeyError),

    #[error("content key generation failed: {0}")]
    Keys(#[from] DriveKeysError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for ContentKey {
    type Error = ContentKeyError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let address_key = ctx.address_key().await?;

        let NodeKeys {
            private_key,
            node_key,
            node_passphrase,
            node_passphrase_signature,
            ..
        } = ctx
            .keys
            .generate_node_keys(&address_key.public_key(), &address_key)
            .await?;
        let content = ctx.keys.generate_content_keys(&private_key).await?;

        let output = ContentKeyOutput {
            node_key,
            node_passphrase,
            node_passphrase_signature,
            content_key_packet: content.content_key_packet,
            session_key: self.reveal.then(|| content.session_key.to_hex()),
        };
        Ok(ctx.render(&output)?)
    }
}
