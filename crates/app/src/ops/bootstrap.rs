use clap::Args;
use serde::Serialize;

use common::drive::{DriveBootstrap, DriveBootstrapResult, DriveKeysError};

use crate::op::AddressKeyError;

/// Create the share and root folder keys for a new drive
#[derive(Args, Debug, Clone)]
pub struct Bootstrap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BootstrapOutput {
    #[serde(flatten)]
    bootstrap: DriveBootstrap,
    share_public_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    AddressKey(#[from] AddressKeyError),

    #[error("bootstrap failed: {0}")]
    Keys(#[from] DriveKeysError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Bootstrap {
    type Error = BootstrapError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let address_key = ctx.address_key().await?;

        let DriveBootstrapResult {
            bootstrap,
            share_private_key,
        } = ctx.keys.generate_drive_bootstrap(&address_key).await?;

        let output = BootstrapOutput {
            bootstrap,
            share_public_key: share_private_key.public_key().to_hex(),
        };
        Ok(ctx.render(&output)?)
    }
}
