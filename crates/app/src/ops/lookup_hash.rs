use clap::Args;
use serde::Serialize;

use common::drive::DriveKeysError;

/// Compute the lookup hash of a file or folder name
#[derive(Args, Debug, Clone)]
pub struct LookupHash {
    /// Name to hash
    pub name: String,

    /// The parent folder's decrypted hash key
    #[arg(long)]
    pub hash_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LookupHashOutput<'a> {
    name: &'a str,
    hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupHashError {
    #[error("lookup hash failed: {0}")]
    Keys(#[from] DriveKeysError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for LookupHash {
    type Error = LookupHashError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let hash = ctx
            .keys
            .generate_lookup_hash(&self.name, &self.hash_key)
            .await?;
        Ok(ctx.render(&LookupHashOutput {
            name: &self.name,
            hash,
        })?)
    }
}
