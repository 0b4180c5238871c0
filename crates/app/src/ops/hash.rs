use std::path::PathBuf;

use clap::Args;

use common::drive::DriveKeysError;

/// Compute the block hash of a file's contents
#[derive(Args, Debug, Clone)]
pub struct Hash {
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("hash failed: {0}")]
    Keys(#[from] DriveKeysError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Hash {
    type Error = HashError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| HashError::Read(self.path.clone(), e))?;
        let hash = ctx.keys.generate_content_hash(&data).await?;
        Ok(ctx.render(&hash)?)
    }
}
