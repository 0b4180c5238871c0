use serde::{Deserialize, Serialize};

use crate::provider::CryptoProvider;

use super::{DriveKeys, DriveKeysError};

/// Integrity hash of an encrypted block, as uploaded with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentHash {
    /// Algorithm name, e.g. `sha256`
    pub hash_type: String,
    /// Lowercase hex digest
    pub block_hash: String,
}

impl<P: CryptoProvider> DriveKeys<P> {
    pub async fn generate_content_hash(&self, content: &[u8]) -> Result<ContentHash, DriveKeysError> {
        let digest = self
            .provider
            .digest(content)
            .await
            .map_err(DriveKeysError::HashFailed)?;
        Ok(ContentHash {
            hash_type: digest.algorithm,
            block_hash: digest.hex,
        })
    }
}
