use serde::{Deserialize, Serialize};

use crate::crypto::Passphrase;
use crate::provider::{CryptoProvider, KeyPair};

use super::{DriveKeys, DriveKeysError};

/// A folder's lookup-hash key, encrypted to the folder's own node key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeHashKey {
    pub node_hash_key: String,
}

impl<P: CryptoProvider> DriveKeys<P> {
    /// Lowercase hex HMAC-SHA256 of `name` under `hash_key`.
    ///
    /// Deterministic: the server indexes children by this value so it can
    /// detect name collisions without learning the names.
    ///
    /// Name and key are hashed as their UTF-8 bytes. Hashing one byte per
    /// character code would truncate anything above U+00FF, so non-Latin-1
    /// names hash differently from a char-code implementation.
    pub async fn generate_lookup_hash(
        &self,
        name: &str,
        hash_key: &str,
    ) -> Result<String, DriveKeysError> {
        let mac = self
            .provider
            .hmac(hash_key.as_bytes(), name.as_bytes())
            .await
            .map_err(DriveKeysError::HashFailed)?;
        Ok(hex::encode(mac))
    }

    /// Issue a fresh hash key for a folder, sealed to the folder's node key.
    pub async fn generate_node_hash_key(
        &self,
        node_key: &KeyPair,
    ) -> Result<NodeHashKey, DriveKeysError> {
        let hash_key = Passphrase::generate();
        let node_hash_key = self.encrypt_unsigned(&hash_key, node_key).await?;
        Ok(NodeHashKey { node_hash_key })
    }

    /// Open a folder's `NodeHashKey` to get the key for [`Self::generate_lookup_hash`].
    pub async fn decrypt_node_hash_key(
        &self,
        node_hash_key: &str,
        node_key: &KeyPair,
    ) -> Result<Passphrase, DriveKeysError> {
        self.decrypt_unsigned(node_hash_key, node_key)
            .await
            .map(Passphrase::from)
    }
}
