use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::provider::{CryptoProvider, KeyPair, SessionKey};

use super::{DriveKeys, DriveKeysError};

/// A fresh content session key and its packet for the owning node
#[derive(Debug, Clone)]
pub struct ContentKeys {
    /// Symmetric key the block bodies are encrypted with. In memory only.
    pub session_key: SessionKey,
    /// `ContentKeyPacket`: the session key wrapped to the node key, base64
    pub content_key_packet: String,
}

impl<P: CryptoProvider> DriveKeys<P> {
    /// Create a new session key for a file's content and wrap it to the
    /// file's node key.
    ///
    /// Every call yields a different session key.
    pub async fn generate_content_keys(
        &self,
        node_key: &KeyPair,
    ) -> Result<ContentKeys, DriveKeysError> {
        let recipient = node_key.public_key();
        let session_key = self
            .provider
            .create_session_key(&recipient)
            .await
            .map_err(DriveKeysError::ContentKeyDerivationFailed)?;
        let packet = self
            .provider
            .wrap_session_key(&session_key, &recipient)
            .await
            .map_err(DriveKeysError::ContentKeyDerivationFailed)?;

        Ok(ContentKeys {
            session_key,
            content_key_packet: STANDARD.encode(packet),
        })
    }

    /// Recover the session key from a `ContentKeyPacket` with the unlocked
    /// node key.
    pub async fn decrypt_content_key_packet(
        &self,
        content_key_packet: &str,
        node_key: &KeyPair,
    ) -> Result<SessionKey, DriveKeysError> {
        let packet = STANDARD
            .decode(content_key_packet)
            .map_err(|e| DriveKeysError::InvalidKeyPacket(e.to_string()))?;
        self.provider
            .unwrap_session_key(&packet, node_key)
            .await
            .map_err(DriveKeysError::DecryptionFailed)
    }
}
