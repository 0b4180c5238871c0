use async_trait::async_trait;

use crate::crypto::{self, message, KeyPacket, LockedKey, LockedKeyError, PublicKey, SecretKey};

use super::{
    CryptoProvider, Digest, EncryptedMessage, KeyPair, ProviderError, SessionKey, Verification,
};

/// In-process provider built on the dalek / RustCrypto primitives in [`crate::crypto`]
///
/// Stateless; clone or share it freely across drives.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }
}

fn locked_key_error(e: LockedKeyError) -> ProviderError {
    match e {
        LockedKeyError::InvalidPassphrase => ProviderError::InvalidPassphrase,
        LockedKeyError::Default(e) => ProviderError::InvalidKey(e.to_string()),
    }
}

#[async_trait]
impl CryptoProvider for LocalProvider {
    async fn generate_key_pair(
        &self,
        identity: &str,
        passphrase: &str,
    ) -> Result<KeyPair, ProviderError> {
        let secret = SecretKey::generate();
        let locked = LockedKey::lock(&secret, identity, passphrase)
            .map_err(|e| ProviderError::KeyGeneration(e.to_string()))?;
        Ok(KeyPair::new(
            locked.identity(),
            locked.public(),
            locked.to_armored(),
        ))
    }

    async fn read_private_key(&self, armored: &str) -> Result<KeyPair, ProviderError> {
        let locked = LockedKey::from_armored(armored).map_err(locked_key_error)?;
        Ok(KeyPair::new(locked.identity(), locked.public(), armored))
    }

    async fn unlock(&self, key: &mut KeyPair, passphrase: &str) -> Result<(), ProviderError> {
        let locked = LockedKey::from_armored(key.armored()).map_err(locked_key_error)?;
        let secret = locked.unlock(passphrase).map_err(locked_key_error)?;
        key.set_unlocked(secret)
    }

    async fn encrypt(
        &self,
        plaintext: &[u8],
        recipient: &PublicKey,
        signer: Option<&KeyPair>,
    ) -> Result<EncryptedMessage, ProviderError> {
        let signature = match signer {
            Some(signer) => Some(message::sign_detached(plaintext, signer.secret()?)),
            None => None,
        };
        let data = message::seal(plaintext, recipient)
            .map_err(|e| ProviderError::Encryption(e.to_string()))?;
        Ok(EncryptedMessage { data, signature })
    }

    async fn decrypt(
        &self,
        armored: &str,
        recipient: &KeyPair,
        verification: Option<Verification<'_>>,
    ) -> Result<Vec<u8>, ProviderError> {
        let plaintext = message::open(armored, recipient.secret()?)
            .map_err(|e| ProviderError::Decryption(e.to_string()))?;
        if let Some(verification) = verification {
            message::verify_detached(&plaintext, verification.signature, verification.signer)
                .map_err(|e| ProviderError::Verification(e.to_string()))?;
        }
        Ok(plaintext)
    }

    async fn sign(&self, data: &[u8], signer: &KeyPair) -> Result<String, ProviderError> {
        Ok(message::sign_detached(data, signer.secret()?))
    }

    async fn verify(
        &self,
        data: &[u8],
        signature: &str,
        signer: &PublicKey,
    ) -> Result<(), ProviderError> {
        message::verify_detached(data, signature, signer)
            .map_err(|e| ProviderError::Verification(e.to_string()))
    }

    async fn create_session_key(&self, recipient: &PublicKey) -> Result<SessionKey, ProviderError> {
        // A key that cannot be converted for ECDH can never receive the packet
        recipient
            .to_x25519()
            .map_err(|e| ProviderError::InvalidKey(e.to_string()))?;
        Ok(SessionKey::generate())
    }

    async fn wrap_session_key(
        &self,
        key: &SessionKey,
        recipient: &PublicKey,
    ) -> Result<Vec<u8>, ProviderError> {
        let packet =
            KeyPacket::seal(key, recipient).map_err(|e| ProviderError::Encryption(e.to_string()))?;
        Ok(packet.bytes().to_vec())
    }

    async fn unwrap_session_key(
        &self,
        packet: &[u8],
        recipient: &KeyPair,
    ) -> Result<SessionKey, ProviderError> {
        let packet =
            KeyPacket::try_from(packet).map_err(|e| ProviderError::Decryption(e.to_string()))?;
        packet
            .open(recipient.secret()?)
            .map_err(|e| ProviderError::Decryption(e.to_string()))
    }

    async fn hmac(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        Ok(crypto::hmac_sha256(key, data).to_vec())
    }

    async fn digest(&self, data: &[u8]) -> Result<Digest, ProviderError> {
        Ok(Digest {
            algorithm: crypto::SHA256_NAME.to_string(),
            hex: hex::encode(crypto::sha256(data)),
        })
    }
}
