//! # Cryptographic Provider
//!
//! The drive protocol never performs cryptography itself. Every key
//! generation, wrap, signature and hash goes through a [`CryptoProvider`],
//! and every result comes back as a typed struct.
//!
//! [`LocalProvider`] is the in-process implementation over [`crate::crypto`].
//! Tests swap in [`FaultyProvider`](crate::testkit::FaultyProvider) to force
//! failures at a chosen call.
//!
//! ## Calls are atomic
//!
//! Each method is one logical operation: it either completes or fails with a
//! [`ProviderError`], and it cannot be cancelled halfway. Suspension only
//! happens at these boundaries.

mod key_pair;
mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::crypto::{PublicKey, Secret};

pub use key_pair::KeyPair;
pub use local::LocalProvider;

/// A symmetric key for exactly one content block
pub type SessionKey = Secret;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    #[error("invalid passphrase")]
    InvalidPassphrase,
    #[error("private key is locked")]
    KeyLocked,
    #[error("encryption failed: {0}")]
    Encryption(String),
    #[error("decryption failed: {0}")]
    Decryption(String),
    #[error("signature verification failed: {0}")]
    Verification(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("hash failed: {0}")]
    Hash(String),
}

/// Output of [`CryptoProvider::encrypt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    /// Armored ciphertext
    pub data: String,
    /// Armored detached signature over the plaintext, when a signer was given
    pub signature: Option<String>,
}

/// Signature check requested alongside [`CryptoProvider::decrypt`]
#[derive(Debug, Clone, Copy)]
pub struct Verification<'a> {
    pub signature: &'a str,
    pub signer: &'a PublicKey,
}

/// Output of [`CryptoProvider::digest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub algorithm: String,
    pub hex: String,
}

#[async_trait]
pub trait CryptoProvider: Send + Sync + std::fmt::Debug {
    /// Generate a key pair whose private half is locked under `passphrase`.
    ///
    /// The returned key is locked; call [`CryptoProvider::unlock`] to use it.
    async fn generate_key_pair(
        &self,
        identity: &str,
        passphrase: &str,
    ) -> Result<KeyPair, ProviderError>;

    /// Read an armored locked key without unlocking it.
    async fn read_private_key(&self, armored: &str) -> Result<KeyPair, ProviderError>;

    /// Unlock `key` in place.
    ///
    /// # Errors
    ///
    /// * `ProviderError::InvalidPassphrase` - the passphrase does not open the key
    async fn unlock(&self, key: &mut KeyPair, passphrase: &str) -> Result<(), ProviderError>;

    /// Read and unlock an armored key in one step.
    async fn decrypt_private_key(
        &self,
        armored: &str,
        passphrase: &str,
    ) -> Result<KeyPair, ProviderError> {
        let mut key = self.read_private_key(armored).await?;
        self.unlock(&mut key, passphrase).await?;
        Ok(key)
    }

    /// Encrypt `plaintext` to `recipient`, optionally with a detached
    /// signature by `signer` (which must be unlocked).
    async fn encrypt(
        &self,
        plaintext: &[u8],
        recipient: &PublicKey,
        signer: Option<&KeyPair>,
    ) -> Result<EncryptedMessage, ProviderError>;

    /// Decrypt with `recipient`'s private half, checking `verification` when given.
    async fn decrypt(
        &self,
        message: &str,
        recipient: &KeyPair,
        verification: Option<Verification<'_>>,
    ) -> Result<Vec<u8>, ProviderError>;

    /// Armored detached signature over `data`.
    async fn sign(&self, data: &[u8], signer: &KeyPair) -> Result<String, ProviderError>;

    async fn verify(
        &self,
        data: &[u8],
        signature: &str,
        signer: &PublicKey,
    ) -> Result<(), ProviderError>;

    /// A fresh session key suitable for `recipient`.
    async fn create_session_key(&self, recipient: &PublicKey) -> Result<SessionKey, ProviderError>;

    /// Wrap `key` so only `recipient` can recover it.
    async fn wrap_session_key(
        &self,
        key: &SessionKey,
        recipient: &PublicKey,
    ) -> Result<Vec<u8>, ProviderError>;

    async fn unwrap_session_key(
        &self,
        packet: &[u8],
        recipient: &KeyPair,
    ) -> Result<SessionKey, ProviderError>;

    async fn hmac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, ProviderError>;

    async fn digest(&self, data: &[u8]) -> Result<Digest, ProviderError>;
}
