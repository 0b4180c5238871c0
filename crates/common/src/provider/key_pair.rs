use crate::crypto::{PublicKey, SecretKey};

use super::ProviderError;

/// An asymmetric key as the provider hands it out
///
/// Always carries the armored locked form and the public half. The unlocked
/// private half is present only after [`CryptoProvider::unlock`](super::CryptoProvider::unlock)
/// and only in memory; there is no way to serialize it.
#[derive(Clone)]
pub struct KeyPair {
    identity: String,
    public: PublicKey,
    armored: String,
    unlocked: Option<SecretKey>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("identity", &self.identity)
            .field("public", &self.public.to_hex())
            .field("unlocked", &self.is_unlocked())
            .finish()
    }
}

impl KeyPair {
    /// A locked key pair.
    pub fn new(identity: impl Into<String>, public: PublicKey, armored: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            public,
            armored: armored.into(),
            unlocked: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The locked, armored private key; the only form that may be stored.
    pub fn armored(&self) -> &str {
        &self.armored
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// Drop the in-memory private half.
    pub fn lock(&mut self) {
        self.unlocked = None;
    }

    /// The unlocked private half.
    ///
    /// # Errors
    ///
    /// * `ProviderError::KeyLocked` - the key has not been unlocked
    pub(crate) fn secret(&self) -> Result<&SecretKey, ProviderError> {
        self.unlocked.as_ref().ok_or(ProviderError::KeyLocked)
    }

    pub(crate) fn set_unlocked(&mut self, secret: SecretKey) -> Result<(), ProviderError> {
        if secret.public() != self.public {
            return Err(ProviderError::InvalidKey(
                "private key does not match public key".to_string(),
            ));
        }
        self.unlocked = Some(secret);
        Ok(())
    }
}
