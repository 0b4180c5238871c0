use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::crypto::PublicKey;
use crate::provider::{
    CryptoProvider, Digest, EncryptedMessage, KeyPair, LocalProvider, ProviderError, SessionKey,
    Verification,
};

/// The provider operations a fault can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCall {
    GenerateKeyPair,
    ReadPrivateKey,
    Unlock,
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    CreateSessionKey,
    WrapSessionKey,
    UnwrapSessionKey,
    Hmac,
    Digest,
}

impl ProviderCall {
    fn fault(self) -> ProviderError {
        let reason = format!("injected fault in {:?}", self);
        match self {
            ProviderCall::GenerateKeyPair => ProviderError::KeyGeneration(reason),
            ProviderCall::ReadPrivateKey | ProviderCall::CreateSessionKey => {
                ProviderError::InvalidKey(reason)
            }
            ProviderCall::Unlock => ProviderError::InvalidPassphrase,
            ProviderCall::Encrypt | ProviderCall::WrapSessionKey | ProviderCall::Sign => {
                ProviderError::Encryption(reason)
            }
            ProviderCall::Decrypt | ProviderCall::UnwrapSessionKey => {
                ProviderError::Decryption(reason)
            }
            ProviderCall::Verify => ProviderError::Verification(reason),
            ProviderCall::Hmac | ProviderCall::Digest => ProviderError::Hash(reason),
        }
    }
}

/// A [`LocalProvider`] that fails the `n`th call (1-based) of one operation
///
/// Every other call, including later calls of the same operation, goes
/// through to the real provider.
#[derive(Debug)]
pub struct FaultyProvider {
    inner: LocalProvider,
    target: ProviderCall,
    fail_on: usize,
    seen: AtomicUsize,
}

impl FaultyProvider {
    pub fn fail_nth(target: ProviderCall, n: usize) -> Self {
        Self {
            inner: LocalProvider::new(),
            target,
            fail_on: n,
            seen: AtomicUsize::new(0),
        }
    }

    /// How many times the targeted operation has been called so far
    pub fn calls(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }

    fn check(&self, call: ProviderCall) -> Result<(), ProviderError> {
        if call != self.target {
            return Ok(());
        }
        let n = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            tracing::debug!(?call, n, "injecting provider fault");
            return Err(call.fault());
        }
        Ok(())
    }
}

#[async_trait]
impl CryptoProvider for FaultyProvider {
    async fn generate_key_pair(
        &self,
        identity: &str,
        passphrase: &str,
    ) -> Result<KeyPair, ProviderError> {
        self.check(ProviderCall::GenerateKeyPair)?;
        self.inner.generate_key_pair(identity, passphrase).await
    }

    async fn read_private_key(&self, armored: &str) -> Result<KeyPair, ProviderError> {
        self.check(ProviderCall::ReadPrivateKey)?;
        self.inner.read_private_key(armored).await
    }

    async fn unlock(&self, key: &mut KeyPair, passphrase: &str) -> Result<(), ProviderError> {
        self.check(ProviderCall::Unlock)?;
        self.inner.unlock(key, passphrase).await
    }

    async fn encrypt(
        &self,
        plaintext: &[u8],
        recipient: &PublicKey,
        signer: Option<&KeyPair>,
    ) -> Result<EncryptedMessage, ProviderError> {
        self.check(ProviderCall::Encrypt)?;
        self.inner.encrypt(plaintext, recipient, signer).await
    }

    async fn decrypt(
        &self,
        message: &str,
        recipient: &KeyPair,
        verification: Option<Verification<'_>>,
    ) -> Result<Vec<u8>, ProviderError> {
        self.check(ProviderCall::Decrypt)?;
        self.inner.decrypt(message, recipient, verification).await
    }

    async fn sign(&self, data: &[u8], signer: &KeyPair) -> Result<String, ProviderError> {
        self.check(ProviderCall::Sign)?;
        self.inner.sign(data, signer).await
    }

    async fn verify(
        &self,
        data: &[u8],
        signature: &str,
        signer: &PublicKey,
    ) -> Result<(), ProviderError> {
        self.check(ProviderCall::Verify)?;
        self.inner.verify(data, signature, signer).await
    }

    async fn create_session_key(&self, recipient: &PublicKey) -> Result<SessionKey, ProviderError> {
        self.check(ProviderCall::CreateSessionKey)?;
        self.inner.create_session_key(recipient).await
    }

    async fn wrap_session_key(
        &self,
        key: &SessionKey,
        recipient: &PublicKey,
    ) -> Result<Vec<u8>, ProviderError> {
        self.check(ProviderCall::WrapSessionKey)?;
        self.inner.wrap_session_key(key, recipient).await
    }

    async fn unwrap_session_key(
        &self,
        packet: &[u8],
        recipient: &KeyPair,
    ) -> Result<SessionKey, ProviderError> {
        self.check(ProviderCall::UnwrapSessionKey)?;
        self.inner.unwrap_session_key(packet, recipient).await
    }

    async fn hmac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, ProviderError> {
        self.check(ProviderCall::Hmac)?;
        self.inner.hmac(key, message).await
    }

    async fn digest(&self, data: &[u8]) -> Result<Digest, ProviderError> {
        self.check(ProviderCall::Digest)?;
        self.inner.digest(data).await
    }
}
