use crate::provider::ProviderError;

/// Failures of the drive key protocol
///
/// Every variant carries the provider error that caused it. Nothing here is
/// retried: a cryptographic failure is surfaced to the caller as-is and the
/// enclosing operation produces no output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriveKeysError {
    /// Key pair generation, locking, or passphrase wrapping failed
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(#[source] ProviderError),
    /// A passphrase or password did not open a locked key
    #[error("invalid passphrase")]
    InvalidPassphrase,
    #[error("encryption failed: {0}")]
    EncryptionFailed(#[source] ProviderError),
    #[error("decryption failed: {0}")]
    DecryptionFailed(#[source] ProviderError),
    #[error("signing failed: {0}")]
    SigningFailed(#[source] ProviderError),
    /// A wrapped passphrase did not verify against the expected signer
    #[error("signature invalid: {0}")]
    SignatureInvalid(#[source] ProviderError),
    #[error("content key derivation failed: {0}")]
    ContentKeyDerivationFailed(#[source] ProviderError),
    #[error("hash failed: {0}")]
    HashFailed(#[source] ProviderError),
    /// A content key packet was not valid base64
    #[error("invalid content key packet: {0}")]
    InvalidKeyPacket(String),
}

impl DriveKeysError {
    /// Map a provider failure on a decrypt path, keeping the wrong-passphrase
    /// and bad-signature cases distinguishable.
    pub(crate) fn on_decrypt(e: ProviderError) -> Self {
        match e {
            ProviderError::InvalidPassphrase => DriveKeysError::InvalidPassphrase,
            ProviderError::Verification(_) => DriveKeysError::SignatureInvalid(e),
            e => DriveKeysError::DecryptionFailed(e),
        }
    }
}
