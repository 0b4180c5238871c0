use crate::provider::{CryptoProvider, KeyPair, ProviderError};

use super::{DriveKeys, DriveKeysError};

impl<P: CryptoProvider> DriveKeys<P> {
    /// Encrypt a UTF-8 string to `key` without a signature.
    ///
    /// Used for values only the key's owner reads back, like folder names and
    /// node hash keys.
    pub async fn encrypt_unsigned(
        &self,
        message: &str,
        key: &KeyPair,
    ) -> Result<String, DriveKeysError> {
        let encrypted = self
            .provider
            .encrypt(message.as_bytes(), &key.public_key(), None)
            .await
            .map_err(DriveKeysError::EncryptionFailed)?;
        Ok(encrypted.data)
    }

    pub async fn decrypt_unsigned(
        &self,
        armored: &str,
        key: &KeyPair,
    ) -> Result<String, DriveKeysError> {
        let plaintext = self
            .provider
            .decrypt(armored, key, None)
            .await
            .map_err(DriveKeysError::on_decrypt)?;
        String::from_utf8(plaintext).map_err(|_| {
            DriveKeysError::DecryptionFailed(ProviderError::Decryption(
                "message is not utf-8".to_string(),
            ))
        })
    }

    /// Detached armored signature over `data`.
    pub async fn sign(&self, data: &str, key: &KeyPair) -> Result<String, DriveKeysError> {
        self.provider
            .sign(data.as_bytes(), key)
            .await
            .map_err(DriveKeysError::SigningFailed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::Passphrase;

    #[tokio::test]
    async fn test_unsigned_roundtrip() {
        let keys = DriveKeys::local();
        let key = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();

        let armored = keys.encrypt_unsigned("root", &key).await.unwrap();
        assert!(!armored.contains("root"));
        assert_eq!(keys.decrypt_unsigned(&armored, &key).await.unwrap(), "root");
    }

    #[tokio::test]
    async fn test_decrypt_unsigned_with_locked_key() {
        let keys = DriveKeys::local();
        let mut key = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();
        let armored = keys.encrypt_unsigned("root", &key).await.unwrap();
        key.lock();

        let result = keys.decrypt_unsigned(&armored, &key).await;
        assert_eq!(
            result,
            Err(DriveKeysError::DecryptionFailed(ProviderError::KeyLocked))
        );
    }

    #[tokio::test]
    async fn test_sign_verifies_with_provider() {
        let keys = DriveKeys::local();
        let key = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();

        let signature = keys.sign("payload", &key).await.unwrap();
        keys.provider()
            .verify(b"payload", &signature, &key.public_key())
            .await
            .unwrap();
        assert!(keys
            .provider()
            .verify(b"other", &signature, &key.public_key())
            .await
            .is_err());
    }
}
