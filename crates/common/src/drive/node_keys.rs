use crate::crypto::{Passphrase, PublicKey};
use crate::provider::{CryptoProvider, EncryptedMessage, KeyPair, ProviderError, Verification};

use super::{DriveKeys, DriveKeysError};

/// Identity label every node key is generated with
pub const DRIVE_KEY_IDENTITY: &str = "Drive key";

/// Everything the node key factory produces for one node
///
/// `node_key`, `node_passphrase` and `node_passphrase_signature` are the
/// persisted record (`NodeKey`, `NodePassphrase`, `NodePassphraseSignature`).
/// `private_key` is unlocked and ready to author children.
#[derive(Debug)]
pub struct NodeKeys {
    /// Unlocked private key, in memory only
    pub private_key: KeyPair,
    /// Armored locked private key
    pub node_key: String,
    /// Passphrase encrypted to the parent key
    pub node_passphrase: String,
    /// Detached signature over the passphrase by the signer key
    pub node_passphrase_signature: String,
    /// The passphrase itself, for one-shot use by the caller.
    /// Wiped when dropped; drop it as soon as that use is done.
    pub raw_passphrase: Passphrase,
}

impl<P: CryptoProvider> DriveKeys<P> {
    /// Generate a node key pair locked with `passphrase`, then unlock it.
    pub async fn generate_drive_key(&self, passphrase: &Passphrase) -> Result<KeyPair, DriveKeysError> {
        let mut key = self
            .provider
            .generate_key_pair(DRIVE_KEY_IDENTITY, passphrase)
            .await
            .map_err(DriveKeysError::KeyGenerationFailed)?;
        self.provider
            .unlock(&mut key, passphrase)
            .await
            .map_err(DriveKeysError::KeyGenerationFailed)?;
        Ok(key)
    }

    /// Create a new node under `parent`.
    ///
    /// The node's passphrase is encrypted to `parent` and signed by `signer`,
    /// which must be unlocked. The signer is whoever vouches for the edge: the
    /// parent's owner for a direct child, the address key during bootstrap.
    ///
    /// # Errors
    ///
    /// Any provider failure becomes `DriveKeysError::KeyGenerationFailed`;
    /// nothing partial is returned.
    pub async fn generate_node_keys(
        &self,
        parent: &PublicKey,
        signer: &KeyPair,
    ) -> Result<NodeKeys, DriveKeysError> {
        let raw_passphrase = Passphrase::generate();
        let private_key = self.generate_drive_key(&raw_passphrase).await?;

        let EncryptedMessage { data, signature } = self
            .provider
            .encrypt(raw_passphrase.as_bytes(), parent, Some(signer))
            .await
            .map_err(DriveKeysError::KeyGenerationFailed)?;
        let signature = signature.ok_or_else(|| {
            DriveKeysError::KeyGenerationFailed(ProviderError::Encryption(
                "provider returned no detached signature".to_string(),
            ))
        })?;

        tracing::debug!(
            node = %private_key.public_key().to_hex(),
            parent = %parent.to_hex(),
            signer = %signer.public_key().to_hex(),
            "generated node keys"
        );

        Ok(NodeKeys {
            node_key: private_key.armored().to_string(),
            private_key,
            node_passphrase: data,
            node_passphrase_signature: signature,
            raw_passphrase,
        })
    }

    /// Recover a node's passphrase with its parent key, checking that `signer`
    /// produced the wrapping.
    ///
    /// # Errors
    ///
    /// * `DriveKeysError::SignatureInvalid` - the signature is not from `signer`
    /// * `DriveKeysError::DecryptionFailed` - `parent` cannot open the passphrase
    pub async fn verify_node_passphrase(
        &self,
        node_passphrase: &str,
        signature: &str,
        parent: &KeyPair,
        signer: &PublicKey,
    ) -> Result<Passphrase, DriveKeysError> {
        let plaintext = self
            .provider
            .decrypt(
                node_passphrase,
                parent,
                Some(Verification { signature, signer }),
            )
            .await
            .map_err(DriveKeysError::on_decrypt)?;
        let passphrase = String::from_utf8(plaintext).map_err(|_| {
            DriveKeysError::DecryptionFailed(ProviderError::Decryption(
                "passphrase is not utf-8".to_string(),
            ))
        })?;
        Ok(Passphrase::from(passphrase))
    }

    /// Unlock a stored node key by walking down from its parent.
    pub async fn open_node_key(
        &self,
        node_key: &str,
        node_passphrase: &str,
        signature: &str,
        parent: &KeyPair,
        signer: &PublicKey,
    ) -> Result<KeyPair, DriveKeysError> {
        let passphrase = self
            .verify_node_passphrase(node_passphrase, signature, parent, signer)
            .await?;
        self.provider
            .decrypt_private_key(node_key, &passphrase)
            .await
            .map_err(DriveKeysError::on_decrypt)
    }
}
