use serde::{Deserialize, Serialize};

use crate::provider::{CryptoProvider, KeyPair};

use super::{DriveKeys, DriveKeysError, NodeKeys};

/// Plaintext name given to every drive's root folder before encryption
pub const ROOT_FOLDER_NAME: &str = "root";

/// The artifacts registered with the server to create a drive
///
/// Holds only ciphertext, signatures and locked keys. Built once by
/// [`DriveKeys::generate_drive_bootstrap`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriveBootstrap {
    share_passphrase: String,
    share_passphrase_signature: String,
    folder_passphrase: String,
    folder_passphrase_signature: String,
    share_key: String,
    folder_key: String,
    folder_name: String,
}

impl DriveBootstrap {
    /// Share passphrase encrypted to the address key
    pub fn share_passphrase(&self) -> &str {
        &self.share_passphrase
    }

    /// Address key signature over the share passphrase
    pub fn share_passphrase_signature(&self) -> &str {
        &self.share_passphrase_signature
    }

    /// Root folder passphrase encrypted to the share key
    pub fn folder_passphrase(&self) -> &str {
        &self.folder_passphrase
    }

    /// Address key signature over the folder passphrase
    pub fn folder_passphrase_signature(&self) -> &str {
        &self.folder_passphrase_signature
    }

    pub fn share_key(&self) -> &str {
        &self.share_key
    }

    pub fn folder_key(&self) -> &str {
        &self.folder_key
    }

    /// [`ROOT_FOLDER_NAME`] encrypted to the folder key
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }
}

/// A bootstrap plus the unlocked share key, which the caller keeps in memory
/// to keep working on the new drive.
#[derive(Debug)]
pub struct DriveBootstrapResult {
    pub bootstrap: DriveBootstrap,
    pub share_private_key: KeyPair,
}

impl<P: CryptoProvider> DriveKeys<P> {
    /// Create the share and root folder of a new drive owned by `address_key`.
    ///
    /// The steps run strictly in order since each depends on the key made by
    /// the previous one. The address key signs both passphrases. The first
    /// failing step aborts the bootstrap and everything generated so far is
    /// dropped.
    pub async fn generate_drive_bootstrap(
        &self,
        address_key: &KeyPair,
    ) -> Result<DriveBootstrapResult, DriveKeysError> {
        let address = address_key.public_key();
        tracing::debug!(address = %address.to_hex(), "bootstrapping drive");

        let NodeKeys {
            private_key: share_private_key,
            node_key: share_key,
            node_passphrase: share_passphrase,
            node_passphrase_signature: share_passphrase_signature,
            ..
        } = self.generate_node_keys(&address, address_key).await?;
        tracing::debug!(share = %share_private_key.public_key().to_hex(), "generated share keys");

        let NodeKeys {
            private_key: folder_private_key,
            node_key: folder_key,
            node_passphrase: folder_passphrase,
            node_passphrase_signature: folder_passphrase_signature,
            ..
        } = self
            .generate_node_keys(&share_private_key.public_key(), address_key)
            .await?;
        tracing::debug!(folder = %folder_private_key.public_key().to_hex(), "generated root folder keys");

        let folder_name = self
            .encrypt_unsigned(ROOT_FOLDER_NAME, &folder_private_key)
            .await?;
        tracing::debug!("encrypted root folder name");

        Ok(DriveBootstrapResult {
            bootstrap: DriveBootstrap {
                share_passphrase,
                share_passphrase_signature,
                folder_passphrase,
                folder_passphrase_signature,
                share_key,
                folder_key,
                folder_name,
            },
            share_private_key,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::Passphrase;

    #[tokio::test]
    async fn test_bootstrap_wire_names() {
        let keys = DriveKeys::local();
        let address = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();

        let result = keys.generate_drive_bootstrap(&address).await.unwrap();
        let json = serde_json::to_value(&result.bootstrap).unwrap();
        let mut fields: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                "FolderKey",
                "FolderName",
                "FolderPassphrase",
                "FolderPassphraseSignature",
                "ShareKey",
                "SharePassphrase",
                "SharePassphraseSignature",
            ]
        );

        let parsed: DriveBootstrap = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result.bootstrap);
    }

    #[tokio::test]
    async fn test_share_key_is_returned_unlocked() {
        let keys = DriveKeys::local();
        let address = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();

        let result = keys.generate_drive_bootstrap(&address).await.unwrap();
        assert!(result.share_private_key.is_unlocked());
        assert_eq!(result.share_private_key.armored(), result.bootstrap.share_key());
    }

    #[tokio::test]
    async fn test_locked_address_key_aborts() {
        let keys = DriveKeys::local();
        let mut address = keys.generate_drive_key(&Passphrase::generate()).await.unwrap();
        address.lock();

        let result = keys.generate_drive_bootstrap(&address).await;
        assert!(matches!(result, Err(DriveKeysError::KeyGenerationFailed(_))));
    }
}
