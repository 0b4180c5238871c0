use serde::{Deserialize, Serialize};

use crate::provider::{CryptoProvider, KeyPair};

use super::{DriveKeys, DriveKeysError};

/// An organization key as the account API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrganizationKeyResponse {
    /// Armored locked private key; absent for members without key access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Hex public key
    pub public_key: String,
}

/// Result of trying to open an organization key
///
/// A failure to unlock is carried in `error` rather than returned, so the
/// caller can still list the organization and show what went wrong.
#[derive(Debug, Clone)]
pub struct OrganizationKey {
    pub key: OrganizationKeyResponse,
    pub private_key: Option<KeyPair>,
    pub error: Option<DriveKeysError>,
}

impl<P: CryptoProvider> DriveKeys<P> {
    pub async fn get_decrypted_organization_key(
        &self,
        key_password: &str,
        key: OrganizationKeyResponse,
    ) -> OrganizationKey {
        let Some(armored) = key.private_key.as_deref() else {
            return OrganizationKey {
                key,
                private_key: None,
                error: None,
            };
        };

        match self.provider.decrypt_private_key(armored, key_password).await {
            Ok(private_key) => OrganizationKey {
                key,
                private_key: Some(private_key),
                error: None,
            },
            Err(e) => {
                tracing::warn!(public_key = %key.public_key, "failed to decrypt organization key: {}", e);
                OrganizationKey {
                    key,
                    private_key: None,
                    error: Some(DriveKeysError::on_decrypt(e)),
                }
            }
        }
    }
}
