//! # Drive Keys
//!
//! The key hierarchy of an end-to-end encrypted drive. Every node in the
//! tree (share, folder, file) owns an asymmetric key pair whose private half
//! is locked under a random passphrase. That passphrase is wrapped for the
//! parent node and signed by an identity key, so holding a parent key is
//! enough to walk down the tree and the provenance of every edge is auditable.
//!
//! ```text
//!  address key ──signs──┐
//!      │                │
//!      ▼ wraps          ▼
//!   share key ◄── SharePassphrase + SharePassphraseSignature
//!      │
//!      ▼ wraps
//!  root folder key ◄── FolderPassphrase + FolderPassphraseSignature (signed by address key)
//!      │
//!      ├── NodeHashKey          (self-wrapped HMAC key for name lookups)
//!      └── ContentKeyPacket     (per block session key)
//! ```
//!
//! ## Components
//!
//! - [`DriveKeys::generate_node_keys`] - node key factory
//! - [`DriveKeys::generate_content_keys`] - per-block session keys
//! - [`DriveKeys::generate_lookup_hash`] - deterministic name hashes
//! - [`DriveKeys::generate_node_hash_key`] - the HMAC key for a folder
//! - [`DriveKeys::generate_drive_bootstrap`] - share + root folder for a new drive
//!
//! All of them go through a [`CryptoProvider`]; none keeps state between calls.

mod bootstrap;
mod content_hash;
mod content_keys;
mod error;
mod lookup_hash;
mod message;
mod node_keys;
mod organization;

use crate::provider::{CryptoProvider, LocalProvider};

pub use bootstrap::{DriveBootstrap, DriveBootstrapResult, ROOT_FOLDER_NAME};
pub use content_hash::ContentHash;
pub use content_keys::ContentKeys;
pub use error::DriveKeysError;
pub use lookup_hash::NodeHashKey;
pub use node_keys::{NodeKeys, DRIVE_KEY_IDENTITY};
pub use organization::{OrganizationKey, OrganizationKeyResponse};

/// Entry point for the drive key protocol over a given provider
///
/// # Example
///
/// ```ignore
/// let keys = DriveKeys::local();
/// let DriveBootstrapResult { bootstrap, share_private_key } =
///     keys.generate_drive_bootstrap(&address_key).await?;
/// register_drive(&bootstrap)?;
/// ```
#[derive(Debug, Clone)]
pub struct DriveKeys<P> {
    provider: P,
}

impl DriveKeys<LocalProvider> {
    pub fn local() -> Self {
        Self::new(LocalProvider::new())
    }
}

impl<P: CryptoProvider> DriveKeys<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
