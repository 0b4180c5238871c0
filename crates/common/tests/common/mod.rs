//! Shared test utilities for drive key integration tests
#![allow(dead_code)]

use common::crypto::Passphrase;
use common::drive::DriveKeys;
use common::provider::{CryptoProvider, KeyPair};

pub const ADDRESS_IDENTITY: &str = "alice@example.com";

/// Generate an unlocked address key through `keys`' provider, returning the
/// key and the passphrase it is locked with.
pub async fn address_key<P: CryptoProvider>(keys: &DriveKeys<P>) -> (KeyPair, Passphrase) {
    let passphrase = Passphrase::generate();
    let mut key = keys
        .provider()
        .generate_key_pair(ADDRESS_IDENTITY, &passphrase)
        .await
        .unwrap();
    keys.provider().unlock(&mut key, &passphrase).await.unwrap();
    (key, passphrase)
}
