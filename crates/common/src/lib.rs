/**
 * Cryptographic types and operations.
 *  - Public and Private key implementations
 *  - Passphrase-locked keys and sealed messages
 *  - Key-to-key session key wrapping
 */
pub mod crypto;
/**
 * The drive key protocol: node keys, content
 *  keys, lookup hashes and drive bootstrap.
 */
pub mod drive;
/**
 * The cryptographic provider the protocol runs
 *  on, and the default in-process implementation.
 */
pub mod provider;
/**
 * Fault-injecting provider for exercising
 *  failure paths in tests.
 */
pub mod testkit;

pub mod prelude {
    pub use crate::crypto::{Passphrase, PublicKey, SecretKey};
    pub use crate::drive::{
        ContentHash, ContentKeys, DriveBootstrap, DriveBootstrapResult, DriveKeys,
        DriveKeysError, NodeHashKey, NodeKeys,
    };
    pub use crate::provider::{CryptoProvider, KeyPair, LocalProvider, ProviderError};
}
