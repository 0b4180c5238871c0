//! Cryptographic primitives behind the default provider
//!
//! These are the building blocks [`LocalProvider`](crate::provider::LocalProvider)
//! uses to satisfy the [`CryptoProvider`](crate::provider::CryptoProvider)
//! contract. The drive protocol itself never touches them directly.
//!
//! - **Identity & node keys**: Ed25519 keypairs (`SecretKey`/`PublicKey`)
//! - **Locking**: private keys sealed under a passphrase (`LockedKey`)
//! - **Wrapping**: ECDH + AES-KW key packets addressed to a public key (`KeyPacket`)
//! - **Sealing**: ChaCha20-Poly1305 under a per-item `Secret`
//! - **Provenance**: detached Ed25519 signatures over plaintext
//! - **Hashing**: HMAC-SHA-256 for lookup hashes, SHA-256 for block digests
//!
//! # Wrapping a node passphrase
//!
//! 1. Generate a per-message `Secret`
//! 2. Seal the passphrase with it
//! 3. Wrap the `Secret` in a `KeyPacket` for the parent public key
//! 4. Sign the plaintext passphrase with the signer key, detached
//!
//! The parent recovers the passphrase by opening the key packet with its
//! private key, then the body; anyone with the signer's public key can
//! confirm who produced the wrapping.

mod hash;
mod key_packet;
mod keys;
mod locked_key;
pub mod message;
mod passphrase;
mod secret;

pub use hash::{hmac_sha256, sha256, SHA256_NAME, SHA256_SIZE};
pub use key_packet::{KeyPacket, KeyPacketError, KEY_PACKET_SIZE};
pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
pub use locked_key::{LockedKey, LockedKeyError, LOCKED_KEY_PEM_TAG};
pub use message::MessageError;
pub use passphrase::{Passphrase, PASSPHRASE_ENTROPY_BYTES, PASSPHRASE_MIN_LEN};
pub use secret::{Secret, SecretError, SALT_SIZE, SECRET_SIZE};
