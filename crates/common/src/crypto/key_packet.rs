//! Wrapping a [`Secret`] for a recipient's public key
//!
//! A key packet is how every secret in the drive tree travels: session keys
//! for content blocks, and the per-message keys that carry wrapped node
//! passphrases. It combines an ephemeral ECDH agreement with AES Key Wrap
//! (RFC 3394).
//!
//! Sealing:
//! 1. Generate an ephemeral Ed25519 keypair
//! 2. Convert the ephemeral secret and the recipient key to X25519 and agree
//! 3. Wrap the secret with AES-KW under the agreed key
//! 4. Emit `ephemeral_pubkey || wrapped_secret`
//!
//! Opening repeats the agreement from the recipient side and unwraps.

use aes_kw::KekAes256 as Kek;

use super::keys::{KeyError, PublicKey, SecretKey, PUBLIC_KEY_SIZE};
use super::secret::{Secret, SecretError, SECRET_SIZE};

/// Integrity block AES-KW adds to the wrapped key
pub const KW_NONCE_SIZE: usize = 8;
/// Total size of a key packet in bytes
///
/// Layout: ephemeral_pubkey (32) || wrapped_secret (40) = 72 bytes
pub const KEY_PACKET_SIZE: usize = PUBLIC_KEY_SIZE + SECRET_SIZE + KW_NONCE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum KeyPacketError {
    #[error("key packet error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("key error: {0}")]
    Key(#[from] KeyError),
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),
}

/// A [`Secret`] wrapped so only one recipient key can open it
///
/// # Wire Format
///
/// ```text
/// [ ephemeral_pubkey: 32 bytes ][ wrapped_secret: 40 bytes ]
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyPacket([u8; KEY_PACKET_SIZE]);

impl TryFrom<&[u8]> for KeyPacket {
    type Error = KeyPacketError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != KEY_PACKET_SIZE {
            return Err(anyhow::anyhow!(
                "invalid key packet size, expected {}, got {}",
                KEY_PACKET_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut packet = [0; KEY_PACKET_SIZE];
        packet.copy_from_slice(bytes);
        Ok(KeyPacket(packet))
    }
}

impl KeyPacket {
    /// Wrap `secret` for `recipient`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient point cannot be converted or key
    /// wrapping fails.
    pub fn seal(secret: &Secret, recipient: &PublicKey) -> Result<Self, KeyPacketError> {
        let ephemeral_private = SecretKey::generate();
        let ephemeral_public = ephemeral_private.public();

        let shared_secret = ephemeral_private
            .to_x25519()
            .diffie_hellman(&recipient.to_x25519()?);

        let kek = Kek::from(*shared_secret.as_bytes());
        let wrapped = kek
            .wrap_vec(secret.bytes())
            .map_err(|_| anyhow::anyhow!("AES-KW wrap error"))?;

        if PUBLIC_KEY_SIZE + wrapped.len() != KEY_PACKET_SIZE {
            return Err(anyhow::anyhow!("expected key packet size is incorrect").into());
        };

        let mut packet = [0; KEY_PACKET_SIZE];
        packet[..PUBLIC_KEY_SIZE].copy_from_slice(&ephemeral_public.to_bytes());
        packet[PUBLIC_KEY_SIZE..].copy_from_slice(&wrapped);

        Ok(KeyPacket(packet))
    }

    /// Recover the wrapped secret with the recipient's private key.
    ///
    /// # Errors
    ///
    /// Fails if the packet was sealed for a different key or was altered.
    pub fn open(&self, recipient: &SecretKey) -> Result<Secret, KeyPacketError> {
        let ephemeral_public = PublicKey::try_from(&self.0[..PUBLIC_KEY_SIZE])?;

        let shared_secret = recipient
            .to_x25519()
            .diffie_hellman(&ephemeral_public.to_x25519()?);

        let kek = Kek::from(*shared_secret.as_bytes());
        let unwrapped = zeroize::Zeroizing::new(
            kek.unwrap_vec(&self.0[PUBLIC_KEY_SIZE..])
                .map_err(|_| anyhow::anyhow!("AES-KW unwrap error"))?,
        );

        Ok(Secret::from_slice(&unwrapped)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let secret = Secret::from_slice(&[42u8; SECRET_SIZE]).unwrap();
        let private_key = SecretKey::generate();
        let packet = KeyPacket::seal(&secret, &private_key.public()).unwrap();
        assert_eq!(packet.open(&private_key).unwrap(), secret);
    }

    #[test]
    fn test_open_with_other_key_fails() {
        let secret = Secret::generate();
        let share_key = SecretKey::generate();
        let folder_key = SecretKey::generate();

        let packet = KeyPacket::seal(&secret, &share_key.public()).unwrap();
        assert_eq!(packet.open(&share_key).unwrap(), secret);
        assert!(packet.open(&folder_key).is_err());
    }

    #[test]
    fn test_packets_are_randomized() {
        let secret = Secret::generate();
        let recipient = SecretKey::generate().public();
        let a = KeyPacket::seal(&secret, &recipient).unwrap();
        let b = KeyPacket::seal(&secret, &recipient).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_packet_length_validation() {
        assert!(KeyPacket::try_from([0u8; KEY_PACKET_SIZE - 1].as_slice()).is_err());
        assert!(KeyPacket::try_from([0u8; KEY_PACKET_SIZE + 1].as_slice()).is_err());

        let secret = Secret::generate();
        let private_key = SecretKey::generate();
        let packet = KeyPacket::seal(&secret, &private_key.public()).unwrap();
        let parsed = KeyPacket::try_from(packet.bytes()).unwrap();
        assert_eq!(parsed.open(&private_key).unwrap(), secret);
    }
}
