//! Sealed messages and detached signatures
//!
//! A message is sealed with a fresh [`Secret`] whose key packet is addressed
//! to the recipient. Signatures are always detached and computed over the
//! plaintext.

use ed25519_dalek::Signature;

use super::key_packet::{KeyPacket, KEY_PACKET_SIZE};
use super::keys::{PublicKey, SecretKey};
use super::secret::Secret;

pub const MESSAGE_PEM_TAG: &str = "DRIVE MESSAGE";
pub const SIGNATURE_PEM_TAG: &str = "DRIVE SIGNATURE";

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("message error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Seal `plaintext` so only the holder of `recipient`'s private key can read it.
///
/// Armored as PEM `DRIVE MESSAGE` over `key_packet (72) || sealed body`.
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> Result<String, MessageError> {
    let session = Secret::generate();
    let packet = KeyPacket::seal(&session, recipient)
        .map_err(|e| anyhow::anyhow!("failed to wrap message key: {}", e))?;
    let body = session
        .encrypt(plaintext)
        .map_err(|e| anyhow::anyhow!("failed to seal message body: {}", e))?;

    let mut contents = Vec::with_capacity(KEY_PACKET_SIZE + body.len());
    contents.extend_from_slice(packet.bytes());
    contents.extend_from_slice(&body);
    Ok(pem::encode(&pem::Pem::new(MESSAGE_PEM_TAG, contents)))
}

/// Open a message produced by [`seal`].
pub fn open(armored: &str, recipient: &SecretKey) -> Result<Vec<u8>, MessageError> {
    let contents = dearmor(armored, MESSAGE_PEM_TAG)?;
    if contents.len() < KEY_PACKET_SIZE {
        return Err(anyhow::anyhow!("message too short for key packet").into());
    }

    let packet = KeyPacket::try_from(&contents[..KEY_PACKET_SIZE])
        .map_err(|e| anyhow::anyhow!("invalid message key packet: {}", e))?;
    let session = packet
        .open(recipient)
        .map_err(|e| anyhow::anyhow!("message not addressed to this key: {}", e))?;
    let plaintext = session
        .decrypt(&contents[KEY_PACKET_SIZE..])
        .map_err(|e| anyhow::anyhow!("failed to open message body: {}", e))?;
    Ok(plaintext)
}

/// Sign `data` and armor the detached signature.
pub fn sign_detached(data: &[u8], signer: &SecretKey) -> String {
    let signature = signer.sign(data);
    pem::encode(&pem::Pem::new(SIGNATURE_PEM_TAG, signature.to_bytes().to_vec()))
}

/// Check an armored detached signature over `data`.
pub fn verify_detached(
    data: &[u8],
    armored_signature: &str,
    signer: &PublicKey,
) -> Result<(), MessageError> {
    let contents = dearmor(armored_signature, SIGNATURE_PEM_TAG)?;
    let signature = Signature::from_slice(&contents)
        .map_err(|_| anyhow::anyhow!("malformed signature"))?;
    signer
        .verify(data, &signature)
        .map_err(|_| anyhow::anyhow!("signature does not match signer {}", signer.to_hex()))?;
    Ok(())
}

fn dearmor(armored: &str, tag: &str) -> Result<Vec<u8>, MessageError> {
    let pem = pem::parse(armored).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;
    if pem.tag() != tag {
        return Err(anyhow::anyhow!("invalid PEM tag, expected {}, got {}", tag, pem.tag()).into());
    }
    Ok(pem.into_contents())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let recipient = SecretKey::generate();
        let armored = seal(b"root", &recipient.public()).unwrap();
        assert!(armored.contains("BEGIN DRIVE MESSAGE"));
        assert_eq!(open(&armored, &recipient).unwrap(), b"root".to_vec());
    }

    #[test]
    fn test_open_by_other_key_fails() {
        let recipient = SecretKey::generate();
        let outsider = SecretKey::generate();
        let armored = seal(b"passphrase", &recipient.public()).unwrap();
        assert!(open(&armored, &outsider).is_err());
    }

    #[test]
    fn test_open_rejects_signature_armor() {
        let key = SecretKey::generate();
        let signature = sign_detached(b"data", &key);
        assert!(open(&signature, &key).is_err());
    }

    #[test]
    fn test_detached_signature() {
        let signer = SecretKey::generate();
        let signature = sign_detached(b"wrapped passphrase", &signer);

        assert!(verify_detached(b"wrapped passphrase", &signature, &signer.public()).is_ok());
        assert!(verify_detached(b"something else", &signature, &signer.public()).is_err());

        let unrelated = SecretKey::generate().public();
        assert!(verify_detached(b"wrapped passphrase", &signature, &unrelated).is_err());
    }
}
