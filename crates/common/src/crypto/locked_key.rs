use zeroize::Zeroizing;

use super::keys::{PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use super::secret::{Secret, SALT_SIZE};

pub const LOCKED_KEY_PEM_TAG: &str = "DRIVE PRIVATE KEY";
/// Identity labels are length-prefixed with a single byte
const MAX_IDENTITY_LEN: usize = u8::MAX as usize;

#[derive(Debug, thiserror::Error)]
pub enum LockedKeyError {
    #[error("invalid passphrase")]
    InvalidPassphrase,
    #[error("locked key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// A private key sealed under a passphrase, with its public half in the clear
///
/// This is the only form in which a private key is persisted. The public key
/// and identity label stay readable so a caller can wrap secrets for the key,
/// or show who it belongs to, without ever unlocking it.
///
/// # Armored layout
///
/// PEM tag `DRIVE PRIVATE KEY`, contents:
///
/// ```text
/// [ public_key: 32 ][ salt: 16 ][ identity_len: 1 ][ identity ][ sealed private key ]
/// ```
///
/// The lock key is Argon2id over the passphrase with the per-key salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedKey {
    identity: String,
    public: PublicKey,
    salt: [u8; SALT_SIZE],
    sealed: Vec<u8>,
}

impl LockedKey {
    /// Seal `key` under `passphrase`.
    pub fn lock(
        key: &SecretKey,
        identity: &str,
        passphrase: &str,
    ) -> Result<Self, LockedKeyError> {
        if identity.len() > MAX_IDENTITY_LEN {
            return Err(anyhow::anyhow!(
                "identity label too long, max {} bytes, got {}",
                MAX_IDENTITY_LEN,
                identity.len()
            )
            .into());
        }

        let salt = Secret::generate_salt();
        let lock = Secret::derive_from_passphrase(passphrase, &salt)
            .map_err(|e| anyhow::anyhow!("failed to derive lock key: {}", e))?;
        let key_bytes = Zeroizing::new(key.to_bytes());
        let sealed = lock
            .encrypt(key_bytes.as_slice())
            .map_err(|e| anyhow::anyhow!("failed to seal private key: {}", e))?;

        Ok(Self {
            identity: identity.to_string(),
            public: key.public(),
            salt,
            sealed,
        })
    }

    /// Open the sealed key.
    ///
    /// Any authentication failure is reported as [`LockedKeyError::InvalidPassphrase`];
    /// a wrong passphrase and a corrupted blob are indistinguishable here.
    pub fn unlock(&self, passphrase: &str) -> Result<SecretKey, LockedKeyError> {
        let lock = Secret::derive_from_passphrase(passphrase, &self.salt)
            .map_err(|e| anyhow::anyhow!("failed to derive lock key: {}", e))?;
        let opened = Zeroizing::new(
            lock.decrypt(&self.sealed)
                .map_err(|_| LockedKeyError::InvalidPassphrase)?,
        );

        if opened.len() != PRIVATE_KEY_SIZE {
            return Err(anyhow::anyhow!("unlocked private key has wrong size").into());
        }
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        bytes.copy_from_slice(&opened);
        let key = SecretKey::from(*bytes);

        if key.public() != self.public {
            return Err(anyhow::anyhow!("unlocked private key does not match public key").into());
        }
        Ok(key)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn public(&self) -> PublicKey {
        self.public
    }

    pub fn to_armored(&self) -> String {
        let mut contents = Vec::with_capacity(
            PUBLIC_KEY_SIZE + SALT_SIZE + 1 + self.identity.len() + self.sealed.len(),
        );
        contents.extend_from_slice(&self.public.to_bytes());
        contents.extend_from_slice(&self.salt);
        contents.push(self.identity.len() as u8);
        contents.extend_from_slice(self.identity.as_bytes());
        contents.extend_from_slice(&self.sealed);
        pem::encode(&pem::Pem::new(LOCKED_KEY_PEM_TAG, contents))
    }

    /// Parse an armored locked key.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed or carries the wrong tag
    /// - The public key or identity label is truncated or invalid
    pub fn from_armored(armored: &str) -> Result<Self, LockedKeyError> {
        let pem = pem::parse(armored).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;
        if pem.tag() != LOCKED_KEY_PEM_TAG {
            return Err(anyhow::anyhow!(
                "invalid PEM tag, expected {}, got {}",
                LOCKED_KEY_PEM_TAG,
                pem.tag()
            )
            .into());
        }

        let contents = pem.contents();
        let header_len = PUBLIC_KEY_SIZE + SALT_SIZE;
        if contents.len() < header_len + 1 {
            return Err(anyhow::anyhow!("locked key too short").into());
        }
        let public = PublicKey::try_from(&contents[..PUBLIC_KEY_SIZE])
            .map_err(|e| anyhow::anyhow!("locked key public half: {}", e))?;
        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&contents[PUBLIC_KEY_SIZE..header_len]);

        let identity_len = contents[header_len] as usize;
        let identity_start = header_len + 1;
        let sealed_start = identity_start + identity_len;
        if contents.len() < sealed_start {
            return Err(anyhow::anyhow!("locked key identity truncated").into());
        }
        let identity = std::str::from_utf8(&contents[identity_start..sealed_start])
            .map_err(|_| anyhow::anyhow!("locked key identity is not utf-8"))?
            .to_string();

        Ok(Self {
            identity,
            public,
            salt,
            sealed: contents[sealed_start..].to_vec(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lock_unlock() {
        let key = SecretKey::generate();
        let locked = LockedKey::lock(&key, "Drive key", "correct horse").unwrap();

        let unlocked = locked.unlock("correct horse").unwrap();
        assert_eq!(unlocked.public(), key.public());
    }

    #[test]
    fn test_wrong_passphrase() {
        let key = SecretKey::generate();
        let locked = LockedKey::lock(&key, "Drive key", "correct horse").unwrap();

        let result = locked.unlock("battery staple");
        assert!(matches!(result, Err(LockedKeyError::InvalidPassphrase)));
    }

    #[test]
    fn test_armor_keeps_public_half_readable() {
        let key = SecretKey::generate();
        let armored = LockedKey::lock(&key, "Drive key", "pass").unwrap().to_armored();
        assert!(armored.contains("BEGIN DRIVE PRIVATE KEY"));

        let parsed = LockedKey::from_armored(&armored).unwrap();
        assert_eq!(parsed.identity(), "Drive key");
        assert_eq!(parsed.public(), key.public());
        assert_eq!(parsed.unlock("pass").unwrap().public(), key.public());
    }

    #[test]
    fn test_armor_rejects_wrong_tag() {
        let armored = pem::encode(&pem::Pem::new("PRIVATE KEY", vec![0u8; 64]));
        assert!(LockedKey::from_armored(&armored).is_err());
    }

    #[test]
    fn test_armor_rejects_truncated_identity() {
        let key = SecretKey::generate();
        let mut contents = key.public().to_bytes().to_vec();
        contents.extend_from_slice(&[0u8; SALT_SIZE]);
        contents.push(200);
        contents.extend_from_slice(b"short");
        let armored = pem::encode(&pem::Pem::new(LOCKED_KEY_PEM_TAG, contents));
        assert!(LockedKey::from_armored(&armored).is_err());
    }

    #[test]
    fn test_identity_too_long() {
        let key = SecretKey::generate();
        let identity = "x".repeat(MAX_IDENTITY_LEN + 1);
        assert!(LockedKey::lock(&key, &identity, "pass").is_err());
    }

    #[test]
    fn test_same_passphrase_locks_differently() {
        let key = SecretKey::generate();
        let a = LockedKey::lock(&key, "Address key", "hunter2").unwrap();
        let b = LockedKey::lock(&key, "Address key", "hunter2").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.sealed, b.sealed);

        // Each salt yields its own lock key, so neither sealed blob opens under the other
        let swapped = LockedKey {
            salt: b.salt,
            ..a.clone()
        };
        assert!(matches!(
            swapped.unlock("hunter2"),
            Err(LockedKeyError::InvalidPassphrase)
        ));
    }

    #[test]
    fn test_salt_survives_armor() {
        let key = SecretKey::generate();
        let locked = LockedKey::lock(&key, "Address key", "hunter2").unwrap();

        let parsed = LockedKey::from_armored(&locked.to_armored()).unwrap();
        assert_eq!(parsed, locked);
        assert_eq!(parsed.unlock("hunter2").unwrap().public(), key.public());
        assert!(parsed.unlock("hunter3").is_err());
    }
}
