use crate::params::Options;
use crate::salt::Salt;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
const OUTPUT_LEN: usize = KEY_LEN + IV_LEN;

/// AES-256 key and CTR initial counter block, split from one PBKDF2 output.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl KeyMaterial {
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([REDACTED])")
    }
}

/// PBKDF2-HMAC-SHA256 over the passphrase and keyfile salt.
///
/// `rounds` is part of the output's identity: the same passphrase and salt
/// under a different round count yields unrelated passwords.
pub fn derive_key(passphrase: &[u8], salt: &Salt, rounds: u32, options: &Options) -> KeyMaterial {
    tracing::debug!(rounds, "deriving key material");

    let mut output = Zeroizing::new([0u8; OUTPUT_LEN]);
    pbkdf2_hmac::<Sha256>(passphrase, salt, rounds, &mut output[..]);

    let mut material = KeyMaterial {
        key: [0u8; KEY_LEN],
        iv: [0u8; IV_LEN],
    };
    material.key.copy_from_slice(&output[..KEY_LEN]);
    material.iv.copy_from_slice(&output[KEY_LEN..]);

    if options.debug {
        tracing::debug!(key = %hex::encode(material.key), "key");
        tracing::debug!(iv = %hex::encode(material.iv), "iv");
    }

    material
}
