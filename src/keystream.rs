use crate::error::{Error, Result};
use crate::kdf::{IV_LEN, KEY_LEN};
use crate::params::Options;
use aes::Aes256;
use ctr::Ctr128BE;
use ctr::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

/// AES-256 with the whole 16-byte IV as a big-endian counter.
type Aes256Ctr = Ctr128BE<Aes256>;

/// Expand `key` and `iv` into `len` keystream bytes.
///
/// The output is the CTR encryption of an all-zero buffer, which is the raw
/// keystream. Only a wrong key or IV length can fail here.
pub fn expand(key: &[u8], iv: &[u8], len: usize, options: &Options) -> Result<Zeroizing<Vec<u8>>> {
    let mut cipher = Aes256Ctr::new_from_slices(key, iv).map_err(|_| {
        Error::CipherInit(format!(
            "expected {}-byte key and {}-byte IV, got {} and {}",
            KEY_LEN,
            IV_LEN,
            key.len(),
            iv.len()
        ))
    })?;

    let mut stream = Zeroizing::new(vec![0u8; len]);
    cipher.apply_keystream(&mut stream);

    if options.debug {
        tracing::debug!(keystream = %hex::encode(&*stream), "keystream");
    }

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::default()
    }

    #[test]
    fn test_zero_iv_keystream() {
        let stream = expand(&[7u8; 32], &[0u8; 16], 32, &opts()).unwrap();
        assert_eq!(
            hex::encode(&*stream),
            "0a4dee87e76ce0d47c6e1cdfc76d20a35edb517956e137fe1497cec0a9750c79"
        );
    }

    #[test]
    fn test_counter_wraps_full_block() {
        // An all-ones IV rolls over to the zero counter on the second block.
        let zero = expand(&[7u8; 32], &[0u8; 16], 16, &opts()).unwrap();
        let wrapped = expand(&[7u8; 32], &[0xffu8; 16], 32, &opts()).unwrap();
        assert_eq!(hex::encode(&wrapped[..16]), "fab53800d053b2e20e9449390563cf31");
        assert_eq!(&wrapped[16..], &zero[..]);
    }

    #[test]
    fn test_exact_length() {
        for len in [0, 1, 15, 16, 17, 125] {
            let stream = expand(&[1u8; 32], &[2u8; 16], len, &opts()).unwrap();
            assert_eq!(stream.len(), len);
        }
    }

    #[test]
    fn test_prefix_stable_across_lengths() {
        let short = expand(&[3u8; 32], &[4u8; 16], 20, &opts()).unwrap();
        let long = expand(&[3u8; 32], &[4u8; 16], 125, &opts()).unwrap();
        assert_eq!(&long[..20], &short[..]);
    }

    #[test]
    fn test_wrong_key_length() {
        let err = expand(&[0u8; 16], &[0u8; 16], 8, &opts()).unwrap_err();
        assert!(matches!(err, Error::CipherInit(_)));
    }

    #[test]
    fn test_wrong_iv_length() {
        let err = expand(&[0u8; 32], &[0u8; 12], 8, &opts()).unwrap_err();
        assert!(matches!(err, Error::CipherInit(_)));
    }
}
