pub mod encoder;
pub mod error;
pub mod kdf;
pub mod keystream;
pub mod params;
pub mod salt;

pub use encoder::{base32_encode, encode_passwords, group};
pub use error::{Error, Result};
pub use kdf::{KeyMaterial, derive_key};
pub use keystream::expand;
pub use params::{MAX_KEYFILE_SIZE, MIN_KEYFILE_SIZE, Options, Params};
pub use salt::{KeyfileDigest, Salt, extract_salt, read_keyfile};

use std::path::Path;
use zeroize::Zeroizing;

/// Derive the password set for an already extracted keyfile salt.
pub fn derive_passwords(
    salt: &Salt,
    passphrase: &[u8],
    params: &Params,
    options: &Options,
) -> Result<Vec<Zeroizing<String>>> {
    let material = derive_key(passphrase, salt, params.rounds, options);
    let stream = expand(material.key(), material.iv(), params.keystream_len(), options)?;

    if options.debug {
        let encoded = base32_encode(&stream);
        tracing::debug!(base32 = %encoded.as_str(), "encoded keystream");
    }

    encode_passwords(&stream, params)
}

/// Full pipeline: keyfile salt, PBKDF2, AES-CTR keystream, grouped Base32.
pub fn generate_passwords(
    keyfile: &Path,
    passphrase: &[u8],
    params: &Params,
    options: &Options,
) -> Result<Vec<Zeroizing<String>>> {
    let salt = extract_salt(keyfile, options)?;
    derive_passwords(&salt, passphrase, params, options)
}
