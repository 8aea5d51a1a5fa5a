use crate::error::{Error, Result};
use crate::params::{MAX_KEYFILE_SIZE, MIN_KEYFILE_SIZE, Options};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const SALT_LEN: usize = 16;

pub type Salt = [u8; SALT_LEN];

/// Salt together with the keyfile size that passed the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyfileDigest {
    pub salt: Salt,
    pub size: u64,
}

/// Hash the whole keyfile and keep the first 16 bytes of the SHA-256 digest.
///
/// The keyfile does not need to be secret, only stable: a single changed byte
/// anywhere in it produces an unrelated salt.
pub fn extract_salt(path: &Path, options: &Options) -> Result<Salt> {
    read_keyfile(path, options).map(|digest| digest.salt)
}

/// Like [`extract_salt`], also reporting the size taken from the open handle.
pub fn read_keyfile(path: &Path, options: &Options) -> Result<KeyfileDigest> {
    let io_err = |source| Error::Keyfile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();
    check_size(size)?;

    tracing::debug!(path = %path.display(), size, "hashing keyfile");

    let salt = digest_salt(file).map_err(io_err)?;

    if options.debug {
        tracing::debug!(salt = %hex::encode(salt), "salt");
    }

    Ok(KeyfileDigest { salt, size })
}

pub fn check_size(size: u64) -> Result<()> {
    if size < MIN_KEYFILE_SIZE {
        return Err(Error::FileTooSmall {
            size,
            min: MIN_KEYFILE_SIZE,
        });
    }
    if size > MAX_KEYFILE_SIZE {
        return Err(Error::FileTooLarge {
            size,
            max: MAX_KEYFILE_SIZE,
        });
    }
    Ok(())
}

/// Stream `reader` through SHA-256 and truncate the digest to a salt.
pub fn digest_salt<R: Read>(mut reader: R) -> io::Result<Salt> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    let digest = hasher.finalize();

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&digest[..SALT_LEN]);
    Ok(salt)
}
