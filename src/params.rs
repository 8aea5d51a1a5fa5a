/// Smallest accepted keyfile, in bytes.
pub const MIN_KEYFILE_SIZE: u64 = 1024 * 64;
/// Largest accepted keyfile, in bytes.
pub const MAX_KEYFILE_SIZE: u64 = 1024 * 1024 * 100;

/// Bits carried by one Base32 symbol.
pub const BITS_PER_SYMBOL: usize = 5;

/// Shape of a derivation run. Every field changes the generated passwords,
/// so a given set of outputs is only reproducible with the same `Params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub rounds: u32,
    pub password_count: usize,
    pub password_length: usize,
    pub group_size: usize,
}

impl Params {
    pub const DEFAULT: Self = Self {
        rounds: 200_000,
        password_count: 10,
        password_length: 20,
        group_size: 5,
    };

    pub fn symbol_count(&self) -> usize {
        self.password_count * self.password_length
    }

    /// Keystream bytes needed to cover every output symbol.
    pub fn keystream_len(&self) -> usize {
        (self.symbol_count() * BITS_PER_SYMBOL).div_ceil(8)
    }

    pub fn bits_per_password(&self) -> usize {
        self.password_length * BITS_PER_SYMBOL
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-run switches that never affect the generated passwords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Log intermediate salt, key, IV and keystream at debug level.
    /// These values are as sensitive as the passwords themselves.
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keystream_len() {
        assert_eq!(Params::DEFAULT.symbol_count(), 200);
        assert_eq!(Params::DEFAULT.keystream_len(), 125);
    }

    #[test]
    fn test_keystream_len_rounds_up() {
        let params = Params {
            password_count: 1,
            password_length: 3,
            ..Params::DEFAULT
        };
        // 15 bits
        assert_eq!(params.keystream_len(), 2);

        let params = Params {
            password_count: 1,
            password_length: 8,
            ..Params::DEFAULT
        };
        assert_eq!(params.keystream_len(), 5);
    }

    #[test]
    fn test_bits_per_password() {
        assert_eq!(Params::DEFAULT.bits_per_password(), 100);
    }

    #[test]
    fn test_keyfile_bounds() {
        assert_eq!(MIN_KEYFILE_SIZE, 65_536);
        assert_eq!(MAX_KEYFILE_SIZE, 104_857_600);
    }
}
