use crate::error::{Error, Result};
use crate::params::{BITS_PER_SYMBOL, Params};
use zeroize::Zeroizing;

/// RFC 4648 Base32 alphabet.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const SYMBOL_BITS: u32 = BITS_PER_SYMBOL as u32;
const SYMBOL_MASK: u32 = (1 << SYMBOL_BITS) - 1;

/// Unpadded RFC 4648 Base32.
pub fn base32_encode(bytes: &[u8]) -> Zeroizing<String> {
    // Sized up front so the secret text is never reallocated and left behind.
    let capacity = (bytes.len() * 8).div_ceil(BITS_PER_SYMBOL);
    let mut out = Zeroizing::new(String::with_capacity(capacity));

    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= SYMBOL_BITS {
            bits -= SYMBOL_BITS;
            out.push(ALPHABET[((buffer >> bits) & SYMBOL_MASK) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        let index = (buffer << (SYMBOL_BITS - bits)) & SYMBOL_MASK;
        out.push(ALPHABET[index as usize] as char);
    }

    out
}

/// Insert a single space after every `group_size` symbols, never trailing.
/// A `group_size` of zero leaves the segment ungrouped.
pub fn group(segment: &str, group_size: usize) -> Zeroizing<String> {
    let extra = match group_size {
        0 => 0,
        n => segment.len().saturating_sub(1) / n,
    };
    let mut out = Zeroizing::new(String::with_capacity(segment.len() + extra));

    for (i, ch) in segment.chars().enumerate() {
        if group_size > 0 && i > 0 && i % group_size == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

/// Turn a keystream into `params.password_count` grouped passwords, in order.
pub fn encode_passwords(stream: &[u8], params: &Params) -> Result<Vec<Zeroizing<String>>> {
    let symbols = base32_encode(stream);

    let needed = params.symbol_count();
    if symbols.len() < needed {
        return Err(Error::ShortKeystream {
            needed,
            actual: symbols.len(),
        });
    }

    let passwords = (0..params.password_count)
        .map(|c| {
            let from = c * params.password_length;
            let to = from + params.password_length;
            group(&symbols[from..to], params.group_size)
        })
        .collect();

    Ok(passwords)
}
