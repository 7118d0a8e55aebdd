//! djb2 string hash shared by every table in the crate.

/// Initial value of the djb2 accumulator.
pub const DJB2_SEED: u32 = 5381;

/// Hashes `bytes` with djb2: `h = h * 33 + byte` over every byte, wrapping
/// at 32 bits.
///
/// The function is a pure function of its input. Tables cache the result
/// per entry and rely on it never changing for the same key.
#[inline]
pub fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter().fold(DJB2_SEED, |h, &b| {
        (h << 5).wrapping_add(h).wrapping_add(u32::from(b))
    })
}

/// Convenience wrapper for string keys.
#[inline]
pub fn djb2_str(key: &str) -> u32 {
    djb2(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: The empty input hashes to the seed.
    #[test]
    fn empty_input_is_seed() {
        assert_eq!(djb2(b""), DJB2_SEED);
    }

    /// Invariant: Known values match the reference recurrence.
    #[test]
    fn known_values() {
        // 5381 * 33 + 'a'
        assert_eq!(djb2(b"a"), 177_670);
        // (5381 * 33 + 'a') * 33 + 'b'
        assert_eq!(djb2(b"ab"), 5_863_208);
        assert_eq!(djb2_str("ab"), djb2(b"ab"));
    }

    /// Invariant: Long inputs wrap instead of overflowing.
    #[test]
    fn long_input_wraps() {
        let key = "z".repeat(1024);
        let expected = key
            .bytes()
            .fold(5381u64, |h, b| (h * 33 + u64::from(b)) & 0xffff_ffff);
        assert_eq!(u64::from(djb2_str(&key)), expected);
    }

    /// Invariant: Hashing is deterministic across calls.
    #[test]
    fn deterministic() {
        for k in ["root", "humn", "dbpl", "pppw"] {
            assert_eq!(djb2_str(k), djb2_str(k));
        }
    }
}
