//! Password digest.
//!
//! One-way, deterministic, compared for equality only. This is not a
//! password KDF: there is no salt and no work factor. The stored value is
//! the lowercase hex encoding of a BLAKE3 hash, 64 characters.

/// Digest a plaintext password for storage or comparison.
pub fn digest(plaintext: &str) -> String {
    hex::encode(blake3::hash(plaintext.as_bytes()).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(digest("123"), digest("123"));
    }

    #[test]
    fn fixed_length_hex() {
        let d = digest("secret");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(d, d.to_lowercase());
    }

    #[test]
    fn distinct_inputs_distinct_digests() {
        assert_ne!(digest("123"), digest("124"));
    }
}
