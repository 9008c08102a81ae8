//! Blake2b hashing for kernel messages and group-element derivation.

use blake2::digest::consts::{U32, U64};
use blake2::{Blake2b, Digest};

/// 256-bit Blake2b digest of one byte slice.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let digest = Blake2b::<U32>::new().chain_update(data).finalize();
    digest.into()
}

/// 512-bit Blake2b digest over a sequence of byte slices, hashed in order
/// without concatenating them first.
///
/// The wide output feeds `Scalar::from_bytes_mod_order_wide` and
/// `RistrettoPoint::from_uniform_bytes`, both of which want 64 uniform
/// bytes.
pub fn blake2b_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b::<U64>::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_256_is_deterministic() {
        assert_eq!(blake2b_256(b"hello wisp"), blake2b_256(b"hello wisp"));
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn digest_512_part_boundaries_do_not_matter() {
        assert_eq!(blake2b_512(&[b"ab", b"cd"]), blake2b_512(&[b"abcd"]));
    }

    #[test]
    fn digest_512_empty_input() {
        assert_ne!(blake2b_512(&[]), [0u8; 64]);
    }
}
