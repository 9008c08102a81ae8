//! Cryptographic primitives for the wisp submission pipeline.
//!
//! Three concerns live here:
//! - Blake2b hashing (kernel messages, file digests).
//! - Pedersen commitments over the Ristretto group: `C = r*G + v*H`.
//! - Schnorr signatures keyed by the kernel excess commitment.
//!
//! The submission validator recomputes the kernel excess from the input and
//! output commitments and verifies the kernel signature against it; both
//! operations are exposed here as pure functions over in-memory data.

pub mod hash;
pub mod pedersen;
pub mod schnorr;

pub use hash::{blake2b_256, blake2b_512};
pub use pedersen::{
    commit, commit_sum, decompress, excess_blinding, sum_commitments, BlindingFactor,
};
pub use schnorr::{public_excess, sign_kernel, verify_kernel};
