//! Pedersen commitments over the Ristretto group.
//!
//! A commitment to value `v` with blinding factor `r` is `C = r*G + v*H`,
//! where `G` is the Ristretto basepoint and `H` is a second generator with
//! unknown discrete-log relation to `G` (derived by hashing a fixed domain
//! tag to the group).
//!
//! A transaction balances when `Σ outputs + fee*H - Σ inputs` equals the
//! kernel excess: the `H` components cancel (values in == values out + fee)
//! and what remains is a pure `G` multiple whose secret only the signer of
//! the kernel knows.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use rand::RngCore;
use wisp_types::Commitment;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Domain tag hashed to the group to derive the value generator `H`.
const VALUE_GENERATOR_TAG: &[u8] = b"wisp.pedersen.value-generator.v1";

/// A secret blinding factor.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or
/// `Clone` to prevent accidental exposure. The scalar is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BlindingFactor(Scalar);

impl BlindingFactor {
    /// Generate a random blinding factor from the given RNG.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        let scalar = Scalar::from_bytes_mod_order_wide(&wide);
        wide.zeroize();
        Self(scalar)
    }

    /// Build a blinding factor from 32 raw bytes, reduced mod the group order.
    ///
    /// Intended for deterministic fixtures; production blindings come from
    /// [`BlindingFactor::random`].
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Scalar::from_bytes_mod_order(bytes))
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }
}

/// The value generator `H`.
pub(crate) fn value_generator() -> RistrettoPoint {
    let wide = crate::hash::blake2b_512(&[VALUE_GENERATOR_TAG]);
    RistrettoPoint::from_uniform_bytes(&wide)
}

/// Commit to `value` with blinding factor `blinding`: `C = r*G + v*H`.
pub fn commit(value: u64, blinding: &BlindingFactor) -> Commitment {
    let point = blinding.scalar() * RISTRETTO_BASEPOINT_POINT
        + Scalar::from(value) * value_generator();
    Commitment::new(point.compress().to_bytes())
}

/// Decompress a commitment into a group point.
///
/// Returns `None` when the 32 bytes are not a canonical Ristretto encoding.
/// This is the syntactic-validity check the submission validator runs on
/// every input, output and excess commitment.
pub fn decompress(commitment: &Commitment) -> Option<RistrettoPoint> {
    CompressedRistretto::from_slice(commitment.as_bytes())
        .ok()?
        .decompress()
}

/// Compute `Σ positives + fee*H - Σ negatives` as a compressed commitment.
///
/// For a balanced transaction with `positives` = outputs and `negatives` =
/// inputs this equals the kernel excess. Returns `None` if any commitment
/// fails to decompress.
pub fn commit_sum(
    positives: &[Commitment],
    negatives: &[Commitment],
    fee: u64,
) -> Option<Commitment> {
    let mut sum = Scalar::from(fee) * value_generator();
    for c in positives {
        sum += decompress(c)?;
    }
    for c in negatives {
        sum -= decompress(c)?;
    }
    Some(Commitment::new(sum.compress().to_bytes()))
}

/// Sum a list of commitments as group points.
///
/// Used to aggregate kernel excess commitments when a transaction carries
/// more than one kernel. Returns `None` if any commitment fails to
/// decompress.
pub fn sum_commitments(commitments: &[Commitment]) -> Option<Commitment> {
    let mut sum = RistrettoPoint::identity();
    for c in commitments {
        sum += decompress(c)?;
    }
    Some(Commitment::new(sum.compress().to_bytes()))
}

/// Combine blinding factors into the excess secret:
/// `Σ output blindings - Σ input blindings`.
pub fn excess_blinding(outputs: &[BlindingFactor], inputs: &[BlindingFactor]) -> BlindingFactor {
    let mut sum = Scalar::ZERO;
    for b in outputs {
        sum += b.scalar();
    }
    for b in inputs {
        sum -= b.scalar();
    }
    BlindingFactor(sum)
}
