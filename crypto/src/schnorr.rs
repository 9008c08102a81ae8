//! Schnorr signatures keyed by the kernel excess.
//!
//! The kernel excess `E = k*G` doubles as the public key; whoever can sign
//! for it proved knowledge of the combined blinding factors, which is what
//! makes a MimbleWimble-style kernel binding. Nonces are derived
//! deterministically from the secret and the message, so signing needs no
//! RNG and never reuses a nonce across messages.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::scalar::Scalar;
use wisp_types::{Commitment, KernelSignature};

use crate::hash::blake2b_512;
use crate::pedersen::{decompress, BlindingFactor};

/// Domain tags for nonce and challenge derivation.
const NONCE_TAG: &[u8] = b"wisp.schnorr.nonce.v1";
const CHALLENGE_TAG: &[u8] = b"wisp.schnorr.challenge.v1";

/// The public excess `E = k*G` for a kernel secret.
pub fn public_excess(secret: &BlindingFactor) -> Commitment {
    let point = secret.scalar() * RISTRETTO_BASEPOINT_POINT;
    Commitment::new(point.compress().to_bytes())
}

fn challenge(r_bytes: &[u8; 32], excess: &Commitment, msg: &[u8; 32]) -> Scalar {
    let wide = blake2b_512(&[CHALLENGE_TAG, r_bytes, excess.as_bytes(), msg]);
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Sign a 32-byte kernel message with the excess secret.
///
/// Output layout: `R || s` (compressed nonce point, then scalar), 64 bytes.
pub fn sign_kernel(secret: &BlindingFactor, msg: &[u8; 32]) -> KernelSignature {
    let nonce_wide = blake2b_512(&[NONCE_TAG, secret.scalar().as_bytes(), msg]);
    let nonce = Scalar::from_bytes_mod_order_wide(&nonce_wide);

    let r_point = nonce * RISTRETTO_BASEPOINT_POINT;
    let r_bytes = r_point.compress().to_bytes();

    let excess = public_excess(secret);
    let e = challenge(&r_bytes, &excess, msg);
    let s = nonce + e * secret.scalar();

    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&r_bytes);
    out[32..].copy_from_slice(s.as_bytes());
    KernelSignature(out)
}

/// Verify a kernel signature against its excess commitment.
///
/// Returns `true` iff `s*G == R + e*E` with a canonical `s` and valid point
/// encodings. Any malformed component fails verification rather than
/// erroring; the caller only cares whether the kernel is bound.
pub fn verify_kernel(excess: &Commitment, msg: &[u8; 32], sig: &KernelSignature) -> bool {
    let bytes = sig.as_bytes();
    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&bytes[..32]);
    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&bytes[32..]);

    let Some(r_point) = CompressedRistretto(r_bytes).decompress() else {
        return false;
    };
    let Some(s) = Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) else {
        return false;
    };
    let Some(e_point) = decompress(excess) else {
        return false;
    };

    let e = challenge(&r_bytes, excess, msg);
    s * RISTRETTO_BASEPOINT_POINT == r_point + e * e_point
}
