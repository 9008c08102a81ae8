//! Kernel signature type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 64-byte Schnorr signature over a kernel message, keyed by the kernel
/// excess commitment.
///
/// Layout: 32 bytes compressed public nonce `R`, then 32 bytes scalar `s`.
/// The fixed size is enforced by the type, so a decoded artifact can never
/// carry a short or oversized kernel signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KernelSignature(pub [u8; 64]);

impl KernelSignature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for KernelSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KernelSignature(..)")
    }
}

impl Serialize for KernelSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for KernelSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SigVisitor;

        impl<'de> serde::de::Visitor<'de> for SigVisitor {
            type Value = KernelSignature;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "64 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let arr: [u8; 64] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(KernelSignature(arr))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; 64];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(KernelSignature(arr))
            }
        }

        deserializer.deserialize_bytes(SigVisitor)
    }
}
