//! Signed transaction body: inputs, outputs and kernels.

use serde::{Deserialize, Serialize};
use wisp_types::{Commitment, KernelSignature};

/// A transaction input: a reference to a prior output commitment being spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub commit: Commitment,
}

/// A transaction output: a new Pedersen commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub commit: Commitment,
}

/// Kernel feature variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelFeatures {
    /// No extra constraints.
    Plain,
    /// The kernel is not valid in any block below `lock_height`.
    HeightLocked { lock_height: u64 },
}

impl KernelFeatures {
    fn feature_byte(&self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::HeightLocked { .. } => 1,
        }
    }

    /// The lock height this feature imposes (0 for plain kernels).
    pub fn lock_height(&self) -> u64 {
        match self {
            Self::Plain => 0,
            Self::HeightLocked { lock_height } => *lock_height,
        }
    }
}

/// A transaction kernel: the excess commitment, its signature, and the
/// fee / lock-height metadata the signature commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxKernel {
    pub features: KernelFeatures,
    /// Fee in base units, payable to the miner including this kernel.
    pub fee: u64,
    /// `Σ output blindings - Σ input blindings`, as a public point.
    pub excess: Commitment,
    /// Schnorr signature over [`TxKernel::msg_to_sign`], keyed by `excess`.
    pub signature: KernelSignature,
}

impl TxKernel {
    /// The 32-byte message the kernel signature commits to: feature byte,
    /// fee and lock height. Changing any of these invalidates the signature.
    pub fn msg_to_sign(&self) -> [u8; 32] {
        let mut buf = [0u8; 17];
        buf[0] = self.features.feature_byte();
        buf[1..9].copy_from_slice(&self.fee.to_le_bytes());
        buf[9..17].copy_from_slice(&self.features.lock_height().to_le_bytes());
        wisp_crypto::blake2b_256(&buf)
    }
}

/// A complete transaction body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub kernels: Vec<TxKernel>,
}

impl Transaction {
    /// Total fee across all kernels.
    pub fn total_fee(&self) -> u64 {
        self.kernels.iter().map(|k| k.fee).sum()
    }

    /// The highest lock height across all kernels (0 when none are locked).
    pub fn max_lock_height(&self) -> u64 {
        self.kernels
            .iter()
            .map(|k| k.features.lock_height())
            .max()
            .unwrap_or(0)
    }

    pub fn input_commitments(&self) -> Vec<Commitment> {
        self.inputs.iter().map(|i| i.commit).collect()
    }

    pub fn output_commitments(&self) -> Vec<Commitment> {
        self.outputs.iter().map(|o| o.commit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel(features: KernelFeatures, fee: u64) -> TxKernel {
        TxKernel {
            features,
            fee,
            excess: Commitment::ZERO,
            signature: KernelSignature([0u8; 64]),
        }
    }

    #[test]
    fn sig_msg_commits_to_fee() {
        let a = kernel(KernelFeatures::Plain, 10);
        let b = kernel(KernelFeatures::Plain, 11);
        assert_ne!(a.msg_to_sign(), b.msg_to_sign());
    }

    #[test]
    fn sig_msg_commits_to_lock_height() {
        let a = kernel(KernelFeatures::HeightLocked { lock_height: 100 }, 10);
        let b = kernel(KernelFeatures::HeightLocked { lock_height: 101 }, 10);
        assert_ne!(a.msg_to_sign(), b.msg_to_sign());
    }

    #[test]
    fn sig_msg_commits_to_feature_kind() {
        // A plain kernel and a height-locked kernel with lock 0 share fee and
        // lock height but differ in the feature byte.
        let a = kernel(KernelFeatures::Plain, 10);
        let b = kernel(KernelFeatures::HeightLocked { lock_height: 0 }, 10);
        assert_ne!(a.msg_to_sign(), b.msg_to_sign());
    }

    #[test]
    fn total_fee_sums_kernels() {
        let tx = Transaction {
            inputs: vec![],
            outputs: vec![],
            kernels: vec![kernel(KernelFeatures::Plain, 10), kernel(KernelFeatures::Plain, 5)],
        };
        assert_eq!(tx.total_fee(), 15);
    }

    #[test]
    fn max_lock_height_over_kernels() {
        let tx = Transaction {
            inputs: vec![],
            outputs: vec![],
            kernels: vec![
                kernel(KernelFeatures::Plain, 1),
                kernel(KernelFeatures::HeightLocked { lock_height: 7 }, 1),
            ],
        };
        assert_eq!(tx.max_lock_height(), 7);
    }
}
