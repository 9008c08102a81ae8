//! Structural, cryptographic and policy checks for submission candidates.

use std::collections::HashSet;
use std::sync::Arc;

use wisp_artifact::{KernelFeatures, TransactionArtifact};
use wisp_types::{Commitment, NetworkId};

use crate::chain::ChainView;
use crate::error::ValidationError;

/// Validates loaded artifacts against the configured network and an
/// injected chain-state oracle.
pub struct Validator {
    network: NetworkId,
    chain: Arc<dyn ChainView>,
}

impl Validator {
    pub fn new(network: NetworkId, chain: Arc<dyn ChainView>) -> Self {
        Self { network, chain }
    }

    /// Run all checks in order, returning the first violation.
    ///
    /// Order: structural, then cryptographic, then height policy. The checks
    /// short-circuit; in particular a cryptographic failure is never masked
    /// by a cheaper check running afterwards.
    pub fn validate(&self, artifact: &TransactionArtifact) -> Result<(), ValidationError> {
        self.check_structure(artifact)?;
        self.check_crypto(artifact)?;
        self.check_height_policy(artifact)?;
        tracing::debug!(id = %artifact.id, "artifact passed validation");
        Ok(())
    }

    fn check_structure(&self, artifact: &TransactionArtifact) -> Result<(), ValidationError> {
        if artifact.network != self.network {
            return Err(ValidationError::BadStructure(format!(
                "artifact was finalized for network {}, this node is on {}",
                artifact.network, self.network
            )));
        }

        let tx = &artifact.tx;
        if tx.inputs.is_empty() {
            return Err(ValidationError::BadStructure("transaction has no inputs".into()));
        }
        if tx.outputs.is_empty() {
            return Err(ValidationError::BadStructure("transaction has no outputs".into()));
        }
        if tx.kernels.is_empty() {
            return Err(ValidationError::BadStructure("transaction has no kernels".into()));
        }

        let mut seen: HashSet<Commitment> = HashSet::new();
        for (i, input) in tx.inputs.iter().enumerate() {
            if !seen.insert(input.commit) {
                return Err(ValidationError::BadStructure(format!(
                    "duplicate input commitment at index {i}"
                )));
            }
            if wisp_crypto::decompress(&input.commit).is_none() {
                return Err(ValidationError::BadStructure(format!(
                    "input {i} is not a valid commitment encoding"
                )));
            }
        }

        seen.clear();
        for (i, output) in tx.outputs.iter().enumerate() {
            if !seen.insert(output.commit) {
                return Err(ValidationError::BadStructure(format!(
                    "duplicate output commitment at index {i}"
                )));
            }
            if wisp_crypto::decompress(&output.commit).is_none() {
                return Err(ValidationError::BadStructure(format!(
                    "output {i} is not a valid commitment encoding"
                )));
            }
        }

        for (i, kernel) in tx.kernels.iter().enumerate() {
            if wisp_crypto::decompress(&kernel.excess).is_none() {
                return Err(ValidationError::BadStructure(format!(
                    "kernel {i} excess is not a valid commitment encoding"
                )));
            }
        }

        Ok(())
    }

    fn check_crypto(&self, artifact: &TransactionArtifact) -> Result<(), ValidationError> {
        let tx = &artifact.tx;

        // Aggregate balance: sum(outputs) + fee*H - sum(inputs) must equal
        // the sum of the kernel excess commitments. The structural pass has
        // already decompressed every commitment, so None is unreachable here.
        let computed = wisp_crypto::commit_sum(
            &tx.output_commitments(),
            &tx.input_commitments(),
            tx.total_fee(),
        )
        .ok_or_else(|| ValidationError::BadStructure("commitment decompression failed".into()))?;
        let declared = wisp_crypto::sum_commitments(
            &tx.kernels.iter().map(|k| k.excess).collect::<Vec<_>>(),
        )
        .ok_or_else(|| ValidationError::BadStructure("commitment decompression failed".into()))?;

        if computed != declared {
            return Err(ValidationError::BalanceMismatch);
        }

        for (index, kernel) in tx.kernels.iter().enumerate() {
            let msg = kernel.msg_to_sign();
            if !wisp_crypto::verify_kernel(&kernel.excess, &msg, &kernel.signature) {
                return Err(ValidationError::BadSignature { index });
            }
        }

        Ok(())
    }

    fn check_height_policy(&self, artifact: &TransactionArtifact) -> Result<(), ValidationError> {
        let lock_height = artifact.tx.max_lock_height();
        let has_lock = artifact
            .tx
            .kernels
            .iter()
            .any(|k| matches!(k.features, KernelFeatures::HeightLocked { .. }));
        if !has_lock {
            // Plain kernels never consult the oracle.
            return Ok(());
        }

        let tip = self
            .chain
            .chain_height()
            .map_err(|e| ValidationError::HeightPolicyViolation(e.to_string()))?;

        // Satisfiable means includable in the next block.
        if lock_height > tip + 1 {
            return Err(ValidationError::HeightPolicyViolation(format!(
                "kernel lock height {lock_height} exceeds next block height {}",
                tip + 1
            )));
        }
        Ok(())
    }
}
