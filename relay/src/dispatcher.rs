//! Mode-aware dispatch of a validated transaction to the peer set.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::task::JoinSet;
use wisp_types::ArtifactId;

use crate::error::RelayError;
use crate::peer::{PeerResponse, TxPeer};

/// Default bound on a single peer hand-off.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(30);

/// How a submission attempt reaches the network.
///
/// Derived per invocation from the `--fluff` flag, never persisted, and
/// mutually exclusive per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayMode {
    /// Hand off to one random peer for stem-phase relay (default).
    Stem,
    /// Broadcast to every connected peer immediately.
    Fluff,
}

pub struct Dispatcher {
    peers: Vec<Arc<dyn TxPeer>>,
    peer_timeout: Duration,
}

impl Dispatcher {
    pub fn new(peers: Vec<Arc<dyn TxPeer>>, peer_timeout: Duration) -> Self {
        Self {
            peers,
            peer_timeout,
        }
    }

    pub fn with_default_timeout(peers: Vec<Arc<dyn TxPeer>>) -> Self {
        Self::new(peers, DEFAULT_PEER_TIMEOUT)
    }

    /// Dispatch serialized transaction bytes in the given mode.
    ///
    /// Success means at least one peer explicitly acknowledged the
    /// transaction (or already knew its kernel); only that acknowledgment
    /// may later be recorded as an accepted submission.
    pub async fn dispatch(
        &self,
        id: ArtifactId,
        tx_bytes: &[u8],
        mode: RelayMode,
    ) -> Result<(), RelayError> {
        if self.peers.is_empty() {
            return Err(RelayError::NoPeersAvailable);
        }
        match mode {
            RelayMode::Stem => self.dispatch_stem(id, tx_bytes).await,
            RelayMode::Fluff => self.dispatch_fluff(id, tx_bytes).await,
        }
    }

    /// Forward to exactly one randomly chosen peer. The stem-vs-fluff coin
    /// flips downstream are the relay protocol's business, not ours.
    async fn dispatch_stem(&self, id: ArtifactId, tx_bytes: &[u8]) -> Result<(), RelayError> {
        let Some(peer) = self.peers.choose(&mut rand::thread_rng()) else {
            return Err(RelayError::NoPeersAvailable);
        };

        tracing::debug!(artifact = %id, peer = peer.id(), "stem hand-off");
        let outcome = tokio::time::timeout(self.peer_timeout, peer.send_transaction(tx_bytes))
            .await
            .map_err(|_| RelayError::Timeout)?;

        match outcome {
            Ok(PeerResponse::Accepted) | Ok(PeerResponse::AlreadyKnown) => {
                tracing::info!(artifact = %id, peer = peer.id(), "stem hand-off acknowledged");
                Ok(())
            }
            Ok(PeerResponse::Rejected(reason)) => Err(RelayError::PeerRejected(reason)),
            Err(e) => Err(RelayError::PeerRejected(e.to_string())),
        }
    }

    /// Broadcast to every peer concurrently. Succeeds when at least one peer
    /// acknowledges; individual timeouts only shrink the success count.
    async fn dispatch_fluff(&self, id: ArtifactId, tx_bytes: &[u8]) -> Result<(), RelayError> {
        let mut tasks = JoinSet::new();
        for peer in &self.peers {
            let peer = Arc::clone(peer);
            let bytes = tx_bytes.to_vec();
            let timeout = self.peer_timeout;
            tasks.spawn(async move {
                let result =
                    tokio::time::timeout(timeout, peer.send_transaction(&bytes)).await;
                (peer.id().to_string(), result)
            });
        }

        let mut acknowledged = 0usize;
        let mut timed_out = 0usize;
        let mut last_rejection: Option<String> = None;
        while let Some(joined) = tasks.join_next().await {
            let Ok((peer_id, result)) = joined else {
                continue; // task panicked; treat as a failed peer
            };
            match result {
                Ok(Ok(PeerResponse::Accepted)) | Ok(Ok(PeerResponse::AlreadyKnown)) => {
                    acknowledged += 1;
                }
                Ok(Ok(PeerResponse::Rejected(reason))) => {
                    tracing::debug!(artifact = %id, peer = %peer_id, %reason, "fluff rejection");
                    last_rejection = Some(reason);
                }
                Ok(Err(e)) => {
                    tracing::debug!(artifact = %id, peer = %peer_id, error = %e, "fluff send failed");
                    last_rejection = Some(e.to_string());
                }
                Err(_) => {
                    tracing::debug!(artifact = %id, peer = %peer_id, "fluff send timed out");
                    timed_out += 1;
                }
            }
        }

        if acknowledged > 0 {
            tracing::info!(artifact = %id, acknowledged, "fluff broadcast acknowledged");
            return Ok(());
        }
        if let Some(reason) = last_rejection {
            return Err(RelayError::PeerRejected(reason));
        }
        if timed_out > 0 {
            return Err(RelayError::Timeout);
        }
        Err(RelayError::NoPeersAvailable)
    }
}
