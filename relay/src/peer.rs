//! Peer abstraction for transaction hand-off.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::error::PeerError;

/// How a peer answered a transaction hand-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerResponse {
    /// The peer accepted the transaction for relay.
    Accepted,
    /// The peer already has this kernel. The transaction is propagating;
    /// dispatch counts this as success rather than asking the operator to
    /// retry a broadcast the network has already seen.
    AlreadyKnown,
    /// The peer refused the transaction.
    Rejected(String),
}

/// A connected peer able to receive a serialized transaction.
#[async_trait]
pub trait TxPeer: Send + Sync {
    /// Stable identifier for logging (`ip:port` for real connections).
    fn id(&self) -> &str;

    /// Hand a serialized transaction to this peer and await its answer.
    async fn send_transaction(&self, tx_bytes: &[u8]) -> Result<PeerResponse, PeerError>;
}

/// One queued transaction hand-off, drained by the connection layer.
pub struct PeerRequest {
    pub peer_id: String,
    pub tx_bytes: Vec<u8>,
    pub reply: oneshot::Sender<PeerResponse>,
}

/// Channel-backed peer.
///
/// Does not write to a TCP stream itself: it queues a [`PeerRequest`] onto
/// an outbound mpsc channel and awaits the oneshot reply the connection
/// layer sends back once the peer answered.
#[derive(Clone)]
pub struct ChannelPeer {
    id: String,
    outbound_tx: mpsc::Sender<PeerRequest>,
}

impl ChannelPeer {
    pub fn new(id: impl Into<String>, outbound_tx: mpsc::Sender<PeerRequest>) -> Self {
        Self {
            id: id.into(),
            outbound_tx,
        }
    }
}

#[async_trait]
impl TxPeer for ChannelPeer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send_transaction(&self, tx_bytes: &[u8]) -> Result<PeerResponse, PeerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.outbound_tx
            .send(PeerRequest {
                peer_id: self.id.clone(),
                tx_bytes: tx_bytes.to_vec(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| PeerError::Unreachable("outbound channel closed".into()))?;
        reply_rx
            .await
            .map_err(|_| PeerError::Unreachable("connection dropped before replying".into()))
    }
}

/// A peer reached over the node's relay-ingress TCP socket.
///
/// Hand-off framing: a little-endian `u32` length then the transaction
/// bytes; the node answers with one status byte (0 accepted, 1 already
/// known, 2 rejected) and, for rejections, a length-prefixed reason string.
/// One connection per hand-off; the submission path is far too cold to be
/// worth pooling.
pub struct TcpPeer {
    addr: String,
}

impl TcpPeer {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

/// Status byte values in the relay-ingress reply.
const STATUS_ACCEPTED: u8 = 0;
const STATUS_ALREADY_KNOWN: u8 = 1;
const STATUS_REJECTED: u8 = 2;

/// Cap on the rejection-reason string. The length field comes from an
/// untrusted peer; anything past this is truncated rather than allocated.
const MAX_REJECT_REASON_LEN: usize = 1024;

#[async_trait]
impl TxPeer for TcpPeer {
    fn id(&self) -> &str {
        &self.addr
    }

    async fn send_transaction(&self, tx_bytes: &[u8]) -> Result<PeerResponse, PeerError> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let unreachable = |e: std::io::Error| PeerError::Unreachable(e.to_string());

        let mut stream = tokio::net::TcpStream::connect(&self.addr)
            .await
            .map_err(unreachable)?;
        stream
            .write_all(&(tx_bytes.len() as u32).to_le_bytes())
            .await
            .map_err(unreachable)?;
        stream.write_all(tx_bytes).await.map_err(unreachable)?;

        let mut status = [0u8; 1];
        stream.read_exact(&mut status).await.map_err(unreachable)?;
        match status[0] {
            STATUS_ACCEPTED => Ok(PeerResponse::Accepted),
            STATUS_ALREADY_KNOWN => Ok(PeerResponse::AlreadyKnown),
            STATUS_REJECTED => {
                let mut len = [0u8; 4];
                stream.read_exact(&mut len).await.map_err(unreachable)?;
                let declared = u32::from_le_bytes(len) as usize;
                let mut reason = vec![0u8; declared.min(MAX_REJECT_REASON_LEN)];
                stream.read_exact(&mut reason).await.map_err(unreachable)?;
                Ok(PeerResponse::Rejected(
                    String::from_utf8_lossy(&reason).into_owned(),
                ))
            }
            other => Err(PeerError::Unreachable(format!(
                "unknown relay status byte {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_peer_roundtrip() {
        let (tx, mut rx) = mpsc::channel(8);
        let peer = ChannelPeer::new("10.0.0.1:13414", tx);

        let server = tokio::spawn(async move {
            let req: PeerRequest = rx.recv().await.unwrap();
            assert_eq!(req.peer_id, "10.0.0.1:13414");
            assert_eq!(req.tx_bytes, b"tx-bytes");
            req.reply.send(PeerResponse::Accepted).unwrap();
        });

        let response = peer.send_transaction(b"tx-bytes").await.unwrap();
        assert_eq!(response, PeerResponse::Accepted);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn tcp_peer_roundtrip() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut len = [0u8; 4];
            stream.read_exact(&mut len).await.unwrap();
            let mut payload = vec![0u8; u32::from_le_bytes(len) as usize];
            stream.read_exact(&mut payload).await.unwrap();
            assert_eq!(payload, b"tx-bytes");
            stream.write_all(&[STATUS_ACCEPTED]).await.unwrap();
        });

        let peer = TcpPeer::new(addr.to_string());
        assert_eq!(
            peer.send_transaction(b"tx-bytes").await.unwrap(),
            PeerResponse::Accepted
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn tcp_peer_rejection_reason() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut len = [0u8; 4];
            stream.read_exact(&mut len).await.unwrap();
            let mut payload = vec![0u8; u32::from_le_bytes(len) as usize];
            stream.read_exact(&mut payload).await.unwrap();
            stream.write_all(&[STATUS_REJECTED]).await.unwrap();
            let reason = b"kernel invalid";
            stream
                .write_all(&(reason.len() as u32).to_le_bytes())
                .await
                .unwrap();
            stream.write_all(reason).await.unwrap();
        });

        let peer = TcpPeer::new(addr.to_string());
        assert_eq!(
            peer.send_transaction(b"tx").await.unwrap(),
            PeerResponse::Rejected("kernel invalid".into())
        );
    }

    #[tokio::test]
    async fn tcp_peer_truncates_oversized_rejection_reason() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut len = [0u8; 4];
            stream.read_exact(&mut len).await.unwrap();
            let mut payload = vec![0u8; u32::from_le_bytes(len) as usize];
            stream.read_exact(&mut payload).await.unwrap();
            stream.write_all(&[STATUS_REJECTED]).await.unwrap();
            // Declare far more reason bytes than the client should take.
            let reason = vec![b'x'; MAX_REJECT_REASON_LEN * 4];
            stream
                .write_all(&(reason.len() as u32).to_le_bytes())
                .await
                .unwrap();
            stream.write_all(&reason).await.unwrap();
        });

        let peer = TcpPeer::new(addr.to_string());
        match peer.send_transaction(b"tx").await.unwrap() {
            PeerResponse::Rejected(reason) => {
                assert_eq!(reason.len(), MAX_REJECT_REASON_LEN);
                assert!(reason.bytes().all(|b| b == b'x'));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tcp_peer_connection_refused_is_unreachable() {
        // Port 1 on localhost is essentially never listening.
        let peer = TcpPeer::new("127.0.0.1:1");
        assert!(matches!(
            peer.send_transaction(b"tx").await,
            Err(PeerError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn closed_channel_is_unreachable() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let peer = ChannelPeer::new("10.0.0.1:13414", tx);
        assert!(matches!(
            peer.send_transaction(b"tx").await,
            Err(PeerError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn dropped_reply_is_unreachable() {
        let (tx, mut rx) = mpsc::channel(8);
        let peer = ChannelPeer::new("10.0.0.1:13414", tx);

        tokio::spawn(async move {
            let req: PeerRequest = rx.recv().await.unwrap();
            drop(req.reply);
        });

        assert!(matches!(
            peer.send_transaction(b"tx").await,
            Err(PeerError::Unreachable(_))
        ));
    }
}
