//! Relay dispatcher: hands a validated transaction to the propagation layer.
//!
//! Two modes, mutually exclusive per submission attempt:
//! - **Stem** (default): forward to exactly one randomly chosen peer, which
//!   probabilistically continues stemming or fluffs per the relay protocol.
//!   The dispatcher's job ends at the hand-off; downstream propagation is
//!   not tracked.
//! - **Fluff**: broadcast to all connected peers at once, trading stem-phase
//!   privacy for propagation speed.
//!
//! Peers are injected as trait objects; the dispatcher never reaches for a
//! global connection pool.

pub mod dispatcher;
pub mod error;
pub mod peer;

pub use dispatcher::{Dispatcher, RelayMode, DEFAULT_PEER_TIMEOUT};
pub use error::{PeerError, RelayError};
pub use peer::{ChannelPeer, PeerRequest, PeerResponse, TcpPeer, TxPeer};
