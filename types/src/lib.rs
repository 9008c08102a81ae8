//! Fundamental types for the wisp offline-submission pipeline.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: artifact identifiers, commitments, kernel signatures, network
//! identifiers and timestamps.

pub mod commit;
pub mod id;
pub mod network;
pub mod signature;
pub mod time;

pub use commit::Commitment;
pub use id::ArtifactId;
pub use network::NetworkId;
pub use signature::KernelSignature;
pub use time::Timestamp;
