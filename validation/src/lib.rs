//! Submission validator.
//!
//! An artifact arriving for submission was produced by a disconnected,
//! unaudited environment; offline does not imply honest or bug-free. Before
//! anything touches the network, the validator re-checks the artifact from
//! scratch: structural well-formedness, then the cryptographic commitment
//! balance and kernel signatures, then chain-height policy. Checks
//! short-circuit: the first violation is returned and nothing later runs.

pub mod chain;
pub mod error;
pub mod validator;

pub use chain::{ChainView, ChainViewError, FixedChainView, NullChainView};
pub use error::ValidationError;
pub use validator::Validator;
