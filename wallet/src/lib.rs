//! Submit command handler: the orchestration layer tying codec, validator,
//! store and relay dispatcher together for one artifact file and one relay
//! mode.
//!
//! The handler is idempotent under operator retries: resubmitting a file
//! whose transaction was already accepted is a successful no-op, and a
//! failed or abandoned attempt is retried by running the same command again
//! with the same unmodified file.

pub mod error;
pub mod logging;
pub mod submit;

pub use error::SubmitError;
pub use logging::init_logging;
pub use submit::{SubmitOutcome, Submitter};
