//! Error handling for tally.
//! One error enum per subsystem, `thiserror` only, aggregated by [`TallyError`].

pub mod config_error;
pub mod input_error;
pub mod storage_error;
pub mod tally_error;

pub use config_error::ConfigError;
pub use input_error::InputError;
pub use storage_error::StorageError;
pub use tally_error::{TallyError, TallyResult};
