use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the snapzones engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The selector event channel has been closed by the receiver.
    #[error("Selector event channel closed")]
    ChannelClosed,
}
