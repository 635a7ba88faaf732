use std::result::Result as StdResult;

use thiserror::Error;

use crate::LayoutId;

/// Convenient result type for the store crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised when constructing layouts or mutating the store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Zone geometry is non-finite, out of `[0, 1]`, or has a non-positive size.
    #[error("Invalid zone {number}: {reason}")]
    InvalidZone {
        /// 1-based zone number.
        number: u32,
        /// What was wrong with it.
        reason: String,
    },

    /// A layout with this id already exists.
    #[error("Duplicate layout id: {0}")]
    DuplicateLayout(LayoutId),

    /// No layout with this id exists.
    #[error("Unknown layout id: {0}")]
    UnknownLayout(LayoutId),
}
