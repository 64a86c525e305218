//! Error types for geonear operations.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GeonearError>;

/// Errors returned by geonear operations.
///
/// The core has a deliberately small recoverable-error surface: every
/// operation is a total function over well-formed input, so errors only
/// signal caller bugs caught early (NaN coordinates, zero precision,
/// degenerate rectangles) or malformed geohash strings.
#[derive(Error, Debug)]
pub enum GeonearError {
    /// Input outside the operation's domain (non-finite coordinates,
    /// zero precision, negative radius, degenerate rectangles).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A geohash string that cannot be decoded (empty, or containing a
    /// symbol outside the base-32 alphabet).
    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),
}
