//! Error types for rendering and hit testing.

use thiserror::Error;

/// Fatal conditions for a single render or hit-test call.
///
/// None of these are retried or papered over with defaults; the call fails
/// and the caller decides what to do. A hit test that finds nothing is not an
/// error.
#[derive(Debug, Error)]
pub enum MapError {
    /// The region source produced nothing to compute an extent from.
    #[error("no regions with defined coordinates to compute an extent from")]
    EmptyInput,

    /// The geo extent has zero (or non-finite) width or height.
    #[error("degenerate extent: x span {x_span}, y span {y_span}")]
    DegenerateExtent {
        /// Width of the extent in geo units.
        x_span: f64,
        /// Height of the extent in geo units.
        y_span: f64,
    },

    /// Padding leaves no usable area in the image.
    #[error("viewport has no usable area: {usable_width}x{usable_height} after padding")]
    InvalidViewport {
        /// Image width minus horizontal padding.
        usable_width: i64,
        /// Image height minus vertical padding.
        usable_height: i64,
    },

    /// The region source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors raised by region sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the underlying data failed.
    #[error("failed to read regions: {0}")]
    Io(#[from] std::io::Error),

    /// The data could not be decoded.
    #[error("failed to parse regions: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record carried an unparseable color.
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
}

/// Errors raised while loading render options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the options file failed.
    #[error("failed to read render options: {0}")]
    Io(#[from] std::io::Error),

    /// The options could not be decoded.
    #[error("failed to parse render options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A color string that is not of the form `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(pub String);
