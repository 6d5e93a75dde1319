//! Error types for DSME

use thiserror::Error;

/// Result type alias for DSME operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for DSME
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Current and reference frames differ in size
    #[error(
        "Frame dimension mismatch: current is {current_w}x{current_h}, reference is {reference_w}x{reference_h}"
    )]
    DimensionMismatch {
        current_w: usize,
        current_h: usize,
        reference_w: usize,
        reference_h: usize,
    },

    /// Block size is zero or larger than the frame
    #[error("Invalid block size {block_size} for {width}x{height} frame")]
    InvalidBlockSize {
        block_size: usize,
        width: usize,
        height: usize,
    },

    /// Block at the requested origin does not fit inside the frame
    #[error("Block {block_size}x{block_size} at ({x}, {y}) is outside {width}x{height} frame")]
    OutOfBounds {
        x: usize,
        y: usize,
        block_size: usize,
        width: usize,
        height: usize,
    },

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
