//! DSME - Diamond Search Motion Estimation
//!
//! DSME finds, for each fixed-size block of a current frame, the best matching
//! block in a reference frame and derives the residual frame from the
//! resulting motion field.
//!
//! # Architecture
//!
//! - `codec::frame`: single-channel sample planes
//! - `codec::me`: SAD cost, diamond patterns, block search and frame orchestration
//! - `util`: quality metrics, image loading and the standalone palette quantizer
//!
//! # Usage
//!
//! ```rust
//! use dsme_lib::codec::frame::Frame;
//! use dsme_lib::codec::me::{compress_frame, search_block, MotionVector};
//!
//! let mut reference = Frame::new(64, 64);
//! let mut current = Frame::new(64, 64);
//! reference.fill_rect(20, 20, 16, 16, 255);
//! current.fill_rect(22, 20, 16, 16, 255);
//!
//! let mv = search_block(&current, &reference, 22, 20, 16).unwrap();
//! assert_eq!(mv, MotionVector::new(-2, 0));
//!
//! let motion = compress_frame(&current, &reference, 16).unwrap();
//! assert_eq!(motion.field.len(), 16);
//! ```

pub mod codec;
pub mod error;
pub mod util;

pub use error::{Error, Result};

/// DSME version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the DSME library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the DSME library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to install subscriber: {}", e)))?;
    }

    Ok(())
}
