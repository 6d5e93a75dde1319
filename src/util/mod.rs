//! Common utilities
//!
//! - `quality`: MSE/PSNR and residual statistics
//! - `image_io`: frame loading and saving via the `image` crate
//! - `palette`: k-means++ color quantization, unrelated to motion estimation

pub mod image_io;
pub mod palette;
pub mod quality;

pub use image_io::{load_luma, load_rgb, residual_to_luma, save_luma};
pub use palette::{kmeans, kmeans_plus_plus_init, quantize_rgb, KMeansConfig, KMeansResult};
pub use quality::{calculate_mse, calculate_psnr, QualityMetrics, ResidualStats};
