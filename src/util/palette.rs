//! Color palette quantization
//!
//! K-means clustering with k-means++ seeding. Used to reduce an RGB image to
//! a small palette; independent of the motion estimation pipeline.
//!
//! ## Usage
//!
//! ```rust
//! use dsme_lib::util::palette::{kmeans, KMeansConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let points = vec![vec![1.0, 2.0], vec![1.0, 4.0], vec![10.0, 2.0], vec![10.0, 4.0]];
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = kmeans(&points, &KMeansConfig::new(2), &mut rng).unwrap();
//! assert_eq!(result.centroids.len(), 2);
//! ```

use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Default iteration limit for Lloyd's algorithm
pub const DEFAULT_MAX_ITERS: usize = 100;

const ABS_TOLERANCE: f64 = 1e-8;
const REL_TOLERANCE: f64 = 1e-5;

/// K-means parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    /// Maximum assignment/update rounds
    pub max_iters: usize,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        KMeansConfig {
            k,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

/// Clustering result
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Final cluster centers
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index of every input point
    pub labels: Vec<usize>,
    /// Rounds run before convergence or the iteration limit
    pub iterations: usize,
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn validate_points(points: &[Vec<f64>], k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::invalid_input("k must be at least 1"));
    }
    if points.len() < k {
        return Err(Error::invalid_input(format!(
            "Cannot form {} clusters from {} points",
            k,
            points.len()
        )));
    }

    let dims = points[0].len();
    if points.iter().any(|p| p.len() != dims) {
        return Err(Error::invalid_input("All points must have the same dimension"));
    }

    Ok(())
}

/// Pick `k` initial centroids with k-means++
///
/// The first centroid is uniform; each following one is drawn with
/// probability proportional to its squared distance to the nearest centroid
/// chosen so far.
pub fn kmeans_plus_plus_init<R: Rng + ?Sized>(
    points: &[Vec<f64>],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>> {
    validate_points(points, k)?;

    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();

        let index = if total > 0.0 {
            let r = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|&d| {
                    cumulative += d;
                    r < cumulative
                })
                .unwrap_or(points.len() - 1)
        } else {
            // Every point already coincides with a centroid
            rng.gen_range(0..points.len())
        };

        let chosen = points[index].clone();
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(squared_distance(p, &chosen));
        }
        centroids.push(chosen);
    }

    Ok(centroids)
}

/// Index of the nearest centroid; the lowest index wins ties
fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let dist = squared_distance(point, c);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn all_close(a: &[Vec<f64>], b: &[Vec<f64>]) -> bool {
    a.iter().zip(b).all(|(ca, cb)| {
        ca.iter()
            .zip(cb)
            .all(|(x, y)| (x - y).abs() <= ABS_TOLERANCE + REL_TOLERANCE * y.abs())
    })
}

/// Cluster `points` into `config.k` groups
///
/// A cluster that loses all its points keeps its previous centroid.
pub fn kmeans<R: Rng + ?Sized>(
    points: &[Vec<f64>],
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult> {
    if config.max_iters == 0 {
        return Err(Error::invalid_input("max_iters must be at least 1"));
    }

    let mut centroids = kmeans_plus_plus_init(points, config.k, rng)?;
    let dims = points[0].len();
    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;

    while iterations < config.max_iters {
        iterations += 1;

        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest_centroid(p, &centroids);
        }

        let mut sums = vec![vec![0.0; dims]; config.k];
        let mut counts = vec![0usize; config.k];
        for (&label, p) in labels.iter().zip(points) {
            counts[label] += 1;
            for (s, v) in sums[label].iter_mut().zip(p) {
                *s += v;
            }
        }

        let updated: Vec<Vec<f64>> = sums
            .into_iter()
            .zip(&counts)
            .zip(&centroids)
            .map(|((sum, &count), previous)| {
                if count == 0 {
                    previous.clone()
                } else {
                    sum.into_iter().map(|s| s / count as f64).collect()
                }
            })
            .collect();

        if all_close(&centroids, &updated) {
            break;
        }
        centroids = updated;
    }

    debug!("k-means: k={} converged after {} rounds", config.k, iterations);

    Ok(KMeansResult {
        centroids,
        labels,
        iterations,
    })
}

/// Reduce an RGB image to at most `config.k` colors
///
/// Returns the quantized image and its palette. The same seed always
/// produces the same palette.
pub fn quantize_rgb(
    image: &RgbImage,
    config: &KMeansConfig,
    seed: u64,
) -> Result<(RgbImage, Vec<[u8; 3]>)> {
    let points: Vec<Vec<f64>> = image
        .pixels()
        .map(|px| px.0.iter().map(|&c| c as f64).collect())
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let result = kmeans(&points, config, &mut rng)?;

    let palette: Vec<[u8; 3]> = result
        .centroids
        .iter()
        .map(|c| {
            let mut rgb = [0u8; 3];
            for (out, v) in rgb.iter_mut().zip(c) {
                *out = v.round().clamp(0.0, 255.0) as u8;
            }
            rgb
        })
        .collect();

    let mut output = RgbImage::new(image.width(), image.height());
    for (out, &label) in output.pixels_mut().zip(&result.labels) {
        *out = Rgb(palette[label]);
    }

    Ok((output, palette))
}
