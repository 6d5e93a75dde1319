//! DSME CLI - diamond search motion estimation
//!
//! Estimates block motion between two grayscale frames, writes residuals and
//! runs the palette quantizer.

use clap::{Parser, Subcommand};
use dsme_lib::codec::me::{predict, FrameMotion, MotionConfig, MotionEstimator};
use dsme_lib::codec::Frame;
use dsme_lib::util::{
    load_luma, load_rgb, residual_to_luma, save_luma, KMeansConfig, QualityMetrics, ResidualStats,
};
use dsme_lib::{init, Config};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "dsme")]
#[command(about = "DSME - diamond search motion estimation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the motion field between two frames
    Estimate {
        /// Current frame
        #[arg(short, long)]
        current: PathBuf,

        /// Reference frame
        #[arg(short, long)]
        reference: PathBuf,

        /// Block size in pixels
        #[arg(short, long, default_value_t = dsme_lib::codec::me::DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Maximum coarse search rounds per block
        #[arg(long, default_value_t = dsme_lib::codec::me::DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Write the residual frame as an image (biased by 128)
    Residual {
        /// Current frame
        #[arg(short, long)]
        current: PathBuf,

        /// Reference frame
        #[arg(short, long)]
        reference: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// Block size in pixels
        #[arg(short, long, default_value_t = dsme_lib::codec::me::DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },

    /// Reduce an RGB image to a k-color palette
    Quantize {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output image
        #[arg(short, long)]
        output: PathBuf,

        /// Number of palette colors
        #[arg(short = 'k', long, default_value_t = 8)]
        colors: usize,

        /// RNG seed for k-means++ initialisation
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Maximum k-means rounds
        #[arg(long, default_value_t = dsme_lib::util::palette::DEFAULT_MAX_ITERS)]
        max_iters: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config {
        verbose: cli.verbose,
        debug: cli.debug,
    };

    init(config)?;

    info!("DSME v{}", dsme_lib::VERSION);

    match cli.command {
        Commands::Estimate {
            current,
            reference,
            block_size,
            max_iterations,
            json,
        } => {
            info!("Estimating {} against {}", current.display(), reference.display());
            let config = MotionConfig::default()
                .with_block_size(block_size)
                .with_max_iterations(max_iterations);
            cmd_estimate(&current, &reference, config, json)?;
        }
        Commands::Residual {
            current,
            reference,
            output,
            block_size,
        } => {
            info!("Writing residual to {}", output.display());
            cmd_residual(&current, &reference, &output, block_size)?;
        }
        Commands::Quantize {
            input,
            output,
            colors,
            seed,
            max_iters,
        } => {
            info!("Quantizing {} to {} colors", input.display(), colors);
            let config = KMeansConfig::new(colors).with_max_iters(max_iters);
            cmd_quantize(&input, &output, &config, seed)?;
        }
    }

    Ok(())
}

fn run_estimation(
    current: &Path,
    reference: &Path,
    config: MotionConfig,
) -> anyhow::Result<(Frame, Frame, FrameMotion)> {
    let cur = load_luma(current)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", current.display(), e))?;
    let refr = load_luma(reference)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", reference.display(), e))?;

    let motion = MotionEstimator::new(config).estimate(&cur, &refr)?;
    Ok((cur, refr, motion))
}

fn cmd_estimate(
    current: &Path,
    reference: &Path,
    config: MotionConfig,
    json: bool,
) -> anyhow::Result<()> {
    let (cur, refr, motion) = run_estimation(current, reference, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&motion.field)?);
        return Ok(());
    }

    println!("Frame:        {}x{}", cur.width(), cur.height());
    println!(
        "Blocks:       {} ({}x{} grid, {}px)",
        motion.field.len(),
        motion.field.cols,
        motion.field.rows,
        motion.field.block_size
    );
    for block in &motion.field {
        println!("  {} -> {} sad {}", block.origin, block.mv, block.sad);
    }

    let prediction = predict(&refr, &motion.field)?;
    let quality = QualityMetrics::analyze(&cur, &prediction)?;
    let stats = ResidualStats::analyze(&motion.residual);

    println!("Zero vectors: {}", motion.field.zero_vector_count());
    println!("Total SAD:    {}", motion.field.total_sad());
    println!(
        "Residual:     mean |r| {:.3}, max |r| {}, non-zero {}",
        stats.mean_abs, stats.max_abs, stats.nonzero
    );
    println!("Prediction:   {}", quality.summary());

    Ok(())
}

fn cmd_residual(
    current: &Path,
    reference: &Path,
    output: &Path,
    block_size: usize,
) -> anyhow::Result<()> {
    let config = MotionConfig::default().with_block_size(block_size);
    let (_, _, motion) = run_estimation(current, reference, config)?;

    save_luma(&residual_to_luma(&motion.residual), output)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;

    println!("Residual written to {}", output.display());
    Ok(())
}

fn cmd_quantize(
    input: &Path,
    output: &Path,
    config: &KMeansConfig,
    seed: u64,
) -> anyhow::Result<()> {
    let image = load_rgb(input)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", input.display(), e))?;

    let (quantized, palette) = dsme_lib::util::quantize_rgb(&image, config, seed)?;
    quantized
        .save(output)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;

    println!("Palette ({} colors):", palette.len());
    for [r, g, b] in &palette {
        println!("  #{:02x}{:02x}{:02x}", r, g, b);
    }

    Ok(())
}
