use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Images with at least this many pixels run in parallel under [`ExecutionStrategy::Auto`].
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how filtering work is executed.
///
/// Every strategy produces bit-identical results; only scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool for rows and channels.
    Parallel,

    /// Parallel for images with at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels,
    /// serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether work over `num_pixels` pixels should run in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply a function to each channel index and collect the results in channel order.
///
/// # Arguments
///
/// * `num_channels` - The number of channels.
/// * `num_pixels` - The number of pixels per channel, used by `Auto`.
/// * `strategy` - The execution strategy.
/// * `f` - The per-channel function. It must only read shared state.
pub fn par_map_channels<R, F>(
    num_channels: usize,
    num_pixels: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Send + Sync,
{
    if num_channels > 1 && strategy.is_parallel(num_pixels * num_channels) {
        (0..num_channels).into_par_iter().map(f).collect()
    } else {
        (0..num_channels).map(f).collect()
    }
}
