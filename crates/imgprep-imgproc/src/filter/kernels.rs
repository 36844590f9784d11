/// Sigma values at or below this are treated as zero.
pub const SIGMA_EPSILON: f32 = 1e-8;

/// An odd-length, symmetric 1D filter kernel.
///
/// Gaussian kernels sum to one. The single tap kernel `[1.0]` is the identity
/// filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1d {
    weights: Vec<f32>,
}

impl Kernel1d {
    /// The identity kernel `[1.0]`.
    pub fn identity() -> Self {
        Self {
            weights: vec![1.0],
        }
    }

    /// Distance from the center tap to either end.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the kernel has no taps. Never true for kernels built by this module.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether this is the single tap identity kernel.
    pub fn is_identity(&self) -> bool {
        self.weights == [1.0]
    }

    /// The kernel weights.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

/// Create a normalized gaussian kernel from its standard deviation.
///
/// The kernel has `2 * ceil(3 * sigma) + 1` taps sampled at integer offsets
/// from the center, and its weights sum to one.
///
/// # Arguments
///
/// * `sigma` - The standard deviation of the gaussian.
///
/// # Returns
///
/// The identity kernel when `sigma` is zero, negative or below
/// [`SIGMA_EPSILON`], or when every sample underflows to zero. A gaussian
/// kernel otherwise.
pub fn gaussian_kernel_1d(sigma: f32) -> Kernel1d {
    if sigma <= 0.0 || sigma.abs() <= SIGMA_EPSILON {
        return Kernel1d::identity();
    }

    let radius = (3.0 * sigma).ceil() as usize;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    let mut weights = (0..2 * radius + 1)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = weights.iter().sum::<f32>();
    if norm == 0.0 {
        log::warn!("gaussian kernel with sigma {sigma} underflowed, using identity");
        return Kernel1d::identity();
    }
    weights.iter_mut().for_each(|w| *w /= norm);

    log::debug!(
        "gaussian kernel: sigma {sigma}, radius {radius}, {} taps",
        weights.len()
    );

    Kernel1d { weights }
}
