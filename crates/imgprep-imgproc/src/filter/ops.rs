use imgprep_image::{ImageError, Plane};

use super::{kernels, separable_filter_with_strategy};
use crate::parallel::ExecutionStrategy;

/// Check that a smoothing sigma is usable.
///
/// # Errors
///
/// Returns [`ImageError::NonFiniteSigma`] for NaN or infinite values and
/// [`ImageError::NegativeSigma`] for negative values.
pub fn validate_sigma(sigma: f32) -> Result<f32, ImageError> {
    if !sigma.is_finite() {
        return Err(ImageError::NonFiniteSigma(sigma));
    }
    if sigma < 0.0 {
        return Err(ImageError::NegativeSigma(sigma));
    }
    Ok(sigma)
}

/// Blur a plane using a gaussian blur filter
///
/// The kernel is built from `sigma` with [`kernels::gaussian_kernel_1d`] and
/// applied along rows then columns with zero padding at the borders.
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W).
/// * `dst` - The destination plane with shape (H, W).
/// * `sigma` - The sigma of the gaussian kernel.
/// * `strategy` - Execution strategy for the two passes.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur(
    src: &Plane,
    dst: &mut Plane,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian_kernel_1d(validate_sigma(sigma)?);
    separable_filter_with_strategy(src, dst, kernel.as_slice(), kernel.as_slice(), strategy)
}
