//! Normalize-then-smooth preprocessing of whole images.
//!
//! [`process_image`] is the single entry point: it validates the options,
//! rescales the image to `[0, 1]` and applies a gaussian blur to every channel
//! plane independently.
//!
//! # Example
//!
//! ```
//! use imgprep_image::ImageArray;
//! use imgprep_imgproc::process::{process_image, ProcessOptions};
//!
//! let image = ImageArray::from_shape_vec(&[4, 4], (0u8..16).collect()).unwrap();
//!
//! let options = ProcessOptions::default().with_filter_sigma(None);
//! let processed = process_image(&image, &options).unwrap();
//!
//! assert_eq!(processed.get(&[0, 0]), Some(0.0));
//! assert_eq!(processed.get(&[3, 3]), Some(1.0));
//! ```

use imgprep_image::{ImageArray, ImageError, Plane};
use ndarray::{ArrayD, ArrayViewD};
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::filter::{kernels, separable_filter_with_strategy, validate_sigma};
use crate::normalize::normalize_min_max;
use crate::parallel::{self, ExecutionStrategy};

/// Options for [`process_image`].
///
/// The defaults rescale to `[0, 1]` and blur with `sigma = 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Rescale the image to `[0, 1]` before filtering.
    pub normalize: bool,
    /// Standard deviation of the gaussian blur. `None` or `0.0` disables it.
    pub filter_sigma: Option<f32>,
    /// How the filtering work is scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            filter_sigma: Some(1.0),
            strategy: ExecutionStrategy::Auto,
        }
    }
}

impl ProcessOptions {
    /// Set whether the image is rescaled to `[0, 1]`.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the gaussian sigma.
    pub fn with_filter_sigma(mut self, filter_sigma: Option<f32>) -> Self {
        self.filter_sigma = filter_sigma;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The validated sigma, with an absent sigma meaning no smoothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the sigma is negative or not finite.
    pub fn effective_sigma(&self) -> Result<f32, ImageError> {
        validate_sigma(self.filter_sigma.unwrap_or(0.0))
    }
}

/// Normalize an image and optionally smooth it with a gaussian blur.
///
/// # Arguments
///
/// * `src` - The input image of shape (H, W) or (H, W, C). It is not modified.
/// * `options` - The processing options.
///
/// # Returns
///
/// A new image with the same shape as `src`. With `normalize` set the values
/// lie in `[0, 1]`, or are all zero when `src` has no finite intensity range.
/// With a positive sigma every channel is blurred independently with zero
/// padding at the borders.
///
/// # Errors
///
/// Returns [`ImageError::NegativeSigma`] or [`ImageError::NonFiniteSigma`]
/// before any computation if the sigma is invalid.
pub fn process_image(
    src: &ImageArray,
    options: &ProcessOptions,
) -> Result<ImageArray, ImageError> {
    let sigma = options.effective_sigma()?;

    log::debug!(
        "process image {:?}: normalize {}, sigma {}, strategy {:?}",
        src.dims(),
        options.normalize,
        sigma,
        options.strategy
    );

    let image = if options.normalize {
        let mut normalized = ImageArray::zeros(src.shape());
        normalize_min_max(src, &mut normalized)?;
        normalized
    } else {
        src.clone()
    };

    if sigma <= 0.0 {
        return Ok(image);
    }

    let kernel = kernels::gaussian_kernel_1d(sigma);
    let kernel = kernel.as_slice();

    let planes = parallel::par_map_channels(
        image.num_channels(),
        image.size().num_pixels(),
        options.strategy,
        |ch| -> Result<Plane, ImageError> {
            let plane = image.channel(ch)?;
            let mut filtered = Plane::from_size_val(plane.size(), 0.0);
            separable_filter_with_strategy(
                &plane,
                &mut filtered,
                kernel,
                kernel,
                options.strategy,
            )?;
            Ok(filtered)
        },
    )
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    ImageArray::from_planes(image.shape(), &planes)
}

/// Run [`process_image`] on an ndarray of any primitive numeric type.
///
/// # Errors
///
/// Returns [`ImageError::InvalidRank`] if the array is not rank 2 or 3,
/// [`ImageError::EmptyAxis`] if an axis is empty, and the errors of
/// [`process_image`].
pub fn process_ndarray<T>(
    array: ArrayViewD<'_, T>,
    options: &ProcessOptions,
) -> Result<ArrayD<f32>, ImageError>
where
    T: AsPrimitive<f32>,
{
    let image = ImageArray::try_from(array)?;
    process_image(&image, options)?.into_ndarray()
}
