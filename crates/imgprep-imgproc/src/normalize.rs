//! Min-max normalization of image intensities.
//!
//! Normalization maps the finite intensity range of an image onto `[0, 1]`:
//!
//! ```text
//! normalized = (pixel - min) / (max - min)
//! ```
//!
//! where `min` and `max` are taken over every element of every channel,
//! skipping NaN. Images without a usable range (constant, all NaN, or with an
//! infinite bound) normalize to all zeros.

use imgprep_image::{ImageArray, ImageError};

/// Find the minimum and maximum values in a slice, ignoring NaN.
///
/// # Arguments
///
/// * `data` - The values to reduce.
///
/// # Returns
///
/// `None` if the slice is empty or every value is NaN. Infinite values take
/// part in the reduction.
///
/// # Example
///
/// ```
/// use imgprep_imgproc::normalize::find_min_max_nan;
///
/// let (min, max) = find_min_max_nan(&[3.0, f32::NAN, -1.0, 2.0]).unwrap();
/// assert_eq!(min, -1.0);
/// assert_eq!(max, 3.0);
///
/// assert_eq!(find_min_max_nan(&[f32::NAN, f32::NAN]), None);
/// ```
pub fn find_min_max_nan(data: &[f32]) -> Option<(f32, f32)> {
    data.iter()
        .copied()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((min, max)) => Some((min.min(x), max.max(x))),
        })
}

/// Normalize an image to `[0, 1]` using its own minimum and maximum values.
///
/// The bounds are computed over the whole image with [`find_min_max_nan`].
/// When both bounds are finite and `max > min` every element becomes
/// `(v - min) / (max - min)`; NaN elements stay NaN. Otherwise `dst` is
/// filled with zeros.
///
/// # Arguments
///
/// * `src` - The input image of shape (H, W) or (H, W, C).
/// * `dst` - The output image, same shape as `src`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` and `dst` have different shapes.
///
/// # Example
///
/// ```
/// use imgprep_image::ImageArray;
/// use imgprep_imgproc::normalize::normalize_min_max;
///
/// let image = ImageArray::from_shape_vec(&[2, 2], vec![10u8, 20, 30, 50]).unwrap();
/// let mut normalized = ImageArray::zeros(image.shape());
///
/// normalize_min_max(&image, &mut normalized).unwrap();
///
/// assert_eq!(normalized.as_slice(), &[0.0, 0.25, 0.5, 1.0]);
/// ```
pub fn normalize_min_max(src: &ImageArray, dst: &mut ImageArray) -> Result<(), ImageError> {
    if src.shape() != dst.shape() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let range = find_min_max_nan(src.as_slice())
        .filter(|(min, max)| min.is_finite() && max.is_finite() && max > min);

    let Some((min, max)) = range else {
        log::warn!(
            "image {:?} has no finite intensity range, normalizing to zeros",
            src.dims()
        );
        dst.as_slice_mut().fill(0.0);
        return Ok(());
    };

    let scale = max - min;
    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(d, &s)| *d = (s - min) / scale);

    Ok(())
}
