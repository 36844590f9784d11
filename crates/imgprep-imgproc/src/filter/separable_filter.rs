use imgprep_image::{ImageError, Plane};
use rayon::prelude::*;

use crate::parallel::ExecutionStrategy;

/// Convolve a 1D signal with a kernel, producing an output of the same length.
///
/// The kernel is centered on each output sample and samples outside the
/// signal are treated as zero:
///
/// ```text
/// dst[i] = sum_k signal[i - K/2 + k] * kernel[k]
/// ```
///
/// # Arguments
///
/// * `signal` - The input samples.
/// * `kernel` - The kernel taps, odd length.
/// * `dst` - The output samples, same length as `signal`.
///
/// # Errors
///
/// Returns an error if the kernel is empty or `dst` has a different length
/// than `signal`.
///
/// # Example
///
/// ```
/// use imgprep_imgproc::filter::convolve_1d_same;
///
/// let mut dst = [0.0f32; 4];
/// convolve_1d_same(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0], &mut dst).unwrap();
/// assert_eq!(dst, [3.0, 6.0, 9.0, 7.0]);
/// ```
pub fn convolve_1d_same(
    signal: &[f32],
    kernel: &[f32],
    dst: &mut [f32],
) -> Result<(), ImageError> {
    if kernel.is_empty() {
        return Err(ImageError::InvalidKernelLength(0, 0));
    }

    if signal.len() != dst.len() {
        return Err(ImageError::InvalidImageSize(signal.len(), 1, dst.len(), 1));
    }

    let offsets = kernel_offsets(kernel);
    convolve_row(signal, kernel, &offsets, dst);

    Ok(())
}

fn kernel_offsets(kernel: &[f32]) -> Vec<isize> {
    let half = kernel.len() / 2;
    (0..kernel.len())
        .map(|i| i as isize - half as isize)
        .collect()
}

fn convolve_row(signal: &[f32], kernel: &[f32], offsets: &[isize], dst: &mut [f32]) {
    let len = signal.len() as isize;
    for (i, out) in dst.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (&k, &off) in kernel.iter().zip(offsets.iter()) {
            let x = i as isize + off;
            if x >= 0 && x < len {
                acc += signal[x as usize] * k;
            }
        }
        *out = acc;
    }
}

/// Accumulate the vertical pass for output row `r` from the whole row-pass buffer.
///
/// Each output element sees its taps in kernel order, exactly as
/// [`convolve_1d_same`] would on the extracted column.
fn convolve_column_row(
    temp: &[f32],
    rows: usize,
    cols: usize,
    kernel: &[f32],
    offsets: &[isize],
    r: usize,
    dst_row: &mut [f32],
) {
    dst_row.fill(0.0);
    for (&k, &off) in kernel.iter().zip(offsets.iter()) {
        let y = r as isize + off;
        if y < 0 || y >= rows as isize {
            continue;
        }
        let y = y as usize;
        let src_row = &temp[y * cols..(y + 1) * cols];
        dst_row
            .iter_mut()
            .zip(src_row.iter())
            .for_each(|(d, &s)| *d += s * k);
    }
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl<'a> SeparableFilter<'a> {
    fn new(kernel_x: &'a [f32], kernel_y: &'a [f32]) -> Self {
        Self {
            kernel_x,
            kernel_y,
            offsets_x: kernel_offsets(kernel_x),
            offsets_y: kernel_offsets(kernel_y),
        }
    }

    /// Performs horizontal filtering followed by vertical filtering using a temporary buffer.
    fn apply(&self, src: &Plane, dst: &mut Plane, strategy: ExecutionStrategy) {
        let rows = src.rows();
        let cols = src.cols();
        if rows == 0 || cols == 0 {
            return;
        }

        let mut temp = vec![0.0f32; src.as_slice().len()];

        if strategy.is_parallel(rows * cols) {
            self.apply_parallel(&mut temp, src.as_slice(), dst.as_slice_mut(), rows, cols)
        } else {
            self.apply_serial(&mut temp, src.as_slice(), dst.as_slice_mut(), rows, cols)
        }
    }

    fn apply_serial(
        &self,
        temp: &mut [f32],
        src_data: &[f32],
        dst_data: &mut [f32],
        rows: usize,
        cols: usize,
    ) {
        // Horizontal
        src_data
            .chunks_exact(cols)
            .zip(temp.chunks_exact_mut(cols))
            .for_each(|(src_row, temp_row)| {
                convolve_row(src_row, self.kernel_x, &self.offsets_x, temp_row);
            });

        // Vertical
        let temp: &[f32] = temp;
        dst_data
            .chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, dst_row)| {
                convolve_column_row(
                    temp,
                    rows,
                    cols,
                    self.kernel_y,
                    &self.offsets_y,
                    r,
                    dst_row,
                );
            });
    }

    fn apply_parallel(
        &self,
        temp: &mut [f32],
        src_data: &[f32],
        dst_data: &mut [f32],
        rows: usize,
        cols: usize,
    ) {
        // Horizontal (parallel)
        src_data
            .par_chunks_exact(cols)
            .zip(temp.par_chunks_exact_mut(cols))
            .for_each(|(src_row, temp_row)| {
                convolve_row(src_row, self.kernel_x, &self.offsets_x, temp_row);
            });

        // Vertical (parallel)
        let temp: &[f32] = temp;
        dst_data
            .par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, dst_row)| {
                convolve_column_row(
                    temp,
                    rows,
                    cols,
                    self.kernel_y,
                    &self.offsets_y,
                    r,
                    dst_row,
                );
            });
    }
}

/// Apply a separable filter with execution strategy control.
///
/// The rows of `src` are convolved with `kernel_x`, then the columns of that
/// result are convolved with `kernel_y`. Both passes keep the plane size and
/// treat samples outside the plane as zero.
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W).
/// * `dst` - The destination plane with shape (H, W).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// Returns an error if a kernel is empty or `src` and `dst` differ in size.
pub fn separable_filter_with_strategy(
    src: &Plane,
    dst: &mut Plane,
    kernel_x: &[f32],
    kernel_y: &[f32],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter::new(kernel_x, kernel_y);
    filter.apply(src, dst, strategy);

    Ok(())
}

/// Apply a separable filter to a plane.
///
/// Uses `ExecutionStrategy::Auto` (parallel for planes ≥100K pixels, serial otherwise).
/// For explicit control, use [`separable_filter_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W).
/// * `dst` - The destination plane with shape (H, W).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter(
    src: &Plane,
    dst: &mut Plane,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError> {
    separable_filter_with_strategy(src, dst, kernel_x, kernel_y, ExecutionStrategy::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgprep_image::ImageSize;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_convolve_1d_same() -> Result<(), ImageError> {
        let mut dst = [0.0f32; 5];
        convolve_1d_same(&[0.0, 0.0, 1.0, 0.0, 0.0], &[0.25, 0.5, 0.25], &mut dst)?;
        assert_eq!(dst, [0.0, 0.25, 0.5, 0.25, 0.0]);

        // zero padding at the borders, no reflection
        convolve_1d_same(&[1.0, 1.0, 1.0, 1.0, 1.0], &[0.25, 0.5, 0.25], &mut dst)?;
        assert_eq!(dst, [0.75, 1.0, 1.0, 1.0, 0.75]);

        Ok(())
    }

    #[test]
    fn test_convolve_1d_same_not_flipped() -> Result<(), ImageError> {
        let mut dst = [0.0f32; 3];
        convolve_1d_same(&[0.0, 1.0, 0.0], &[1.0, 2.0, 3.0], &mut dst)?;
        assert_eq!(dst, [3.0, 2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_same_kernel_longer_than_signal() -> Result<(), ImageError> {
        let mut dst = [0.0f32; 2];
        convolve_1d_same(&[1.0, 2.0], &[1.0, 1.0, 1.0, 1.0, 1.0], &mut dst)?;
        assert_eq!(dst, [3.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_same_identity() -> Result<(), ImageError> {
        let signal = [0.5, -2.0, f32::MAX, 7.25];
        let mut dst = [0.0f32; 4];
        convolve_1d_same(&signal, &[1.0], &mut dst)?;
        assert_eq!(dst, signal);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_same_invalid() {
        let mut dst = [0.0f32; 2];
        assert!(matches!(
            convolve_1d_same(&[1.0, 2.0], &[], &mut dst),
            Err(ImageError::InvalidKernelLength(0, 0))
        ));
        assert!(matches!(
            convolve_1d_same(&[1.0, 2.0, 3.0], &[1.0], &mut dst),
            Err(ImageError::InvalidImageSize(3, 1, 2, 1))
        ));
    }

    #[test]
    fn test_separable_filter_f32() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Plane::new(
            size,
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;

        let mut dst = Plane::from_size_val(img.size(), 0.0);
        let kernel_x = vec![1.0, 1.0, 1.0];
        let kernel_y = vec![1.0, 1.0, 1.0];
        separable_filter(&img, &mut dst, &kernel_x, &kernel_y)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );

        let xsum = dst.as_slice().iter().sum::<f32>();
        assert_eq!(xsum, 9.0);

        Ok(())
    }

    #[test]
    fn test_separable_filter_rows_then_columns() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let img = Plane::new(size, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let mut dst = Plane::from_size_val(size, 0.0);

        // horizontal shift right by one, vertical identity
        separable_filter(&img, &mut dst, &[1.0, 0.0, 0.0], &[1.0])?;
        assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0, 0.0, 4.0, 5.0]);

        // horizontal identity, vertical shift down by one
        separable_filter(&img, &mut dst, &[1.0], &[1.0, 0.0, 0.0])?;
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);

        Ok(())
    }

    #[test]
    fn test_separable_filter_matches_1d_passes() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 6,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let data = (0..size.num_pixels())
            .map(|_| rng.random_range(-1.0f32..1.0))
            .collect::<Vec<_>>();
        let img = Plane::new(size, data)?;
        let kernel = [0.1, 0.2, 0.4, 0.2, 0.1];

        let mut dst = Plane::from_size_val(size, 0.0);
        separable_filter(&img, &mut dst, &kernel, &kernel)?;

        // rows
        let mut rows_out = vec![0.0f32; size.num_pixels()];
        for (src_row, dst_row) in img
            .as_slice()
            .chunks_exact(size.width)
            .zip(rows_out.chunks_exact_mut(size.width))
        {
            convolve_1d_same(src_row, &kernel, dst_row)?;
        }

        // columns
        for c in 0..size.width {
            let column = rows_out
                .iter()
                .skip(c)
                .step_by(size.width)
                .copied()
                .collect::<Vec<_>>();
            let mut expected = vec![0.0f32; size.height];
            convolve_1d_same(&column, &kernel, &mut expected)?;
            for (r, &e) in expected.iter().enumerate() {
                assert_eq!(dst.get(r, c), Some(e));
            }
        }

        Ok(())
    }

    #[test]
    fn test_separable_filter_zeros() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 9,
            height: 4,
        };
        let img = Plane::from_size_val(size, 0.0);
        let mut dst = Plane::from_size_val(size, 1.0);
        let kernel = [0.05, 0.25, 0.4, 0.25, 0.05];
        separable_filter(&img, &mut dst, &kernel, &kernel)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_separable_filter_invalid() {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let img = Plane::from_size_val(size, 0.0);

        let mut dst = Plane::from_size_val(size, 0.0);
        assert!(matches!(
            separable_filter(&img, &mut dst, &[], &[1.0]),
            Err(ImageError::InvalidKernelLength(0, 1))
        ));

        let mut dst = Plane::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0.0,
        );
        assert!(matches!(
            separable_filter(&img, &mut dst, &[1.0], &[1.0]),
            Err(ImageError::InvalidImageSize(3, 3, 2, 3))
        ));
    }

    #[test]
    fn test_separable_filter_with_strategy() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 31,
            height: 17,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let data = (0..size.num_pixels())
            .map(|_| rng.random_range(0.0f32..1.0))
            .collect::<Vec<_>>();
        let img = Plane::new(size, data)?;
        let kernel = crate::filter::kernels::gaussian_kernel_1d(1.5);
        let kernel = kernel.as_slice();

        let mut dst_serial = Plane::from_size_val(size, 0.0);
        separable_filter_with_strategy(
            &img,
            &mut dst_serial,
            kernel,
            kernel,
            ExecutionStrategy::Serial,
        )?;

        let mut dst_parallel = Plane::from_size_val(size, 0.0);
        separable_filter_with_strategy(
            &img,
            &mut dst_parallel,
            kernel,
            kernel,
            ExecutionStrategy::Parallel,
        )?;

        let mut dst_auto = Plane::from_size_val(size, 0.0);
        separable_filter_with_strategy(
            &img,
            &mut dst_auto,
            kernel,
            kernel,
            ExecutionStrategy::Auto,
        )?;

        assert_eq!(dst_serial, dst_parallel);
        assert_eq!(dst_serial, dst_auto);

        Ok(())
    }
}
