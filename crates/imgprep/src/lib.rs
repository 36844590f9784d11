//! Image intensity normalization and separable gaussian smoothing.
//!
//! ```
//! use imgprep::image::ImageArray;
//! use imgprep::imgproc::process::{process_image, ProcessOptions};
//!
//! let image = ImageArray::from_shape_vec(&[5, 5], vec![7u8; 25]).unwrap();
//! let processed = process_image(&image, &ProcessOptions::default()).unwrap();
//!
//! assert!(processed.as_slice().iter().all(|&v| v == 0.0));
//! ```

#[doc(inline)]
pub use imgprep_image as image;

#[doc(inline)]
pub use imgprep_imgproc as imgproc;
