#![deny(missing_docs)]
//! Image types for intensity preprocessing: dense `f32` arrays, single-channel
//! planes and the error taxonomy shared by the workspace.

/// dense image arrays and planes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// conversions from and to ndarray.
mod interop;

pub use crate::error::{ErrorKind, ImageError};
pub use crate::image::{ImageArray, ImageShape, ImageSize, Plane};
