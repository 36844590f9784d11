//! Filter operations
//!
//! This module provides the gaussian kernel and the separable, zero padded
//! convolution used to smooth image planes.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
