#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// operations to normalize images.
pub mod normalize;

/// normalize and smooth images in one call.
pub mod process;
