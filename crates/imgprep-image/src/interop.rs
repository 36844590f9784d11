use ndarray::{ArrayD, ArrayViewD, IxDyn};
use num_traits::AsPrimitive;

use crate::error::ImageError;
use crate::image::{ImageArray, ImageShape};

impl<T> TryFrom<ArrayViewD<'_, T>> for ImageArray
where
    T: AsPrimitive<f32>,
{
    type Error = ImageError;

    /// Convert an array view of any layout, iterating in logical (row-major) order.
    fn try_from(array: ArrayViewD<'_, T>) -> Result<Self, Self::Error> {
        let shape = ImageShape::from_dims(array.shape())?;
        let data = array.iter().map(|v| v.as_()).collect();
        ImageArray::new(shape, data)
    }
}

impl<T> TryFrom<ArrayD<T>> for ImageArray
where
    T: AsPrimitive<f32>,
{
    type Error = ImageError;

    fn try_from(array: ArrayD<T>) -> Result<Self, Self::Error> {
        ImageArray::try_from(array.view())
    }
}

impl ImageArray {
    /// Convert the image into a dynamic-rank ndarray with the same dimensions.
    pub fn into_ndarray(self) -> Result<ArrayD<f32>, ImageError> {
        let dims = self.dims();
        Ok(ArrayD::from_shape_vec(IxDyn(&dims), self.into_vec())?)
    }
}
