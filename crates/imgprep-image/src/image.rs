use num_traits::AsPrimitive;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use imgprep_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels in the image.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Shape of an [`ImageArray`].
///
/// A rank-2 image has no channel axis; a rank-3 image stores its channels
/// interleaved along the last axis. A shape can only be built through
/// [`ImageShape::from_dims`], so every axis is non-empty and the element count
/// fits in `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageShape {
    height: usize,
    width: usize,
    channels: Option<usize>,
}

impl ImageShape {
    /// Build a shape from the dimensions of an array.
    ///
    /// # Arguments
    ///
    /// * `dims` - The array dimensions, `[H, W]` or `[H, W, C]`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRank`] for any rank other than 2 or 3 and
    /// [`ImageError::EmptyAxis`] if any dimension is zero and
    /// [`ImageError::ElementCountOverflow`] if the element count does not fit
    /// in `usize`.
    pub fn from_dims(dims: &[usize]) -> Result<Self, ImageError> {
        let shape = match *dims {
            [height, width] => Self {
                height,
                width,
                channels: None,
            },
            [height, width, channels] => Self {
                height,
                width,
                channels: Some(channels),
            },
            _ => return Err(ImageError::InvalidRank(dims.len())),
        };

        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(ImageError::EmptyAxis(axis));
        }

        if dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)).is_none() {
            return Err(ImageError::ElementCountOverflow(dims.to_vec()));
        }

        Ok(shape)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of channels, `None` for a rank-2 image.
    pub fn channels(&self) -> Option<usize> {
        self.channels
    }

    /// Rank of the array, 2 or 3.
    pub fn rank(&self) -> usize {
        match self.channels {
            Some(_) => 3,
            None => 2,
        }
    }

    /// Dimensions of the array in row-major order.
    pub fn dims(&self) -> Vec<usize> {
        match self.channels {
            Some(c) => vec![self.height, self.width, c],
            None => vec![self.height, self.width],
        }
    }

    /// Number of channel planes; a rank-2 image is a single plane.
    pub fn num_channels(&self) -> usize {
        self.channels.unwrap_or(1)
    }

    /// Spatial size shared by every channel.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.height * self.width * self.num_channels()
    }
}

/// A dense `f32` image of rank 2 (H, W) or rank 3 (H, W, C).
///
/// Elements are stored row-major with the channel axis last. Inputs of any
/// primitive numeric type are converted to `f32` at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageArray {
    shape: ImageShape,
    data: Vec<f32>,
}

impl ImageArray {
    /// Create a new image from `f32` data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The image shape, see [`ImageShape::from_dims`].
    /// * `data` - The pixel data in row-major (H, W, C) order.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the shape, an error is returned.
    pub fn new(shape: ImageShape, data: Vec<f32>) -> Result<Self, ImageError> {
        if data.len() != shape.numel() {
            return Err(ImageError::InvalidDataLength(data.len(), shape.numel()));
        }
        Ok(Self { shape, data })
    }

    /// Create a new image from dimensions and data of any primitive numeric type.
    ///
    /// # Arguments
    ///
    /// * `dims` - The array dimensions, `[H, W]` or `[H, W, C]`.
    /// * `data` - The elements in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgprep_image::ImageArray;
    ///
    /// let image = ImageArray::from_shape_vec(&[2, 3], vec![0u8, 1, 2, 3, 4, 5]).unwrap();
    ///
    /// assert_eq!(image.rank(), 2);
    /// assert_eq!(image.get(&[1, 2]), Some(5.0));
    /// ```
    pub fn from_shape_vec<T>(dims: &[usize], data: Vec<T>) -> Result<Self, ImageError>
    where
        T: AsPrimitive<f32>,
    {
        Self::from_shape_slice(dims, &data)
    }

    /// Create a new image by converting a borrowed slice to `f32`.
    pub fn from_shape_slice<T>(dims: &[usize], data: &[T]) -> Result<Self, ImageError>
    where
        T: AsPrimitive<f32>,
    {
        let shape = ImageShape::from_dims(dims)?;
        Self::new(shape, data.iter().map(|v| v.as_()).collect())
    }

    /// Create an image filled with zeros.
    pub fn zeros(shape: ImageShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.numel()],
        }
    }

    /// Re-interleave channel planes into an image.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the resulting image.
    /// * `planes` - One plane per channel, each of size `shape.size()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of planes does not match the channel
    /// count or if a plane has the wrong size.
    pub fn from_planes(shape: ImageShape, planes: &[Plane]) -> Result<Self, ImageError> {
        let num_channels = shape.num_channels();
        if planes.len() != num_channels {
            return Err(ImageError::InvalidPlaneCount(planes.len(), num_channels));
        }

        let size = shape.size();
        if let Some(plane) = planes.iter().find(|p| p.size() != size) {
            return Err(ImageError::InvalidImageSize(
                plane.cols(),
                plane.rows(),
                size.width,
                size.height,
            ));
        }

        let mut image = Self::zeros(shape);
        for (ch, plane) in planes.iter().enumerate() {
            image
                .data
                .iter_mut()
                .skip(ch)
                .step_by(num_channels)
                .zip(plane.as_slice())
                .for_each(|(dst, &src)| *dst = src);
        }

        Ok(image)
    }

    /// Extract one channel as a plane.
    ///
    /// A rank-2 image has a single channel at index 0.
    pub fn channel(&self, ch: usize) -> Result<Plane, ImageError> {
        let num_channels = self.num_channels();
        if ch >= num_channels {
            return Err(ImageError::ChannelOutOfBounds(ch, num_channels));
        }

        let data = self
            .data
            .iter()
            .skip(ch)
            .step_by(num_channels)
            .copied()
            .collect();

        Plane::new(self.size(), data)
    }

    /// The image shape.
    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    /// The image dimensions, `[H, W]` or `[H, W, C]`.
    pub fn dims(&self) -> Vec<usize> {
        self.shape.dims()
    }

    /// The rank of the image, 2 or 3.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// The spatial size of the image.
    pub fn size(&self) -> ImageSize {
        self.shape.size()
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.shape.height
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.shape.width
    }

    /// The number of channels, 1 for a rank-2 image.
    pub fn num_channels(&self) -> usize {
        self.shape.num_channels()
    }

    /// Get the element at a multi-dimensional index.
    ///
    /// Returns `None` if the index has the wrong rank or is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        let dims = self.dims();
        if index.len() != dims.len() || index.iter().zip(&dims).any(|(i, d)| i >= d) {
            return None;
        }
        let offset = index
            .iter()
            .zip(&dims)
            .fold(0, |acc, (&i, &d)| acc * d + i);
        self.data.get(offset).copied()
    }

    /// The image data as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The image data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// A single-channel 2D `f32` plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    size: ImageSize,
    data: Vec<f32>,
}

impl Plane {
    /// Create a new plane from row-major data.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the size, an error is returned.
    pub fn new(size: ImageSize, data: Vec<f32>) -> Result<Self, ImageError> {
        if data.len() != size.num_pixels() {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.num_pixels(),
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a plane filled with a constant value.
    pub fn from_size_val(size: ImageSize, val: f32) -> Self {
        Self {
            size,
            data: vec![val; size.num_pixels()],
        }
    }

    /// The plane size.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.data.get(row * self.cols() + col).copied()
    }

    /// The plane data as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The plane data as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the plane and return its data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
