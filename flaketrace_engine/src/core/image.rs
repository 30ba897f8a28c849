use crate::core::types::Colour;
use derivative::Derivative;
use getset::{CopyGetters, Getters};
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// A row-major buffer of pixels
#[derive(CopyGetters, Getters, Derivative, Clone)]
#[derivative(Debug)]
pub struct Image<Col = Colour> {
    #[get_copy = "pub"]
    width: usize,
    #[get_copy = "pub"]
    height: usize,
    #[derivative(Debug = "ignore")]
    #[get = "pub"]
    data: Box<[Col]>,
}

// region Constructors

impl<Col: Clone> Image<Col> {
    /// Creates a new image with the specified dimensions, and the given fill pixel value
    pub fn new_filled(width: usize, height: usize, fill: Col) -> Self {
        Self::new_from(width, height, vec![fill; width * height])
    }
}

impl<Col> Image<Col> {
    /// Creates an image from the image's dimensions, and a slice of pixels
    ///
    /// # Panics
    /// The length of the `data` must be equal to the number of pixels `width * height`.
    pub fn new_from(width: usize, height: usize, data: impl Into<Box<[Col]>>) -> Self {
        let data = data.into();
        assert_eq!(data.len(), width * height, "number of pixels does not match dimensions");

        Self { width, height, data }
    }

    /// Creates an image from the image's dimensions, using the given function to calculate pixel values.
    ///
    /// Pixels are evaluated row by row, top-left first
    pub fn from_fn(width: usize, height: usize, mut func: impl FnMut(usize, usize) -> Col) -> Self {
        let data = (0..width * height)
            .map(|i| {
                let (x, y) = Self::decompress_index_dims(i, width);
                func(x, y)
            })
            .collect::<Vec<_>>();

        Self::new_from(width, height, data)
    }
}

// endregion Constructors

// region Pixel Accessors

impl<Col> Image<Col> {
    fn compress_index(&self, x: usize, y: usize) -> usize { x + (y * self.width) }

    fn decompress_index_dims(n: usize, width: usize) -> (usize, usize) { (n % width, n / width) }
}

impl<Col> Index<(usize, usize)> for Image<Col> {
    type Output = Col;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(
            x < self.width && y < self.height,
            "invalid pixel index ({}, {}) for dims ({},{})",
            x,
            y,
            self.width,
            self.height
        );
        &self.data[self.compress_index(x, y)]
    }
}

impl<Col> IndexMut<(usize, usize)> for Image<Col> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(
            x < self.width && y < self.height,
            "invalid pixel index ({}, {}) for dims ({},{})",
            x,
            y,
            self.width,
            self.height
        );
        let index = self.compress_index(x, y);
        &mut self.data[index]
    }
}

// endregion Pixel Accessors

// region Deref

impl<Col> Deref for Image<Col> {
    type Target = [Col];

    fn deref(&self) -> &Self::Target { self.data.deref() }
}
impl<Col> DerefMut for Image<Col> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.data.deref_mut() }
}

// endregion Deref
