//! Owned, normalized 3-channel images.

use crate::image::{ImageView, Rgb, Shape};
use crate::util::{WhichImgError, WhichImgResult};

/// Owned contiguous color image with three interleaved channels per pixel.
///
/// Every known image is stored in this form so that gray and color inputs
/// share one representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl ColorImage {
    /// Creates an image from a contiguous 3-channel buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> WhichImgResult<Self> {
        let needed = color_len(width, height)?;
        if data.len() < needed {
            return Err(WhichImgError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(WhichImgError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image from a contiguous single-channel buffer, replicating
    /// each gray value into all three channels.
    pub fn from_gray(data: &[u8], width: usize, height: usize) -> WhichImgResult<Self> {
        Self::from_view(ImageView::from_slice(data, width, height, 1)?)
    }

    /// Copies a view into a contiguous normalized buffer.
    pub fn from_view(view: ImageView<'_>) -> WhichImgResult<Self> {
        let width = view.width();
        let height = view.height();
        let needed = color_len(width, height)?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            let row = view.row(y).ok_or_else(|| WhichImgError::BufferTooSmall {
                needed: (y + 1).saturating_mul(view.stride()),
                got: view.as_slice().len(),
            })?;
            if view.channels() == 3 {
                data.extend_from_slice(row);
            } else {
                for &v in row {
                    data.extend_from_slice(&[v, v, v]);
                }
            }
        }
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: 3,
            stride: self.width * 3,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the `(height, width)` shape.
    pub fn shape(&self) -> Shape {
        Shape::new(self.height, self.width)
    }

    /// Returns the contiguous row-major pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(row, col)` if it is within bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgb> {
        self.view().pixel(row, col)
    }
}

fn color_len(width: usize, height: usize) -> WhichImgResult<usize> {
    if width == 0 || height == 0 {
        return Err(WhichImgError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(3))
        .ok_or(WhichImgError::InvalidDimensions { width, height })
}
