//! Pixel grids, shapes and channel normalization.
//!
//! `ImageView` is a borrowed 2D view into a 1D `u8` buffer with an explicit
//! stride and either one (gray) or three (color) interleaved channels. The
//! stride counts bytes between the starts of consecutive rows, so a stride
//! larger than `width * channels` represents padded rows.
//!
//! Gray pixels are normalized to color by channel replication: every read
//! through [`ImageView::pixel`] yields an [`Rgb`] triple, so gray and color
//! buffers with the same content compare equal.

use crate::util::{WhichImgError, WhichImgResult};

mod color;
#[cfg(feature = "image-io")]
pub mod io;

pub use color::ColorImage;

/// One normalized pixel: three 8-bit channels in buffer order.
pub type Rgb = [u8; 3];

/// Height/width pair used to bucket images. Channel count is not part of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Shape {
    /// Creates a shape from `(height, width)`.
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Returns the number of pixels in an image of this shape.
    pub fn pixel_count(&self) -> usize {
        self.height.saturating_mul(self.width)
    }
}

/// Borrowed 2D image view with an explicit stride and channel count.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> WhichImgResult<Self> {
        let row_len = width
            .checked_mul(channels)
            .ok_or(WhichImgError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, channels, row_len)
    }

    /// Creates a view with an explicit stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> WhichImgResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(WhichImgError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels (1 or 3).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the `(height, width)` shape of the view.
    pub fn shape(&self) -> Shape {
        Shape::new(self.height, self.width)
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the raw bytes of row `y` (`width * channels` long).
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns the normalized pixel at `(row, col)` if it is within bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = row
            .checked_mul(self.stride)?
            .checked_add(col * self.channels)?;
        if self.channels == 1 {
            self.data.get(start).map(|&v| [v, v, v])
        } else {
            self.data
                .get(start..start + 3)
                .map(|px| [px[0], px[1], px[2]])
        }
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> WhichImgResult<usize> {
    if width == 0 || height == 0 {
        return Err(WhichImgError::InvalidDimensions { width, height });
    }
    if channels != 1 && channels != 3 {
        return Err(WhichImgError::InvalidChannels { channels });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(WhichImgError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(WhichImgError::InvalidStride { row_len, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(WhichImgError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Returns `true` if both views have the same shape and the same normalized
/// pixels. Padding bytes are ignored.
pub fn same_pixels(a: ImageView<'_>, b: ImageView<'_>) -> bool {
    a.shape() == b.shape() && first_difference(a, b).is_none()
}

/// Returns the first coordinate `(row, col)` in row-major order where two
/// views of equal shape differ after normalization.
pub(crate) fn first_difference(a: ImageView<'_>, b: ImageView<'_>) -> Option<(usize, usize)> {
    debug_assert_eq!(a.shape(), b.shape());
    let height = a.height.min(b.height);
    let width = a.width.min(b.width);

    for y in 0..height {
        if a.channels == b.channels {
            let row_a = a.row(y).expect("row within bounds for diff");
            let row_b = b.row(y).expect("row within bounds for diff");
            if row_a[..width * a.channels] == row_b[..width * b.channels] {
                continue;
            }
            let col = row_a
                .chunks_exact(a.channels)
                .zip(row_b.chunks_exact(b.channels))
                .position(|(pa, pb)| pa != pb)
                .expect("rows differ in at least one pixel");
            return Some((y, col));
        }
        for x in 0..width {
            if a.pixel(y, x) != b.pixel(y, x) {
                return Some((y, x));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{first_difference, same_pixels, ImageView, Shape};

    #[test]
    fn gray_pixels_are_replicated() {
        let data = [7u8, 9, 11, 13];
        let view = ImageView::from_slice(&data, 2, 2, 1).unwrap();
        assert_eq!(view.pixel(1, 0), Some([11, 11, 11]));
        assert_eq!(view.pixel(2, 0), None);
        assert_eq!(view.shape(), Shape::new(2, 2));
    }

    #[test]
    fn padded_rows_are_skipped() {
        let data = [1u8, 2, 3, 99, 4, 5, 6, 99];
        let view = ImageView::new(&data, 1, 2, 3, 4).unwrap();
        assert_eq!(view.row(1), Some(&[4u8, 5, 6][..]));
        assert_eq!(view.pixel(1, 0), Some([4, 5, 6]));
    }

    #[test]
    fn first_difference_scans_row_major() {
        let a = [0u8; 12];
        let mut b = [0u8; 12];
        b[11] = 1; // row 1, col 1
        b[4] = 1; // row 0, col 1
        let va = ImageView::from_slice(&a, 2, 2, 3).unwrap();
        let vb = ImageView::from_slice(&b, 2, 2, 3).unwrap();
        assert_eq!(first_difference(va, vb), Some((0, 1)));
        assert!(!same_pixels(va, vb));
    }

    #[test]
    fn gray_and_color_with_same_content_match() {
        let gray = [5u8, 6];
        let color = [5u8, 5, 5, 6, 6, 6];
        let vg = ImageView::from_slice(&gray, 2, 1, 1).unwrap();
        let vc = ImageView::from_slice(&color, 2, 1, 3).unwrap();
        assert!(same_pixels(vg, vc));
        assert_eq!(first_difference(vg, vc), None);
    }

    #[test]
    fn different_shapes_never_match() {
        let data = [0u8; 6];
        let wide = ImageView::from_slice(&data, 2, 1, 3).unwrap();
        let tall = ImageView::from_slice(&data, 1, 2, 3).unwrap();
        assert!(!same_pixels(wide, tall));
    }
}
