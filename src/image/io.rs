//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Everything is decoded to
//! 8-bit RGB; alpha channels are dropped.

use crate::image::{ColorImage, ImageView};
use crate::util::{WhichImgError, WhichImgResult};
use std::path::Path;

/// Creates a borrowed view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> WhichImgResult<ImageView<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height, 3)
}

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> WhichImgResult<ImageView<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height, 1)
}

/// Creates an owned color image from a dynamic image.
pub fn color_image_from_dynamic(img: &image::DynamicImage) -> WhichImgResult<ColorImage> {
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    ColorImage::new(rgb.into_raw(), width, height)
}

/// Loads an image from disk and converts it to an owned color image.
pub fn load_color_image<P: AsRef<Path>>(path: P) -> WhichImgResult<ColorImage> {
    let img = image::open(path).map_err(|err| WhichImgError::ImageIo {
        reason: err.to_string(),
    })?;
    color_image_from_dynamic(&img)
}

#[cfg(test)]
mod tests {
    use super::{color_image_from_dynamic, load_color_image, view_from_gray_image};
    use crate::util::WhichImgError;

    #[test]
    fn dynamic_gray_is_expanded() {
        let gray = image::GrayImage::from_raw(2, 1, vec![3, 4]).unwrap();
        let view = view_from_gray_image(&gray).unwrap();
        assert_eq!(view.pixel(0, 1), Some([4, 4, 4]));

        let img = color_image_from_dynamic(&image::DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(img.data(), &[3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn missing_file_is_image_io_error() {
        let err = load_color_image("/nonexistent/whichimg/missing.png").unwrap_err();
        assert!(matches!(err, WhichImgError::ImageIo { .. }));
    }
}
