//! Linear full-comparison baseline.

use crate::image::{same_pixels, ColorImage, ImageView};

/// Returns the index of the first image whose pixels equal `query`.
///
/// Compares every pixel of every same-shaped image; useful as ground truth
/// and as a benchmark reference for [`ImageTeller`](crate::ImageTeller).
pub fn naive_tell(images: &[ColorImage], query: ImageView<'_>) -> Option<usize> {
    images
        .iter()
        .position(|img| same_pixels(img.view(), query))
}
