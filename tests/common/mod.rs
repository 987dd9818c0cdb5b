//! Synthetic image libraries shared by integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use whichimg::{naive_tell, ColorImage};

pub const PALETTE: [[u8; 3]; 5] = [
    [255, 0, 0],
    [0, 0, 255],
    [0, 255, 0],
    [20, 20, 20],
    [240, 240, 240],
];

/// Shapes as `(width, height)`.
pub const SHAPES: [(usize, usize); 4] = [(10, 10), (15, 15), (20, 20), (12, 10)];

pub fn solid(rgb: [u8; 3], width: usize, height: usize) -> ColorImage {
    ColorImage::new(rgb.repeat(width * height), width, height).unwrap()
}

pub fn random_image(rng: &mut StdRng, width: usize, height: usize) -> ColorImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&PALETTE[rng.random_range(0..PALETTE.len())]);
    }
    ColorImage::new(data, width, height).unwrap()
}

pub fn random_gray(rng: &mut StdRng, width: usize, height: usize) -> ColorImage {
    let data: Vec<u8> = (0..width * height)
        .map(|_| rng.random_range(0..=3u8) * 85)
        .collect();
    ColorImage::from_gray(&data, width, height).unwrap()
}

/// Returns a copy of `base` with one pixel recolored.
pub fn with_pixel(base: &ColorImage, row: usize, col: usize, rgb: [u8; 3]) -> ColorImage {
    let mut data = base.data().to_vec();
    let at = (row * base.width() + col) * 3;
    data[at..at + 3].copy_from_slice(&rgb);
    ColorImage::new(data, base.width(), base.height()).unwrap()
}

fn push_unique(out: &mut Vec<ColorImage>, img: ColorImage) {
    if naive_tell(out, img.view()).is_none() {
        out.push(img);
    }
}

/// Builds a library of pairwise distinct images across a few shapes.
///
/// Each shape gets a base image, single-pixel variants of it (the hardest
/// case to tell apart) and unrelated random images; one shape also gets a
/// gray image.
pub fn library(seed: u64) -> Vec<ColorImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for &(width, height) in SHAPES.iter() {
        let base = random_image(&mut rng, width, height);
        for _ in 0..3 {
            let row = rng.random_range(0..height);
            let col = rng.random_range(0..width);
            let rgb = PALETTE[rng.random_range(0..PALETTE.len())];
            push_unique(&mut out, with_pixel(&base, row, col, rgb));
        }
        push_unique(&mut out, base);
        for _ in 0..2 {
            push_unique(&mut out, random_image(&mut rng, width, height));
        }
    }
    push_unique(&mut out, random_gray(&mut rng, 10, 10));
    out
}
