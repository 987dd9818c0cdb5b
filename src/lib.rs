//! whichimg identifies which member of a fixed set of known images a query
//! image is, without comparing it against every candidate.
//!
//! Building an [`ImageTeller`] groups the known images by shape and derives,
//! for each image, a short chain of single-pixel tests that separates it from
//! every other image of the same shape. A query reads only the pixels those
//! chains name, then (by default) confirms the answer with one full
//! comparison so that unknown images are reported as not found.
//!
//! ```
//! use whichimg::{ColorImage, ImageTeller};
//!
//! let red = ColorImage::new([255u8, 0, 0].repeat(4), 2, 2)?;
//! let blue = ColorImage::new([0u8, 0, 255].repeat(4), 2, 2)?;
//! let teller = ImageTeller::new(vec![red.clone(), blue])?;
//!
//! assert_eq!(teller.tell(red.view()), Some(0));
//! # Ok::<(), whichimg::WhichImgError>(())
//! ```
//!
//! Chain construction can run in parallel with the `rayon` feature, images
//! can be loaded from disk with `image-io`, and build/query steps emit spans
//! and events with `tracing`.

pub mod bank;
mod candidate;
pub mod image;
pub mod procedure;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;

pub use bank::{ShapeBucket, ShapeIndex};
pub use candidate::CandidateSet;
pub use image::{same_pixels, ColorImage, ImageView, Rgb, Shape};
pub use procedure::{Branch, Procedure};
pub use search::{naive_tell, ImageTeller, TellConfig, NOT_FOUND};
pub use util::{WhichImgError, WhichImgResult};
