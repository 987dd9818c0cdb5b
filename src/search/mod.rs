//! Query-time identification of known images.
//!
//! [`ImageTeller`] owns the known images together with their shape index and
//! discrimination chains. It is immutable after construction; every query
//! keeps its candidate set on the stack, so a teller can be shared across
//! threads without locking.

mod naive;
mod walk;

pub use naive::naive_tell;

use crate::bank::{Chains, ShapeIndex};
use crate::image::{ColorImage, ImageView};
use crate::procedure::Procedure;
use crate::trace::{trace_event, trace_span};
use crate::util::{WhichImgError, WhichImgResult};

/// Numeric result reported by [`ImageTeller::tell_index`] for unknown images.
pub const NOT_FOUND: isize = -1;

/// Configuration for building and querying an [`ImageTeller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TellConfig {
    /// Confirm every answer with a full pixel comparison against the stored
    /// image, so that unknown queries are reported as not found.
    ///
    /// When disabled, answers for known images are still exact but an
    /// unknown image may be reported as whichever known image its tested
    /// pixels agree with.
    pub surprises: bool,
    /// Build chains in parallel (requires the `rayon` feature; ignored
    /// otherwise).
    pub parallel: bool,
}

impl Default for TellConfig {
    fn default() -> Self {
        Self {
            surprises: true,
            parallel: false,
        }
    }
}

/// Identification structure for a fixed list of known images.
///
/// The answer to a query is the position of the matching image in the list
/// passed at construction.
#[derive(Clone, Debug)]
pub struct ImageTeller {
    images: Vec<ColorImage>,
    index: ShapeIndex,
    chains: Chains,
    cfg: TellConfig,
}

impl ImageTeller {
    /// Builds a teller with the default configuration.
    pub fn new(images: Vec<ColorImage>) -> WhichImgResult<Self> {
        Self::build(images, TellConfig::default())
    }

    /// Builds a teller from owned images.
    ///
    /// Fails with [`WhichImgError::TooFewImages`] for fewer than two images
    /// and with [`WhichImgError::Indistinguishable`] when two images of the
    /// same shape have identical pixels.
    pub fn build(images: Vec<ColorImage>, cfg: TellConfig) -> WhichImgResult<Self> {
        if images.len() < 2 {
            return Err(WhichImgError::TooFewImages { got: images.len() });
        }
        let _span = trace_span!("build_teller", images = images.len()).entered();

        let index = ShapeIndex::build(images.iter().map(ColorImage::shape));
        let chains = Chains::build(&images, &index, cfg.parallel)?;
        trace_event!(
            "teller_ready",
            shapes = index.len(),
            procedures = chains.num_nodes()
        );

        Ok(Self {
            images,
            index,
            chains,
            cfg,
        })
    }

    /// Builds a teller from borrowed views, normalizing gray views to color.
    pub fn from_views(views: &[ImageView<'_>], cfg: TellConfig) -> WhichImgResult<Self> {
        let images = views
            .iter()
            .map(|&view| ColorImage::from_view(view))
            .collect::<WhichImgResult<Vec<_>>>()?;
        Self::build(images, cfg)
    }

    /// Returns a copy with the surprise check switched on or off.
    ///
    /// Chains do not depend on this setting, so nothing is rebuilt.
    pub fn with_surprises(mut self, surprises: bool) -> Self {
        self.cfg.surprises = surprises;
        self
    }

    /// Identifies `query`, returning the index of the known image it is, or
    /// `None` if it is none of them.
    pub fn tell(&self, query: ImageView<'_>) -> Option<usize> {
        let found = match self.index.bucket(query.shape()) {
            Some(bucket) => walk::tell_in_bucket(
                &self.images,
                &self.chains,
                bucket,
                query,
                self.cfg.surprises,
            ),
            None => None,
        };
        trace_event!("tell", found = found.is_some());
        found
    }

    /// Like [`tell`](Self::tell) but reports unknown images as [`NOT_FOUND`].
    pub fn tell_index(&self, query: ImageView<'_>) -> isize {
        self.tell(query)
            .and_then(|idx| isize::try_from(idx).ok())
            .unwrap_or(NOT_FOUND)
    }

    /// Returns the number of known images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if there are no known images. Built tellers always
    /// hold at least two.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TellConfig {
        &self.cfg
    }

    /// Returns the shape index over the known images.
    pub fn shape_index(&self) -> &ShapeIndex {
        &self.index
    }

    /// Returns the discrimination chain of a known image, or `None` if the
    /// image is alone in its shape bucket (or out of range).
    pub fn chain(&self, index: usize) -> Option<&[Procedure]> {
        self.chains.chain(index)
    }

    /// Returns the total number of discrimination nodes.
    pub fn num_procedures(&self) -> usize {
        self.chains.num_nodes()
    }

    /// Returns a known image by index.
    pub fn image(&self, index: usize) -> Option<&ColorImage> {
        self.images.get(index)
    }

    /// Returns all known images in input order.
    pub fn images(&self) -> &[ColorImage] {
        &self.images
    }
}
