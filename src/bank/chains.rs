//! Discrimination chain construction.
//!
//! For a target image the builder repeatedly picks the smallest rival still
//! consistent with every pixel recorded so far, records the first pixel (in
//! row-major order) where target and rival differ, and keeps only the bucket
//! members that share the target's color there. The rival always fails that
//! test, so each step removes at least one candidate and a chain has at most
//! `bucket.len() - 1` nodes.
//!
//! All nodes live in one arena; a chain is a contiguous range of it.

use crate::bank::{ShapeBucket, ShapeIndex};
use crate::candidate::CandidateSet;
use crate::image::{first_difference, ColorImage};
use crate::procedure::Procedure;
use crate::trace::{trace_event, trace_span};
use crate::util::{WhichImgError, WhichImgResult};
use std::ops::Range;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Frozen arena of discrimination nodes keyed by image index.
#[derive(Clone, Debug, Default)]
pub(crate) struct Chains {
    nodes: Vec<Procedure>,
    spans: Vec<Option<Range<usize>>>,
}

impl Chains {
    /// Builds one chain per image in every bucket holding more than one image.
    ///
    /// `parallel` only takes effect with the `rayon` feature; the arena is the
    /// same either way.
    pub(crate) fn build(
        images: &[ColorImage],
        index: &ShapeIndex,
        parallel: bool,
    ) -> WhichImgResult<Self> {
        let _span = trace_span!("build_chains", images = images.len(), shapes = index.len())
            .entered();

        let jobs: Vec<(&ShapeBucket, usize)> = index
            .iter()
            .filter(|bucket| bucket.len() > 1)
            .flat_map(|bucket| bucket.indices().iter().map(move |&target| (bucket, target)))
            .collect();

        let built = build_jobs(images, &jobs, parallel);

        let mut chains = Chains {
            nodes: Vec::new(),
            spans: vec![None; images.len()],
        };
        for ((_, target), chain) in jobs.iter().zip(built) {
            let chain = chain?;
            let start = chains.nodes.len();
            chains.nodes.extend(chain);
            chains.spans[*target] = Some(start..chains.nodes.len());
        }

        trace_event!("chains_built", nodes = chains.nodes.len());
        Ok(chains)
    }

    /// Returns the chain for `image`, or `None` for images alone in their
    /// bucket.
    pub(crate) fn chain(&self, image: usize) -> Option<&[Procedure]> {
        let span = self.spans.get(image)?.clone()?;
        self.nodes.get(span)
    }

    /// Returns the total number of nodes across all chains.
    pub(crate) fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(feature = "rayon")]
fn build_jobs(
    images: &[ColorImage],
    jobs: &[(&ShapeBucket, usize)],
    parallel: bool,
) -> Vec<WhichImgResult<Vec<Procedure>>> {
    if parallel {
        jobs.par_iter()
            .map(|&(bucket, target)| build_chain(images, bucket, target))
            .collect()
    } else {
        jobs.iter()
            .map(|&(bucket, target)| build_chain(images, bucket, target))
            .collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn build_jobs(
    images: &[ColorImage],
    jobs: &[(&ShapeBucket, usize)],
    _parallel: bool,
) -> Vec<WhichImgResult<Vec<Procedure>>> {
    jobs.iter()
        .map(|&(bucket, target)| build_chain(images, bucket, target))
        .collect()
}

/// Builds the chain that isolates `target` within `bucket`.
pub(crate) fn build_chain(
    images: &[ColorImage],
    bucket: &ShapeBucket,
    target: usize,
) -> WhichImgResult<Vec<Procedure>> {
    let target_img = image_at(images, target)?;
    let max_steps = bucket.shape().pixel_count();
    let mut working = bucket.candidates();
    let mut chain = Vec::new();

    while working.only() != Some(target) {
        let rival = working
            .first_other(target)
            .ok_or(WhichImgError::IndexOutOfBounds {
                index: target,
                len: bucket.len(),
                context: "bucket",
            })?;
        if chain.len() >= max_steps {
            return Err(indistinguishable(target, rival));
        }

        let rival_img = image_at(images, rival)?;
        let (row, col) = first_difference(target_img.view(), rival_img.view())
            .ok_or_else(|| indistinguishable(target, rival))?;
        let first = color_at(target_img, row, col)?;
        let second = color_at(rival_img, row, col)?;

        let mut on_first = Vec::new();
        let mut on_second = Vec::new();
        let mut on_neither = Vec::new();
        for &idx in bucket.indices() {
            let color = color_at(image_at(images, idx)?, row, col)?;
            if color == first {
                on_first.push(idx);
            } else if color == second {
                on_second.push(idx);
            } else {
                on_neither.push(idx);
            }
        }
        let on_first = CandidateSet::from_sorted(on_first);
        working.intersect_with(&on_first);

        chain.push(Procedure::new(
            (row, col),
            first,
            second,
            on_first,
            CandidateSet::from_sorted(on_second),
            CandidateSet::from_sorted(on_neither),
        ));
    }

    trace_event!("chain_built", target = target, len = chain.len());
    Ok(chain)
}

fn indistinguishable(a: usize, b: usize) -> WhichImgError {
    WhichImgError::Indistinguishable {
        first: a.min(b),
        second: a.max(b),
    }
}

fn image_at(images: &[ColorImage], index: usize) -> WhichImgResult<&ColorImage> {
    images.get(index).ok_or(WhichImgError::IndexOutOfBounds {
        index,
        len: images.len(),
        context: "images",
    })
}

fn color_at(img: &ColorImage, row: usize, col: usize) -> WhichImgResult<[u8; 3]> {
    img.pixel(row, col).ok_or(WhichImgError::IndexOutOfBounds {
        index: row * img.width() + col,
        len: img.shape().pixel_count(),
        context: "pixel",
    })
}

#[cfg(test)]
mod tests {
    use super::{build_chain, Chains};
    use crate::bank::ShapeIndex;
    use crate::image::ColorImage;
    use crate::util::WhichImgError;

    fn solid(rgb: [u8; 3], width: usize, height: usize) -> ColorImage {
        let data = rgb.repeat(width * height);
        ColorImage::new(data, width, height).unwrap()
    }

    fn with_pixel(mut base: Vec<u8>, width: usize, row: usize, col: usize, rgb: [u8; 3]) -> Vec<u8> {
        let at = (row * width + col) * 3;
        base[at..at + 3].copy_from_slice(&rgb);
        base
    }

    fn index_of(images: &[ColorImage]) -> ShapeIndex {
        ShapeIndex::build(images.iter().map(ColorImage::shape))
    }

    #[test]
    fn chain_replays_to_its_own_index() {
        let base = vec![0u8; 3 * 3 * 3];
        let images = vec![
            ColorImage::new(base.clone(), 3, 3).unwrap(),
            ColorImage::new(with_pixel(base.clone(), 3, 0, 1, [9, 9, 9]), 3, 3).unwrap(),
            ColorImage::new(with_pixel(base.clone(), 3, 2, 2, [9, 9, 9]), 3, 3).unwrap(),
            ColorImage::new(with_pixel(base, 3, 0, 1, [7, 7, 7]), 3, 3).unwrap(),
        ];
        let index = index_of(&images);
        let bucket = index.iter().next().unwrap();

        for target in 0..images.len() {
            let chain = build_chain(&images, bucket, target).unwrap();
            assert!(!chain.is_empty());
            assert!(chain.len() < bucket.len());

            let mut remaining = bucket.candidates();
            for node in &chain {
                let (row, col) = node.at();
                let branch = node.branch(images[target].pixel(row, col).unwrap());
                assert!(branch.is_first());
                remaining.intersect_with(branch.successors());
            }
            assert_eq!(remaining.only(), Some(target));
        }
    }

    #[test]
    fn first_node_uses_row_major_difference_with_smallest_rival() {
        let base = vec![0u8; 2 * 2 * 3];
        let images = vec![
            ColorImage::new(base.clone(), 2, 2).unwrap(),
            ColorImage::new(with_pixel(base.clone(), 2, 1, 0, [1, 2, 3]), 2, 2).unwrap(),
            ColorImage::new(with_pixel(base, 2, 0, 1, [1, 2, 3]), 2, 2).unwrap(),
        ];
        let index = index_of(&images);
        let bucket = index.iter().next().unwrap();

        let chain = build_chain(&images, bucket, 0).unwrap();
        let node = &chain[0];
        assert_eq!(node.at(), (1, 0));
        assert_eq!(node.first_color(), [0, 0, 0]);
        assert_eq!(node.second_color(), [1, 2, 3]);
        assert_eq!(node.branch([0, 0, 0]).successors().as_slice(), &[0, 2]);
        assert_eq!(node.branch([1, 2, 3]).successors().as_slice(), &[1]);
        assert!(node.branch([5, 5, 5]).successors().is_empty());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn identical_images_fail_to_build() {
        let images = vec![
            solid([1, 1, 1], 2, 2),
            solid([4, 4, 4], 2, 2),
            solid([1, 1, 1], 2, 2),
        ];
        let err = Chains::build(&images, &index_of(&images), false).unwrap_err();
        assert_eq!(err, WhichImgError::Indistinguishable { first: 0, second: 2 });
    }

    #[test]
    fn single_image_buckets_have_no_chain() {
        let images = vec![
            solid([1, 1, 1], 2, 2),
            solid([2, 2, 2], 2, 2),
            solid([1, 1, 1], 3, 3),
        ];
        let chains = Chains::build(&images, &index_of(&images), false).unwrap();
        assert!(chains.chain(0).is_some());
        assert!(chains.chain(1).is_some());
        assert!(chains.chain(2).is_none());
        assert_eq!(chains.num_nodes(), 2);
    }
}
