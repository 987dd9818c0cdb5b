//! Chain walking for a single query.
//!
//! The walk starts with every image of the query's shape and follows the
//! chain of the smallest remaining candidate `k`, intersecting the candidate
//! set with the successors of each observed outcome. The set never grows.
//! Leaving the first branch means the query disagrees with `k`, which is then
//! no longer a candidate, so the walk moves on to the next smallest one.

use crate::bank::{Chains, ShapeBucket};
use crate::image::{same_pixels, ColorImage, ImageView};

pub(crate) fn tell_in_bucket(
    images: &[ColorImage],
    chains: &Chains,
    bucket: &ShapeBucket,
    query: ImageView<'_>,
    surprises: bool,
) -> Option<usize> {
    if let [only] = bucket.indices() {
        return confirm(images, *only, query, surprises);
    }

    let mut remaining = bucket.candidates();
    'chains: loop {
        let k = remaining.first()?;
        let chain = chains.chain(k)?;
        for node in chain {
            let (row, col) = node.at();
            let branch = node.branch(query.pixel(row, col)?);
            remaining.intersect_with(branch.successors());
            match remaining.len() {
                0 => return None,
                1 => return confirm(images, remaining.only()?, query, surprises),
                _ if !branch.is_first() => continue 'chains,
                _ => {}
            }
        }
        // A fully followed chain always ends on the singleton {k}.
        return None;
    }
}

fn confirm(
    images: &[ColorImage],
    idx: usize,
    query: ImageView<'_>,
    surprises: bool,
) -> Option<usize> {
    if !surprises {
        return Some(idx);
    }
    let known = images.get(idx)?;
    same_pixels(known.view(), query).then_some(idx)
}
