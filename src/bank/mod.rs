//! Precomputed lookup assets: shape buckets and discrimination chains.
//!
//! Known images are first grouped by shape; only images inside one bucket
//! can ever be confused with each other, so chains are built per bucket and
//! never compare images of different shapes.

mod chains;

pub(crate) use chains::Chains;

use crate::candidate::CandidateSet;
use crate::image::Shape;
use std::collections::HashMap;

/// Indices of all known images sharing one shape, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeBucket {
    shape: Shape,
    indices: Vec<usize>,
}

impl ShapeBucket {
    /// Returns the bucket's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the image indices in input order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of images in the bucket.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the bucket is empty. Built buckets never are.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns every index in the bucket as a fresh candidate set.
    pub fn candidates(&self) -> CandidateSet {
        CandidateSet::from_sorted(self.indices.clone())
    }
}

/// Mapping from shape to the known images having that shape.
#[derive(Clone, Debug, Default)]
pub struct ShapeIndex {
    buckets: Vec<ShapeBucket>,
    lookup: HashMap<Shape, usize>,
}

impl ShapeIndex {
    /// Groups image indices by shape in a single pass.
    ///
    /// Buckets are ordered by first appearance; indices within a bucket keep
    /// input order.
    pub fn build<I>(shapes: I) -> Self
    where
        I: IntoIterator<Item = Shape>,
    {
        let mut buckets: Vec<ShapeBucket> = Vec::new();
        let mut lookup = HashMap::new();
        for (image_idx, shape) in shapes.into_iter().enumerate() {
            let slot = *lookup.entry(shape).or_insert_with(|| {
                buckets.push(ShapeBucket {
                    shape,
                    indices: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].indices.push(image_idx);
        }
        Self { buckets, lookup }
    }

    /// Returns the bucket for `shape`, if any known image has it.
    pub fn bucket(&self, shape: Shape) -> Option<&ShapeBucket> {
        self.lookup.get(&shape).map(|&slot| &self.buckets[slot])
    }

    /// Iterates buckets in first-appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, ShapeBucket> {
        self.buckets.iter()
    }

    /// Returns the number of distinct shapes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if no shapes are indexed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeIndex;
    use crate::image::Shape;

    #[test]
    fn groups_indices_by_shape_in_input_order() {
        let shapes = [
            Shape::new(10, 10),
            Shape::new(10, 10),
            Shape::new(15, 15),
            Shape::new(20, 20),
            Shape::new(10, 10),
        ];
        let index = ShapeIndex::build(shapes);

        assert_eq!(index.len(), 3);
        assert_eq!(index.bucket(Shape::new(10, 10)).unwrap().indices(), &[0, 1, 4]);
        assert_eq!(index.bucket(Shape::new(15, 15)).unwrap().indices(), &[2]);
        assert_eq!(index.bucket(Shape::new(20, 20)).unwrap().indices(), &[3]);
        assert!(index.bucket(Shape::new(10, 15)).is_none());

        let order: Vec<Shape> = index.iter().map(|b| b.shape()).collect();
        assert_eq!(order, vec![shapes[0], shapes[2], shapes[3]]);
    }

    #[test]
    fn transposed_shapes_are_distinct() {
        let index = ShapeIndex::build([Shape::new(2, 3), Shape::new(3, 2)]);
        assert_eq!(index.len(), 2);
    }
}
