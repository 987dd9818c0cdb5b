//! Discrimination nodes: single-pixel tests with three outcomes.

use crate::candidate::CandidateSet;
use crate::image::Rgb;

/// A single pixel test recorded while building a discrimination chain.
///
/// The node was emitted for a target image whose color at `at` is `first`,
/// against a rival whose color there is `second`. Each outcome carries the
/// indices of every image in the shape bucket that shows the matching color,
/// captured at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Procedure {
    at: (usize, usize),
    first: Rgb,
    second: Rgb,
    on_first: CandidateSet,
    on_second: CandidateSet,
    on_neither: CandidateSet,
}

/// Outcome of reading one pixel against a [`Procedure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch<'a> {
    /// The pixel has the target's color.
    First(&'a CandidateSet),
    /// The pixel has the rival's color.
    Second(&'a CandidateSet),
    /// The pixel has neither reference color.
    Neither(&'a CandidateSet),
}

impl<'a> Branch<'a> {
    /// Returns the successor set carried by this outcome.
    pub fn successors(&self) -> &'a CandidateSet {
        match *self {
            Branch::First(set) | Branch::Second(set) | Branch::Neither(set) => set,
        }
    }

    /// Returns `true` for the target-color outcome.
    pub fn is_first(&self) -> bool {
        matches!(self, Branch::First(_))
    }
}

impl Procedure {
    pub(crate) fn new(
        at: (usize, usize),
        first: Rgb,
        second: Rgb,
        on_first: CandidateSet,
        on_second: CandidateSet,
        on_neither: CandidateSet,
    ) -> Self {
        debug_assert_ne!(first, second);
        Self {
            at,
            first,
            second,
            on_first,
            on_second,
            on_neither,
        }
    }

    /// Returns the `(row, col)` coordinate this node inspects.
    pub fn at(&self) -> (usize, usize) {
        self.at
    }

    /// Returns the target image's color at the coordinate.
    pub fn first_color(&self) -> Rgb {
        self.first
    }

    /// Returns the rival image's color at the coordinate.
    pub fn second_color(&self) -> Rgb {
        self.second
    }

    /// Selects the outcome for an observed color.
    pub fn branch(&self, color: Rgb) -> Branch<'_> {
        if color == self.first {
            Branch::First(&self.on_first)
        } else if color == self.second {
            Branch::Second(&self.on_second)
        } else {
            Branch::Neither(&self.on_neither)
        }
    }
}
