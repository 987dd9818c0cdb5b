//! Candidate sets of image indices.
//!
//! A candidate set is kept sorted so the smallest member serves as the
//! deterministic "pick any" choice during both building and querying.

mod set;

pub use set::CandidateSet;
