//! Folds from traversal results to a single answer.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::flood::Region;
use crate::graph::Path;

/// The final value of a run, with a label for people.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Answer {
    pub(crate) label: &'static str,
    pub(crate) value: Option<u64>,
}

impl Answer {
    pub(crate) fn new(label: &'static str, value: u64) -> Self {
        Self { label, value: Some(value) }
    }

    /// The number this run produced, or [`None`] when there was no route at all.
    pub fn value(&self) -> Option<u64> {
        self.value
    }

    /// What the value means, e.g. `Number of paths`.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}: {}", self.label, value),
            None => write!(f, "{}: none", self.label),
        }
    }
}

/// Sum over all regions of one more than the region's minimum value. Zero for no regions.
pub fn risk_sum(regions: &[Region]) -> u64 {
    regions.iter().map(|region| region.minimum_value as u64 + 1).sum()
}

/// Product of the sizes of the `n` largest regions, or of all of them if there are fewer. One for no regions.
pub fn largest_product(regions: &[Region], n: usize) -> u64 {
    regions.iter()
        .map(|region| region.size as u64)
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(n)
        .product()
}

/// Number of distinct paths. Zero when `end` is unreachable.
pub fn path_count(paths: &[Path]) -> u64 {
    paths.iter().unique().count() as u64
}
