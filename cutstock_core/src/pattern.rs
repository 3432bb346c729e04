//! Cutting patterns and the insertion ordered sets of them used as master columns
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::instance::CuttingStockInstance;

/// How many of each piece one stock unit is cut into
///
/// Counts are indexed like the pieces of the instance the pattern belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern(Vec<u32>);

impl Pattern {
    pub fn new(counts: Vec<u32>) -> Self {
        Self(counts)
    }

    /// The pattern cutting as many copies of piece `index` as fit, and nothing else
    pub fn single_piece(instance: &CuttingStockInstance, index: usize) -> Self {
        let lengths = instance.lengths();
        let mut counts = vec![0; lengths.len()];
        counts[index] = instance.stock_length() / lengths[index];
        Self(counts)
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    pub fn count(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// Whether the pattern cuts no piece at all
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Length consumed by the pieces of the pattern
    pub fn used_length(&self, lengths: &[u32]) -> u64 {
        self.0
            .iter()
            .zip(lengths)
            .map(|(&c, &l)| u64::from(c) * u64::from(l))
            .sum()
    }

    /// Leftover of one stock unit cut by this pattern
    ///
    /// Saturates at zero for patterns that don't fit.
    pub fn waste(&self, lengths: &[u32], stock_length: u32) -> u64 {
        u64::from(stock_length).saturating_sub(self.used_length(lengths))
    }

    /// Most times an optimal plan cuts this pattern when `demands` must be covered
    ///
    /// Past `ceil(demand[i] / count[i])` for every piece the pattern cuts, one cut fewer
    /// still covers demand. Zero for a pattern cutting no demanded piece.
    pub fn max_useful_repeats(&self, demands: &[u32]) -> u32 {
        self.0
            .iter()
            .zip(demands)
            .filter(|(c, _)| **c > 0)
            .map(|(&c, &d)| d.div_ceil(c))
            .max()
            .unwrap_or(0)
    }

    pub fn fits(&self, lengths: &[u32], stock_length: u32) -> bool {
        self.0.len() == lengths.len() && self.used_length(lengths) <= u64::from(stock_length)
    }

    /// Piece lengths the pattern yields, in piece order
    pub fn piece_lengths(&self, lengths: &[u32]) -> Vec<u32> {
        self.0
            .iter()
            .zip(lengths)
            .flat_map(|(&c, &l)| std::iter::repeat(l).take(c as usize))
            .collect()
    }
}

impl From<Vec<u32>> for Pattern {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Distinct patterns in the order they were discovered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    patterns: IndexSet<Pattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting columns of column generation: one single piece pattern per piece
    pub fn single_piece(instance: &CuttingStockInstance) -> Self {
        (0..instance.num_pieces())
            .map(|i| Pattern::single_piece(instance, i))
            .collect()
    }

    /// Append a pattern, returning `false` if an equal one is already present
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        self.patterns.insert(pattern)
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Keep only the patterns that consume the whole stock length
    pub fn retain_trim_free(&mut self, lengths: &[u32], stock_length: u32) {
        self.patterns.retain(|p| p.waste(lengths, stock_length) == 0);
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<T: IntoIterator<Item = Pattern>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = indexmap::set::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
