//! Exhaustive pattern enumeration
//!
//! Patterns are produced in strictly decreasing lexicographic order. The first one is
//! the greedy pattern (as many of piece 0 as fit, then as many of piece 1 as fit in
//! the leftover, and so on). Each following pattern gives up one unit of the rightmost
//! piece with a non-zero count and greedily refills every piece to its right. The walk
//! ends at the all-zero vector, which is not emitted.
use crate::instance::CuttingStockInstance;
use crate::pattern::{Pattern, PatternSet};

/// Iterator over every pattern reachable by the decrement and refill rule
#[derive(Debug, Clone)]
pub struct PatternEnumerator {
    lengths: Vec<u32>,
    stock_length: u64,
    current: Vec<u32>,
    state: EnumeratorState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumeratorState {
    Start,
    Running,
    Done,
}

impl PatternEnumerator {
    pub fn new(instance: &CuttingStockInstance) -> Self {
        let lengths = instance.lengths();
        Self {
            current: vec![0; lengths.len()],
            lengths,
            stock_length: u64::from(instance.stock_length()),
            state: EnumeratorState::Start,
        }
    }

    /// Greedily fill every position from `from` onwards with the length left over by
    /// the positions before it
    fn refill(&mut self, from: usize) {
        let mut used: u64 = self.current[..from]
            .iter()
            .zip(&self.lengths)
            .map(|(&c, &l)| u64::from(c) * u64::from(l))
            .sum();
        for j in from..self.current.len() {
            let length = u64::from(self.lengths[j]);
            let count = (self.stock_length - used) / length;
            self.current[j] = count as u32;
            used += count * length;
        }
    }

    fn emit(&mut self) -> Option<Pattern> {
        if self.current.iter().all(|&c| c == 0) {
            self.state = EnumeratorState::Done;
            return None;
        }
        Some(Pattern::new(self.current.clone()))
    }
}

impl Iterator for PatternEnumerator {
    type Item = Pattern;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            EnumeratorState::Done => None,
            EnumeratorState::Start => {
                self.state = EnumeratorState::Running;
                self.refill(0);
                self.emit()
            }
            EnumeratorState::Running => {
                let Some(z) = self.current.iter().rposition(|&c| c > 0) else {
                    self.state = EnumeratorState::Done;
                    return None;
                };
                self.current[z] -= 1;
                self.refill(z + 1);
                self.emit()
            }
        }
    }
}

/// Collect every pattern of the instance
pub fn enumerate_patterns(instance: &CuttingStockInstance) -> PatternSet {
    PatternEnumerator::new(instance).collect()
}
