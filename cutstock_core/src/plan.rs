//! Human readable cutting plans built from a solved master problem
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::instance::CuttingStockInstance;
use crate::pattern::{Pattern, PatternSet};

/// One used pattern and how many stock units are cut with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuttingPlanLine {
    /// Number of stock units cut with this pattern
    pub count: u32,
    pub pattern: Pattern,
    /// Piece lengths one stock unit yields, in piece order
    pub pieces: Vec<u32>,
    /// Leftover of one stock unit
    pub waste: u64,
}

/// Read-only view of which patterns are used and how often
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuttingPlan {
    lines: Vec<CuttingPlanLine>,
    separator: String,
}

impl CuttingPlan {
    /// Build the plan for `usage`, given in pattern set order
    ///
    /// Patterns with zero usage are left out, the others keep their order.
    ///
    /// # Examples
    /// ```rust
    /// use cutstock_core::instance::CuttingStockInstance;
    /// use cutstock_core::pattern::{Pattern, PatternSet};
    /// use cutstock_core::plan::CuttingPlan;
    /// let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
    /// let patterns: PatternSet = vec![Pattern::new(vec![3, 0]), Pattern::new(vec![1, 1])]
    ///     .into_iter()
    ///     .collect();
    /// let plan = CuttingPlan::interpret(&instance, &patterns, &[1, 2], " + ");
    /// assert_eq!(plan.to_string(), "1 x (3 + 3 + 3)\n2 x (3 + 5)\n");
    /// ```
    pub fn interpret(
        instance: &CuttingStockInstance,
        patterns: &PatternSet,
        usage: &[u32],
        separator: &str,
    ) -> Self {
        let lengths = instance.lengths();
        let lines = patterns
            .iter()
            .zip(usage)
            .filter(|(_, count)| **count > 0)
            .map(|(pattern, &count)| CuttingPlanLine {
                count,
                pieces: pattern.piece_lengths(&lengths),
                waste: pattern.waste(&lengths, instance.stock_length()),
                pattern: pattern.clone(),
            })
            .collect();
        Self {
            lines,
            separator: separator.to_string(),
        }
    }

    pub fn lines(&self) -> &[CuttingPlanLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of stock units the plan cuts
    pub fn stock_used(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.count)).sum()
    }

    /// Leftover length over all cut stock units
    pub fn total_waste(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.count) * l.waste)
            .sum()
    }

    /// Number of pieces of each size the plan produces
    pub fn produced(&self, instance: &CuttingStockInstance) -> Vec<u64> {
        (0..instance.num_pieces())
            .map(|i| {
                self.lines
                    .iter()
                    .map(|l| u64::from(l.count) * u64::from(l.pattern.count(i)))
                    .sum()
            })
            .collect()
    }

    /// Render one line as `count x (l + l + ...)`
    pub fn render_line(&self, line: &CuttingPlanLine) -> String {
        let pieces = line
            .pieces
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(&self.separator);
        format!("{} x ({})", line.count, pieces)
    }
}

impl Display for CuttingPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", self.render_line(line))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_piece_equal_to_stock() {
        let instance = CuttingStockInstance::from_lengths(&[10], &[1], 10).unwrap();
        let patterns: PatternSet = std::iter::once(Pattern::new(vec![1])).collect();
        let plan = CuttingPlan::interpret(&instance, &patterns, &[1], " + ");
        assert_eq!(plan.to_string(), "1 x (10)\n");
        assert_eq!(plan.stock_used(), 1);
        assert_eq!(plan.total_waste(), 0);
    }

    #[test]
    fn unused_patterns_are_omitted() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let patterns: PatternSet = [vec![3, 0], vec![2, 0], vec![1, 1], vec![0, 2]]
            .into_iter()
            .map(Pattern::new)
            .collect();
        let plan = CuttingPlan::interpret(&instance, &patterns, &[1, 0, 2, 0], ", ");
        assert_eq!(plan.lines().len(), 2);
        assert_eq!(plan.to_string(), "1 x (3, 3, 3)\n2 x (3, 5)\n");
        assert_eq!(plan.stock_used(), 3);
        assert_eq!(plan.total_waste(), 1 + 2 * 2);
        assert_eq!(plan.produced(&instance), vec![5, 2]);
    }

    #[test]
    fn nothing_used() {
        let instance = CuttingStockInstance::from_lengths(&[3], &[0], 10).unwrap();
        let patterns: PatternSet = std::iter::once(Pattern::new(vec![3])).collect();
        let plan = CuttingPlan::interpret(&instance, &patterns, &[0], " + ");
        assert!(plan.is_empty());
        assert_eq!(plan.to_string(), "");
    }
}
