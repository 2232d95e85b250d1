//! Placement evaluation: scoring a single candidate grid.
//!
//! The search merges a piece into a copy of the grid and hands the result to
//! a [`PlacementEvaluator`]. Line clearing is not applied first: completed
//! rows are rewarded through their own term.

use std::fmt;

use crate::{board_analysis::BoardAnalysis, weights::HeuristicWeights};

/// Evaluates candidate grids by assigning scores (higher is better).
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_placement(&self, analysis: &BoardAnalysis) -> f64;
}

/// Linear heuristic over aggregate height, completed lines, holes and
/// bumpiness.
///
/// ```text
/// score = height·Wh + lines·Wl + holes·Wo + bumpiness·Wb
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    #[inline]
    fn evaluate_placement(&self, analysis: &BoardAnalysis) -> f64 {
        let w = &self.weights;
        f64::from(analysis.aggregate_height()) * w.height
            + f64::from(analysis.completed_lines()) * w.lines
            + f64::from(analysis.num_holes()) * w.holes
            + f64::from(analysis.bumpiness()) * w.bumpiness
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::Grid;

    use super::*;

    fn score(art: &str) -> f64 {
        let analysis = BoardAnalysis::from_grid(Grid::from_ascii(art));
        HeuristicEvaluator::default().evaluate_placement(&analysis)
    }

    #[test]
    fn test_empty_grid_scores_zero() {
        let analysis = BoardAnalysis::from_grid(Grid::EMPTY);
        assert_eq!(HeuristicEvaluator::default().evaluate_placement(&analysis), 0.0);
    }

    #[test]
    fn test_known_score() {
        // heights all 1, one completed line
        let s = score("IIIIIIIIII");
        assert!((s - (10.0 * -0.51 + 0.76)).abs() < 1e-9, "score = {s}");
    }

    #[test]
    fn test_extra_hole_lowers_score() {
        let without_hole = score(
            "
            ....TT....
            ....TT....
            ",
        );
        let with_hole = score(
            "
            ....TT....
            .....T....
            ",
        );
        assert!(with_hole < without_hole);
    }

    #[test]
    fn test_extra_completed_line_raises_score() {
        // The extra cell completes the top row.
        let one_line = score(
            "
            IIIIIIIII.
            IIIIIIIIII
            ",
        );
        let two_lines = score(
            "
            IIIIIIIIII
            IIIIIIIIII
            ",
        );
        assert!(two_lines > one_line);
    }

    #[test]
    fn test_custom_weights() {
        let evaluator = HeuristicEvaluator::new(HeuristicWeights {
            height: 0.0,
            lines: 0.0,
            holes: -1.0,
            bumpiness: 0.0,
        });
        let analysis = BoardAnalysis::from_grid(Grid::from_ascii(
            "
            O.........
            ..........
            ",
        ));
        assert_eq!(evaluator.evaluate_placement(&analysis), -1.0);
    }
}
