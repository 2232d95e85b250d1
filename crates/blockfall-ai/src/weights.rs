use serde::{Deserialize, Serialize};

/// Coefficients of the linear board heuristic.
///
/// Deserializing accepts partial objects; missing fields keep their default.
///
/// ```
/// use blockfall_ai::weights::HeuristicWeights;
///
/// let weights = HeuristicWeights::default();
/// assert_eq!(weights.height, -0.51);
/// assert_eq!(weights.lines, 0.76);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Weight of the aggregate column height.
    pub height: f64,
    /// Weight of the number of completed lines.
    pub lines: f64,
    /// Weight of the number of holes.
    pub holes: f64,
    /// Weight of the bumpiness of the surface.
    pub bumpiness: f64,
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        height: -0.51,
        lines: 0.76,
        holes: -0.35,
        bumpiness: -0.18,
    };
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_object() {
        let weights: HeuristicWeights = serde_json::from_str(
            r#"{"height": -1.0, "lines": 2.0, "holes": -3.0, "bumpiness": -4.0}"#,
        )
        .unwrap();
        assert_eq!(
            weights,
            HeuristicWeights {
                height: -1.0,
                lines: 2.0,
                holes: -3.0,
                bumpiness: -4.0,
            }
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let weights: HeuristicWeights = serde_json::from_str(r#"{"holes": -1.5}"#).unwrap();
        assert_eq!(weights.holes, -1.5);
        assert_eq!(weights.height, HeuristicWeights::DEFAULT.height);
        assert_eq!(weights.lines, HeuristicWeights::DEFAULT.lines);
        assert_eq!(weights.bumpiness, HeuristicWeights::DEFAULT.bumpiness);

        let weights: HeuristicWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, HeuristicWeights::DEFAULT);
    }
}
