use crate::pair_att::PairAtt3D;
use stobj_config::{Config, InterestFunctions};
use stobj_utils::PiecewiseLinear;

/// Selects one of [`PairAtt3D`]'s eight weighted fields
///
/// Stands in for the original tool's pointer-to-member selector: a plain
/// enum with a `match` is the idiomatic Rust equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAttribute {
    SpaceCentroidDist,
    TimeCentroidDelta,
    SpeedDelta,
    DirectionDiff,
    VolumeRatio,
    AxisAngleDiff,
    StartTimeDelta,
    EndTimeDelta,
}

impl PairAttribute {
    /// Pull this attribute's value out of a pair
    pub fn extract(&self, pair: &PairAtt3D) -> f64 {
        match self {
            PairAttribute::SpaceCentroidDist => pair.space_centroid_dist,
            PairAttribute::TimeCentroidDelta => pair.time_centroid_delta,
            PairAttribute::SpeedDelta => pair.speed_delta,
            PairAttribute::DirectionDiff => pair.direction_diff,
            PairAttribute::VolumeRatio => pair.volume_ratio,
            PairAttribute::AxisAngleDiff => pair.axis_diff,
            PairAttribute::StartTimeDelta => pair.start_time_delta as f64,
            PairAttribute::EndTimeDelta => pair.end_time_delta as f64,
        }
    }
}

struct Term {
    attribute: PairAttribute,
    weight: f64,
    function: PiecewiseLinear,
}

/// Weighted sum of piecewise-linear transforms of a pair's attributes
///
/// `total_interest(p) = (1 / sum(weights)) * sum(weight_i * f_i(attribute_i(p)))`
///
/// Terms with a zero weight are skipped entirely (matching the original's
/// behaviour of never evaluating a zero-weighted interest function).
pub struct InterestCalculator {
    terms: Vec<Term>,
    scale: f64,
}

impl InterestCalculator {
    /// Build the calculator from a validated configuration
    ///
    /// `functions` is the result of [`Config::validate`]; this keeps
    /// `stobj-core` from having to re-validate weights itself.
    pub fn from_config(config: &Config, functions: &InterestFunctions) -> Self {
        let candidates = [
            (
                PairAttribute::SpaceCentroidDist,
                config.weight.space_centroid_dist,
                functions.space_centroid_dist.clone(),
            ),
            (
                PairAttribute::TimeCentroidDelta,
                config.weight.time_centroid_delta,
                functions.time_centroid_delta.clone(),
            ),
            (
                PairAttribute::SpeedDelta,
                config.weight.speed_delta,
                functions.speed_delta.clone(),
            ),
            (
                PairAttribute::DirectionDiff,
                config.weight.direction_diff,
                functions.direction_diff.clone(),
            ),
            (
                PairAttribute::VolumeRatio,
                config.weight.volume_ratio,
                functions.volume_ratio.clone(),
            ),
            (
                PairAttribute::AxisAngleDiff,
                config.weight.axis_angle_diff,
                functions.axis_angle_diff.clone(),
            ),
            (
                PairAttribute::StartTimeDelta,
                config.weight.start_time_delta,
                functions.start_time_delta.clone(),
            ),
            (
                PairAttribute::EndTimeDelta,
                config.weight.end_time_delta,
                functions.end_time_delta.clone(),
            ),
        ];

        let mut terms = Vec::with_capacity(8);
        let mut sum_weights = 0.0;

        for (attribute, weight, function) in candidates {
            if weight == 0.0 {
                continue;
            }
            sum_weights += weight;
            terms.push(Term {
                attribute,
                weight,
                function,
            });
        }

        // `Config::validate` already guarantees this is nonzero.
        let scale = 1.0 / sum_weights;

        Self { terms, scale }
    }

    /// Total interest for a pair, in `[0, 1]`
    pub fn total_interest(&self, pair: &PairAtt3D) -> f64 {
        let sum: f64 = self
            .terms
            .iter()
            .map(|term| term.weight * term.function.evaluate(term.attribute.extract(pair)))
            .sum();

        self.scale * sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stobj_config::Config;

    fn sample_config() -> Config {
        Config::from_json(
            r#"{
                "fcst": {"conv_radius": 1, "conv_time_window": 1, "conv_thresh": ">=0.0", "inten_perc_value": 50.0, "inten_perc_thresh": ">=0.0"},
                "obs": {"conv_radius": 1, "conv_time_window": 1, "conv_thresh": ">=0.0", "inten_perc_value": 50.0, "inten_perc_thresh": ">=0.0"},
                "min_volume": 1,
                "weight": {
                    "space_centroid_dist": 1.0, "time_centroid_delta": 0.0, "speed_delta": 0.0,
                    "direction_diff": 0.0, "volume_ratio": 0.0, "axis_angle_diff": 0.0,
                    "start_time_delta": 0.0, "end_time_delta": 0.0
                },
                "interest_function": {
                    "space_centroid_dist": [[0.0, 1.0], [10.0, 0.0]],
                    "time_centroid_delta": [[0.0, 1.0], [1.0, 0.0]],
                    "speed_delta": [[0.0, 1.0], [1.0, 0.0]],
                    "direction_diff": [[0.0, 1.0], [1.0, 0.0]],
                    "volume_ratio": [[0.0, 1.0], [1.0, 0.0]],
                    "axis_angle_diff": [[0.0, 1.0], [1.0, 0.0]],
                    "start_time_delta": [[0.0, 1.0], [1.0, 0.0]],
                    "end_time_delta": [[0.0, 1.0], [1.0, 0.0]]
                },
                "total_interest_thresh": 0.5
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn single_weighted_attribute_reproduces_its_own_interest_function() {
        let config = sample_config();
        let functions = config.validate().unwrap();
        let calc = InterestCalculator::from_config(&config, &functions);

        let mut pair = zero_pair();
        pair.space_centroid_dist = 5.0;
        // scale = 1/1 = 1, so total interest equals the raw function value
        assert!((calc.total_interest(&pair) - 0.5).abs() < 1e-9);
    }

    fn zero_pair() -> PairAtt3D {
        PairAtt3D {
            fcst_object_number: 1,
            obs_object_number: 1,
            fcst_cluster_number: 1,
            obs_cluster_number: 1,
            intersection_volume: 0,
            is_simple: true,
            time_centroid_delta: 0.0,
            space_centroid_dist: 0.0,
            direction_diff: 0.0,
            speed_delta: 0.0,
            volume_ratio: 1.0,
            axis_diff: 0.0,
            duration_difference: 0,
            start_time_delta: 0,
            end_time_delta: 0,
            total_interest: 0.0,
        }
    }
}
