use crate::error::Error;
use serde::Deserialize;
use stobj_utils::PiecewiseLinear;

/// The eight weights fed into the fuzzy interest engine
///
/// Mirrors the original tool's fixed attribute set exactly: these are the
/// only pair attributes the total-interest score is built from.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Weights {
    pub space_centroid_dist: f64,
    pub time_centroid_delta: f64,
    pub speed_delta: f64,
    pub direction_diff: f64,
    pub volume_ratio: f64,
    pub axis_angle_diff: f64,
    pub start_time_delta: f64,
    pub end_time_delta: f64,
}

impl Weights {
    /// The weights paired with their field names, for uniform validation
    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("space_centroid_dist", self.space_centroid_dist),
            ("time_centroid_delta", self.time_centroid_delta),
            ("speed_delta", self.speed_delta),
            ("direction_diff", self.direction_diff),
            ("volume_ratio", self.volume_ratio),
            ("axis_angle_diff", self.axis_angle_diff),
            ("start_time_delta", self.start_time_delta),
            ("end_time_delta", self.end_time_delta),
        ]
    }

    /// Reject negative weights and an all-zero weight set
    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        for (name, value) in self.named() {
            if value < 0.0 {
                return Err(Error::NegativeWeight { name, value });
            }
        }

        if self.named().iter().all(|(_, v)| *v == 0.0) {
            return Err(Error::AllWeightsZero);
        }

        Ok(())
    }
}

/// Knot lists for the eight interest functions, as they appear on disk
#[derive(Debug, Clone, Deserialize)]
pub struct InterestFunctionsRaw {
    pub space_centroid_dist: Vec<(f64, f64)>,
    pub time_centroid_delta: Vec<(f64, f64)>,
    pub speed_delta: Vec<(f64, f64)>,
    pub direction_diff: Vec<(f64, f64)>,
    pub volume_ratio: Vec<(f64, f64)>,
    pub axis_angle_diff: Vec<(f64, f64)>,
    pub start_time_delta: Vec<(f64, f64)>,
    pub end_time_delta: Vec<(f64, f64)>,
}

/// The eight interest functions, validated and ready to evaluate
#[derive(Debug, Clone)]
pub struct InterestFunctions {
    pub space_centroid_dist: PiecewiseLinear,
    pub time_centroid_delta: PiecewiseLinear,
    pub speed_delta: PiecewiseLinear,
    pub direction_diff: PiecewiseLinear,
    pub volume_ratio: PiecewiseLinear,
    pub axis_angle_diff: PiecewiseLinear,
    pub start_time_delta: PiecewiseLinear,
    pub end_time_delta: PiecewiseLinear,
}

impl InterestFunctions {
    pub(crate) fn build(raw: &InterestFunctionsRaw) -> crate::error::Result<Self> {
        let pwl = |knots: &[(f64, f64)]| -> crate::error::Result<PiecewiseLinear> {
            PiecewiseLinear::new(knots.to_vec()).map_err(|_| Error::InvalidThreshold {
                expression: "interest_function knots must be >= 2 and strictly increasing"
                    .to_string(),
            })
        };

        Ok(Self {
            space_centroid_dist: pwl(&raw.space_centroid_dist)?,
            time_centroid_delta: pwl(&raw.time_centroid_delta)?,
            speed_delta: pwl(&raw.speed_delta)?,
            direction_diff: pwl(&raw.direction_diff)?,
            volume_ratio: pwl(&raw.volume_ratio)?,
            axis_angle_diff: pwl(&raw.axis_angle_diff)?,
            start_time_delta: pwl(&raw.start_time_delta)?,
            end_time_delta: pwl(&raw.end_time_delta)?,
        })
    }
}
