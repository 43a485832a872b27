use crate::error::{Error, Result};
use crate::threshold::Threshold;
use crate::weights::{InterestFunctions, InterestFunctionsRaw, Weights};
use serde::Deserialize;

/// Per-field (forecast or observation) convolution and filtering settings
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    /// Spatial convolution radius, in grid squares
    pub conv_radius: i64,
    /// Temporal convolution window, in timesteps (centred, odd is typical)
    pub conv_time_window: i64,
    /// Threshold applied to the convolved field to define raw objects
    pub conv_thresh: Threshold,
    /// Percentile of object intensity used for [`Self::inten_perc_thresh`]
    pub inten_perc_value: f64,
    /// Discard objects whose intensity percentile doesn't meet this threshold
    pub inten_perc_thresh: Threshold,
}

impl FieldConfig {
    fn validate(&self) -> Result<()> {
        if self.conv_radius <= 0 {
            return Err(Error::NonPositive {
                name: "conv_radius",
                value: self.conv_radius,
            });
        }
        if self.conv_time_window <= 0 {
            return Err(Error::NonPositive {
                name: "conv_time_window",
                value: self.conv_time_window,
            });
        }
        if !(0.0..=100.0).contains(&self.inten_perc_value) {
            return Err(Error::InvalidPercentile {
                value: self.inten_perc_value,
            });
        }
        Ok(())
    }
}

/// Free-text header metadata carried through to every text table row
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HeaderInfo {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub obtype: String,
}

/// Either a plain enable/disable flag, or a sub-object selecting which
/// NetCDF variables to write
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NcOutput {
    Enabled(bool),
    Flags(NcOutputFlags),
}

impl Default for NcOutput {
    fn default() -> Self {
        NcOutput::Enabled(true)
    }
}

impl NcOutput {
    /// Whether NetCDF output is written at all
    pub fn enabled(&self) -> bool {
        match self {
            NcOutput::Enabled(b) => *b,
            NcOutput::Flags(_) => true,
        }
    }

    /// The per-variable flags in effect, defaulting to "write everything"
    /// when only a bare `true` was given
    pub fn flags(&self) -> NcOutputFlags {
        match self {
            NcOutput::Enabled(_) => NcOutputFlags::default(),
            NcOutput::Flags(f) => *f,
        }
    }
}

/// Which NetCDF variables to write, per spec's `nc_output` sub-object
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NcOutputFlags {
    #[serde(default = "default_true")]
    pub latlon_flag: bool,
    #[serde(default = "default_true")]
    pub raw_flag: bool,
    #[serde(default = "default_true")]
    pub object_id_flag: bool,
    #[serde(default = "default_true")]
    pub cluster_id_flag: bool,
}

impl Default for NcOutputFlags {
    fn default() -> Self {
        Self {
            latlon_flag: true,
            raw_flag: true,
            object_id_flag: true,
            cluster_id_flag: true,
        }
    }
}

/// Output toggles and naming
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub nc_output: NcOutput,
    #[serde(default = "default_true")]
    pub txt_output: bool,
    #[serde(default)]
    pub output_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            nc_output: NcOutput::default(),
            txt_output: true,
            output_prefix: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level configuration for a verification run
///
/// Deserialized from JSON with `serde_json`. Call [`Config::validate`] once
/// after loading; nothing here panics on malformed input.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub header: HeaderInfo,

    pub fcst: FieldConfig,
    pub obs: FieldConfig,

    /// 3D objects smaller than this (in grid-cell-timesteps) are discarded
    pub min_volume: i64,

    pub weight: Weights,
    pub interest_function: InterestFunctionsRaw,

    /// Pairs scoring at or above this total interest are merged
    pub total_interest_thresh: f64,

    /// Pairs below this interest are not written to the pair output table
    #[serde(default)]
    pub print_interest_thresh: f64,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Parse a configuration document from a JSON string
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load and parse a configuration file from disk
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate cross-field invariants and build the interest functions
    ///
    /// This is the one place malformed configuration turns into an `Error`
    /// rather than a panic or a silently-wrong run.
    pub fn validate(&self) -> Result<InterestFunctions> {
        self.fcst.validate()?;
        self.obs.validate()?;
        self.weight.validate()?;

        if self.min_volume < 1 {
            return Err(Error::NonPositive {
                name: "min_volume",
                value: self.min_volume,
            });
        }
        if !(0.0..=1.0).contains(&self.total_interest_thresh) {
            return Err(Error::InvalidThreshold {
                expression: format!("total_interest_thresh = {}", self.total_interest_thresh),
            });
        }

        InterestFunctions::build(&self.interest_function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "fcst": {
                "conv_radius": 2,
                "conv_time_window": 1,
                "conv_thresh": ">=5.0",
                "inten_perc_value": 50.0,
                "inten_perc_thresh": ">=0.0"
            },
            "obs": {
                "conv_radius": 2,
                "conv_time_window": 1,
                "conv_thresh": ">=5.0",
                "inten_perc_value": 50.0,
                "inten_perc_thresh": ">=0.0"
            },
            "min_volume": 10,
            "weight": {
                "space_centroid_dist": 1.0,
                "time_centroid_delta": 1.0,
                "speed_delta": 1.0,
                "direction_diff": 1.0,
                "volume_ratio": 1.0,
                "axis_angle_diff": 1.0,
                "start_time_delta": 1.0,
                "end_time_delta": 1.0
            },
            "interest_function": {
                "space_centroid_dist": [[0.0, 1.0], [20.0, 0.0]],
                "time_centroid_delta": [[0.0, 1.0], [3.0, 0.0]],
                "speed_delta": [[0.0, 1.0], [5.0, 0.0]],
                "direction_diff": [[0.0, 1.0], [180.0, 0.0]],
                "volume_ratio": [[0.0, 0.0], [1.0, 1.0]],
                "axis_angle_diff": [[0.0, 1.0], [90.0, 0.0]],
                "start_time_delta": [[0.0, 1.0], [3.0, 0.0]],
                "end_time_delta": [[0.0, 1.0], [3.0, 0.0]]
            },
            "total_interest_thresh": 0.7
        }"#
    }

    #[test]
    fn parses_and_validates_a_complete_config() {
        let cfg = Config::from_json(sample_json()).unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_volume, 10);
        assert!(cfg.output.nc_output.enabled());
        assert!(cfg.output.txt_output);
    }

    #[test]
    fn nc_output_accepts_either_a_bool_or_a_flags_object() {
        let bare: OutputConfig = serde_json::from_str(r#"{"nc_output": false}"#).unwrap();
        assert!(!bare.nc_output.enabled());

        let flagged: OutputConfig = serde_json::from_str(
            r#"{"nc_output": {"latlon_flag": false, "raw_flag": true, "object_id_flag": true, "cluster_id_flag": false}}"#,
        )
        .unwrap();
        assert!(flagged.nc_output.enabled());
        assert!(!flagged.nc_output.flags().latlon_flag);
        assert!(flagged.nc_output.flags().raw_flag);
        assert!(!flagged.nc_output.flags().cluster_id_flag);
    }

    #[test]
    fn rejects_all_zero_weights() {
        let mut cfg = Config::from_json(sample_json()).unwrap();
        cfg.weight = Weights {
            space_centroid_dist: 0.0,
            time_centroid_delta: 0.0,
            speed_delta: 0.0,
            direction_diff: 0.0,
            volume_ratio: 0.0,
            axis_angle_diff: 0.0,
            start_time_delta: 0.0,
            end_time_delta: 0.0,
        };
        assert!(matches!(cfg.validate(), Err(Error::AllWeightsZero)));
    }

    #[test]
    fn rejects_negative_weight() {
        let mut cfg = Config::from_json(sample_json()).unwrap();
        cfg.weight.speed_delta = -1.0;
        assert!(matches!(cfg.validate(), Err(Error::NegativeWeight { .. })));
    }

    #[test]
    fn rejects_non_positive_min_volume() {
        let mut cfg = Config::from_json(sample_json()).unwrap();
        cfg.min_volume = 0;
        assert!(cfg.validate().is_err());
    }
}
