//! Space-time object definition, attribution and match/merge engine
//!
//! A gridded field goes through convolution and thresholding
//! ([`FloatVolume`]), connected-component labeling ([`IntVolume`]),
//! attribute computation ([`SingleAtt3D`]/[`PairAtt3D`]), and a fuzzy
//! interest score ([`InterestCalculator`]) before [`MatchMergeEngine`] turns
//! matched pairs into composites.

mod error;
mod float_volume;
mod fo_graph;
mod int_volume;
mod interest;
mod match_merge;
mod moments;
mod pair_att;
mod partition;
mod single_att;

pub use error::Error;
pub use float_volume::FloatVolume;
pub use fo_graph::FoGraph;
pub use int_volume::IntVolume;
pub use interest::{InterestCalculator, PairAttribute};
pub use match_merge::MatchMergeEngine;
pub use moments::{fold_axis_angle, Moments3D};
pub use pair_att::{calc_3d_pair_atts, PairAtt3D};
pub use partition::Partition;
pub use single_att::{calc_3d_single_atts, SingleAtt3D};
