use crate::fo_graph::FoGraph;
use crate::pair_att::PairAtt3D;
use crate::partition::Partition;

/// Drives match/merge: builds the forecast/observation edge graph from pair
/// interest scores, then merges linked objects into composites via a
/// partition over the combined `[0, n_fcst + n_obs)` vertex space.
///
/// Matches the original engine's structure deliberately: forecast-forecast
/// and observation-observation edges are never added directly. Two forecast
/// objects end up in the same composite only by transitive closure through
/// a shared observation object they both matched (and symmetrically for two
/// observation objects). This is a faithful behavioural choice, not an
/// oversight: it means "obs-side clustering" and "fcst-side clustering" only
/// happen as a side effect of pairing with the other field, never on their
/// own.
pub struct MatchMergeEngine {
    graph: FoGraph,
    partition: Partition,
    n_fcst: usize,
    n_obs: usize,
}

impl MatchMergeEngine {
    /// Seed an engine with `n_fcst` forecast and `n_obs` observation objects,
    /// each starting in its own singleton partition class
    pub fn set_size(n_fcst: usize, n_obs: usize) -> Self {
        Self {
            graph: FoGraph::new(n_fcst, n_obs),
            partition: Partition::set_size(n_fcst + n_obs),
            n_fcst,
            n_obs,
        }
    }

    /// Run match/merge over every pair whose total interest clears `thresh`
    ///
    /// `pairs` is indexed `[f][o]`, `f` in `0..n_fcst`, `o` in `0..n_obs`.
    pub fn do_match_merge(&mut self, pairs: &[Vec<PairAtt3D>], thresh: f64) {
        for (f, row) in pairs.iter().enumerate() {
            for (o, pair) in row.iter().enumerate() {
                if pair.total_interest >= thresh {
                    self.graph.set_edge(f, o);
                    self.partition
                        .merge_values(self.graph.f_index(f), self.graph.o_index(o));
                }
            }
        }
    }

    pub fn graph(&self) -> &FoGraph {
        &self.graph
    }

    /// All composites (partition classes with more than one member), in
    /// insertion order
    pub fn composites(&self) -> Vec<&[i32]> {
        self.partition.composites()
    }

    /// Forecast object indices belonging to a composite (a partition class)
    pub fn fcst_composite<'a>(&self, class: &'a [i32]) -> Vec<usize> {
        class
            .iter()
            .copied()
            .filter(|&v| (v as usize) < self.n_fcst)
            .map(|v| v as usize)
            .collect()
    }

    /// Observation object indices belonging to a composite
    pub fn obs_composite<'a>(&self, class: &'a [i32]) -> Vec<usize> {
        class
            .iter()
            .copied()
            .filter(|&v| (v as usize) >= self.n_fcst)
            .map(|v| v as usize - self.n_fcst)
            .collect()
    }

    /// Whether partition class `class` includes forecast object `f`
    pub fn composite_with_fcst(&self, class: &[i32], f: usize) -> bool {
        class.contains(&self.graph.f_index(f))
    }

    /// Whether partition class `class` includes observation object `o`
    pub fn composite_with_obs(&self, class: &[i32], o: usize) -> bool {
        class.contains(&self.graph.o_index(o))
    }

    /// The index into [`Self::composites`] that forecast object `f` belongs
    /// to, or `None` if `f` never matched anything
    pub fn map_fcst_id_to_composite(&self, f: usize) -> Option<usize> {
        let v = self.graph.f_index(f);
        self.composites().iter().position(|c| c.contains(&v))
    }

    /// The index into [`Self::composites`] that observation object `o`
    /// belongs to, or `None` if `o` never matched anything
    pub fn map_obs_id_to_composite(&self, o: usize) -> Option<usize> {
        let v = self.graph.o_index(o);
        self.composites().iter().position(|c| c.contains(&v))
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(total_interest: f64) -> PairAtt3D {
        PairAtt3D {
            fcst_object_number: 0,
            obs_object_number: 0,
            fcst_cluster_number: 0,
            obs_cluster_number: 0,
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
            total_interest,
        }
    }

    #[test]
    fn edges_above_threshold_merge_into_a_composite() {
        let mut engine = MatchMergeEngine::set_size(2, 2);
        let pairs = vec![
            vec![pair(0.9), pair(0.1)],
            vec![pair(0.1), pair(0.9)],
        ];
        engine.do_match_merge(&pairs, 0.5);

        assert!(engine.graph().has_edge(0, 0));
        assert!(engine.graph().has_edge(1, 1));
        assert!(!engine.graph().has_edge(0, 1));

        let composites = engine.composites();
        assert_eq!(composites.len(), 2);
    }

    #[test]
    fn two_forecasts_sharing_one_observation_end_up_in_one_composite() {
        let mut engine = MatchMergeEngine::set_size(2, 1);
        let pairs = vec![vec![pair(0.9)], vec![pair(0.9)]];
        engine.do_match_merge(&pairs, 0.5);

        let composites = engine.composites();
        assert_eq!(composites.len(), 1);
        let fcst_members = engine.fcst_composite(composites[0]);
        assert_eq!(fcst_members.len(), 2);
        let obs_members = engine.obs_composite(composites[0]);
        assert_eq!(obs_members, vec![0]);
    }

    #[test]
    fn unmatched_objects_never_appear_in_a_composite() {
        let mut engine = MatchMergeEngine::set_size(1, 1);
        let pairs = vec![vec![pair(0.1)]];
        engine.do_match_merge(&pairs, 0.5);
        assert!(engine.composites().is_empty());
        assert_eq!(engine.map_fcst_id_to_composite(0), None);
    }
}
