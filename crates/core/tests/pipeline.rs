//! End-to-end scenarios spanning labeling, attribution and match/merge

use std::f64::consts::PI;

use stobj_core::{calc_3d_pair_atts, calc_3d_single_atts, IntVolume, MatchMergeEngine, PairAtt3D};
use stobj_geo::GridGeometry;

fn flat_geo(nx: usize, ny: usize) -> GridGeometry {
    let lats: Vec<f64> = (0..ny).map(|y| y as f64).collect();
    let lons: Vec<f64> = (0..nx).map(|x| x as f64).collect();
    GridGeometry::new(lats, lons).unwrap()
}

/// Rasterize a rotated rectangle centred at `(cx, cy)` into a 0/1 (x, y) slice
fn rotated_rectangle(nx: usize, ny: usize, cx: f64, cy: f64, angle_deg: f64, length: f64, width: f64) -> Vec<i32> {
    let theta = angle_deg * PI / 180.0;
    let (cos_t, sin_t) = (theta.cos(), theta.sin());
    let mut out = vec![0i32; nx * ny];

    for y in 0..ny {
        for x in 0..nx {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            // rotate into the rectangle's own frame
            let along = dx * cos_t + dy * sin_t;
            let across = -dx * sin_t + dy * cos_t;
            if along.abs() <= length / 2.0 && across.abs() <= width / 2.0 {
                out[y * nx + x] = 1;
            }
        }
    }
    out
}

/// A rigid, rotated rectangle translating at constant velocity across several
/// timesteps. Velocity and spatial axis angle should come back close to the
/// values the rectangle was actually moved with.
#[test]
fn velocity_and_axis_recovery_for_a_moving_rotated_rectangle() {
    let (nx, ny, nt) = (80, 80, 6);
    let (cx0, cy0) = (50.0, 10.0);
    let (vx, vy) = (-2.4, 3.0);
    let angle = 20.0_f64;

    let mut data = Vec::with_capacity(nx * ny * nt);
    for t in 0..nt {
        let cx = cx0 + vx * t as f64;
        let cy = cy0 + vy * t as f64;
        data.extend(rotated_rectangle(nx, ny, cx, cy, angle, 12.0, 6.0));
    }

    let volume = IntVolume::new(nx, ny, nt, data).unwrap();
    let labeled = volume.label_components();
    assert_eq!(labeled.max_label(), 1);

    let raw = vec![1.0; nx * ny * nt];
    let geo = flat_geo(nx, ny);
    let att = calc_3d_single_atts(&labeled, &raw, 1, true, &geo, 50.0).unwrap();

    assert!((att.xvelocity - vx).abs() < 0.1, "xvelocity = {}", att.xvelocity);
    assert!((att.yvelocity - vy).abs() < 0.1, "yvelocity = {}", att.yvelocity);
    assert!(
        (att.spatial_axis_angle - angle).abs() < 2.0,
        "spatial_axis_angle = {}",
        att.spatial_axis_angle
    );
}

/// Four components of known sizes; only those meeting `min_volume` survive,
/// and survivors are relabeled densely starting at 1 in first-seen order.
#[test]
fn tossing_small_objects_keeps_only_large_components_densely_relabeled() {
    let sizes = [10usize, 2500, 30, 12000];
    let mut data = Vec::new();
    for (label, &size) in sizes.iter().enumerate() {
        data.extend(std::iter::repeat(label as i32 + 1).take(size));
    }
    let total: usize = sizes.iter().sum();
    let volume = IntVolume::new(total, 1, 1, data).unwrap();

    let tossed = volume.toss_small_objects(100);

    assert_eq!(tossed.max_label(), 2);
    assert_eq!(tossed.volume(1), 2500);
    assert_eq!(tossed.volume(2), 12000);
    assert_eq!(tossed.volume(3), 0);
}

fn singleton_volume(label: i32) -> IntVolume {
    IntVolume::new(1, 1, 1, vec![label]).unwrap()
}

fn att(object_number: i32, xbar: f64) -> stobj_core::SingleAtt3D {
    stobj_core::SingleAtt3D {
        object_number,
        cluster_number: object_number,
        is_fcst: true,
        is_simple: true,
        volume: 1,
        xbar,
        ybar: 0.0,
        tbar: 0.0,
        centroid_lat: 0.0,
        centroid_lon: 0.0,
        xmin: 0,
        xmax: 0,
        ymin: 0,
        ymax: 0,
        tmin: 0,
        tmax: 0,
        complexity: 1.0,
        xvelocity: 0.0,
        yvelocity: 0.0,
        spatial_axis_angle: 0.0,
        cdist_travelled: 0.0,
        ptile_10: 0.0,
        ptile_25: 0.0,
        ptile_50: 0.0,
        ptile_75: 0.0,
        ptile_90: 0.0,
        ptile_value: 50.0,
        ptile_user: 0.0,
    }
}

/// Two forecast objects sharing a single observation match become one
/// composite, even though no fcst-fcst edge is ever created directly.
#[test]
fn two_forecasts_matching_one_observation_merge_transitively() {
    let f0 = singleton_volume(1);
    let o0 = singleton_volume(1);

    let f0_att = att(1, 0.0);
    let f1_att = att(1, 1.0);
    let o0_att = att(1, 0.5);

    let mut p00 = calc_3d_pair_atts(&f0, &o0, &f0_att, &o0_att);
    p00.total_interest = 0.9;
    let mut p10 = calc_3d_pair_atts(&f0, &o0, &f1_att, &o0_att);
    p10.total_interest = 0.9;

    let pairs: Vec<Vec<PairAtt3D>> = vec![vec![p00], vec![p10]];
    let mut engine = MatchMergeEngine::set_size(2, 2);
    engine.do_match_merge(&pairs, 0.5);

    let composites = engine.composites();
    assert_eq!(composites.len(), 1);
    assert_eq!(engine.fcst_composite(composites[0]), vec![0, 1]);
    assert_eq!(engine.obs_composite(composites[0]), vec![0]);
    assert_eq!(engine.map_fcst_id_to_composite(0), Some(0));
    assert_eq!(engine.map_fcst_id_to_composite(1), Some(0));
    assert_eq!(engine.map_obs_id_to_composite(1), None);
}

/// With no observation objects at all, match/merge never runs and no
/// composite ever forms; every forecast object stays unmatched.
#[test]
fn no_observation_objects_means_no_composites() {
    let engine = MatchMergeEngine::set_size(3, 0);
    assert!(engine.composites().is_empty());
    for f in 0..3 {
        assert_eq!(engine.map_fcst_id_to_composite(f), None);
    }
}
