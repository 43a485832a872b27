use crate::int_volume::IntVolume;
use crate::single_att::SingleAtt3D;

/// Pairwise attributes between one forecast object and one observation object
///
/// Field names mirror the original tool's pair attribute table columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAtt3D {
    pub fcst_object_number: i32,
    pub obs_object_number: i32,
    pub fcst_cluster_number: i32,
    pub obs_cluster_number: i32,

    pub intersection_volume: i64,
    pub is_simple: bool,

    pub time_centroid_delta: f64,
    pub space_centroid_dist: f64,
    pub direction_diff: f64,
    pub speed_delta: f64,
    pub volume_ratio: f64,
    pub axis_diff: f64,

    pub duration_difference: i32,
    pub start_time_delta: i32,
    pub end_time_delta: i32,

    pub total_interest: f64,
}

const DIRECTION_TOL: f64 = 1.0e-3;

/// Compute the pair attributes between `fcst_obj`/`fcst_att` and `obs_obj`/`obs_att`
///
/// `total_interest` is left at `0.0`; it is filled in separately once the
/// interest calculator has been applied (see [`crate::InterestCalculator`]).
pub fn calc_3d_pair_atts(
    fcst_obj: &IntVolume,
    obs_obj: &IntVolume,
    fcst_att: &SingleAtt3D,
    obs_att: &SingleAtt3D,
) -> PairAtt3D {
    let intersection_volume = intersection_volume(fcst_obj, fcst_att.object_number, obs_obj, obs_att.object_number);

    let time_centroid_delta = obs_att.tbar - fcst_att.tbar;

    let dx = fcst_att.xbar - obs_att.xbar;
    let dy = fcst_att.ybar - obs_att.ybar;
    let space_centroid_dist = (dx * dx + dy * dy).sqrt();

    let speed_delta = fcst_att.speed() - obs_att.speed();

    let direction_diff = direction_difference(
        fcst_att.xvelocity,
        fcst_att.yvelocity,
        obs_att.xvelocity,
        obs_att.yvelocity,
    );

    let volume_ratio = fcst_att.volume as f64 / obs_att.volume as f64;

    let mut axis_diff = (fcst_att.spatial_axis_angle - obs_att.spatial_axis_angle).abs();
    if axis_diff > 90.0 {
        axis_diff -= 90.0;
    }

    let start_time_delta = fcst_att.tmin - obs_att.tmin;
    let end_time_delta = fcst_att.tmax - obs_att.tmax;
    let duration_difference = fcst_att.n_times() - obs_att.n_times();

    PairAtt3D {
        fcst_object_number: fcst_att.object_number,
        obs_object_number: obs_att.object_number,
        fcst_cluster_number: fcst_att.cluster_number,
        obs_cluster_number: obs_att.cluster_number,
        intersection_volume,
        is_simple: fcst_att.is_simple && obs_att.is_simple,
        time_centroid_delta,
        space_centroid_dist,
        direction_diff,
        speed_delta,
        volume_ratio,
        axis_diff,
        duration_difference,
        start_time_delta,
        end_time_delta,
        total_interest: 0.0,
    }
}

fn intersection_volume(fcst: &IntVolume, fcst_label: i32, obs: &IntVolume, obs_label: i32) -> i64 {
    let mut iv = 0i64;
    for t in 0..fcst.nt() {
        for y in 0..fcst.ny() {
            for x in 0..fcst.nx() {
                if fcst.get(x, y, t) == fcst_label && obs.get(x, y, t) == obs_label {
                    iv += 1;
                }
            }
        }
    }
    iv
}

/// Angular difference between two velocity vectors, in degrees
///
/// Falls back to `0.0` if either object is effectively stationary (speed
/// below `1e-3`), and to `0.0` again if the vectors are near-parallel
/// (`cos(angle) > 0.999999`) to avoid `acos` blowing up near its domain edge.
fn direction_difference(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let b1 = (x1 * x1 + y1 * y1).sqrt();
    let b2 = (x2 * x2 + y2 * y2).sqrt();

    if b1.abs() < DIRECTION_TOL || b2.abs() < DIRECTION_TOL {
        return 0.0;
    }

    let (x1, y1) = (x1 / b1, y1 / b1);
    let (x2, y2) = (x2 / b2, y2 / b2);

    let b = x1 * x2 + y1 * y2;

    if b > 0.999999 {
        0.0
    } else {
        b.acos().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn att(object_number: i32, volume: i64, xbar: f64, ybar: f64, tbar: f64, xv: f64, yv: f64, axis: f64, tmin: i32, tmax: i32) -> SingleAtt3D {
        SingleAtt3D {
            object_number,
            cluster_number: object_number,
            is_fcst: true,
            is_simple: true,
            volume,
            xbar,
            ybar,
            tbar,
            centroid_lat: 0.0,
            centroid_lon: 0.0,
            xmin: 0,
            xmax: 0,
            ymin: 0,
            ymax: 0,
            tmin,
            tmax,
            complexity: 1.0,
            xvelocity: xv,
            yvelocity: yv,
            spatial_axis_angle: axis,
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

    #[test]
    fn stationary_objects_have_zero_direction_difference() {
        assert_eq!(direction_difference(0.0, 0.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn opposite_direction_objects_differ_by_180_degrees() {
        let d = direction_difference(1.0, 0.0, -1.0, 0.0);
        assert!((d - 180.0).abs() < 1e-6);
    }

    #[test]
    fn axis_diff_folds_literally_above_ninety() {
        let fcst = att(1, 4, 0.0, 0.0, 0.0, 0.0, 0.0, 170.0, 0, 0);
        let obs = att(1, 4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0, 0);
        let fcst_vol = IntVolume::new(1, 1, 1, vec![1]).unwrap();
        let obs_vol = IntVolume::new(1, 1, 1, vec![1]).unwrap();
        let p = calc_3d_pair_atts(&fcst_vol, &obs_vol, &fcst, &obs);
        // |170 - 0| = 170, folded literally: 170 - 90 = 80
        assert!((p.axis_diff - 80.0).abs() < 1e-9);
    }

    #[test]
    fn volume_ratio_is_fcst_over_obs() {
        let fcst = att(1, 8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0, 0);
        let obs = att(1, 4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0, 0);
        let fcst_vol = IntVolume::new(1, 1, 1, vec![1]).unwrap();
        let obs_vol = IntVolume::new(1, 1, 1, vec![1]).unwrap();
        let p = calc_3d_pair_atts(&fcst_vol, &obs_vol, &fcst, &obs);
        assert_eq!(p.volume_ratio, 2.0);
    }
}
