use nalgebra::{Matrix2, SymmetricEigen};

/// Raw and central first/second-order moments of a 3D (x, y, t) object
///
/// Accumulated with [`Moments3D::add`] over every voxel of an object, then
/// [`Moments3D::centralize`] shifts the second-order sums onto the centroid
/// before velocity and axis-angle are derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments3D {
    pub n: f64,
    pub sx: f64,
    pub sy: f64,
    pub st: f64,
    pub sxx: f64,
    pub syy: f64,
    pub stt: f64,
    pub sxy: f64,
    pub sxt: f64,
    pub syt: f64,
}

impl Default for Moments3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Moments3D {
    /// A zeroed accumulator, ready for [`Self::add`]
    pub fn new() -> Self {
        Self {
            n: 0.0,
            sx: 0.0,
            sy: 0.0,
            st: 0.0,
            sxx: 0.0,
            syy: 0.0,
            stt: 0.0,
            sxy: 0.0,
            sxt: 0.0,
            syt: 0.0,
        }
    }

    /// Accumulate one voxel of the object at integer grid coordinate `(x, y, t)`
    pub fn add(&mut self, x: i32, y: i32, t: i32) {
        let (x, y, t) = (x as f64, y as f64, t as f64);
        self.n += 1.0;
        self.sx += x;
        self.sy += y;
        self.st += t;
        self.sxx += x * x;
        self.syy += y * y;
        self.stt += t * t;
        self.sxy += x * y;
        self.sxt += x * t;
        self.syt += y * t;
    }

    /// The object's centroid, `(xbar, ybar, tbar)`
    ///
    /// `n` must be nonzero (an empty object has no centroid); callers are
    /// expected to have already rejected empty objects upstream.
    pub fn centroid(&self) -> (f64, f64, f64) {
        (self.sx / self.n, self.sy / self.n, self.st / self.n)
    }

    /// Shift the second-order sums from the raw origin onto the centroid
    ///
    /// After calling this, `sxx`/`syy`/`stt`/`sxy`/`sxt`/`syt` are central
    /// moments (`Sxx = sum((x - xbar)^2)`, etc). `sx`/`sy`/`st`/`n` are left
    /// alone so [`Self::centroid`] keeps working.
    pub fn centralize(&mut self) {
        let (xbar, ybar, tbar) = self.centroid();

        self.sxx -= self.n * xbar * xbar;
        self.syy -= self.n * ybar * ybar;
        self.stt -= self.n * tbar * tbar;
        self.sxy -= self.n * xbar * ybar;
        self.sxt -= self.n * xbar * tbar;
        self.syt -= self.n * ybar * tbar;
    }

    /// 3D velocity of the object, `(Vx, Vy)` in grid squares per timestep
    ///
    /// Must be called after [`Self::centralize`]. Requires `Stt != 0`, i.e.
    /// the object spans more than one timestep; callers check
    /// `n_times() > 1` before reaching here.
    pub fn velocity(&self) -> (f64, f64) {
        (self.sxt / self.stt, self.syt / self.stt)
    }

    /// Orientation angle, in degrees, of the object's dominant spatial axis
    ///
    /// Derived from the eigenvector of the largest eigenvalue of the 2x2
    /// spatial covariance matrix `[[Sxx, Sxy], [Sxy, Syy]]`, then folded into
    /// `(-90, 90]` degrees the same way [`crate::SingleAtt3D::set_spatial_axis`]
    /// does.
    ///
    /// Must be called after [`Self::centralize`].
    pub fn spatial_axis_angle(&self) -> f64 {
        let cov = Matrix2::new(self.sxx, self.sxy, self.sxy, self.syy);
        let eigen = SymmetricEigen::new(cov);

        let (i_max, _) = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();

        let v = eigen.eigenvectors.column(i_max);
        let angle = v[1].atan2(v[0]).to_degrees();

        fold_axis_angle(angle)
    }
}

/// Fold an axis angle into `(-90, 90]` degrees
///
/// `angle += 180 * floor((90 - angle) / 180)`, taken literally from the
/// original tool rather than re-derived.
pub fn fold_axis_angle(angle: f64) -> f64 {
    angle + 180.0 * ((90.0 - angle) / 180.0).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_a_single_voxel_is_itself() {
        let mut m = Moments3D::new();
        m.add(3, 4, 5);
        assert_eq!(m.centroid(), (3.0, 4.0, 5.0));
    }

    #[test]
    fn velocity_recovers_constant_motion() {
        // centroid moves +2 in x and -1 in y each timestep
        let mut m = Moments3D::new();
        for t in 0..5 {
            m.add(2 * t, -t, t);
        }
        m.centralize();
        let (vx, vy) = m.velocity();
        assert!((vx - 2.0).abs() < 1e-9);
        assert!((vy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn fold_axis_angle_stays_within_bounds() {
        assert!((fold_axis_angle(0.0) - 0.0).abs() < 1e-9);
        assert!((fold_axis_angle(90.0) - 90.0).abs() < 1e-9);
        assert!((fold_axis_angle(91.0) - (-89.0)).abs() < 1e-9);
        assert!((fold_axis_angle(-91.0) - 89.0).abs() < 1e-9);
        assert!((fold_axis_angle(180.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn spatial_axis_angle_recovers_a_pure_x_line() {
        // a purely horizontal (x-direction) spread should produce angle 0
        let mut m = Moments3D::new();
        for x in -3..=3 {
            m.add(x, 0, 0);
        }
        m.centralize();
        let angle = m.spatial_axis_angle();
        assert!(angle.abs() < 1e-6);
    }
}
