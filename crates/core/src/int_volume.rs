use crate::error::{Error, Result};
use crate::moments::Moments3D;

/// A dense 3D (x, y, t) field of integer labels
///
/// Produced by thresholding a [`crate::FloatVolume`] (a 0/1 mask) or by
/// [`IntVolume::label_components`] (dense, 1-based object labels, `0` means
/// background).
#[derive(Debug, Clone, PartialEq)]
pub struct IntVolume {
    nx: usize,
    ny: usize,
    nt: usize,
    data: Vec<i32>,
}

impl IntVolume {
    pub fn new(nx: usize, ny: usize, nt: usize, data: Vec<i32>) -> Result<Self> {
        if nx == 0 || ny == 0 || nt == 0 {
            return Err(Error::EmptyVolume {
                name: "IntVolume",
                nx,
                ny,
                nt,
            });
        }
        debug_assert_eq!(data.len(), nx * ny * nt);
        Ok(Self { nx, ny, nt, data })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }
    pub fn ny(&self) -> usize {
        self.ny
    }
    pub fn nt(&self) -> usize {
        self.nt
    }

    fn index(&self, x: usize, y: usize, t: usize) -> usize {
        (t * self.ny + y) * self.nx + x
    }

    pub fn get(&self, x: usize, y: usize, t: usize) -> i32 {
        self.data[self.index(x, y, t)]
    }

    fn set(&mut self, x: usize, y: usize, t: usize, v: i32) {
        let i = self.index(x, y, t);
        self.data[i] = v;
    }

    /// Largest label present (`0` if the volume is all background)
    pub fn max_label(&self) -> i32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Number of voxels carrying `label`
    pub fn volume(&self, label: i32) -> i64 {
        self.data.iter().filter(|&&v| v == label).count() as i64
    }

    /// 6-connected (x +/-1, y +/-1, t +/-1) connected-component labeling
    ///
    /// Treats every nonzero voxel of `self` as foreground and assigns dense,
    /// 1-based labels in deterministic raster-scan order (`t`, then `y`, then
    /// `x`, fastest-varying last): a two-pass union-find over provisional
    /// labels, then a compaction pass so labels are contiguous starting at 1
    /// in first-seen order.
    pub fn label_components(&self) -> IntVolume {
        let n = self.data.len();
        let mut provisional = vec![0i32; n];
        let mut parent: Vec<usize> = Vec::new();
        let mut next_label = 0usize;

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        fn union(parent: &mut [usize], a: usize, b: usize) {
            let ra = find(parent, a);
            let rb = find(parent, b);
            if ra != rb {
                parent[rb.max(ra)] = ra.min(rb);
            }
        }

        for t in 0..self.nt {
            for y in 0..self.ny {
                for x in 0..self.nx {
                    if self.get(x, y, t) == 0 {
                        continue;
                    }

                    let mut neighbor_labels = Vec::with_capacity(3);
                    if x > 0 {
                        let l = provisional[self.index(x - 1, y, t)];
                        if l != 0 {
                            neighbor_labels.push(l as usize - 1);
                        }
                    }
                    if y > 0 {
                        let l = provisional[self.index(x, y - 1, t)];
                        if l != 0 {
                            neighbor_labels.push(l as usize - 1);
                        }
                    }
                    if t > 0 {
                        let l = provisional[self.index(x, y, t - 1)];
                        if l != 0 {
                            neighbor_labels.push(l as usize - 1);
                        }
                    }

                    let idx = self.index(x, y, t);
                    if neighbor_labels.is_empty() {
                        parent.push(next_label);
                        provisional[idx] = (next_label + 1) as i32;
                        next_label += 1;
                    } else {
                        let first = neighbor_labels[0];
                        for &other in &neighbor_labels[1..] {
                            union(&mut parent, first, other);
                        }
                        provisional[idx] = (first + 1) as i32;
                    }
                }
            }
        }

        // compact roots into dense 1-based labels, ordered by first occurrence
        let mut root_to_dense: Vec<i32> = vec![0; parent.len()];
        let mut dense_next = 1i32;
        let mut out = vec![0i32; n];

        for (idx, &p) in provisional.iter().enumerate() {
            if p == 0 {
                continue;
            }
            let root = find(&mut parent, p as usize - 1);
            if root_to_dense[root] == 0 {
                root_to_dense[root] = dense_next;
                dense_next += 1;
            }
            out[idx] = root_to_dense[root];
        }

        IntVolume {
            nx: self.nx,
            ny: self.ny,
            nt: self.nt,
            data: out,
        }
    }

    /// Drop objects with fewer than `min_volume` voxels, then relabel densely
    pub fn toss_small_objects(&self, min_volume: i64) -> IntVolume {
        let max_label = self.max_label();
        let mut counts = vec![0i64; max_label as usize + 1];
        for &v in &self.data {
            if v != 0 {
                counts[v as usize] += 1;
            }
        }

        let mut remap = vec![0i32; max_label as usize + 1];
        let mut next = 1i32;
        for (label, &count) in counts.iter().enumerate().skip(1) {
            if count >= min_volume {
                remap[label] = next;
                next += 1;
            }
        }

        let out = self
            .data
            .iter()
            .map(|&v| if v == 0 { 0 } else { remap[v as usize] })
            .collect();

        IntVolume {
            nx: self.nx,
            ny: self.ny,
            nt: self.nt,
            data: out,
        }
    }

    /// A binary (0/1) mask of just the voxels carrying `label`
    pub fn select(&self, label: i32) -> IntVolume {
        let data = self
            .data
            .iter()
            .map(|&v| if v == label { 1 } else { 0 })
            .collect();
        IntVolume {
            nx: self.nx,
            ny: self.ny,
            nt: self.nt,
            data,
        }
    }

    /// A binary (0/1) mask of the voxels carrying any label in `labels`
    ///
    /// Used to pull out a composite object's cluster as a single mask, where
    /// the cluster is the union of several of [`Self::label_components`]'s
    /// simple-object labels.
    pub fn select_cluster(&self, labels: &[i32]) -> IntVolume {
        let data = self
            .data
            .iter()
            .map(|&v| if labels.contains(&v) { 1 } else { 0 })
            .collect();
        IntVolume {
            nx: self.nx,
            ny: self.ny,
            nt: self.nt,
            data,
        }
    }

    /// The `(x, y)` label slice at a fixed time index `t`
    pub fn const_t_slice(&self, t: usize) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.nx * self.ny);
        for y in 0..self.ny {
            for x in 0..self.nx {
                out.push(self.get(x, y, t));
            }
        }
        out
    }

    /// A binary mask of `label` restricted to timestep `t`
    pub fn const_t_mask(&self, t: usize, label: i32) -> Vec<bool> {
        self.const_t_slice(t).into_iter().map(|v| v == label).collect()
    }

    /// Accumulate raw (not yet centralized) [`Moments3D`] for `label`
    pub fn calc_3d_moments(&self, label: i32) -> Result<Moments3D> {
        let mut m = Moments3D::new();
        for t in 0..self.nt {
            for y in 0..self.ny {
                for x in 0..self.nx {
                    if self.get(x, y, t) == label {
                        m.add(x as i32, y as i32, t as i32);
                    }
                }
            }
        }
        if m.n == 0.0 {
            return Err(Error::EmptyObject { label });
        }
        Ok(m)
    }

    /// Inclusive bounding box `(xmin, xmax, ymin, ymax, tmin, tmax)` of `label`
    pub fn calc_3d_bbox(&self, label: i32) -> Result<(i32, i32, i32, i32, i32, i32)> {
        let (mut xmin, mut ymin, mut tmin) = (i32::MAX, i32::MAX, i32::MAX);
        let (mut xmax, mut ymax, mut tmax) = (i32::MIN, i32::MIN, i32::MIN);
        let mut found = false;

        for t in 0..self.nt {
            for y in 0..self.ny {
                for x in 0..self.nx {
                    if self.get(x, y, t) == label {
                        found = true;
                        let (xi, yi, ti) = (x as i32, y as i32, t as i32);
                        xmin = xmin.min(xi);
                        xmax = xmax.max(xi);
                        ymin = ymin.min(yi);
                        ymax = ymax.max(yi);
                        tmin = tmin.min(ti);
                        tmax = tmax.max(ti);
                    }
                }
            }
        }

        if !found {
            return Err(Error::EmptyObject { label });
        }

        Ok((xmin, xmax, ymin, ymax, tmin, tmax))
    }

    /// The 2D (x, y) centroid of `label` restricted to timestep `t`
    ///
    /// Returns `None` if `label` has no voxels at `t` (the slice through a
    /// composite object's other cluster, for instance).
    pub fn calc_2d_centroid_at_t(&self, t: usize, label: i32) -> Option<(f64, f64)> {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0.0);
        for y in 0..self.ny {
            for x in 0..self.nx {
                if self.get(x, y, t) == label {
                    sx += x as f64;
                    sy += y as f64;
                    n += 1.0;
                }
            }
        }
        if n == 0.0 {
            None
        } else {
            Some((sx / n, sy / n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_3x3x2(on: &[(usize, usize, usize)]) -> IntVolume {
        let mut data = vec![0i32; 3 * 3 * 2];
        let mut v = IntVolume::new(3, 3, 2, data.clone()).unwrap();
        for &(x, y, t) in on {
            v.set(x, y, t, 1);
        }
        data = v.data;
        IntVolume::new(3, 3, 2, data).unwrap()
    }

    #[test]
    fn labels_two_disjoint_blobs_distinctly() {
        let v = mask_3x3x2(&[(0, 0, 0), (1, 0, 0), (2, 2, 1)]);
        let labeled = v.label_components();
        let a = labeled.get(0, 0, 0);
        let b = labeled.get(1, 0, 0);
        let c = labeled.get(2, 2, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(labeled.max_label(), 2);
    }

    #[test]
    fn connects_voxels_through_the_time_axis() {
        let v = mask_3x3x2(&[(0, 0, 0), (0, 0, 1)]);
        let labeled = v.label_components();
        assert_eq!(labeled.get(0, 0, 0), labeled.get(0, 0, 1));
        assert_eq!(labeled.max_label(), 1);
    }

    #[test]
    fn does_not_connect_diagonal_neighbours() {
        let v = mask_3x3x2(&[(0, 0, 0), (1, 1, 0)]);
        let labeled = v.label_components();
        assert_ne!(labeled.get(0, 0, 0), labeled.get(1, 1, 0));
        assert_eq!(labeled.max_label(), 2);
    }

    #[test]
    fn toss_small_objects_relabels_densely() {
        let v = mask_3x3x2(&[(0, 0, 0), (2, 2, 0), (2, 2, 1)]);
        let labeled = v.label_components();
        // the (0,0,0) singleton has volume 1, the other blob has volume 2
        let tossed = labeled.toss_small_objects(2);
        assert_eq!(tossed.get(0, 0, 0), 0);
        assert_eq!(tossed.max_label(), 1);
        assert_eq!(tossed.get(2, 2, 0), 1);
    }

    #[test]
    fn bbox_and_moments_of_a_known_object() {
        let v = mask_3x3x2(&[(0, 0, 0), (1, 0, 0), (1, 1, 0)]);
        let labeled = v.label_components();
        let bbox = labeled.calc_3d_bbox(1).unwrap();
        assert_eq!(bbox, (0, 1, 0, 1, 0, 0));

        let moments = labeled.calc_3d_moments(1).unwrap();
        assert_eq!(moments.n, 3.0);
    }

    #[test]
    fn select_cluster_unions_every_matching_label() {
        let v = mask_3x3x2(&[(0, 0, 0), (2, 2, 0), (2, 2, 1)]);
        let labeled = v.label_components();
        let cluster = labeled.select_cluster(&[1, 2]);
        assert_eq!(cluster.get(0, 0, 0), 1);
        assert_eq!(cluster.get(2, 2, 0), 1);
        assert_eq!(cluster.get(2, 2, 1), 1);
        assert_eq!(cluster.get(1, 1, 0), 0);
    }

    #[test]
    fn calc_2d_centroid_at_t_is_none_when_label_absent_at_that_time() {
        let v = mask_3x3x2(&[(0, 0, 0)]);
        let labeled = v.label_components();
        assert!(labeled.calc_2d_centroid_at_t(1, 1).is_none());
        assert_eq!(labeled.calc_2d_centroid_at_t(0, 1), Some((0.0, 0.0)));
    }
}
