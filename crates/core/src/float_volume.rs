use crate::error::{Error, Result};
use crate::int_volume::IntVolume;
use stobj_config::Threshold;

/// A dense 3D (x, y, t) field of real-valued samples
///
/// Missing data is represented with a configurable sentinel value rather than
/// `NAN`, so ordinary float comparisons used by convolution/thresholding
/// never have to special-case `NaN` propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatVolume {
    nx: usize,
    ny: usize,
    nt: usize,
    data: Vec<f64>,
    sentinel: f64,
}

impl FloatVolume {
    /// Build a volume from a flat, row-major (x fastest, then y, then t) buffer
    pub fn new(nx: usize, ny: usize, nt: usize, data: Vec<f64>, sentinel: f64) -> Result<Self> {
        if nx == 0 || ny == 0 || nt == 0 {
            return Err(Error::EmptyVolume {
                name: "FloatVolume",
                nx,
                ny,
                nt,
            });
        }
        debug_assert_eq!(data.len(), nx * ny * nt);
        Ok(Self {
            nx,
            ny,
            nt,
            data,
            sentinel,
        })
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
    pub fn sentinel(&self) -> f64 {
        self.sentinel
    }

    fn index(&self, x: usize, y: usize, t: usize) -> usize {
        (t * self.ny + y) * self.nx + x
    }

    /// Raw sample at `(x, y, t)`, which may be the sentinel value
    pub fn get(&self, x: usize, y: usize, t: usize) -> f64 {
        self.data[self.index(x, y, t)]
    }

    /// `true` if the sample at `(x, y, t)` is not the missing-data sentinel
    pub fn is_valid(&self, x: usize, y: usize, t: usize) -> bool {
        self.get(x, y, t) != self.sentinel
    }

    /// Spatial-disk + temporal-window mean convolution
    ///
    /// For every output cell, averages every valid sample within `radius`
    /// grid squares (inclusive, circular footprint `dx^2 + dy^2 <= radius^2`)
    /// and within `time_window` timesteps on either side. A cell is missing
    /// in the output only if every sample in its footprint is missing.
    pub fn convolve(&self, radius: i64, time_window: i64) -> FloatVolume {
        let mut out = vec![self.sentinel; self.data.len()];
        let r2 = radius * radius;

        for t in 0..self.nt {
            for y in 0..self.ny {
                for x in 0..self.nx {
                    let mut sum = 0.0;
                    let mut valid = 0usize;

                    for dt in -time_window..=time_window {
                        let tt = t as i64 + dt;
                        if tt < 0 || tt >= self.nt as i64 {
                            continue;
                        }
                        for dy in -radius..=radius {
                            let yy = y as i64 + dy;
                            if yy < 0 || yy >= self.ny as i64 {
                                continue;
                            }
                            for dx in -radius..=radius {
                                if dx * dx + dy * dy > r2 {
                                    continue;
                                }
                                let xx = x as i64 + dx;
                                if xx < 0 || xx >= self.nx as i64 {
                                    continue;
                                }

                                let v = self.get(xx as usize, yy as usize, tt as usize);
                                if v != self.sentinel {
                                    valid += 1;
                                    sum += v;
                                }
                            }
                        }
                    }

                    if valid > 0 {
                        out[self.index(x, y, t)] = sum / valid as f64;
                    }
                }
            }
        }

        FloatVolume {
            nx: self.nx,
            ny: self.ny,
            nt: self.nt,
            data: out,
            sentinel: self.sentinel,
        }
    }

    /// Threshold the (typically already convolved) field into a binary mask
    ///
    /// Missing samples never pass the threshold, regardless of its operator.
    pub fn threshold(&self, thresh: &Threshold) -> IntVolume {
        let mask = self
            .data
            .iter()
            .map(|&v| {
                if v == self.sentinel {
                    0
                } else if thresh.check(v) {
                    1
                } else {
                    0
                }
            })
            .collect();

        IntVolume::new(self.nx, self.ny, self.nt, mask).expect("same dimensions as source volume")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stobj_config::ThresholdOp;

    fn flat(nx: usize, ny: usize, nt: usize, fill: f64) -> FloatVolume {
        FloatVolume::new(nx, ny, nt, vec![fill; nx * ny * nt], -9999.0).unwrap()
    }

    #[test]
    fn rejects_zero_length_axis() {
        assert!(FloatVolume::new(0, 1, 1, vec![], -9999.0).is_err());
    }

    #[test]
    fn convolve_of_a_uniform_field_is_unchanged() {
        let v = flat(5, 5, 3, 10.0);
        let smoothed = v.convolve(1, 1);
        for t in 0..3 {
            for y in 0..5 {
                for x in 0..5 {
                    assert!((smoothed.get(x, y, t) - 10.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn convolve_averages_whatever_valid_samples_are_present() {
        let mut data = vec![-9999.0; 5 * 5 * 1];
        data[2 * 5 + 2] = 10.0; // single valid sample at the centre
        let v = FloatVolume::new(5, 5, 1, data, -9999.0).unwrap();
        let smoothed = v.convolve(1, 0);
        // a single valid sample in the footprint is enough to produce a value
        assert!(smoothed.is_valid(2, 2, 0));
        assert!((smoothed.get(2, 2, 0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn convolve_marks_cells_missing_only_when_every_sample_is_missing() {
        let v = flat(3, 3, 1, -9999.0);
        let smoothed = v.convolve(1, 0);
        assert!(!smoothed.is_valid(1, 1, 0));
    }

    #[test]
    fn threshold_produces_a_binary_mask() {
        let mut data = vec![0.0; 3 * 3 * 1];
        data[4] = 5.0;
        let v = FloatVolume::new(3, 3, 1, data, -9999.0).unwrap();
        let mask = v.threshold(&Threshold::new(ThresholdOp::Ge, 1.0));
        assert_eq!(mask.get(1, 1, 0), 1);
        assert_eq!(mask.get(0, 0, 0), 0);
    }

    #[test]
    fn threshold_never_passes_missing_data() {
        let v = flat(2, 2, 1, -9999.0);
        let mask = v.threshold(&Threshold::new(ThresholdOp::Ge, -10000.0));
        assert_eq!(mask.get(0, 0, 0), 0);
    }
}
