use crate::error::{Error, Result};

/// Linear-nearest-rank percentile of a slice of samples
///
/// `pct` is in `[0, 100]`. The slice is sorted internally (a copy is taken),
/// and the result is the single order statistic nearest the requested rank —
/// no interpolation between bracketing values:
///
/// ```text
/// rank = round(pct / 100 * (n - 1))
/// result = sorted[rank]
/// ```
///
/// ```rust
/// # use stobj_utils::percentile;
/// let samples = vec![10.0, 30.0, 20.0, 40.0];
/// assert_eq!(percentile(&samples, 0.0).unwrap(), 10.0);
/// assert_eq!(percentile(&samples, 100.0).unwrap(), 40.0);
/// assert_eq!(percentile(&samples, 50.0).unwrap(), 30.0);
/// ```
pub fn percentile(samples: &[f64], pct: f64) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::SliceContainsNoValues);
    }

    if !(0.0..=100.0).contains(&pct) {
        return Err(Error::PercentileOutOfRange { requested: pct });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = ((pct / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    Ok(sorted[rank])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_returns_itself_regardless_of_percentile() {
        assert_eq!(percentile(&[7.5], 0.0).unwrap(), 7.5);
        assert_eq!(percentile(&[7.5], 90.0).unwrap(), 7.5);
    }

    #[test]
    fn rejects_empty_slice() {
        assert_eq!(percentile(&[], 50.0), Err(Error::SliceContainsNoValues));
    }

    #[test]
    fn rejects_out_of_range_percentile() {
        assert!(percentile(&[1.0, 2.0], 101.0).is_err());
        assert!(percentile(&[1.0, 2.0], -1.0).is_err());
    }

    #[test]
    fn matches_quartiles() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&samples, 25.0).unwrap(), 3.0);
        assert_eq!(percentile(&samples, 75.0).unwrap(), 8.0);
    }

    #[test]
    fn nearest_rank_does_not_interpolate() {
        // round(0.1 * 2) = round(0.2) = 0 -> sorted[0], not a value between 10 and 20
        let samples = vec![10.0, 20.0, 30.0];
        assert_eq!(percentile(&samples, 10.0).unwrap(), 10.0);
    }
}
