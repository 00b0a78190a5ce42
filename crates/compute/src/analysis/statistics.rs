pub struct Statistics;

impl Statistics {
    pub fn sum(values: &[f64]) -> f64 {
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        sum
    }

    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(Self::sum(values) / values.len() as f64)
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        let mut min = first;
        let mut max = first;
        for &v in values.iter().skip(1) {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Non-null entries of an optional column, in order.
    pub fn present(values: impl IntoIterator<Item = Option<f64>>) -> Vec<f64> {
        values.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
        assert_eq!(Statistics::mean(&[]), None);
    }

    #[test]
    fn min_max_and_sum() {
        assert_eq!(Statistics::min_max(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(Statistics::min_max(&[]), None);
        assert_eq!(Statistics::sum(&[]), 0.0);
    }

    #[test]
    fn present_skips_nulls() {
        let v = Statistics::present([Some(1.0), None, Some(3.0)]);
        assert_eq!(v, vec![1.0, 3.0]);
    }
}
