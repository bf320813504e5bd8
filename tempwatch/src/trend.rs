//! Least-squares trend line over the reading history.

// slope = (n*Σxy - Σx*Σy) / (n*Σx² - (Σx)²)
// intercept = (Σy - slope*Σx) / n
// with x = sample index, so spacing between ticks is ignored.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Line value at indices `0..n`.
    pub fn values(self, n: usize) -> impl Iterator<Item = f64> {
        (0..n).map(move |i| self.at(i as f64))
    }
}

/// Fits `value = slope * index + intercept`. Needs at least two points.
pub fn linear_fit(values: &[f64]) -> Option<Trend> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let x = || (0..values.len()).map(|i| i as f64);
    let sum_x: f64 = x().sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xx: f64 = x().map(|x| x * x).sum();
    let sum_xy: f64 = x().zip(values.iter()).map(|(x, y)| x * y).sum();

    let den = n * sum_xx - sum_x * sum_x;
    if den == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / den;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }
    Some(Trend { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_fit_below_two_points() {
        assert!(linear_fit(&[]).is_none());
        assert!(linear_fit(&[72.5]).is_none());
    }

    #[test]
    fn exact_line_is_recovered() {
        let t = linear_fit(&[60.0, 62.0, 64.0, 66.0]).expect("fit");
        assert!(close(t.slope, 2.0));
        assert!(close(t.intercept, 60.0));
    }

    #[test]
    fn flat_readings_have_zero_slope() {
        let t = linear_fit(&[70.0, 70.0, 70.0]).expect("fit");
        assert!(close(t.slope, 0.0));
        assert!(close(t.intercept, 70.0));
    }

    #[test]
    fn noisy_readings_fit_least_squares() {
        // y = 1, 3, 2 -> slope 0.5, intercept 1.5
        let t = linear_fit(&[1.0, 3.0, 2.0]).expect("fit");
        assert!(close(t.slope, 0.5));
        assert!(close(t.intercept, 1.5));
        let line: Vec<f64> = t.values(3).collect();
        assert_eq!(line.len(), 3);
        assert!(close(line[0], 1.5) && close(line[1], 2.0) && close(line[2], 2.5));
    }

    #[test]
    fn two_points_give_the_connecting_line() {
        let t = linear_fit(&[59.0, 77.0]).expect("fit");
        assert!(close(t.at(0.0), 59.0));
        assert!(close(t.at(1.0), 77.0));
    }
}
