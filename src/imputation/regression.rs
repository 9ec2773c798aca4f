use nalgebra::{DMatrix, DVector};
use ndarray::Array1;

const SVD_EPS: f64 = 1e-12;

/// `ln(heat + 1) = intercept + slope * ln(rank + 1)`, fitted by ordinary least squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    pub intercept: f64,
    pub slope: f64,
}

impl PowerLawFit {
    /// Fit on known `(rank, heat)` pairs. Returns `None` when fewer than
    /// `min_points` pairs are given or all ranks coincide (no slope).
    pub fn fit(points: &[(u32, i64)], min_points: usize) -> Option<Self> {
        if points.len() < min_points.max(2) {
            return None;
        }

        let log_x = log1p_array(points.iter().map(|&(rank, _)| rank as f64));
        let log_y = log1p_array(points.iter().map(|&(_, heat)| heat as f64));

        if log_x.var(0.0) <= 0.0 {
            return None;
        }

        let (intercept, slope) = solve_least_squares(&log_x, &log_y)?;
        if !intercept.is_finite() || !slope.is_finite() {
            return None;
        }

        Some(Self { intercept, slope })
    }

    /// Predicted heat at `rank`, back-transformed and floored at zero.
    pub fn predict(&self, rank: u32) -> f64 {
        let log_x = (rank as f64 + 1.0).ln();
        let prediction = (self.intercept + self.slope * log_x).exp() - 1.0;
        prediction.max(0.0)
    }
}

fn log1p_array(values: impl Iterator<Item = f64>) -> Array1<f64> {
    Array1::from_iter(values).mapv(|v| (v + 1.0).ln())
}

fn solve_least_squares(x: &Array1<f64>, y: &Array1<f64>) -> Option<(f64, f64)> {
    let n = x.len();
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let target = DVector::from_iterator(n, y.iter().copied());

    let coefficients = design.svd(true, true).solve(&target, SVD_EPS).ok()?;
    Some((coefficients[0], coefficients[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn test_exact_power_law_is_recovered() {
        // heat + 1 = 1000 * (rank + 1)^-2
        let points: Vec<(u32, i64)> = vec![(1, 249), (4, 39), (9, 9)];
        let fit = PowerLawFit::fit(&points, 2).unwrap();

        assert_close(fit.slope, -2.0);
        assert_close(fit.intercept, 1000f64.ln());
        assert_close(fit.predict(3), 61.5);
    }

    #[test]
    fn test_two_points_define_a_line() {
        let fit = PowerLawFit::fit(&[(1, 50_000), (3, 10_000)], 2).unwrap();

        assert_close(fit.predict(1), 50_000.0);
        assert_close(fit.predict(3), 10_000.0);
        let middle = fit.predict(2);
        assert!(middle > 10_000.0 && middle < 50_000.0);
    }

    #[test]
    fn test_single_point_cannot_fit() {
        assert!(PowerLawFit::fit(&[(1, 100)], 2).is_none());
        assert!(PowerLawFit::fit(&[], 2).is_none());
    }

    #[test]
    fn test_identical_ranks_cannot_fit() {
        assert!(PowerLawFit::fit(&[(2, 100), (2, 300)], 2).is_none());
    }

    #[test]
    fn test_prediction_is_never_negative() {
        let fit = PowerLawFit { intercept: -5.0, slope: -3.0 };
        assert_eq!(fit.predict(50), 0.0);
    }
}
