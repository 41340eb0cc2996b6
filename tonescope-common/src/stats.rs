//! Descriptive statistics over feature columns
//!
//! Every aggregation here resolves empty or degenerate input to `None`
//! rather than NaN, so view handlers can render "N/A" without special
//! casing a numeric exception.

use serde::Serialize;

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Five-number summary plus outlier values: the semantic content of one
/// boxplot, independent of any rendering
#[derive(Debug, Clone, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Values beyond the 1.5 x IQR whisker fences
    pub outliers: Vec<f64>,
}

impl FiveNumberSummary {
    /// Summarize a group of values; `None` for an empty group
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.50);
        let q3 = percentile(&sorted, 0.75);

        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            outliers,
        })
    }
}

/// Linearly interpolated percentile of a sorted, non-empty slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}

/// Pearson correlation coefficient; `None` when the series differ in
/// length, have fewer than two points, or either has zero variance
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise Pearson matrix over the given columns.
///
/// Symmetric, with a unit diagonal for any column that varies at all and
/// `None` entries wherever a column is degenerate.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<Option<f64>>> {
    let n = columns.len();
    let mut matrix = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let value = if i == j {
                pearson(&columns[i], &columns[i]).map(|_| 1.0)
            } else {
                pearson(&columns[i], &columns[j])
            };
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[0.2, 0.4, 0.6]), Some(0.4));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_five_number_summary() {
        let s = FiveNumberSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.max, 5.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_five_number_summary_interpolates_quartiles() {
        // Even-length input: quartiles fall between samples
        let s = FiveNumberSummary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
    }

    #[test]
    fn test_five_number_summary_flags_outliers() {
        let s =
            FiveNumberSummary::from_values(&[1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(s.outliers, vec![100.0]);
        assert_eq!(s.max, 100.0);
    }

    #[test]
    fn test_five_number_summary_single_value() {
        let s = FiveNumberSummary::from_values(&[7.0]).unwrap();
        assert_eq!(s.min, 7.0);
        assert_eq!(s.median, 7.0);
        assert_eq!(s.max, 7.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_five_number_summary_empty() {
        assert!(FiveNumberSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_correlation_matrix_symmetric_unit_diagonal() {
        let columns = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 1.0, 4.0, 3.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ];
        let m = correlation_matrix(&columns);

        for (i, row) in m.iter().enumerate() {
            assert_eq!(row[i], Some(1.0));
            for (j, value) in row.iter().enumerate() {
                assert_eq!(*value, m[j][i]);
                if let Some(r) = value {
                    assert!((-1.0..=1.0).contains(r));
                }
            }
        }
    }

    #[test]
    fn test_correlation_matrix_degenerate_column() {
        let columns = vec![vec![1.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]];
        let m = correlation_matrix(&columns);
        assert_eq!(m[0][0], None);
        assert_eq!(m[0][1], None);
        assert_eq!(m[1][0], None);
        assert_eq!(m[1][1], Some(1.0));
    }
}
