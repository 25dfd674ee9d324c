//! Dense linear algebra for the multiplicative operators.
//!
//! Gaussian elimination with partial pivoting; the squares handled here are
//! small, so no blocking or LAPACK backend is involved.

use ndarray::Array2;

/// Relative pivot magnitude below which a matrix is treated as singular.
///
/// Each pivot is compared against the largest absolute entry of its own
/// row, so a badly scaled but invertible grid such as `diag(1e-13, 1)` is
/// still inverted.
pub const INVERT_TOLERANCE: f64 = 1e-12;

/// Matrix product `a · b`.
pub(crate) fn matmul(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    a.dot(b)
}

/// Largest absolute entry of every row.
fn row_scales(a: &Array2<f64>) -> Vec<f64> {
    a.rows()
        .into_iter()
        .map(|row| row.iter().fold(0.0_f64, |m, v| m.max(v.abs())))
        .collect()
}

/// Index of the row at or below `col` whose entry in `col` is largest
/// relative to its row scale (scaled partial pivoting).
fn pivot_row(m: &Array2<f64>, scales: &[f64], col: usize) -> usize {
    let relative = |i: usize| match scales[i] {
        0.0 => 0.0,
        s => m[[i, col]].abs() / s,
    };
    (col..m.nrows())
        .max_by(|&i, &j| relative(i).total_cmp(&relative(j)))
        .unwrap_or(col)
}

fn negligible(pivot: f64, scale: f64) -> bool {
    pivot.abs() <= scale * INVERT_TOLERANCE
}

fn swap_rows(m: &mut Array2<f64>, i: usize, j: usize) {
    if i == j {
        return;
    }
    for c in 0..m.ncols() {
        m.swap([i, c], [j, c]);
    }
}

/// Determinant of a square matrix. The empty matrix has determinant 1.
///
/// Returns exactly `0.0` when elimination meets a negligible pivot, which
/// is the same test [`inverse`] uses to give up.
pub fn determinant(a: &Array2<f64>) -> f64 {
    debug_assert_eq!(a.nrows(), a.ncols(), "determinant requires square matrix");
    let n = a.nrows();
    let mut scales = row_scales(a);
    let mut m = a.clone();
    let mut det = 1.0;

    for col in 0..n {
        let p = pivot_row(&m, &scales, col);
        if negligible(m[[p, col]], scales[p]) {
            return 0.0;
        }
        if p != col {
            swap_rows(&mut m, p, col);
            scales.swap(p, col);
            det = -det;
        }
        let pivot = m[[col, col]];
        det *= pivot;
        for r in (col + 1)..n {
            let factor = m[[r, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                m[[r, c]] -= factor * m[[col, c]];
            }
        }
    }
    det
}

/// Inverse via Gauss-Jordan elimination on `[a | I]`.
///
/// Returns `None` for singular (or empty) matrices.
pub fn inverse(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    if n == 0 || n != a.ncols() {
        return None;
    }
    let mut scales = row_scales(a);
    let mut m = a.clone();
    let mut inv = Array2::eye(n);

    for col in 0..n {
        let p = pivot_row(&m, &scales, col);
        if negligible(m[[p, col]], scales[p]) {
            return None;
        }
        swap_rows(&mut m, p, col);
        swap_rows(&mut inv, p, col);
        scales.swap(p, col);

        let pivot = m[[col, col]];
        for c in 0..n {
            m[[col, c]] /= pivot;
            inv[[col, c]] /= pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = m[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for c in 0..n {
                m[[r, c]] -= factor * m[[col, c]];
                inv[[r, c]] -= factor * inv[[col, c]];
            }
        }
    }
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < tol, "{} vs {}", x, y);
        }
    }

    #[test]
    fn determinant_of_lo_shu() {
        let a = array![[8., 1., 6.], [3., 5., 7.], [4., 9., 2.]];
        assert!((determinant(&a) + 360.0).abs() < 1e-9);
    }

    #[test]
    fn determinant_of_identity_and_empty() {
        assert_eq!(determinant(&Array2::eye(4)), 1.0);
        assert_eq!(determinant(&Array2::zeros((0, 0))), 1.0);
    }

    #[test]
    fn determinant_sign_follows_row_swaps() {
        let a = array![[0., 1.], [1., 0.]];
        assert_eq!(determinant(&a), -1.0);
    }

    #[test]
    fn singular_matrix_has_zero_determinant_and_no_inverse() {
        // Dürer's square has rank 3.
        let a = array![
            [16., 3., 2., 13.],
            [5., 10., 11., 8.],
            [9., 6., 7., 12.],
            [4., 15., 14., 1.]
        ];
        assert_eq!(determinant(&a), 0.0);
        assert!(inverse(&a).is_none());
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let a = array![[8., 1., 6.], [3., 5., 7.], [4., 9., 2.]];
        let inv = inverse(&a).unwrap();
        assert_close(&matmul(&a, &inv), &Array2::eye(3), 1e-12);
        assert_close(&matmul(&inv, &a), &Array2::eye(3), 1e-12);
    }

    #[test]
    fn badly_scaled_diagonal_is_invertible() {
        let tiny = array![[1e-13, 0.], [0., 1.]];
        assert_eq!(determinant(&tiny), 1e-13);
        let inv = inverse(&tiny).unwrap();
        assert_close(&inv, &array![[1e13, 0.], [0., 1.]], 1e-1);

        let huge = array![[1e13, 0.], [0., 1.]];
        assert_eq!(determinant(&huge), 1e13);
        assert_close(&matmul(&huge, &inverse(&huge).unwrap()), &Array2::eye(2), 1e-12);
    }

    #[test]
    fn zero_row_is_singular() {
        let a = array![[1., 2.], [0., 0.]];
        assert_eq!(determinant(&a), 0.0);
        assert!(inverse(&a).is_none());
    }

    #[test]
    fn inverse_of_empty_is_none() {
        assert!(inverse(&Array2::zeros((0, 0))).is_none());
    }
}
