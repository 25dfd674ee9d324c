//! Siamese (De la Loubère) construction of odd-order magic squares.
//!
//! Numbers `1..=n²` are laid out along a staircase: start in the middle of
//! the top row, step up and to the right with wrap-around, and when that
//! cell is taken drop one row below the previous cell instead.
//!
//! Reference: S. de la Loubère, "Du Royaume de Siam" (1691).

use ndarray::Array2;
use tracing::{debug, trace};

use crate::MagicSquare;
use crate::error::{MagicSquareError, Result};

impl MagicSquare {
    /// Builds a fresh Siamese magic square of order `gen_dim`, bumped to the
    /// next odd number if it is even.
    pub fn siamese(name: impl Into<String>, gen_dim: usize) -> Result<Self> {
        let mut sq = Self::new(name);
        sq.generate_odd_square(gen_dim)?;
        Ok(sq)
    }

    /// Replaces the grid with the Siamese magic square of order `gen_dim`
    /// (or `gen_dim + 1` when `gen_dim` is even).
    ///
    /// The result is verified before it is kept. A grid that fails
    /// [`check_ms`](Self::check_ms) is discarded, the square is reset to
    /// empty, and [`MagicSquareError::GenerationFailure`] is returned.
    ///
    /// An order whose `n x n` grid cannot be addressed fails with
    /// [`MagicSquareError::InvalidShape`] before anything is allocated, and
    /// the square keeps its contents.
    pub fn generate_odd_square(&mut self, gen_dim: usize) -> Result<&Array2<f64>> {
        let too_large = MagicSquareError::InvalidShape {
            rows: gen_dim,
            cols: gen_dim,
        };
        let n = match gen_dim % 2 {
            0 => gen_dim.checked_add(1).ok_or_else(|| too_large.clone())?,
            _ => gen_dim,
        };
        let addressable = n
            .checked_mul(n)
            .and_then(|cells| cells.checked_mul(size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !addressable {
            debug!(name = %self.name, gen_dim, "Siamese order too large");
            return Err(too_large);
        }

        self.matrix = siamese_grid(n);
        self.dim = n;

        if self.check_ms() {
            debug!(name = %self.name, n, constant = self.constant, "generated Siamese square");
            return Ok(&self.matrix);
        }

        debug!(name = %self.name, n, "Siamese square failed verification");
        self.matrix = Array2::zeros((0, 0));
        self.dim = 0;
        self.constant = 0.0;
        Err(MagicSquareError::GenerationFailure(n))
    }
}

fn siamese_grid(n: usize) -> Array2<f64> {
    let mut grid = Array2::<f64>::zeros((n, n));
    let (mut r, mut c) = (0, n / 2);
    for v in 1..=n * n {
        grid[[r, c]] = v as f64;
        let up = (r + n - 1) % n;
        let right = (c + 1) % n;
        if grid[[up, right]] == 0.0 {
            (r, c) = (up, right);
        } else {
            trace!(v, r, c, "cell taken, dropping down");
            r = (r + 1) % n;
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn odd_orders_are_magic() {
        for n in [1usize, 3, 5, 7, 9, 11] {
            let mut sq = MagicSquare::new("ms");
            sq.generate_odd_square(n).unwrap();
            assert!(sq.check_ms(), "order {} should be magic", n);
            let expected = (n * (n * n + 1) / 2) as f64;
            assert_eq!(sq.constant(), expected, "constant of order {}", n);
        }
    }

    #[test]
    fn order_three_is_lo_shu() {
        let sq = MagicSquare::siamese("ms", 3).unwrap();
        assert_eq!(sq.matrix(), &array![[8., 1., 6.], [3., 5., 7.], [4., 9., 2.]]);
    }

    #[test]
    fn order_five_layout() {
        let sq = MagicSquare::siamese("ms", 5).unwrap();
        assert_eq!(
            sq.matrix(),
            &array![
                [17., 24., 1., 8., 15.],
                [23., 5., 7., 14., 16.],
                [4., 6., 13., 20., 22.],
                [10., 12., 19., 21., 3.],
                [11., 18., 25., 2., 9.]
            ]
        );
    }

    #[test]
    fn even_orders_are_bumped() {
        for (requested, actual) in [(0usize, 1usize), (2, 3), (4, 5), (10, 11)] {
            let sq = MagicSquare::siamese("ms", requested).unwrap();
            assert_eq!(sq.dim(), actual);
        }
    }

    #[test]
    fn every_number_is_placed_once() {
        for n in [3usize, 7, 13] {
            let sq = MagicSquare::siamese("ms", n).unwrap();
            let mut cells = sq.cells();
            cells.sort_by(f64::total_cmp);
            let expected: Vec<f64> = (1..=n * n).map(|v| v as f64).collect();
            assert_eq!(cells, expected);
        }
    }

    #[test]
    fn oversized_orders_fail_without_touching_the_square() {
        let mut sq = MagicSquare::new("ms");
        sq.list_square(&[8, 1, 6, 3, 5, 7, 4, 9, 2]).unwrap();
        for gen_dim in [usize::MAX - 1, usize::MAX, 1usize << (usize::BITS / 2)] {
            assert_eq!(
                sq.generate_odd_square(gen_dim),
                Err(MagicSquareError::InvalidShape {
                    rows: gen_dim,
                    cols: gen_dim
                }),
                "order {}",
                gen_dim
            );
        }
        assert_eq!(sq.dim(), 3);
        assert_eq!(sq.constant(), 15.0);
        assert_eq!(sq.get(1, 1), 5.0);
        assert!(MagicSquare::siamese("ms", usize::MAX).is_err());
    }

    #[test]
    fn generation_is_deterministic() {
        let a = MagicSquare::siamese("ms", 9).unwrap();
        let b = MagicSquare::siamese("ms", 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generation_replaces_existing_contents() {
        let mut sq = MagicSquare::new("ms");
        sq.list_square(&[1, 2, 3, 4]).unwrap();
        let grid = sq.generate_odd_square(5).unwrap();
        assert_eq!(grid.dim(), (5, 5));
        assert_eq!(sq.dim(), 5);
        assert_eq!(sq.constant(), 65.0);
        assert_eq!(sq.name(), "ms");
    }
}
