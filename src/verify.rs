use ndarray::{Axis, s};

use crate::MagicSquare;

impl MagicSquare {
    /// Returns true if every row, every column and both diagonals sum to
    /// the same constant.
    ///
    /// The candidate constant is recomputed first, so after a successful
    /// check [`constant`](Self::constant) is the magic constant. Sums are
    /// compared exactly. An empty square is never magic.
    pub fn check_ms(&mut self) -> bool {
        let Ok(constant) = self.calc_constant() else {
            return false;
        };

        let rows_ok = self.matrix.sum_axis(Axis(1)).iter().all(|&s| s == constant);
        let cols_ok = self.matrix.sum_axis(Axis(0)).iter().all(|&s| s == constant);
        if !(rows_ok && cols_ok) {
            return false;
        }

        // Anti-diagonal: trace of the horizontally flipped grid.
        let main = self.matrix.diag().sum();
        let anti = self.matrix.slice(s![.., ..;-1]).diag().sum();
        main == constant && anti == constant
    }
}
