use ndarray::Array2;

use crate::{MagicSquare, PatternType};

impl MagicSquare {
    /// Subtracts a reference value from every cell and returns the shifted
    /// grid.
    ///
    /// With [`PatternType::Median`] (the default when `mode` is `None`) the
    /// reference is the median of all cells; otherwise it is the smallest
    /// cell. Either reference is truncated toward zero first. The chosen mode
    /// is remembered as this square's pattern type.
    ///
    /// The result is a plain grid, not a magic square. An empty square gives
    /// an empty grid.
    pub fn patternize(&mut self, mode: Option<PatternType>) -> Array2<f64> {
        let mode = mode.unwrap_or(PatternType::Median);
        self.pattern_type = mode;
        if self.matrix.is_empty() {
            return Array2::zeros((0, 0));
        }
        let reference = match mode {
            PatternType::Median => median(self.cells()),
            PatternType::Mid => self.matrix.iter().copied().fold(f64::INFINITY, f64::min),
        };
        &self.matrix - reference.trunc()
    }
}

/// Median of a non-empty sample; the mean of the middle pair for even sizes.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn lo_shu() -> MagicSquare {
        let mut sq = MagicSquare::new("ms");
        sq.list_square(&[8, 1, 6, 3, 5, 7, 4, 9, 2]).unwrap();
        sq
    }

    #[test]
    fn median_pattern_centres_on_the_middle_value() {
        let mut sq = lo_shu();
        let grid = sq.patternize(None);
        assert_eq!(grid, array![[3., -4., 1.], [-2., 0., 2.], [-1., 4., -3.]]);
        assert_eq!(sq.pattern_type(), PatternType::Median);
    }

    #[test]
    fn mid_pattern_subtracts_the_minimum() {
        let mut sq = lo_shu();
        let grid = sq.patternize(Some(PatternType::Mid));
        assert_eq!(grid, array![[7., 0., 5.], [2., 4., 6.], [3., 8., 1.]]);
        assert_eq!(sq.pattern_type(), PatternType::Mid);
    }

    #[test]
    fn even_count_median_is_truncated() {
        let mut sq = MagicSquare::new("ms");
        sq.list_square(&[16, 3, 2, 13, 5, 10, 11, 8, 9, 6, 7, 12, 4, 15, 14, 1])
            .unwrap();
        let grid = sq.patternize(Some(PatternType::from("median")));
        // Median is 8.5, truncated to 8.
        assert_eq!(grid[[0, 0]], 8.0);
        assert_eq!(grid[[3, 3]], -7.0);
    }

    #[test]
    fn references_truncate_toward_zero() {
        let mut sq =
            MagicSquare::from_rows("ms", &[vec![-3.5, -2.5], vec![-1.5, 0.5]]).unwrap();
        // Median -2.0 stays -2; minimum -3.5 truncates to -3.
        assert_eq!(sq.patternize(None), array![[-1.5, -0.5], [0.5, 2.5]]);
        assert_eq!(
            sq.patternize(Some(PatternType::Mid)),
            array![[-0.5, 0.5], [1.5, 3.5]]
        );
    }

    #[test]
    fn patternize_leaves_the_grid_alone() {
        let mut sq = lo_shu();
        let before = sq.matrix().clone();
        sq.patternize(None);
        assert_eq!(sq.matrix(), &before);
        assert!(sq.check_ms());
    }

    #[test]
    fn empty_square_patternizes_to_empty() {
        let mut sq = MagicSquare::new("ms");
        assert!(sq.patternize(None).is_empty());
        assert_eq!(sq.pattern_type(), PatternType::Median);
    }
}
