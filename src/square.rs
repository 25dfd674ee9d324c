use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1, Axis};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::error::{MagicSquareError, Result};

/// Selects the reference value [`MagicSquare::patternize`] subtracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PatternType {
    /// Subtract the minimum cell.
    #[default]
    Mid,
    /// Subtract the median of all cells.
    Median,
}

impl From<&str> for PatternType {
    /// `"med"` and `"median"` select [`PatternType::Median`]; every other
    /// string falls back to [`PatternType::Mid`].
    fn from(s: &str) -> Self {
        match s {
            "med" | "median" => PatternType::Median,
            _ => PatternType::Mid,
        }
    }
}

impl FromStr for PatternType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(PatternType::from(s))
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Mid => f.write_str("mid"),
            PatternType::Median => f.write_str("median"),
        }
    }
}

/// A named square grid of numbers that may or may not be magic.
///
/// The grid is always `n x n` (or empty, with `n = 0`). `constant` holds the
/// candidate magic constant `sum / n`; it is only a true magic constant once
/// [`MagicSquare::check_ms`] has returned `true`.
///
/// Equality compares the name and the grid; the cached constant and the
/// pattern type are not part of it.
#[derive(Debug, Clone)]
pub struct MagicSquare {
    pub(crate) name: String,
    pub(crate) matrix: Array2<f64>,
    pub(crate) dim: usize,
    pub(crate) constant: f64,
    pub(crate) pattern_type: PatternType,
}

impl MagicSquare {
    /// Creates an empty (0 x 0) square, to be filled by
    /// [`list_square`](Self::list_square) or
    /// [`generate_odd_square`](Self::generate_odd_square).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix: Array2::zeros((0, 0)),
            dim: 0,
            constant: 0.0,
            pattern_type: PatternType::default(),
        }
    }

    /// Wraps an existing grid. Fails with [`MagicSquareError::InvalidShape`]
    /// if the grid is not square; an empty grid yields an empty square.
    pub fn from_matrix(name: impl Into<String>, matrix: Array2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(MagicSquareError::InvalidShape { rows, cols });
        }
        Ok(Self::derived(name.into(), matrix, PatternType::default()))
    }

    /// Builds a square from nested rows, e.g. `&[vec![2, 7, 6], ...]`.
    ///
    /// Any primitive numeric cell type is accepted; a cell with no `f64`
    /// value fails with [`MagicSquareError::UnrepresentableCell`].
    pub fn from_rows<T>(name: impl Into<String>, rows: &[Vec<T>]) -> Result<Self>
    where
        T: ToPrimitive,
    {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(MagicSquareError::InvalidShape {
                rows: n,
                cols: bad.len(),
            });
        }
        let cells = to_cells(rows.iter().flatten())?;
        let matrix = Array2::from_shape_vec((n, n), cells).map_err(|_| {
            MagicSquareError::InvalidShape { rows: n, cols: n }
        })?;
        Self::from_matrix(name, matrix)
    }

    /// Sets the pattern type, builder style.
    pub fn with_pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = pattern_type;
        self
    }

    /// Builds a square from a grid that is already known to be square.
    pub(crate) fn derived(name: String, matrix: Array2<f64>, pattern_type: PatternType) -> Self {
        let dim = matrix.nrows();
        let constant = candidate_constant(&matrix);
        Self {
            name,
            matrix,
            dim,
            constant,
            pattern_type,
        }
    }

    /// Reshapes a flat, row-major sequence of length `k²` into a `k x k`
    /// grid, replacing the current contents.
    ///
    /// Any other length fails with [`MagicSquareError::InvalidLength`] and
    /// leaves the square untouched, as does a cell that cannot be read as
    /// an `f64`.
    pub fn list_square<T>(&mut self, input: &[T]) -> Result<&Array2<f64>>
    where
        T: ToPrimitive,
    {
        let len = input.len();
        let k = len.isqrt();
        if k * k != len {
            debug!(name = %self.name, len, "flat input is not a perfect square");
            return Err(MagicSquareError::InvalidLength(len));
        }
        let cells = to_cells(input)?;
        self.matrix =
            Array2::from_shape_vec((k, k), cells).map_err(|_| MagicSquareError::InvalidLength(len))?;
        self.dim = k;
        self.constant = candidate_constant(&self.matrix);
        Ok(&self.matrix)
    }

    /// Recomputes the dimension from the grid.
    pub fn calc_dim(&mut self) -> Result<usize> {
        let (rows, cols) = self.matrix.dim();
        if rows != cols {
            return Err(MagicSquareError::InvalidShape { rows, cols });
        }
        self.dim = rows;
        Ok(self.dim)
    }

    /// Recomputes the candidate magic constant `sum / dim`.
    ///
    /// An empty square has no constant and reports
    /// [`MagicSquareError::InvalidShape`].
    pub fn calc_constant(&mut self) -> Result<f64> {
        let dim = self.calc_dim()?;
        if dim == 0 {
            return Err(MagicSquareError::InvalidShape { rows: 0, cols: 0 });
        }
        self.constant = self.matrix.sum() / dim as f64;
        Ok(self.constant)
    }

    /// Returns the label used in printing and in composed names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying `dim x dim` grid.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Returns the order of the square.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the last computed candidate constant.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Returns the reference mode last used (or preset) for patternizing.
    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// Returns true if the square has no cells.
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Returns the value at position `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r >= dim` or `c >= dim`.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.dim && c < self.dim, "index out of bounds");
        self.matrix[[r, c]]
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.matrix.axis_iter(Axis(0))
    }

    /// Returns the cells in row-major order.
    ///
    /// The cell at position (r, c) is at index `r * dim + c`.
    pub fn cells(&self) -> Vec<f64> {
        self.matrix.iter().copied().collect()
    }
}

fn to_cells<'a, T>(values: impl IntoIterator<Item = &'a T>) -> Result<Vec<f64>>
where
    T: ToPrimitive + 'a,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.to_f64().ok_or(MagicSquareError::UnrepresentableCell(i)))
        .collect()
}

fn candidate_constant(matrix: &Array2<f64>) -> f64 {
    match matrix.nrows() {
        0 => 0.0,
        n => matrix.sum() / n as f64,
    }
}

impl PartialEq for MagicSquare {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.matrix == other.matrix
    }
}

impl fmt::Display for MagicSquare {
    /// Renders `name:` followed by one line per row, cells right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        let rendered: Vec<String> = self.matrix.iter().map(|v| v.to_string()).collect();
        let width = rendered.iter().map(String::len).max().unwrap_or(0);
        for row in rendered.chunks(self.dim.max(1)) {
            writeln!(f)?;
            let line: Vec<String> = row.iter().map(|s| format!("{s:>width$}")).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
