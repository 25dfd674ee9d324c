use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MagicSquareError {
    #[error("matrix is not a non-empty square: rows={rows}, cols={cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("flat input of length {0} cannot be reshaped into a square")]
    InvalidLength(usize),

    #[error("cell {0} has no f64 representation")]
    UnrepresentableCell(usize),

    #[error("unsupported operands for `{op}`: {lhs:?} and {rhs:?}")]
    UnsupportedOperand {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    #[error("Siamese construction of order {0} did not verify as magic")]
    GenerationFailure(usize),
}

pub type Result<T> = std::result::Result<T, MagicSquareError>;
