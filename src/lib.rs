#![doc = include_str!("../README.md")]

mod error;
mod linalg;
mod ops;
mod pattern;
mod siamese;
mod square;
mod verify;
#[cfg(feature = "wasm")]
mod wasm;

pub use error::{MagicSquareError, Result};
pub use linalg::{INVERT_TOLERANCE, determinant, inverse};
pub use ops::{Operand, Scalar};
pub use square::{MagicSquare, PatternType};
