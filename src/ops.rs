//! Algebra over magic squares.
//!
//! Every operation returns a fresh [`MagicSquare`] whose name records how it
//! was built, e.g. `"((A + B) >> 1)"`, and whose pattern type is inherited
//! from the left-hand square. Operands are never modified.
//!
//! Reflected scalar forms (`scalar ⊗ square`) do not follow ordinary
//! arithmetic: a zero on the left of `+`, `*`, `/`, `>>` or `<<` hands back
//! the square unchanged, and `s / A` divides `s` by each cell rather than
//! inverting the matrix.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Not, Shl, Shr, Sub};

use ndarray::Array2;
use tracing::trace;

use crate::MagicSquare;
use crate::error::{MagicSquareError, Result};
use crate::linalg;

/// A numeric operand, integer or real.
///
/// The two cases only differ in how they print inside composed names:
/// integers as `3`, reals always with a fractional part as `3.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    pub fn value(self) -> f64 {
        match self {
            Scalar::Int(v) => v as f64,
            Scalar::Real(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        self.value() == 0.0
    }

    /// `self + square`. A zero scalar returns the square itself.
    pub fn plus(self, square: &MagicSquare) -> MagicSquare {
        if self.is_zero() {
            return square.clone();
        }
        square.add_scalar(self)
    }

    /// `self - square`, computed as `self + (-square)`.
    pub fn minus(self, square: &MagicSquare) -> MagicSquare {
        self.plus(&square.negate())
    }

    /// `self * square`. A zero scalar returns the square itself.
    pub fn times(self, square: &MagicSquare) -> MagicSquare {
        if self.is_zero() {
            return square.clone();
        }
        square.mul_scalar(self)
    }

    /// `self / square`, cell by cell. A zero scalar returns the square itself.
    pub fn over(self, square: &MagicSquare) -> MagicSquare {
        if self.is_zero() {
            return square.clone();
        }
        let v = self.value();
        let result = MagicSquare::derived(
            format!("({} / {})", self, square.name),
            square.matrix.mapv(|cell| v / cell),
            square.pattern_type,
        );
        trace!(name = %result.name, "reflected division");
        result
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Real(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

/// The right-hand side of a binary operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Square(&'a MagicSquare),
    Scalar(Scalar),
}

impl<'a> From<&'a MagicSquare> for Operand<'a> {
    fn from(square: &'a MagicSquare) -> Self {
        Operand::Square(square)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Operand::Scalar(s)
    }
}

impl From<i64> for Operand<'_> {
    fn from(v: i64) -> Self {
        Operand::Scalar(v.into())
    }
}

impl From<i32> for Operand<'_> {
    fn from(v: i32) -> Self {
        Operand::Scalar(v.into())
    }
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Scalar(v.into())
    }
}

impl MagicSquare {
    fn compose(&self, op: &str, rhs: impl fmt::Display, matrix: Array2<f64>) -> MagicSquare {
        let result = MagicSquare::derived(
            format!("({} {} {})", self.name, op, rhs),
            matrix,
            self.pattern_type,
        );
        trace!(name = %result.name, "operator result");
        result
    }

    fn ensure_same_shape(&self, op: &'static str, rhs: &MagicSquare) -> Result<()> {
        if self.matrix.dim() != rhs.matrix.dim() {
            return Err(MagicSquareError::UnsupportedOperand {
                op,
                lhs: self.matrix.dim(),
                rhs: rhs.matrix.dim(),
            });
        }
        Ok(())
    }

    fn add_scalar(&self, s: Scalar) -> MagicSquare {
        self.compose("+", s, &self.matrix + s.value())
    }

    fn sub_scalar(&self, s: Scalar) -> MagicSquare {
        self.compose("-", s, &self.matrix - s.value())
    }

    fn mul_scalar(&self, s: Scalar) -> MagicSquare {
        self.compose("*", s, &self.matrix * s.value())
    }

    fn div_scalar(&self, s: Scalar) -> MagicSquare {
        self.compose("/", s, &self.matrix / s.value())
    }

    /// Elementwise negation, named `-A`.
    pub fn negate(&self) -> MagicSquare {
        MagicSquare::derived(format!("-{}", self.name), -&self.matrix, self.pattern_type)
    }

    /// Elementwise sum with a square of the same order, or with a scalar.
    #[doc(alias = "add")]
    pub fn plus<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MagicSquare> {
        match other.into() {
            Operand::Square(rhs) => {
                self.ensure_same_shape("+", rhs)?;
                Ok(self.compose("+", &rhs.name, &self.matrix + &rhs.matrix))
            }
            Operand::Scalar(s) => Ok(self.add_scalar(s)),
        }
    }

    /// Elementwise difference with a square of the same order, or with a scalar.
    #[doc(alias = "subtract")]
    pub fn minus<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MagicSquare> {
        match other.into() {
            Operand::Square(rhs) => {
                self.ensure_same_shape("-", rhs)?;
                Ok(self.compose("-", &rhs.name, &self.matrix - &rhs.matrix))
            }
            Operand::Scalar(s) => Ok(self.sub_scalar(s)),
        }
    }

    /// Matrix product with a square of the same order, or scaling by a scalar.
    ///
    /// Two squares are multiplied as matrices, not cell by cell.
    #[doc(alias = "multiply")]
    pub fn times<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MagicSquare> {
        match other.into() {
            Operand::Square(rhs) => {
                self.ensure_same_shape("*", rhs)?;
                Ok(self.compose("*", &rhs.name, linalg::matmul(&self.matrix, &rhs.matrix)))
            }
            Operand::Scalar(s) => Ok(self.mul_scalar(s)),
        }
    }

    /// `A · B⁻¹` for a square `B`, or division of every cell by a scalar.
    ///
    /// Fails with [`MagicSquareError::SingularMatrix`] if `B` has no inverse.
    #[doc(alias = "divide")]
    pub fn over<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MagicSquare> {
        match other.into() {
            Operand::Square(rhs) => {
                self.ensure_same_shape("/", rhs)?;
                let inv = linalg::inverse(&rhs.matrix).ok_or(MagicSquareError::SingularMatrix)?;
                Ok(self.compose("/", &rhs.name, linalg::matmul(&self.matrix, &inv)))
            }
            Operand::Scalar(s) => Ok(self.div_scalar(s)),
        }
    }

    /// Matrix inverse, or `None` when the determinant is zero (or the
    /// square is empty).
    pub fn invert(&self) -> Option<MagicSquare> {
        if linalg::determinant(&self.matrix) == 0.0 {
            return None;
        }
        let inv = linalg::inverse(&self.matrix)?;
        Some(MagicSquare::derived(
            format!("(~{})", self.name),
            inv,
            self.pattern_type,
        ))
    }

    /// Shifts every row `k` columns to the right, wrapping around.
    /// Negative `k` shifts left.
    pub fn roll_right(&self, k: i64) -> MagicSquare {
        let n = self.dim;
        let shift = wrap(k, n);
        let matrix = Array2::from_shape_fn((n, n), |(r, c)| self.matrix[[r, (c + n - shift) % n]]);
        self.compose(">>", k, matrix)
    }

    /// Shifts every column `k` rows down, wrapping around.
    /// Negative `k` shifts up.
    pub fn roll_down(&self, k: i64) -> MagicSquare {
        let n = self.dim;
        let shift = wrap(k, n);
        let matrix = Array2::from_shape_fn((n, n), |(r, c)| self.matrix[[(r + n - shift) % n, c]]);
        self.compose("<<", k, matrix)
    }

    /// Reflected `k >> self`: a zero count returns the square unchanged,
    /// anything else rolls it right by `k`.
    pub fn rroll_right(&self, k: i64) -> MagicSquare {
        if k == 0 {
            return self.clone();
        }
        self.roll_right(k)
    }

    /// Reflected `k << self`: a zero count returns the square unchanged,
    /// anything else rolls it down by `k`.
    pub fn rroll_down(&self, k: i64) -> MagicSquare {
        if k == 0 {
            return self.clone();
        }
        self.roll_down(k)
    }
}

fn wrap(k: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    k.rem_euclid(n as i64) as usize
}

impl Neg for &MagicSquare {
    type Output = MagicSquare;

    fn neg(self) -> MagicSquare {
        self.negate()
    }
}

impl Neg for MagicSquare {
    type Output = MagicSquare;

    fn neg(self) -> MagicSquare {
        self.negate()
    }
}

/// `!A` stands in for the `~A` inverse.
impl Not for &MagicSquare {
    type Output = Option<MagicSquare>;

    fn not(self) -> Option<MagicSquare> {
        self.invert()
    }
}

impl Not for MagicSquare {
    type Output = Option<MagicSquare>;

    fn not(self) -> Option<MagicSquare> {
        self.invert()
    }
}

macro_rules! square_binop {
    ($Trait:ident, $method:ident, $named:ident) => {
        impl $Trait<&MagicSquare> for &MagicSquare {
            type Output = Result<MagicSquare>;

            fn $method(self, rhs: &MagicSquare) -> Self::Output {
                self.$named(rhs)
            }
        }

        impl $Trait<MagicSquare> for &MagicSquare {
            type Output = Result<MagicSquare>;

            fn $method(self, rhs: MagicSquare) -> Self::Output {
                self.$named(&rhs)
            }
        }

        impl $Trait<&MagicSquare> for MagicSquare {
            type Output = Result<MagicSquare>;

            fn $method(self, rhs: &MagicSquare) -> Self::Output {
                self.$named(rhs)
            }
        }

        impl $Trait<MagicSquare> for MagicSquare {
            type Output = Result<MagicSquare>;

            fn $method(self, rhs: MagicSquare) -> Self::Output {
                self.$named(&rhs)
            }
        }
    };
}

square_binop!(Add, add, plus);
square_binop!(Sub, sub, minus);
square_binop!(Mul, mul, times);
square_binop!(Div, div, over);

macro_rules! scalar_binop {
    ($Trait:ident, $method:ident, $forward:ident, $reflected:ident; $($t:ty),*) => {$(
        impl $Trait<$t> for &MagicSquare {
            type Output = MagicSquare;

            fn $method(self, rhs: $t) -> MagicSquare {
                self.$forward(Scalar::from(rhs))
            }
        }

        impl $Trait<$t> for MagicSquare {
            type Output = MagicSquare;

            fn $method(self, rhs: $t) -> MagicSquare {
                self.$forward(Scalar::from(rhs))
            }
        }

        impl $Trait<&MagicSquare> for $t {
            type Output = MagicSquare;

            fn $method(self, rhs: &MagicSquare) -> MagicSquare {
                Scalar::from(self).$reflected(rhs)
            }
        }

        impl $Trait<MagicSquare> for $t {
            type Output = MagicSquare;

            fn $method(self, rhs: MagicSquare) -> MagicSquare {
                Scalar::from(self).$reflected(&rhs)
            }
        }
    )*};
}

scalar_binop!(Add, add, add_scalar, plus; f64, i64, i32);
scalar_binop!(Sub, sub, sub_scalar, minus; f64, i64, i32);
scalar_binop!(Mul, mul, mul_scalar, times; f64, i64, i32);
scalar_binop!(Div, div, div_scalar, over; f64, i64, i32);

macro_rules! roll_op {
    ($Trait:ident, $method:ident, $roll:ident, $rroll:ident; $($t:ty),*) => {$(
        impl $Trait<$t> for &MagicSquare {
            type Output = MagicSquare;

            fn $method(self, k: $t) -> MagicSquare {
                self.$roll(i64::from(k))
            }
        }

        impl $Trait<$t> for MagicSquare {
            type Output = MagicSquare;

            fn $method(self, k: $t) -> MagicSquare {
                self.$roll(i64::from(k))
            }
        }

        impl $Trait<&MagicSquare> for $t {
            type Output = MagicSquare;

            fn $method(self, rhs: &MagicSquare) -> MagicSquare {
                rhs.$rroll(i64::from(self))
            }
        }

        impl $Trait<MagicSquare> for $t {
            type Output = MagicSquare;

            fn $method(self, rhs: MagicSquare) -> MagicSquare {
                if self == 0 {
                    return rhs;
                }
                rhs.$roll(i64::from(self))
            }
        }
    )*};
}

roll_op!(Shr, shr, roll_right, rroll_right; i64, i32);
roll_op!(Shl, shl, roll_down, rroll_down; i64, i32);
