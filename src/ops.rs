use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use num_complex::Complex64;

use crate::{Cplx, CplxError, Scalar};

/// The binary arithmetic operations of complex tensors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        };
        f.write_str(name)
    }
}

/// The other side of a binary operation with a complex tensor.
#[derive(Clone, Debug)]
pub enum Operand<B: Backend, const D: usize> {
    /// A complex tensor.
    Cplx(Cplx<B, D>),
    /// A real tensor, treated as having a zero imaginary part.
    Real(Tensor<B, D>),
    /// A native scalar.
    Scalar(Scalar),
}

impl<B: Backend, const D: usize> From<Cplx<B, D>> for Operand<B, D> {
    fn from(value: Cplx<B, D>) -> Self {
        Operand::Cplx(value)
    }
}

impl<B: Backend, const D: usize> From<Tensor<B, D>> for Operand<B, D> {
    fn from(value: Tensor<B, D>) -> Self {
        Operand::Real(value)
    }
}

macro_rules! scalar_operand {
    ($($ty:ty),*) => {
        $(
            impl<B: Backend, const D: usize> From<$ty> for Operand<B, D> {
                fn from(value: $ty) -> Self {
                    Operand::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_operand!(Scalar, i32, i64, f32, f64, Complex64);

impl<B: Backend, const D: usize> Cplx<B, D> {
    /// Compute `self op rhs`.
    ///
    /// Real tensors and scalars take part with a zero imaginary part, complex scalars with
    /// their own. Operands broadcast following the backend rules; division by zero follows
    /// the backend float semantics.
    pub fn apply(self, op: BinaryOp, rhs: impl Into<Operand<B, D>>) -> Self {
        match rhs.into() {
            Operand::Cplx(rhs) => self.apply_cplx(op, rhs),
            Operand::Real(rhs) => self.apply_real(op, rhs),
            Operand::Scalar(rhs) => self.apply_scalar(op, rhs.to_complex()),
        }
    }

    /// Compute `lhs op self`, the reflected form of [apply](Cplx::apply).
    ///
    /// # Errors
    ///
    /// [CplxError::Type] when `lhs` is a real tensor: a real tensor on the left hand side
    /// has no complex semantics and must be promoted with [Cplx::from_real] first.
    pub fn apply_reflected(
        self,
        op: BinaryOp,
        lhs: impl Into<Operand<B, D>>,
    ) -> Result<Self, CplxError> {
        match lhs.into() {
            Operand::Cplx(lhs) => Ok(lhs.apply_cplx(op, self)),
            Operand::Real(_) => Err(CplxError::Type(format!(
                "{op}(): argument 'other' (position 1) must be Tensor, not Cplx"
            ))),
            Operand::Scalar(lhs) => Ok(self.reflect_scalar(op, lhs.to_complex())),
        }
    }

    /// Batched complex matrix product, `(a + ib) @ (c + id) = (a@c - b@d) + i(a@d + b@c)`.
    ///
    /// Leading batch axes broadcast as in [Tensor::matmul].
    pub fn matmul(self, rhs: Self) -> Self {
        let (a, b) = self.into_parts();
        let (c, d) = rhs.into_parts();

        let real = a.clone().matmul(c.clone()) - b.clone().matmul(d.clone());
        let imag = a.matmul(d) + b.matmul(c);
        Self::from_parts(real, imag)
    }

    fn apply_cplx(self, op: BinaryOp, rhs: Self) -> Self {
        let (a, b) = self.into_parts();
        let (c, d) = rhs.into_parts();

        match op {
            BinaryOp::Add => Self::from_parts(a + c, b + d),
            BinaryOp::Sub => Self::from_parts(a - c, b - d),
            BinaryOp::Mul => {
                let real = a.clone() * c.clone() - b.clone() * d.clone();
                let imag = a * d + b * c;
                Self::from_parts(real, imag)
            }
            BinaryOp::Div => {
                let denom = c.clone() * c.clone() + d.clone() * d.clone();
                let real = (a.clone() * c.clone() + b.clone() * d.clone()) / denom.clone();
                let imag = (b * c - a * d) / denom;
                Self::from_parts(real, imag)
            }
        }
    }

    fn apply_real(self, op: BinaryOp, rhs: Tensor<B, D>) -> Self {
        let (a, b) = self.into_parts();

        let (real, imag) = match op {
            BinaryOp::Add => (a + rhs, b),
            BinaryOp::Sub => (a - rhs, b),
            BinaryOp::Mul => (a * rhs.clone(), b * rhs),
            BinaryOp::Div => (a / rhs.clone(), b / rhs),
        };

        // The real operand may broadcast the real part beyond the imaginary one.
        let imag = match imag.dims() == real.dims() {
            true => imag,
            false => imag.expand(real.dims()),
        };
        Self::from_parts(real, imag)
    }

    fn apply_scalar(self, op: BinaryOp, rhs: Complex64) -> Self {
        let (a, b) = self.into_parts();
        let Complex64 { re: c, im: d } = rhs;

        match op {
            BinaryOp::Add => Self::from_parts(a.add_scalar(c), b.add_scalar(d)),
            BinaryOp::Sub => Self::from_parts(a.sub_scalar(c), b.sub_scalar(d)),
            BinaryOp::Mul => {
                let real = a.clone().mul_scalar(c) - b.clone().mul_scalar(d);
                let imag = a.mul_scalar(d) + b.mul_scalar(c);
                Self::from_parts(real, imag)
            }
            BinaryOp::Div => {
                let denom = c * c + d * d;
                let real = (a.clone().mul_scalar(c) + b.clone().mul_scalar(d)).div_scalar(denom);
                let imag = (b.mul_scalar(c) - a.mul_scalar(d)).div_scalar(denom);
                Self::from_parts(real, imag)
            }
        }
    }

    fn reflect_scalar(self, op: BinaryOp, lhs: Complex64) -> Self {
        match op {
            BinaryOp::Add | BinaryOp::Mul => self.apply_scalar(op, lhs),
            BinaryOp::Sub => {
                let (a, b) = self.into_parts();
                Self::from_parts(a.neg().add_scalar(lhs.re), b.neg().add_scalar(lhs.im))
            }
            BinaryOp::Div => {
                let (a, b) = self.into_parts();
                let Complex64 { re: c, im: d } = lhs;
                let denom = a.clone() * a.clone() + b.clone() * b.clone();
                let real = (a.clone().mul_scalar(c) + b.clone().mul_scalar(d)) / denom.clone();
                let imag = (a.mul_scalar(d) - b.mul_scalar(c)) / denom;
                Self::from_parts(real, imag)
            }
        }
    }
}

macro_rules! binary_ops {
    ($trait:ident, $method:ident, $op:expr, [$($real:ty),*]) => {
        impl<B: Backend, const D: usize> $trait<Cplx<B, D>> for Cplx<B, D> {
            type Output = Self;

            fn $method(self, rhs: Cplx<B, D>) -> Self {
                self.apply($op, rhs)
            }
        }

        impl<B: Backend, const D: usize> $trait<Tensor<B, D>> for Cplx<B, D> {
            type Output = Self;

            fn $method(self, rhs: Tensor<B, D>) -> Self {
                self.apply($op, rhs)
            }
        }

        $(
            impl<B: Backend, const D: usize> $trait<$real> for Cplx<B, D> {
                type Output = Self;

                fn $method(self, rhs: $real) -> Self {
                    self.apply($op, rhs)
                }
            }

            impl<B: Backend, const D: usize> $trait<Cplx<B, D>> for $real {
                type Output = Cplx<B, D>;

                fn $method(self, rhs: Cplx<B, D>) -> Cplx<B, D> {
                    rhs.reflect_scalar($op, Scalar::from(self).to_complex())
                }
            }
        )*

        impl<B: Backend, const D: usize> $trait<Complex64> for Cplx<B, D> {
            type Output = Self;

            fn $method(self, rhs: Complex64) -> Self {
                self.apply($op, rhs)
            }
        }

        impl<B: Backend, const D: usize> $trait<Cplx<B, D>> for Complex64 {
            type Output = Cplx<B, D>;

            fn $method(self, rhs: Cplx<B, D>) -> Cplx<B, D> {
                rhs.reflect_scalar($op, self)
            }
        }
    };
}

binary_ops!(Add, add, BinaryOp::Add, [i32, i64, f64]);
binary_ops!(Sub, sub, BinaryOp::Sub, [i32, i64, f64]);
binary_ops!(Mul, mul, BinaryOp::Mul, [i32, i64, f64]);
binary_ops!(Div, div, BinaryOp::Div, [i32, i64, f64]);

impl<B: Backend, const D: usize> Neg for Cplx<B, D> {
    type Output = Self;

    fn neg(self) -> Self {
        let (real, imag) = self.into_parts();
        Self::from_parts(real.neg(), imag.neg())
    }
}
