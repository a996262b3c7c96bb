#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Complex-valued tensors for Burn.
//!
//! A [`Cplx`] pairs two real tensors of identical shape and element type, one holding the
//! real parts and one the imaginary parts, and implements complex arithmetic, elementary
//! functions, indexing and linear algebra by orchestrating operations on those two tensors.
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use burn_cplx::{cplx_exp, Cplx};
//!
//! let device = Default::default();
//! let real = Tensor::<NdArray, 2>::from_data([[1.0, 2.0], [3.0, 4.0]], &device);
//! let imag = Tensor::<NdArray, 2>::from_data([[0.5, -1.0], [0.0, 2.0]], &device);
//!
//! let z = Cplx::new(real, imag).unwrap();
//! let w = cplx_exp(z.clone() * z.conj());
//! assert_eq!(w.dims(), [2, 2]);
//! ```

mod convert;
mod cplx;
mod error;
mod functional;
mod index;
mod nn;
mod ops;

pub use convert::*;
pub use cplx::*;
pub use error::*;
pub use functional::*;
pub use index::*;
pub use nn::*;
pub use ops::*;

/// Re-export of the complex scalar type used at the crate boundary.
pub use num_complex::Complex64;

#[cfg(test)]
pub(crate) type TestBackend = burn::backend::NdArray<f64>;
