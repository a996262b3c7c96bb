use burn::tensor::backend::Backend;
use burn::tensor::{Bool, DType, ElementConversion, Shape, Tensor, TensorData};
use num_complex::Complex64;

use crate::CplxError;

/// A complex tensor stored as a pair of real tensors.
///
/// Both parts always share the same shape, element type and device. A `Cplx` is a value:
/// every operation returns a new tensor and the parts can't be reassigned after
/// construction.
///
/// ```compile_fail
/// # use burn::backend::NdArray;
/// # use burn::tensor::Tensor;
/// # use burn_cplx::Cplx;
/// let device = Default::default();
/// let mut z = Cplx::from_real(Tensor::<NdArray, 1>::ones([3], &device));
/// z.real = Tensor::zeros([3], &device);
/// ```
///
/// ```compile_fail
/// # use burn::backend::NdArray;
/// # use burn::tensor::Tensor;
/// # use burn_cplx::Cplx;
/// let device = Default::default();
/// let mut z = Cplx::from_real(Tensor::<NdArray, 1>::ones([3], &device));
/// z[0] = z.clone();
/// ```
#[derive(Clone, Debug)]
pub struct Cplx<B: Backend, const D: usize> {
    real: Tensor<B, D>,
    imag: Tensor<B, D>,
}

/// A native scalar accepted by complex tensor constructors and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// An integer value.
    Int(i64),
    /// A real floating point value.
    Float(f64),
    /// A complex value.
    Complex(Complex64),
}

impl Scalar {
    /// The value as a complex number, with a zero imaginary part for real scalars.
    pub fn to_complex(self) -> Complex64 {
        match self {
            Scalar::Int(value) => Complex64::new(value as f64, 0.0),
            Scalar::Float(value) => Complex64::new(value, 0.0),
            Scalar::Complex(value) => value,
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<Complex64> for Scalar {
    fn from(value: Complex64) -> Self {
        Scalar::Complex(value)
    }
}

/// The accepted inputs of [Cplx::try_new].
#[derive(Clone, Debug)]
pub enum CplxInput<B: Backend, const D: usize> {
    /// Real and imaginary parts, which must agree in shape, dtype and device.
    Parts {
        /// The real part.
        real: Tensor<B, D>,
        /// The imaginary part.
        imag: Tensor<B, D>,
    },
    /// A real tensor; the imaginary part is zero.
    Real(Tensor<B, D>),
    /// A float or complex scalar. Integers are rejected.
    Scalar(Scalar),
}

impl<B: Backend, const D: usize> From<(Tensor<B, D>, Tensor<B, D>)> for CplxInput<B, D> {
    fn from((real, imag): (Tensor<B, D>, Tensor<B, D>)) -> Self {
        CplxInput::Parts { real, imag }
    }
}

impl<B: Backend, const D: usize> From<Tensor<B, D>> for CplxInput<B, D> {
    fn from(real: Tensor<B, D>) -> Self {
        CplxInput::Real(real)
    }
}

macro_rules! scalar_input {
    ($($ty:ty),*) => {
        $(
            impl<B: Backend, const D: usize> From<$ty> for CplxInput<B, D> {
                fn from(value: $ty) -> Self {
                    CplxInput::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_input!(Scalar, i32, i64, f32, f64, Complex64);

impl<B: Backend, const D: usize> Cplx<B, D> {
    /// Create a complex tensor from any accepted input.
    ///
    /// Scalars are placed on `device` as a single element tensor of shape `[1; D]`; tensor
    /// inputs keep their own device.
    ///
    /// # Errors
    ///
    /// - [CplxError::Type] for integer scalars or parts with different dtypes.
    /// - [CplxError::Value] for parts with different shapes or devices.
    pub fn try_new(
        input: impl Into<CplxInput<B, D>>,
        device: &B::Device,
    ) -> Result<Self, CplxError> {
        match input.into() {
            CplxInput::Parts { real, imag } => Self::new(real, imag),
            CplxInput::Real(real) => Ok(Self::from_real(real)),
            CplxInput::Scalar(value) => Self::from_scalar(value, device),
        }
    }

    /// Pair a real and an imaginary part.
    pub fn new(real: Tensor<B, D>, imag: Tensor<B, D>) -> Result<Self, CplxError> {
        if real.dtype() != imag.dtype() {
            return Err(CplxError::Type(format!(
                "real and imaginary parts must have the same dtype, got {:?} and {:?}",
                real.dtype(),
                imag.dtype()
            )));
        }

        if real.dims() != imag.dims() {
            return Err(CplxError::Value(format!(
                "real and imaginary parts must have the same shape, got {:?} and {:?}",
                real.dims(),
                imag.dims()
            )));
        }

        if real.device() != imag.device() {
            return Err(CplxError::Value(format!(
                "real and imaginary parts must be on the same device, got {:?} and {:?}",
                real.device(),
                imag.device()
            )));
        }

        Ok(Self { real, imag })
    }

    /// Promote a real tensor, with a zero imaginary part.
    pub fn from_real(real: Tensor<B, D>) -> Self {
        let imag = Tensor::zeros(real.shape(), &real.device());
        Self { real, imag }
    }

    /// Promote a float or complex scalar to a single element tensor of shape `[1; D]`.
    ///
    /// Integers are rejected with [CplxError::Type], mirroring tensor constructors that
    /// only accept floating point data.
    pub fn from_scalar(value: impl Into<Scalar>, device: &B::Device) -> Result<Self, CplxError> {
        let value = match value.into() {
            Scalar::Int(value) => {
                return Err(CplxError::Type(format!(
                    "expected a tensor, a float or a complex value, got the integer {value}"
                )));
            }
            Scalar::Float(value) => Complex64::new(value, 0.0),
            Scalar::Complex(value) => value,
        };

        Ok(Self {
            real: Tensor::full([1; D], value.re, device),
            imag: Tensor::full([1; D], value.im, device),
        })
    }

    /// Build a complex tensor from its modulus and phase (in radians).
    pub fn from_polar(modulus: Tensor<B, D>, phase: Tensor<B, D>) -> Result<Self, CplxError> {
        let real = modulus.clone() * phase.clone().cos();
        let imag = modulus * phase.sin();
        Self::new(real, imag)
    }

    /// Pair two parts already known to agree, e.g. the outputs of the same broadcast.
    pub(crate) fn from_parts(real: Tensor<B, D>, imag: Tensor<B, D>) -> Self {
        debug_assert_eq!(real.dims(), imag.dims());
        Self { real, imag }
    }

    /// The real part.
    pub fn real(&self) -> Tensor<B, D> {
        self.real.clone()
    }

    /// The imaginary part.
    pub fn imag(&self) -> Tensor<B, D> {
        self.imag.clone()
    }

    /// Consume the tensor and return `(real, imag)`.
    pub fn into_parts(self) -> (Tensor<B, D>, Tensor<B, D>) {
        (self.real, self.imag)
    }

    /// The complex conjugate, `real - i imag`.
    pub fn conj(&self) -> Self {
        Self::from_parts(self.real.clone(), self.imag.clone().neg())
    }

    /// Alias of [conj](Cplx::conj).
    pub fn conjugate(&self) -> Self {
        self.conj()
    }

    /// The elementwise modulus `sqrt(real^2 + imag^2)`.
    pub fn abs(&self) -> Tensor<B, D> {
        let real = self.real.clone();
        let imag = self.imag.clone();
        (real.clone() * real + imag.clone() * imag).sqrt()
    }

    /// The elementwise phase `atan2(imag, real)` in radians, within `[-pi, pi]`.
    ///
    /// Recomputed on every call and evaluated on the host, which requires reading both
    /// parts back from the device.
    pub fn angle(&self) -> Tensor<B, D> {
        atan2(self.imag.clone(), self.real.clone())
    }

    /// The value of a single element tensor.
    ///
    /// # Errors
    ///
    /// [CplxError::Value] unless the tensor holds exactly one element.
    pub fn item(&self) -> Result<Complex64, CplxError> {
        let num_elements = self.num_elements();
        if num_elements != 1 {
            return Err(CplxError::Value(format!(
                "only one element tensors can be converted to scalars, got {num_elements} elements"
            )));
        }

        let re = self.real.clone().into_scalar().elem::<f64>();
        let im = self.imag.clone().into_scalar().elem::<f64>();
        Ok(Complex64::new(re, im))
    }

    /// The size of the leading axis.
    pub fn len(&self) -> usize {
        self.dims()[0]
    }

    /// Whether the leading axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dimensions of the tensor.
    pub fn dims(&self) -> [usize; D] {
        self.real.dims()
    }

    /// The shape of the tensor.
    pub fn shape(&self) -> Shape {
        self.real.shape()
    }

    /// The number of complex elements.
    pub fn num_elements(&self) -> usize {
        self.shape().num_elements()
    }

    /// The dtype shared by both parts.
    pub fn dtype(&self) -> DType {
        self.real.dtype()
    }

    /// The device holding both parts.
    pub fn device(&self) -> B::Device {
        self.real.device()
    }

    /// Move both parts to `device`.
    pub fn to_device(self, device: &B::Device) -> Self {
        Self::from_parts(self.real.to_device(device), self.imag.to_device(device))
    }

    /// Whether both operands have the same dimensions.
    pub fn same_shape<const D2: usize>(&self, other: &Cplx<B, D2>) -> bool {
        self.dims().as_slice() == other.dims().as_slice()
    }

    /// Reshape both parts.
    pub fn reshape<const D2: usize>(self, dims: [usize; D2]) -> Cplx<B, D2> {
        Cplx::from_parts(self.real.reshape(dims), self.imag.reshape(dims))
    }

    /// Swap the last two axes. No conjugation is applied.
    pub fn transpose(self) -> Self {
        Self::from_parts(self.real.transpose(), self.imag.transpose())
    }

    /// Swap two axes.
    pub fn swap_dims(self, dim1: usize, dim2: usize) -> Self {
        Self::from_parts(
            self.real.swap_dims(dim1, dim2),
            self.imag.swap_dims(dim1, dim2),
        )
    }

    /// Insert leading axes of size one until the rank is `D2`.
    pub fn unsqueeze<const D2: usize>(self) -> Cplx<B, D2> {
        Cplx::from_parts(self.real.unsqueeze(), self.imag.unsqueeze())
    }

    /// Merge the axes `start_dim..=end_dim` into one.
    pub fn flatten<const D2: usize>(self, start_dim: usize, end_dim: usize) -> Cplx<B, D2> {
        Cplx::from_parts(
            self.real.flatten(start_dim, end_dim),
            self.imag.flatten(start_dim, end_dim),
        )
    }

    /// Elementwise equality of both parts.
    pub fn equal(self, other: Self) -> Tensor<B, D, Bool> {
        let real = self.real.equal(other.real).int();
        let imag = self.imag.equal(other.imag).int();
        (real * imag).bool()
    }

    /// Whether both parts are close to the parts of `other`.
    ///
    /// See [Tensor::all_close] for the meaning of `rtol` and `atol`.
    pub fn all_close(self, other: Self, rtol: Option<f64>, atol: Option<f64>) -> bool {
        self.real.all_close(other.real, rtol, atol) && self.imag.all_close(other.imag, rtol, atol)
    }
}

/// Elementwise two-argument arctangent.
///
/// Burn exposes no `atan2` kernel, so the values are computed on the host and uploaded to
/// the device of `x`.
pub(crate) fn atan2<B: Backend, const D: usize>(y: Tensor<B, D>, x: Tensor<B, D>) -> Tensor<B, D> {
    let device = x.device();
    let dims = x.dims();
    log::debug!("Computing atan2 on the host for shape {dims:?}");

    let y = y.into_data();
    let x = x.into_data();
    let values: Vec<B::FloatElem> = y
        .iter::<f64>()
        .zip(x.iter::<f64>())
        .map(|(y, x)| y.atan2(x).elem())
        .collect();

    Tensor::from_data(TensorData::new(values, dims.to_vec()), &device)
}
