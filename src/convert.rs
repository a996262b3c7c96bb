use burn::tensor::backend::Backend;
use burn::tensor::{Element, ElementConversion, Int, Tensor, TensorData};
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use num_complex::{Complex, Complex64};

use crate::{Cplx, CplxError};

/// Pack a complex tensor into a real tensor with a doubled trailing axis holding
/// interleaved `(real, imag)` pairs.
///
/// # Shapes
///
/// - input: `[..., n]`
/// - output: `[..., 2 * n]`, with `output[..., 2k] = real[..., k]` and
///   `output[..., 2k + 1] = imag[..., k]`.
pub fn cplx_to_real<B: Backend, const D: usize>(input: Cplx<B, D>) -> Tensor<B, D> {
    let size = input.dims()[D - 1];
    let device = input.device();
    let (real, imag) = input.into_parts();

    // Stack the parts end to end, then gather them pairwise.
    let stacked = Tensor::cat(vec![real, imag], D - 1);
    let positions: Vec<usize> = (0..size).flat_map(|k| [k, size + k]).collect();
    stacked.select(D - 1, int_tensor::<B>(&positions, &device))
}

/// Unpack a real tensor of interleaved `(real, imag)` pairs, the inverse of [cplx_to_real].
///
/// # Errors
///
/// [CplxError::Value] when the trailing axis has an odd size.
pub fn real_to_cplx<B: Backend, const D: usize>(
    input: Tensor<B, D>,
) -> Result<Cplx<B, D>, CplxError> {
    let size = even_trailing_size(&input)?;
    let device = input.device();

    let even: Vec<usize> = (0..size).map(|k| 2 * k).collect();
    let odd: Vec<usize> = (0..size).map(|k| 2 * k + 1).collect();
    let real = input.clone().select(D - 1, int_tensor::<B>(&even, &device));
    let imag = input.select(D - 1, int_tensor::<B>(&odd, &device));

    Ok(Cplx::from_parts(real, imag))
}

/// Pack a complex tensor into a real tensor holding every real part followed by every
/// imaginary part along the trailing axis, `[..., real | imag]`.
pub fn cplx_to_concatenated_real<B: Backend, const D: usize>(input: Cplx<B, D>) -> Tensor<B, D> {
    let (real, imag) = input.into_parts();
    Tensor::cat(vec![real, imag], D - 1)
}

/// Split the trailing axis of a real tensor in halves, the first being the real parts and
/// the second the imaginary parts. Inverse of [cplx_to_concatenated_real].
///
/// # Errors
///
/// [CplxError::Value] when the trailing axis has an odd size.
pub fn concatenated_real_to_cplx<B: Backend, const D: usize>(
    input: Tensor<B, D>,
) -> Result<Cplx<B, D>, CplxError> {
    let size = even_trailing_size(&input)?;

    let real = input.clone().narrow(D - 1, 0, size);
    let imag = input.narrow(D - 1, size, size);
    Ok(Cplx::from_parts(real, imag))
}

/// Half the size of the trailing axis, which must be even.
fn even_trailing_size<B: Backend, const D: usize>(input: &Tensor<B, D>) -> Result<usize, CplxError> {
    let size = input.dims()[D - 1];
    if size % 2 != 0 {
        return Err(CplxError::Value(format!(
            "the trailing axis must have an even size to hold (real, imag) pairs, got {size}"
        )));
    }

    Ok(size / 2)
}

fn int_tensor<B: Backend>(positions: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let values: Vec<B::IntElem> = positions.iter().map(|&p| (p as i64).elem()).collect();
    Tensor::from_data(TensorData::new(values, [positions.len()]), device)
}

impl<B: Backend, const D: usize> Cplx<B, D> {
    /// Create a complex tensor from a complex `ndarray` array, splitting it into contiguous
    /// real and imaginary parts on `device`.
    ///
    /// # Errors
    ///
    /// [CplxError::Value] when the array rank isn't `D`.
    pub fn from_ndarray<S, Dim, F>(
        array: &ArrayBase<S, Dim>,
        device: &B::Device,
    ) -> Result<Self, CplxError>
    where
        S: Data<Elem = Complex<F>>,
        Dim: Dimension,
        F: Element,
    {
        let dims: [usize; D] = array.shape().try_into().map_err(|_| {
            CplxError::Value(format!(
                "expected an array of rank {D}, got shape {:?}",
                array.shape()
            ))
        })?;

        // Logical (row major) order, whatever the memory layout of the array.
        let real: Vec<B::FloatElem> = array.iter().map(|value| value.re.elem()).collect();
        let imag: Vec<B::FloatElem> = array.iter().map(|value| value.im.elem()).collect();

        Ok(Self::from_parts(
            Tensor::from_data(TensorData::new(real, dims), device),
            Tensor::from_data(TensorData::new(imag, dims), device),
        ))
    }

    /// Read both parts back from the device into a complex `ndarray` array.
    pub fn to_ndarray(&self) -> Result<ArrayD<Complex64>, CplxError> {
        let dims = self.dims();
        let real = self.real().into_data();
        let imag = self.imag().into_data();

        let values: Vec<Complex64> = real
            .iter::<f64>()
            .zip(imag.iter::<f64>())
            .map(|(re, im)| Complex64::new(re, im))
            .collect();

        Ok(ArrayD::from_shape_vec(IxDyn(&dims), values)?)
    }
}
