use burn::tensor::backend::Backend;

use crate::Cplx;

/// Complex exponential, `exp(a + ib) = e^a (cos b + i sin b)`.
pub fn cplx_exp<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    let (a, b) = input.into_parts();
    let modulus = a.exp();

    Cplx::from_parts(modulus.clone() * b.clone().cos(), modulus * b.sin())
}

/// Principal complex logarithm, `log z = ln|z| + i angle(z)`.
pub fn cplx_log<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    Cplx::from_parts(input.abs().log(), input.angle())
}

/// Complex sine, `sin(a + ib) = sin a cosh b + i cos a sinh b`.
pub fn cplx_sin<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    let (a, b) = input.into_parts();

    Cplx::from_parts(
        a.clone().sin() * b.clone().cosh(),
        a.cos() * b.sinh(),
    )
}

/// Complex cosine, `cos(a + ib) = cos a cosh b - i sin a sinh b`.
pub fn cplx_cos<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    let (a, b) = input.into_parts();

    Cplx::from_parts(
        a.clone().cos() * b.clone().cosh(),
        (a.sin() * b.sinh()).neg(),
    )
}

/// Complex tangent, `sin z / cos z`.
pub fn cplx_tan<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    cplx_sin(input.clone()) / cplx_cos(input)
}

/// Complex hyperbolic sine, `sinh(a + ib) = sinh a cos b + i cosh a sin b`.
pub fn cplx_sinh<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    let (a, b) = input.into_parts();

    Cplx::from_parts(
        a.clone().sinh() * b.clone().cos(),
        a.cosh() * b.sin(),
    )
}

/// Complex hyperbolic cosine, `cosh(a + ib) = cosh a cos b + i sinh a sin b`.
pub fn cplx_cosh<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    let (a, b) = input.into_parts();

    Cplx::from_parts(
        a.clone().cosh() * b.clone().cos(),
        a.sinh() * b.sin(),
    )
}

/// Complex hyperbolic tangent, `sinh z / cosh z`.
pub fn cplx_tanh<B: Backend, const D: usize>(input: Cplx<B, D>) -> Cplx<B, D> {
    cplx_sinh(input.clone()) / cplx_cosh(input)
}

/// Applies a complex affine transformation to the input tensor.
///
/// ```math
/// y = x @ weight^T + [bias]
/// ```
///
/// The weight is transposed over its two axes without conjugation, following the
/// `[d_output, d_input]` layout of linear layers.
///
/// # Arguments:
///
/// - `input` is the input tensor, ``[..., d_input]``.
/// - `weight` is the weight tensor, ``[d_output, d_input]``.
/// - `bias` is the bias tensor (optional), ``[d_output]``.
///
/// # Returns:
///
/// The transformed tensor, ``[..., d_output]``.
pub fn cplx_linear<B: Backend, const D: usize>(
    input: Cplx<B, D>,
    weight: Cplx<B, 2>,
    bias: Option<Cplx<B, 1>>,
) -> Cplx<B, D> {
    if D == 1 {
        // Insert and remove an extra batch dimension for the batch matmul to work.
        return cplx_linear::<B, 2>(input.unsqueeze(), weight, bias).flatten(0, 1);
    }

    log::trace!(
        "Complex linear transform of {:?} with weight {:?}",
        input.dims(),
        weight.dims()
    );

    let output = input.matmul(weight.transpose().unsqueeze::<D>());
    match bias {
        Some(bias) => output + bias.unsqueeze::<D>(),
        None => output,
    }
}
