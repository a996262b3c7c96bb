use burn::config::Config;
use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};

use crate::{Cplx, cplx_linear};

/// Configuration to create a [complex linear](CplxLinear) layer using the
/// [init function](CplxLinearConfig::init).
#[derive(Config, Debug)]
pub struct CplxLinearConfig {
    /// The size of the input features.
    pub d_input: usize,
    /// The size of the output features.
    pub d_output: usize,
    /// If a bias should be applied during the linear transformation.
    #[config(default = true)]
    pub bias: bool,
}

/// Applies a complex linear transformation to the input tensor:
///
/// `O = IW^T + b`
///
/// Should be created with [CplxLinearConfig].
#[derive(Module, Debug)]
pub struct CplxLinear<B: Backend> {
    /// Real part of the weight, `[d_output, d_input]`.
    pub weight_real: Param<Tensor<B, 2>>,
    /// Imaginary part of the weight, `[d_output, d_input]`.
    pub weight_imag: Param<Tensor<B, 2>>,
    /// Real part of the bias, `[d_output]`.
    pub bias_real: Option<Param<Tensor<B, 1>>>,
    /// Imaginary part of the bias, `[d_output]`.
    pub bias_imag: Option<Param<Tensor<B, 1>>>,
}

impl CplxLinearConfig {
    /// Initialize a new [complex linear](CplxLinear) module.
    ///
    /// Both parts of the weight are drawn uniformly from `[-k, k]` with
    /// `k = 1 / sqrt(d_input)`; the bias starts at zero.
    pub fn init<B: Backend>(&self, device: &B::Device) -> CplxLinear<B> {
        log::debug!(
            "Initializing complex linear layer {} -> {} (bias: {})",
            self.d_input,
            self.d_output,
            self.bias
        );

        let bound = 1.0 / (self.d_input as f64).sqrt();
        let shape = [self.d_output, self.d_input];
        let weight = || {
            Param::from_tensor(Tensor::random(
                shape,
                Distribution::Uniform(-bound, bound),
                device,
            ))
        };
        let bias = || {
            self.bias
                .then(|| Param::from_tensor(Tensor::zeros([self.d_output], device)))
        };

        CplxLinear {
            weight_real: weight(),
            weight_imag: weight(),
            bias_real: bias(),
            bias_imag: bias(),
        }
    }
}

impl<B: Backend> CplxLinear<B> {
    /// The complex weight, `[d_output, d_input]`.
    pub fn weight(&self) -> Cplx<B, 2> {
        Cplx::from_parts(self.weight_real.val(), self.weight_imag.val())
    }

    /// The complex bias, `[d_output]`, when enabled.
    pub fn bias(&self) -> Option<Cplx<B, 1>> {
        match (&self.bias_real, &self.bias_imag) {
            (Some(real), Some(imag)) => Some(Cplx::from_parts(real.val(), imag.val())),
            _ => None,
        }
    }

    /// Applies the forward pass on the input tensor.
    ///
    /// See [cplx_linear] for more information.
    ///
    /// # Shapes
    ///
    /// - input: `[..., d_input]`
    /// - output: `[..., d_output]`
    pub fn forward<const D: usize>(&self, input: Cplx<B, D>) -> Cplx<B, D> {
        cplx_linear(input, self.weight(), self.bias())
    }
}
