use burn::{
    module::{Param, ParamId},
    nn::Linear,
    tensor::{backend::Backend, Distribution, Tensor},
};

/// Standard deviation of the normal distribution used by pretrained transformer encoders
pub const TRANSFORMER_INIT_STD: f64 = 0.02;

/// Reinitialize a linear layer the way pretrained transformer encoders initialize theirs.
///
/// Weights are drawn from `Normal(0, 0.02)`, or from Xavier-uniform when `xavier` is set.
/// Biases are always reset to zero.
pub fn transformer_weights_init<B: Backend>(linear: Linear<B>, xavier: bool) -> Linear<B> {
    let weight = linear.weight.val();
    let device = weight.device();
    let [d_input, d_output] = weight.dims();

    let distribution = if xavier {
        let bound = (6.0 / (d_input + d_output) as f64).sqrt();
        Distribution::Uniform(-bound, bound)
    } else {
        Distribution::Normal(0.0, TRANSFORMER_INIT_STD)
    };

    let bias = linear.bias.map(|bias| {
        let zeros = Tensor::zeros(bias.val().dims(), &device);
        Param::initialized(ParamId::new(), zeros.require_grad())
    });

    let weight = Tensor::random([d_input, d_output], distribution, &device);

    Linear {
        weight: Param::initialized(ParamId::new(), weight.require_grad()),
        bias,
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{Autodiff, NdArray},
        nn::LinearConfig,
    };

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn test_bias_is_zeroed() {
        let device = Default::default();
        let linear = LinearConfig::new(64, 32).init::<TestBackend>(&device);

        let linear = transformer_weights_init(linear, false);

        let bias = linear.bias.expect("bias should be kept").val();
        assert_eq!(bias.dims(), [32]);
        assert_eq!(bias.abs().sum().into_scalar(), 0.0);
    }

    #[test]
    fn test_normal_weights_have_small_spread() {
        TestBackend::seed(42);
        let device = Default::default();
        let linear = LinearConfig::new(128, 128).init::<TestBackend>(&device);

        let linear = transformer_weights_init(linear, false);
        let weight = linear.weight.val();

        assert_eq!(weight.dims(), [128, 128]);

        let mean = weight.clone().mean().into_scalar();
        let std = weight.var(0).mean().into_scalar().sqrt();

        assert!(mean.abs() < 0.005, "mean was {}", mean);
        assert!((std - 0.02).abs() < 0.005, "std was {}", std);
    }

    #[test]
    fn test_xavier_weights_stay_within_bound() {
        let device = Default::default();
        let linear = LinearConfig::new(16, 8).init::<TestBackend>(&device);

        let linear = transformer_weights_init(linear, true);
        let bound = (6.0f32 / 24.0).sqrt();

        let max = linear.weight.val().abs().max().into_scalar();
        assert!(max <= bound, "max was {}", max);
    }

    #[test]
    fn test_layer_without_bias() {
        let device = Default::default();
        let linear = LinearConfig::new(4, 2)
            .with_bias(false)
            .init::<TestBackend>(&device);

        let linear = transformer_weights_init(linear, false);

        assert!(linear.bias.is_none());
    }

    #[test]
    fn test_reinitialized_layer_is_trainable() {
        let device = Default::default();
        let linear = LinearConfig::new(6, 3).init::<Autodiff<NdArray>>(&device);
        let linear = transformer_weights_init(linear, false);

        let input = Tensor::<Autodiff<NdArray>, 2>::ones([2, 6], &device);
        let grads = linear.forward(input).sum().backward();

        let weight_grad = linear.weight.grad(&grads).expect("weight should have a gradient");
        assert_eq!(weight_grad.dims(), [6, 3]);

        let bias = linear.bias.as_ref().expect("bias should be kept");
        assert!(bias.grad(&grads).is_some());
    }
}
