use burn::{
    config::Config,
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::log_softmax, backend::Backend, Tensor},
};

use super::{init::transformer_weights_init, Activation, ConfigError};

/// Configuration for a [MultiLayerPerceptron]
#[derive(Config, Debug)]
pub struct MultiLayerPerceptronConfig {
    /// Size of the incoming features and of every hidden layer
    pub hidden_size: usize,

    /// Number of output classes
    pub num_classes: usize,

    /// Number of linear layers, including the output projection
    #[config(default = 2)]
    pub num_layers: usize,

    /// Activation applied after every hidden layer
    #[config(default = "Activation::Relu")]
    pub activation: Activation,

    /// Whether to normalize the output into log-probabilities
    #[config(default = true)]
    pub log_softmax: bool,
}

impl MultiLayerPerceptronConfig {
    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hidden_size == 0 {
            return Err(ConfigError::ZeroSize("hidden_size"));
        }

        if self.num_classes == 0 {
            return Err(ConfigError::ZeroSize("num_classes"));
        }

        if self.num_layers == 0 {
            return Err(ConfigError::NoLayers);
        }

        Ok(())
    }

    /// Initialize the perceptron with default weights
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<MultiLayerPerceptron<B>, ConfigError> {
        self.validate()?;

        let mut layers = (1..self.num_layers)
            .map(|_| LinearConfig::new(self.hidden_size, self.hidden_size).init(device))
            .collect::<Vec<_>>();

        layers.push(LinearConfig::new(self.hidden_size, self.num_classes).init(device));

        log::debug!(
            "Initialized perceptron: {} -> {} over {} layer(s), activation {}, log_softmax {}",
            self.hidden_size,
            self.num_classes,
            self.num_layers,
            self.activation,
            self.log_softmax
        );

        Ok(MultiLayerPerceptron {
            layers,
            activation: self.activation,
            log_softmax: self.log_softmax,
        })
    }
}

/// A stack of linear layers projecting features onto class scores.
///
/// Every layer but the last is square and followed by the activation. The last layer
/// projects onto the classes and is optionally followed by a log-softmax. Only the
/// last axis of the input is projected, so the same head serves `[batch, channel]`
/// and `[batch, time, channel]` inputs.
#[derive(Module, Debug)]
pub struct MultiLayerPerceptron<B: Backend> {
    /// Linear layers, output projection last
    pub layers: Vec<Linear<B>>,

    /// Activation between layers
    pub activation: Activation,

    /// Whether the output is log-softmax normalized
    pub log_softmax: bool,
}

impl<B: Backend> MultiLayerPerceptron<B> {
    /// Project the last axis of the input onto class scores
    pub fn forward<const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        let last = self.layers.len().saturating_sub(1);

        let mut output = input;
        for (i, layer) in self.layers.iter().enumerate() {
            output = layer.forward(output);

            if i < last {
                output = self.activation.forward(output);
            }
        }

        if self.log_softmax {
            log_softmax(output, D - 1)
        } else {
            output
        }
    }

    /// Reinitialize every layer with the pretrained transformer scheme
    pub fn init_transformer_weights(self, xavier: bool) -> Self {
        log::debug!(
            "Reinitializing {} perceptron layer(s) with the transformer scheme (xavier: {})",
            self.layers.len(),
            xavier
        );

        Self {
            layers: self
                .layers
                .into_iter()
                .map(|layer| transformer_weights_init(layer, xavier))
                .collect(),
            ..self
        }
    }

    /// The number of output classes
    pub fn num_classes(&self) -> usize {
        self.layers
            .last()
            .map(|layer| layer.weight.val().dims()[1])
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{Data, Distribution, Tensor},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn test_layer_layout() {
        let device = Default::default();
        let mlp = MultiLayerPerceptronConfig::new(8, 3)
            .with_num_layers(3)
            .init::<TestBackend>(&device)
            .unwrap();

        let shapes = mlp
            .layers
            .iter()
            .map(|layer| layer.weight.val().dims())
            .collect::<Vec<_>>();

        assert_eq!(shapes, vec![[8, 8], [8, 8], [8, 3]]);
        assert_eq!(mlp.num_classes(), 3);
    }

    #[test]
    fn test_single_layer_is_a_projection() {
        let device = Default::default();
        let mlp = MultiLayerPerceptronConfig::new(8, 3)
            .with_num_layers(1)
            .with_log_softmax(false)
            .init::<TestBackend>(&device)
            .unwrap();

        let input = Tensor::<TestBackend, 2>::random([4, 8], Distribution::Default, &device);
        let expected = mlp.layers[0].forward(input.clone());

        mlp.forward(input)
            .into_data()
            .assert_approx_eq(&expected.into_data(), 5);
    }

    #[test]
    fn test_zero_layers_is_rejected() {
        let device = Default::default();
        let result = MultiLayerPerceptronConfig::new(8, 3)
            .with_num_layers(0)
            .init::<TestBackend>(&device);

        assert_eq!(result.err(), Some(ConfigError::NoLayers));
    }

    #[test]
    fn test_log_softmax_rows_sum_to_one() {
        let device = Default::default();
        let mlp = MultiLayerPerceptronConfig::new(8, 5)
            .with_activation(Activation::Gelu)
            .init::<TestBackend>(&device)
            .unwrap();

        let input = Tensor::<TestBackend, 3>::random([2, 3, 8], Distribution::Default, &device);
        let sums = mlp.forward(input).exp().sum_dim(2);

        sums.into_data()
            .assert_approx_eq(&Data::from([[[1.0], [1.0], [1.0]], [[1.0], [1.0], [1.0]]]), 4);
    }

    #[test]
    fn test_transformer_init_keeps_layout() {
        let device = Default::default();
        let mlp = MultiLayerPerceptronConfig::new(16, 4)
            .init::<TestBackend>(&device)
            .unwrap()
            .init_transformer_weights(false);

        assert_eq!(mlp.layers.len(), 2);
        assert_eq!(mlp.num_classes(), 4);

        for layer in mlp.layers {
            let bias = layer.bias.unwrap().val();
            assert_eq!(bias.abs().sum().into_scalar(), 0.0);
        }
    }

    #[test]
    fn test_config_round_trip() {
        let config = MultiLayerPerceptronConfig::new(32, 7).with_activation(Activation::Tanh);

        let json = serde_json::to_string(&config).unwrap();
        let loaded: MultiLayerPerceptronConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.activation, Activation::Tanh);
        assert_eq!(loaded.num_layers, 2);
        assert!(loaded.log_softmax);
    }
}
