use burn::{nn::DropoutConfig, tensor::backend::Backend};

use crate::modules::{check_dropout, Activation, ConfigError, MultiLayerPerceptronConfig};

use super::{Model, DEFAULT_IDX_CONDITIONED_ON};

/// The Sequence Classifier Configuration
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Size of the incoming hidden states (e.g., 768 for bert-base-uncased)
    pub hidden_size: usize,

    /// Number of label types
    pub num_classes: usize,

    /// Number of perceptron layers, including the output projection
    #[config(default = 2)]
    pub num_layers: usize,

    /// Activation between perceptron layers
    #[config(default = "Activation::Relu")]
    pub activation: Activation,

    /// Whether to emit log-probabilities instead of raw logits
    #[config(default = true)]
    pub log_softmax: bool,

    /// Dropout applied to the hidden states
    #[config(default = 0.0)]
    pub dropout: f64,

    /// Reinitialize weights the way pretrained transformer encoders do
    #[config(default = true)]
    pub use_transformer_pretrained: bool,

    /// The time step the classifier reads during training and plain forward passes
    #[config(default = "DEFAULT_IDX_CONDITIONED_ON")]
    pub idx_conditioned_on: usize,
}

impl Config {
    /// The configuration of the underlying perceptron
    pub fn mlp(&self) -> MultiLayerPerceptronConfig {
        MultiLayerPerceptronConfig::new(self.hidden_size, self.num_classes)
            .with_num_layers(self.num_layers)
            .with_activation(self.activation)
            .with_log_softmax(self.log_softmax)
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mlp().validate()?;
        check_dropout(self.dropout)
    }

    /// Initialize the classifier
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Model<B>, ConfigError> {
        check_dropout(self.dropout)?;

        let mlp = self.mlp().init(device)?;
        let mlp = if self.use_transformer_pretrained {
            mlp.init_transformer_weights(false)
        } else {
            mlp
        };

        Ok(Model {
            mlp,
            dropout: DropoutConfig::new(self.dropout).init(),
            hidden_size: self.hidden_size,
            idx_conditioned_on: self.idx_conditioned_on,
        })
    }
}
