use burn::{nn::DropoutConfig, tensor::backend::Backend};

use crate::modules::{check_dropout, Activation, ConfigError, MultiLayerPerceptronConfig};

use super::Model;

/// Depth of both the intent and the slot perceptrons
pub const HEAD_NUM_LAYERS: usize = 2;

/// The Joint Intent/Slot Classifier Configuration
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Size of the incoming hidden states (e.g., 768 for bert-base-uncased)
    pub hidden_size: usize,

    /// Number of intents
    pub num_intents: usize,

    /// Number of slot labels
    pub num_slots: usize,

    /// Dropout applied to the hidden states, shared by both heads
    #[config(default = 0.0)]
    pub dropout: f64,

    /// Reinitialize weights the way pretrained transformer encoders do
    #[config(default = true)]
    pub use_transformer_pretrained: bool,

    /// Share of the intent loss in the joint loss; the slot loss gets the rest
    #[config(default = 0.6)]
    pub intent_loss_weight: f64,

    /// A slot label id excluded from the slot loss, such as the id assigned to padding
    pub pad_slot_id: Option<usize>,
}

impl Config {
    /// The configuration of the intent perceptron
    pub fn intent_mlp(&self) -> MultiLayerPerceptronConfig {
        head(self.hidden_size, self.num_intents)
    }

    /// The configuration of the slot perceptron
    pub fn slot_mlp(&self) -> MultiLayerPerceptronConfig {
        head(self.hidden_size, self.num_slots)
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_intents == 0 {
            return Err(ConfigError::ZeroSize("num_intents"));
        }

        if self.num_slots == 0 {
            return Err(ConfigError::ZeroSize("num_slots"));
        }

        if !(0.0..=1.0).contains(&self.intent_loss_weight) {
            return Err(ConfigError::Weight {
                name: "intent_loss_weight",
                value: self.intent_loss_weight,
            });
        }

        self.intent_mlp().validate()?;
        check_dropout(self.dropout)
    }

    /// Initialize the classifier
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Model<B>, ConfigError> {
        self.validate()?;

        let mut intent_mlp = self.intent_mlp().init(device)?;
        let mut slot_mlp = self.slot_mlp().init(device)?;

        if self.use_transformer_pretrained {
            intent_mlp = intent_mlp.init_transformer_weights(false);
            slot_mlp = slot_mlp.init_transformer_weights(false);
        }

        Ok(Model {
            intent_mlp,
            slot_mlp,
            dropout: DropoutConfig::new(self.dropout).init(),
            hidden_size: self.hidden_size,
            intent_loss_weight: self.intent_loss_weight,
            pad_slot_id: self.pad_slot_id,
        })
    }
}

/// Both heads are fixed two-layer relu perceptrons without log-softmax
fn head(hidden_size: usize, num_classes: usize) -> MultiLayerPerceptronConfig {
    MultiLayerPerceptronConfig::new(hidden_size, num_classes)
        .with_num_layers(HEAD_NUM_LAYERS)
        .with_activation(Activation::Relu)
        .with_log_softmax(false)
}
