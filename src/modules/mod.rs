/// Activation functions
pub mod activation;

/// Weight initialization
pub mod init;

/// Multi-layer perceptron head
pub mod mlp;

pub use activation::Activation;
pub use mlp::{MultiLayerPerceptron, MultiLayerPerceptronConfig, MultiLayerPerceptronRecord};

/// Config Error
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A size that must be positive is zero
    #[error("{0} must be greater than zero")]
    ZeroSize(&'static str),

    /// A perceptron needs at least its output layer
    #[error("num_layers must be at least 1")]
    NoLayers,

    /// Dropout probability outside of [0, 1)
    #[error("dropout must be in [0, 1), got {0}")]
    Dropout(f64),

    /// Loss weight outside of [0, 1]
    #[error("{name} must be in [0, 1], got {value}")]
    Weight {
        /// Field name
        name: &'static str,
        /// Given value
        value: f64,
    },
}

/// Check a dropout probability
pub(crate) fn check_dropout(prob: f64) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&prob) {
        Ok(())
    } else {
        Err(ConfigError::Dropout(prob))
    }
}
