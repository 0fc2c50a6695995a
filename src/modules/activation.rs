use std::{fmt::Display, str::FromStr};

use burn::{
    constant,
    tensor::{activation, backend::Backend, Tensor},
};
use serde::{Deserialize, Serialize};

/// The unique string token that identifies the ReLU activation
pub static RELU: &str = "relu";

/// The unique string token that identifies the GELU activation
pub static GELU: &str = "gelu";

/// The unique string token that identifies the tanh activation
pub static TANH: &str = "tanh";

/// The unique string token that identifies the sigmoid activation
pub static SIGMOID: &str = "sigmoid";

/// All available activations
pub static ALL_ACTIVATIONS: &[Activation; 4] = &[
    Activation::Relu,
    Activation::Gelu,
    Activation::Tanh,
    Activation::Sigmoid,
];

/// Nonlinearities available between perceptron layers
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Rectified linear unit
    #[default]
    Relu,

    /// Gaussian error linear unit
    Gelu,

    /// Hyperbolic tangent
    Tanh,

    /// Logistic sigmoid
    Sigmoid,
}

constant!(Activation);

impl Activation {
    /// Apply the activation elementwise
    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Activation::Relu => activation::relu(input),
            Activation::Gelu => activation::gelu(input),
            Activation::Tanh => input.tanh(),
            Activation::Sigmoid => activation::sigmoid(input),
        }
    }

    /// Get the unique string token that identifies this activation
    pub fn as_str(&self) -> &str {
        match self {
            Activation::Relu => RELU,
            Activation::Gelu => GELU,
            Activation::Tanh => TANH,
            Activation::Sigmoid => SIGMOID,
        }
    }
}

impl TryFrom<&str> for Activation {
    type Error = ActivationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let token = value.to_lowercase();

        ALL_ACTIVATIONS
            .iter()
            .find(|activation| activation.as_str() == token)
            .copied()
            .ok_or_else(|| ActivationError::Unknown(value.to_string()))
    }
}

impl FromStr for Activation {
    type Err = ActivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activation::try_from(s)
    }
}

impl Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Activation Error
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ActivationError {
    /// No activation found for the given string
    #[error("no activation found for {0}")]
    Unknown(String),
}
