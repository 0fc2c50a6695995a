use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Dropout},
    tensor::{backend::Backend, Int, Tensor},
};

use crate::{
    heads::LOGITS,
    modules::MultiLayerPerceptron,
    types::{NeuralModule, NeuralType, Port, PortError, Ports, Typed, HIDDEN_STATES},
};

use super::Output;

/// Token Classifier: class scores for every position of every sequence
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Projection from hidden states onto classes
    pub mlp: MultiLayerPerceptron<B>,

    /// Dropout applied to the hidden states
    pub dropout: Dropout,

    /// Size of the incoming hidden states
    pub hidden_size: usize,

    /// Label id excluded from the loss
    pub pad_label_id: Option<usize>,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// `[batch, time, channel] -> [batch, time, num_classes]`
    pub fn forward(&self, hidden_states: Tensor<B, 3>) -> Tensor<B, 3> {
        let hidden_states = self.dropout.forward(hidden_states);

        self.mlp.forward(hidden_states)
    }

    /// Forward pass over axis-tagged hidden states, validated against the input port
    pub fn forward_typed(&self, hidden_states: Typed<B, 3>) -> Result<Typed<B, 3>, PortError> {
        self.input_ports()
            .validate(HIDDEN_STATES, &hidden_states)
            .map_err(|e| {
                log::debug!("Token classifier rejected its input: {}", e);
                e
            })?;

        Ok(Typed::batch_time_channel(
            self.forward(hidden_states.into_inner()),
        ))
    }

    /// Defines forward pass for training
    pub fn forward_classification(
        &self,
        hidden_states: Tensor<B, 3>,
        targets: Tensor<B, 2, Int>,
    ) -> Output<B> {
        let [batch_size, seq_length, _hidden_size] = hidden_states.dims();
        let n_classes = self.num_classes();

        let targets = targets.to_device(&hidden_states.device());
        let output = self.forward(hidden_states);

        let loss = CrossEntropyLossConfig::new()
            .with_pad_tokens(self.pad_label_id.map(|id| vec![id]))
            .init(&output.device())
            .forward(
                output.clone().reshape([batch_size * seq_length, n_classes]),
                targets.clone().reshape([batch_size * seq_length]),
            );

        Output {
            loss,
            output,
            targets,
        }
    }

    /// Number of label types
    pub fn num_classes(&self) -> usize {
        self.mlp.num_classes()
    }
}

impl<B: Backend> NeuralModule for Model<B> {
    fn input_ports(&self) -> Ports {
        Ports::new(vec![Port::new(
            HIDDEN_STATES,
            NeuralType::batch_time_channel(Some(self.hidden_size)),
        )])
    }

    fn output_ports(&self) -> Ports {
        Ports::new(vec![Port::new(
            LOGITS,
            NeuralType::batch_time_channel(Some(self.num_classes())),
        )])
    }
}
