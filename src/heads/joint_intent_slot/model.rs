use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Dropout},
    tensor::{backend::Backend, Int, Tensor},
};

use crate::{
    heads::{select_time_step, INTENT_LOGITS, SLOT_LOGITS},
    modules::MultiLayerPerceptron,
    types::{AxisKind, NeuralModule, NeuralType, Port, PortError, Ports, Typed, HIDDEN_STATES},
};

use super::Output;

/// Joint Intent/Slot Classifier.
///
/// Two heads read the same hidden states in one pass: the intent head classifies the
/// whole utterance from the first time step, and the slot head labels every token.
/// The heads do not share weights, and neither output is log-softmax normalized.
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Intent perceptron, applied to the first time step
    pub intent_mlp: MultiLayerPerceptron<B>,

    /// Slot perceptron, applied to every time step
    pub slot_mlp: MultiLayerPerceptron<B>,

    /// Dropout shared by both heads
    pub dropout: Dropout,

    /// Size of the incoming hidden states
    pub hidden_size: usize,

    /// Share of the intent loss in the joint loss
    pub intent_loss_weight: f64,

    /// Slot label id excluded from the slot loss
    pub pad_slot_id: Option<usize>,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// `[batch, time, channel] -> ([batch, num_intents], [batch, time, num_slots])`
    pub fn forward(&self, hidden_states: Tensor<B, 3>) -> (Tensor<B, 2>, Tensor<B, 3>) {
        let hidden_states = self.dropout.forward(hidden_states);

        let intent_logits = self
            .intent_mlp
            .forward(select_time_step(hidden_states.clone(), 0));
        let slot_logits = self.slot_mlp.forward(hidden_states);

        (intent_logits, slot_logits)
    }

    /// Forward pass over axis-tagged hidden states, validated against the input port
    pub fn forward_typed(
        &self,
        hidden_states: Typed<B, 3>,
    ) -> Result<(Typed<B, 2>, Typed<B, 3>), PortError> {
        self.input_ports()
            .validate(HIDDEN_STATES, &hidden_states)
            .and_then(|_| hidden_states.check_index(AxisKind::Time, 0))
            .map_err(|e| {
                log::debug!("Joint intent/slot classifier rejected its input: {}", e);
                e
            })?;

        let (intent_logits, slot_logits) = self.forward(hidden_states.into_inner());

        Ok((
            Typed::batch_channel(intent_logits),
            Typed::batch_time_channel(slot_logits),
        ))
    }

    /// Defines forward pass for training
    pub fn forward_classification(
        &self,
        hidden_states: Tensor<B, 3>,
        intent_targets: Tensor<B, 1, Int>,
        slot_targets: Tensor<B, 2, Int>,
    ) -> Output<B> {
        let device = hidden_states.device();
        let [batch_size, seq_length, _hidden_size] = hidden_states.dims();

        let intent_targets = intent_targets.to_device(&device);
        let slot_targets = slot_targets.to_device(&device);

        let (intent_logits, slot_logits) = self.forward(hidden_states);

        let intent_loss = CrossEntropyLossConfig::new()
            .init(&device)
            .forward(intent_logits.clone(), intent_targets.clone());

        let slot_loss = CrossEntropyLossConfig::new()
            .with_pad_tokens(self.pad_slot_id.map(|id| vec![id]))
            .init(&device)
            .forward(
                slot_logits
                    .clone()
                    .reshape([batch_size * seq_length, self.num_slots()]),
                slot_targets.clone().reshape([batch_size * seq_length]),
            );

        let loss = intent_loss.clone().mul_scalar(self.intent_loss_weight)
            + slot_loss.clone().mul_scalar(1.0 - self.intent_loss_weight);

        Output {
            loss,
            intent_loss,
            slot_loss,
            intent_logits,
            slot_logits,
            intent_targets,
            slot_targets,
        }
    }

    /// Number of intents
    pub fn num_intents(&self) -> usize {
        self.intent_mlp.num_classes()
    }

    /// Number of slot labels
    pub fn num_slots(&self) -> usize {
        self.slot_mlp.num_classes()
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
        Ports::new(vec![
            Port::new(
                INTENT_LOGITS,
                NeuralType::batch_channel(Some(self.num_intents())),
            ),
            Port::new(
                SLOT_LOGITS,
                NeuralType::batch_time_channel(Some(self.num_slots())),
            ),
        ])
    }
}
