use burn::{
    tensor::{
        backend::{AutodiffBackend, Backend},
        Int, Tensor,
    },
    train::{TrainOutput, TrainStep, ValidStep},
};
use derive_new::new;

use super::{Model, Output};

/// A training batch for joint intent classification and slot filling
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Encoder hidden states, `[batch, time, channel]`
    pub hidden_states: Tensor<B, 3>,

    /// Intent ids, `[batch]`
    pub intent_targets: Tensor<B, 1, Int>,

    /// Slot ids for every position, `[batch, time]`
    pub slot_targets: Tensor<B, 2, Int>,
}

/// Define training step
impl<B: AutodiffBackend> TrainStep<Train<B>, Output<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> TrainOutput<Output<B>> {
        // Run forward pass, calculate gradients and return them along with the output
        let output =
            self.forward_classification(item.hidden_states, item.intent_targets, item.slot_targets);
        let grads = output.loss.backward();

        TrainOutput::new(self, grads, output)
    }
}

/// Define validation step
impl<B: Backend> ValidStep<Train<B>, Output<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> Output<B> {
        // Run forward pass and return the output
        self.forward_classification(item.hidden_states, item.intent_targets, item.slot_targets)
    }
}
