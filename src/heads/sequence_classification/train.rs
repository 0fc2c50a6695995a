use burn::{
    tensor::{
        backend::{AutodiffBackend, Backend},
        Int, Tensor,
    },
    train::{ClassificationOutput, TrainOutput, TrainStep, ValidStep},
};
use derive_new::new;

use super::Model;

/// A training batch for sequence classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Encoder hidden states, `[batch, time, channel]`
    pub hidden_states: Tensor<B, 3>,

    /// Class ids for every sequence, `[batch]`
    pub targets: Tensor<B, 1, Int>,
}

/// Define training step
impl<B: AutodiffBackend> TrainStep<Train<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> TrainOutput<ClassificationOutput<B>> {
        // Run forward pass, calculate gradients and return them along with the output
        let output = self.forward_classification(item.hidden_states, item.targets);
        let grads = output.loss.backward();

        TrainOutput::new(self, grads, output)
    }
}

/// Define validation step
impl<B: Backend> ValidStep<Train<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> ClassificationOutput<B> {
        // Run forward pass and return the output
        self.forward_classification(item.hidden_states, item.targets)
    }
}
