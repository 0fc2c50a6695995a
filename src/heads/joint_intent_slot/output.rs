use burn::{
    tensor::{backend::Backend, Int, Tensor},
    train::metric::{AccuracyInput, Adaptor, LossInput},
};
use derive_new::new;

/// Joint intent/slot output adapted for multiple metrics.
///
/// Accuracy is reported on intents.
#[derive(new)]
pub struct Output<B: Backend> {
    /// The weighted sum of the intent and slot losses.
    pub loss: Tensor<B, 1>,

    /// The intent loss.
    pub intent_loss: Tensor<B, 1>,

    /// The slot loss.
    pub slot_loss: Tensor<B, 1>,

    /// The intent scores, `[batch, num_intents]`.
    pub intent_logits: Tensor<B, 2>,

    /// The slot scores, `[batch, time, num_slots]`.
    pub slot_logits: Tensor<B, 3>,

    /// The intent targets, `[batch]`.
    pub intent_targets: Tensor<B, 1, Int>,

    /// The slot targets, `[batch, time]`.
    pub slot_targets: Tensor<B, 2, Int>,
}

impl<B: Backend> Adaptor<AccuracyInput<B>> for Output<B> {
    fn adapt(&self) -> AccuracyInput<B> {
        AccuracyInput::new(self.intent_logits.clone(), self.intent_targets.clone())
    }
}

impl<B: Backend> Adaptor<LossInput<B>> for Output<B> {
    fn adapt(&self) -> LossInput<B> {
        LossInput::new(self.loss.clone())
    }
}
