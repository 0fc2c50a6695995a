use burn::{
    tensor::{backend::Backend, Int, Tensor},
    train::metric::{AccuracyInput, Adaptor, LossInput},
};
use derive_new::new;

/// Token classification output adapted for multiple metrics.
#[derive(new)]
pub struct Output<B: Backend> {
    /// The loss.
    pub loss: Tensor<B, 1>,

    /// The per-token class scores.
    pub output: Tensor<B, 3>,

    /// The per-token targets.
    pub targets: Tensor<B, 2, Int>,
}

impl<B: Backend> Adaptor<AccuracyInput<B>> for Output<B> {
    fn adapt(&self) -> AccuracyInput<B> {
        let [batch_size, seq_length, n_classes] = self.output.dims();

        AccuracyInput::new(
            self.output
                .clone()
                .reshape([batch_size * seq_length, n_classes]),
            self.targets.clone().reshape([batch_size * seq_length]),
        )
    }
}

impl<B: Backend> Adaptor<LossInput<B>> for Output<B> {
    fn adapt(&self) -> LossInput<B> {
        LossInput::new(self.loss.clone())
    }
}
