use burn::{
    tensor::{
        backend::{AutodiffBackend, Backend},
        Int, Tensor,
    },
    train::{TrainOutput, TrainStep, ValidStep},
};
use derive_new::new;

use super::{Model, Output};

/// A training batch for token classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Encoder hidden states, `[batch, time, channel]`
    pub hidden_states: Tensor<B, 3>,

    /// Class ids for every position, `[batch, time]`
    pub targets: Tensor<B, 2, Int>,
}

/// Define training step
impl<B: AutodiffBackend> TrainStep<Train<B>, Output<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> TrainOutput<Output<B>> {
        // Run forward pass, calculate gradients and return them along with the output
        let output = self.forward_classification(item.hidden_states, item.targets);
        let grads = output.loss.backward();

        TrainOutput::new(self, grads, output)
    }
}

/// Define validation step
impl<B: Backend> ValidStep<Train<B>, Output<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> Output<B> {
        // Run forward pass and return the output
        self.forward_classification(item.hidden_states, item.targets)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{Autodiff, NdArray},
        tensor::Distribution,
        train::metric::{Adaptor, LossInput},
    };

    use crate::heads::token_classification::Config;

    use super::*;

    type TestBackend = Autodiff<NdArray>;

    #[test]
    fn test_train_step_produces_gradients() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3)
            .with_dropout(0.1)
            .init(&device)
            .unwrap();

        let item = Train::new(
            Tensor::random([2, 4, 8], Distribution::Default, &device),
            Tensor::from_ints([[0, 1, 2, 1], [2, 2, 0, 1]], &device),
        );

        let output = TrainStep::step(&model, item);

        let _: LossInput<TestBackend> = output.item.adapt();
        assert_eq!(output.item.output.dims(), [2, 4, 3]);
        assert!(output.item.loss.into_scalar() > 0.0);
    }

    #[test]
    fn test_valid_step_on_inner_backend() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();
        let model = burn::module::AutodiffModule::valid(&model);

        let item = Train::new(
            Tensor::random([1, 3, 8], Distribution::Default, &device),
            Tensor::from_ints([[1, 0, 2]], &device),
        );

        let output = ValidStep::step(&model, item);

        assert_eq!(output.targets.dims(), [1, 3]);
    }

    #[test]
    fn test_loss_reaches_every_layer() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();
        assert!(Config::new(8, 3).use_transformer_pretrained);

        let output = model.forward_classification(
            Tensor::random([2, 4, 8], Distribution::Default, &device),
            Tensor::from_ints([[0, 1, 2, 1], [2, 2, 0, 1]], &device),
        );
        let grads = output.loss.backward();

        for layer in &model.mlp.layers {
            assert!(layer.weight.grad(&grads).is_some());
            assert!(layer.bias.as_ref().unwrap().grad(&grads).is_some());
        }
    }
}
