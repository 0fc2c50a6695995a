use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Dropout},
    tensor::{backend::Backend, Int, Tensor},
    train::ClassificationOutput,
};

use crate::{
    heads::{select_time_step, LOGITS},
    modules::MultiLayerPerceptron,
    types::{AxisKind, NeuralModule, NeuralType, Port, PortError, Ports, Typed, HIDDEN_STATES},
};

/// The time step read by default, where encoders place the sentence-start token
pub const DEFAULT_IDX_CONDITIONED_ON: usize = 0;

/// Sequence Classifier: one set of class scores per sequence.
///
/// The whole sequence is summarized by the representation at a single position,
/// usually the leading `[CLS]` token, rather than by pooling.
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Projection from hidden states onto classes
    pub mlp: MultiLayerPerceptron<B>,

    /// Dropout applied to the hidden states
    pub dropout: Dropout,

    /// Size of the incoming hidden states
    pub hidden_size: usize,

    /// The time step read by `forward` and `forward_classification`
    pub idx_conditioned_on: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// `[batch, time, channel] -> [batch, num_classes]`, conditioned on the configured time step
    pub fn forward(&self, hidden_states: Tensor<B, 3>) -> Tensor<B, 2> {
        self.forward_at(hidden_states, self.idx_conditioned_on)
    }

    /// `[batch, time, channel] -> [batch, num_classes]`, conditioned on `idx_conditioned_on`
    pub fn forward_at(
        &self,
        hidden_states: Tensor<B, 3>,
        idx_conditioned_on: usize,
    ) -> Tensor<B, 2> {
        let hidden_states = self.dropout.forward(hidden_states);

        self.mlp
            .forward(select_time_step(hidden_states, idx_conditioned_on))
    }

    /// Forward pass over axis-tagged hidden states, validated against the input port
    pub fn forward_typed(
        &self,
        hidden_states: Typed<B, 3>,
        idx_conditioned_on: usize,
    ) -> Result<Typed<B, 2>, PortError> {
        self.input_ports()
            .validate(HIDDEN_STATES, &hidden_states)
            .and_then(|_| hidden_states.check_index(AxisKind::Time, idx_conditioned_on))
            .map_err(|e| {
                log::debug!("Sequence classifier rejected its input: {}", e);
                e
            })?;

        Ok(Typed::batch_channel(
            self.forward_at(hidden_states.into_inner(), idx_conditioned_on),
        ))
    }

    /// Defines forward pass for training
    pub fn forward_classification(
        &self,
        hidden_states: Tensor<B, 3>,
        targets: Tensor<B, 1, Int>,
    ) -> ClassificationOutput<B> {
        let targets = targets.to_device(&hidden_states.device());
        let output = self.forward(hidden_states);

        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
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
            NeuralType::batch_channel(Some(self.num_classes())),
        )])
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{Data, Distribution},
    };
    use pretty_assertions::assert_eq;

    use crate::heads::sequence_classification::Config;

    use super::*;

    type TestBackend = NdArray;

    fn hidden(batch: usize, time: usize, channels: usize) -> Tensor<TestBackend, 3> {
        Tensor::random([batch, time, channels], Distribution::Default, &Default::default())
    }

    #[test]
    fn test_output_shape() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();

        assert_eq!(model.forward(hidden(2, 5, 8)).dims(), [2, 3]);
        assert_eq!(model.forward_at(hidden(2, 5, 8), 4).dims(), [2, 3]);
    }

    #[test]
    fn test_depends_only_on_conditioned_time_step() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();
        let input = hidden(2, 5, 8);

        // Overwrite every time step except index 2
        let noisy = input
            .clone()
            .slice_assign([0..2, 0..2, 0..8], hidden(2, 2, 8).mul_scalar(7.0))
            .slice_assign([0..2, 3..5, 0..8], hidden(2, 2, 8).mul_scalar(-3.0));

        let expected = model.forward_at(input, 2);

        model
            .forward_at(noisy, 2)
            .into_data()
            .assert_approx_eq(&expected.into_data(), 5);
    }

    #[test]
    fn test_default_conditions_on_first_time_step() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();
        let input = hidden(3, 4, 8);

        let first = input.clone().slice([0..3, 0..1, 0..8]).reshape([3, 8]);
        let expected = model.mlp.forward(first);

        model
            .forward(input)
            .into_data()
            .assert_approx_eq(&expected.into_data(), 5);
    }

    #[test]
    fn test_training_uses_configured_time_step() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3)
            .with_idx_conditioned_on(2)
            .init(&device)
            .unwrap();
        let input = hidden(2, 4, 8);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([1, 0], &device);

        let expected = model.forward_at(input.clone(), 2);
        let output = model.forward_classification(input, targets);

        output
            .output
            .into_data()
            .assert_approx_eq(&expected.into_data(), 5);
    }

    #[test]
    fn test_log_softmax_output_is_a_distribution() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 6).init(&device).unwrap();

        let sums = model.forward(hidden(2, 3, 8)).exp().sum_dim(1);

        sums.into_data()
            .assert_approx_eq(&Data::from([[1.0], [1.0]]), 4);
    }

    #[test]
    fn test_typed_forward_rejects_out_of_range_index() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();

        let result = model.forward_typed(Typed::hidden_states(hidden(2, 5, 8)), 5);

        assert_eq!(
            result.err(),
            Some(PortError::IndexOutOfRange {
                index: 5,
                kind: AxisKind::Time,
                size: 5,
            })
        );
    }

    #[test]
    fn test_typed_forward_rejects_wrong_hidden_size() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(16, 3).init(&device).unwrap();

        let result = model.forward_typed(Typed::hidden_states(hidden(2, 5, 8)), 0);

        assert_eq!(
            result.err(),
            Some(PortError::AxisSize {
                port: HIDDEN_STATES.to_string(),
                axis: 2,
                kind: AxisKind::Channel,
                expected: 16,
                actual: 8,
            })
        );
    }

    #[test]
    fn test_typed_forward() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();

        let output = model
            .forward_typed(Typed::hidden_states(hidden(4, 2, 8)), 1)
            .unwrap();

        assert_eq!(output.axes, [AxisKind::Batch, AxisKind::Channel]);
        assert_eq!(output.tensor.dims(), [4, 3]);
        assert!(model.output_ports().get(LOGITS).is_ok());
    }

    #[test]
    fn test_classification_output() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(8, 3).init(&device).unwrap();
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0, 2], &device);

        let output = model.forward_classification(hidden(2, 4, 8), targets);

        assert_eq!(output.output.dims(), [2, 3]);
        assert_eq!(output.loss.dims(), [1]);
        assert!(output.loss.into_scalar() > 0.0);
    }
}
