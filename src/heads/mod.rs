use burn::tensor::{backend::Backend, Tensor};

/// Per-token classification (such as slot filling or named entity recognition)
pub mod token_classification;

/// Per-sequence classification (such as sentiment analysis)
pub mod sequence_classification;

/// Joint intent classification and slot filling
pub mod joint_intent_slot;

pub use joint_intent_slot::{
    Config as JointIntentSlotClassifierConfig, Model as JointIntentSlotClassifier,
};
pub use sequence_classification::{Config as SequenceClassifierConfig, Model as SequenceClassifier};
pub use token_classification::{Config as TokenClassifierConfig, Model as TokenClassifier};

/// The name of the logits output port
pub static LOGITS: &str = "logits";

/// The name of the intent logits output port
pub static INTENT_LOGITS: &str = "intent_logits";

/// The name of the slot logits output port
pub static SLOT_LOGITS: &str = "slot_logits";

/// Select the representation at one time step for every batch element
pub(crate) fn select_time_step<B: Backend>(
    hidden_states: Tensor<B, 3>,
    index: usize,
) -> Tensor<B, 2> {
    let [batch_size, _seq_length, hidden_size] = hidden_states.dims();

    hidden_states
        .slice([0..batch_size, index..index + 1, 0..hidden_size])
        .reshape([batch_size, hidden_size])
}
