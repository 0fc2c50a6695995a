use std::fmt::Display;

use burn::tensor::{backend::Backend, Distribution, Tensor};

use crate::{
    types::{NeuralModule, Ports, Typed},
    utils::{tensors::argmax_ids, Labels},
};

use super::HeadConfig;

/// Options for a smoke run over random hidden states
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of sequences
    pub batch_size: usize,

    /// Number of positions per sequence
    pub seq_len: usize,

    /// Time step read by the sequence classifier
    pub idx_conditioned_on: usize,

    /// Class labels for the token and sequence heads
    pub labels: Labels,

    /// Intent labels for the joint head
    pub intent_labels: Labels,

    /// Slot labels for the joint head
    pub slot_labels: Labels,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: 2,
            seq_len: 8,
            idx_conditioned_on: 0,
            labels: Labels::default(),
            intent_labels: Labels::default(),
            slot_labels: Labels::default(),
        }
    }
}

/// Predictions for one sequence
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Prediction {
    /// The sequence-level label, if the head produces one
    pub sequence: Option<String>,

    /// The per-token labels, if the head produces them
    pub tokens: Vec<String>,
}

/// The outcome of a run: the declared ports and the decoded predictions
#[derive(Debug, Clone)]
pub struct Report {
    /// The head's input ports
    pub input_ports: Ports,

    /// The head's output ports
    pub output_ports: Ports,

    /// One prediction per sequence
    pub predictions: Vec<Prediction>,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Input Ports ===\n{}", self.input_ports)?;
        writeln!(f, "=== Output Ports ===\n{}", self.output_ports)?;

        for (i, prediction) in self.predictions.iter().enumerate() {
            write!(f, "\n=== Item {i} ===")?;

            if let Some(sequence) = &prediction.sequence {
                write!(f, "\n- Class: {sequence}")?;
            }

            if !prediction.tokens.is_empty() {
                write!(f, "\n- Tokens: {}", prediction.tokens.join(" "))?;
            }

            writeln!(f, "\n================")?;
        }

        Ok(())
    }
}

/// Build the configured head and describe its ports without running it
pub fn ports<B: Backend>(
    config: &HeadConfig,
    device: &B::Device,
) -> anyhow::Result<(Ports, Ports)> {
    let ports = match config {
        HeadConfig::TokenClassification(config) => {
            let model = config.init::<B>(device)?;
            (model.input_ports(), model.output_ports())
        }
        HeadConfig::SequenceClassification(config) => {
            let model = config.init::<B>(device)?;
            (model.input_ports(), model.output_ports())
        }
        HeadConfig::JointIntentSlot(config) => {
            let model = config.init::<B>(device)?;
            (model.input_ports(), model.output_ports())
        }
    };

    Ok(ports)
}

/// Build the configured head and run it over random hidden states
pub fn run<B: Backend>(
    config: &HeadConfig,
    options: &RunOptions,
    device: &B::Device,
) -> anyhow::Result<Report> {
    let hidden_states = Typed::hidden_states(Tensor::<B, 3>::random(
        [options.batch_size, options.seq_len, config.hidden_size()],
        Distribution::Normal(0.0, 1.0),
        device,
    ));

    let report = match config {
        HeadConfig::TokenClassification(config) => {
            check_labels("labels", &options.labels, config.num_classes);

            let model = config.init::<B>(device)?;
            let logits = model.forward_typed(hidden_states)?;

            let predictions = argmax_ids(logits.into_inner())
                .chunks(options.seq_len.max(1))
                .map(|ids| Prediction {
                    sequence: None,
                    tokens: options.labels.decode(ids),
                })
                .collect();

            Report {
                input_ports: model.input_ports(),
                output_ports: model.output_ports(),
                predictions,
            }
        }
        HeadConfig::SequenceClassification(config) => {
            check_labels("labels", &options.labels, config.num_classes);

            let model = config.init::<B>(device)?;
            let logits = model.forward_typed(hidden_states, options.idx_conditioned_on)?;

            let predictions = options
                .labels
                .decode(&argmax_ids(logits.into_inner()))
                .into_iter()
                .map(|label| Prediction {
                    sequence: Some(label),
                    tokens: Vec::new(),
                })
                .collect();

            Report {
                input_ports: model.input_ports(),
                output_ports: model.output_ports(),
                predictions,
            }
        }
        HeadConfig::JointIntentSlot(config) => {
            check_labels("intent labels", &options.intent_labels, config.num_intents);
            check_labels("slot labels", &options.slot_labels, config.num_slots);

            let model = config.init::<B>(device)?;
            let (intent_logits, slot_logits) = model.forward_typed(hidden_states)?;

            let intents = options
                .intent_labels
                .decode(&argmax_ids(intent_logits.into_inner()));
            let slots = argmax_ids(slot_logits.into_inner());

            let predictions = intents
                .into_iter()
                .zip(slots.chunks(options.seq_len.max(1)))
                .map(|(intent, ids)| Prediction {
                    sequence: Some(intent),
                    tokens: options.slot_labels.decode(ids),
                })
                .collect();

            Report {
                input_ports: model.input_ports(),
                output_ports: model.output_ports(),
                predictions,
            }
        }
    };

    Ok(report)
}

fn check_labels(name: &str, labels: &Labels, num_classes: usize) {
    if !labels.is_empty() && labels.len() != num_classes {
        log::warn!(
            "{} {} given for {} classes; unmatched ids are printed as numbers",
            labels.len(),
            name,
            num_classes
        );
    }
}
