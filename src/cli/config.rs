use burn::config::Config as _;

use crate::{
    heads::{joint_intent_slot, sequence_classification, token_classification},
    modules::ConfigError,
};

use super::Head;

/// Sizes used to build a default configuration when no config file is given
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Sizes {
    /// Size of the incoming hidden states
    pub hidden_size: usize,

    /// Number of classes for the token and sequence heads
    pub num_classes: usize,

    /// Number of intents for the joint head
    pub num_intents: usize,

    /// Number of slot labels for the joint head
    pub num_slots: usize,
}

impl Default for Sizes {
    fn default() -> Self {
        // bert-base hidden size, with the intent and slot counts of the Snips dataset
        Self {
            hidden_size: 768,
            num_classes: 2,
            num_intents: 7,
            num_slots: 72,
        }
    }
}

/// The configuration of any available head
#[derive(Debug, Clone)]
pub enum HeadConfig {
    /// Token Classification
    TokenClassification(token_classification::Config),

    /// Sequence Classification
    SequenceClassification(sequence_classification::Config),

    /// Joint Intent Classification and Slot Filling
    JointIntentSlot(joint_intent_slot::Config),
}

impl HeadConfig {
    /// A default configuration for the given head
    pub fn new(head: Head, sizes: Sizes) -> Self {
        match head {
            Head::TokenClassification => HeadConfig::TokenClassification(
                token_classification::Config::new(sizes.hidden_size, sizes.num_classes),
            ),
            Head::SequenceClassification => HeadConfig::SequenceClassification(
                sequence_classification::Config::new(sizes.hidden_size, sizes.num_classes),
            ),
            Head::JointIntentSlot => HeadConfig::JointIntentSlot(joint_intent_slot::Config::new(
                sizes.hidden_size,
                sizes.num_intents,
                sizes.num_slots,
            )),
        }
    }

    /// Load the configuration of the given head from a JSON file
    pub fn load(head: Head, path: &str) -> anyhow::Result<Self> {
        let config = match head {
            Head::TokenClassification => {
                token_classification::Config::load(path).map(HeadConfig::TokenClassification)
            }
            Head::SequenceClassification => {
                sequence_classification::Config::load(path).map(HeadConfig::SequenceClassification)
            }
            Head::JointIntentSlot => {
                joint_intent_slot::Config::load(path).map(HeadConfig::JointIntentSlot)
            }
        }
        .map_err(|e| anyhow!("Unable to load {} config file {}: {}", head, path, e))?;

        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let result = match self {
            HeadConfig::TokenClassification(config) => config.save(path),
            HeadConfig::SequenceClassification(config) => config.save(path),
            HeadConfig::JointIntentSlot(config) => config.save(path),
        };

        result.map_err(|e| anyhow!("Unable to save config file {}: {}", path, e))
    }

    /// The head this configuration builds
    pub fn head(&self) -> Head {
        match self {
            HeadConfig::TokenClassification(_) => Head::TokenClassification,
            HeadConfig::SequenceClassification(_) => Head::SequenceClassification,
            HeadConfig::JointIntentSlot(_) => Head::JointIntentSlot,
        }
    }

    /// The size of the incoming hidden states
    pub fn hidden_size(&self) -> usize {
        match self {
            HeadConfig::TokenClassification(config) => config.hidden_size,
            HeadConfig::SequenceClassification(config) => config.hidden_size,
            HeadConfig::JointIntentSlot(config) => config.hidden_size,
        }
    }

    /// The time step a sequence head reads, if this is a sequence head
    pub fn idx_conditioned_on(&self) -> Option<usize> {
        match self {
            HeadConfig::SequenceClassification(config) => Some(config.idx_conditioned_on),
            _ => None,
        }
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            HeadConfig::TokenClassification(config) => config.validate(),
            HeadConfig::SequenceClassification(config) => config.validate(),
            HeadConfig::JointIntentSlot(config) => config.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::modules::Activation;

    use super::*;

    #[test]
    fn test_defaults_per_head() {
        let sizes = Sizes {
            hidden_size: 16,
            num_classes: 3,
            num_intents: 7,
            num_slots: 4,
        };

        let config = HeadConfig::new(Head::JointIntentSlot, sizes);
        assert_eq!(config.head(), Head::JointIntentSlot);
        assert_eq!(config.hidden_size(), 16);
        assert_eq!(config.idx_conditioned_on(), None);
        assert_eq!(
            HeadConfig::new(Head::SequenceClassification, sizes).idx_conditioned_on(),
            Some(0)
        );

        let HeadConfig::TokenClassification(token) = HeadConfig::new(Head::TokenClassification, sizes)
        else {
            panic!("expected a token classification config");
        };
        assert_eq!(token.num_classes, 3);
        assert_eq!(token.num_layers, 2);
        assert_eq!(token.activation, Activation::Relu);
        assert!(token.log_softmax);
        assert!(token.use_transformer_pretrained);
        assert_eq!(token.dropout, 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("head-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        let config = HeadConfig::SequenceClassification(
            sequence_classification::Config::new(32, 5)
                .with_activation(Activation::Gelu)
                .with_dropout(0.1)
                .with_idx_conditioned_on(3),
        );
        config.save(path).unwrap();

        let loaded = HeadConfig::load(Head::SequenceClassification, path).unwrap();
        std::fs::remove_file(path).unwrap();

        let HeadConfig::SequenceClassification(loaded) = loaded else {
            panic!("expected a sequence classification config");
        };
        assert_eq!(loaded.hidden_size, 32);
        assert_eq!(loaded.num_classes, 5);
        assert_eq!(loaded.activation, Activation::Gelu);
        assert_eq!(loaded.dropout, 0.1);
        assert_eq!(loaded.idx_conditioned_on, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = HeadConfig::load(Head::TokenClassification, "/nonexistent/config.json");

        assert!(result.is_err());
    }
}
