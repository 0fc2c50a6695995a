use std::fmt::Display;

/// The unique string token that identifies the token classification head
pub static TOKEN_CLASSIFICATION: &str = "token-classification";

/// The unique string token that identifies the sequence classification head
pub static SEQUENCE_CLASSIFICATION: &str = "sequence-classification";

/// The unique string token that identifies the joint intent/slot head
pub static JOINT_INTENT_SLOT: &str = "joint-intent-slot";

/// Available Heads
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Head {
    /// Token Classification
    TokenClassification,

    /// Sequence Classification
    SequenceClassification,

    /// Joint Intent Classification and Slot Filling
    JointIntentSlot,
}

impl Head {
    /// Get the unique string token that identifies this head
    pub fn as_str(&self) -> &str {
        match self {
            Head::TokenClassification => TOKEN_CLASSIFICATION,
            Head::SequenceClassification => SEQUENCE_CLASSIFICATION,
            Head::JointIntentSlot => JOINT_INTENT_SLOT,
        }
    }
}

impl TryFrom<&str> for Head {
    type Error = HeadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.to_lowercase();

        if value == TOKEN_CLASSIFICATION {
            Ok(Head::TokenClassification)
        } else if value == SEQUENCE_CLASSIFICATION {
            Ok(Head::SequenceClassification)
        } else if value == JOINT_INTENT_SLOT {
            Ok(Head::JointIntentSlot)
        } else {
            Err(HeadError::Unknown(value))
        }
    }
}

impl Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Head Error
#[derive(thiserror::Error, Debug)]
pub enum HeadError {
    /// No head found for the given string
    #[error("no head found for {0}")]
    Unknown(String),
}
