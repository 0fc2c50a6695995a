use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The semantic role of a tensor axis
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Examples within a batch
    Batch,

    /// Positions within a sequence
    Time,

    /// Features or classes
    Channel,
}

impl Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AxisKind::Batch => "batch",
            AxisKind::Time => "time",
            AxisKind::Channel => "channel",
        };

        write!(f, "{}", name)
    }
}

/// One declared axis: a role and, optionally, a fixed size
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Axis {
    /// The semantic role
    pub kind: AxisKind,

    /// A required size, or `None` for any size
    pub size: Option<usize>,
}

impl Axis {
    /// An axis of the given role with any size
    pub const fn new(kind: AxisKind) -> Self {
        Self { kind, size: None }
    }

    /// An axis of the given role with a fixed size
    pub const fn sized(kind: AxisKind, size: usize) -> Self {
        Self {
            kind,
            size: Some(size),
        }
    }

    /// A batch axis
    pub const fn batch() -> Self {
        Self::new(AxisKind::Batch)
    }

    /// A time axis
    pub const fn time() -> Self {
        Self::new(AxisKind::Time)
    }

    /// A channel axis
    pub const fn channel() -> Self {
        Self::new(AxisKind::Channel)
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}({})", self.kind, size),
            None => write!(f, "{}", self.kind),
        }
    }
}
