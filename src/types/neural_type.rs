use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Axis, AxisKind, PortError};

/// How one schema relates to another
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Compatibility {
    /// Identical roles and sizes
    Same,

    /// Identical roles, and this schema pins sizes the other leaves open
    Less,

    /// Identical roles, and this schema leaves open sizes the other pins
    Greater,

    /// Different ranks, roles, or conflicting sizes
    Incompatible,
}

/// The declared shape contract of a port: an ordered list of axes
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NeuralType {
    axes: Vec<Axis>,
}

impl NeuralType {
    /// Create a schema from its axes, outermost first
    pub fn new(axes: Vec<Axis>) -> Self {
        Self { axes }
    }

    /// `[batch, time, channel]`
    pub fn batch_time_channel(channels: Option<usize>) -> Self {
        Self::new(vec![Axis::batch(), Axis::time(), channel(channels)])
    }

    /// `[batch, channel]`
    pub fn batch_channel(channels: Option<usize>) -> Self {
        Self::new(vec![Axis::batch(), channel(channels)])
    }

    /// The declared axes
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// The declared rank
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Check a tensor's axis tags and dimensions against this schema
    pub fn check(&self, port: &str, tags: &[AxisKind], dims: &[usize]) -> Result<(), PortError> {
        if tags.len() != self.rank() || dims.len() != self.rank() {
            return Err(PortError::Rank {
                port: port.to_string(),
                expected: self.rank(),
                actual: dims.len(),
            });
        }

        for (index, ((axis, tag), dim)) in self.axes.iter().zip(tags).zip(dims).enumerate() {
            if axis.kind != *tag {
                return Err(PortError::AxisKind {
                    port: port.to_string(),
                    axis: index,
                    expected: axis.kind,
                    actual: *tag,
                });
            }

            if let Some(size) = axis.size {
                if size != *dim {
                    return Err(PortError::AxisSize {
                        port: port.to_string(),
                        axis: index,
                        kind: axis.kind,
                        expected: size,
                        actual: *dim,
                    });
                }
            }
        }

        Ok(())
    }

    /// Compare this schema against another
    pub fn compare(&self, other: &NeuralType) -> Compatibility {
        if self.rank() != other.rank() {
            return Compatibility::Incompatible;
        }

        let mut pins = false;
        let mut frees = false;

        for (mine, theirs) in self.axes.iter().zip(&other.axes) {
            if mine.kind != theirs.kind {
                return Compatibility::Incompatible;
            }

            match (mine.size, theirs.size) {
                (Some(a), Some(b)) if a != b => return Compatibility::Incompatible,
                (Some(_), None) => pins = true,
                (None, Some(_)) => frees = true,
                _ => {}
            }
        }

        match (pins, frees) {
            (false, false) => Compatibility::Same,
            (true, false) => Compatibility::Less,
            (false, true) => Compatibility::Greater,
            (true, true) => Compatibility::Incompatible,
        }
    }

    /// Whether a producer of `other` can feed a consumer declaring this schema
    pub fn accepts(&self, other: &NeuralType) -> bool {
        matches!(
            self.compare(other),
            Compatibility::Same | Compatibility::Greater
        )
    }
}

impl Display for NeuralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let axes = self
            .axes
            .iter()
            .map(|axis| axis.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "[{}]", axes)
    }
}

fn channel(size: Option<usize>) -> Axis {
    match size {
        Some(size) => Axis::sized(AxisKind::Channel, size),
        None => Axis::channel(),
    }
}
