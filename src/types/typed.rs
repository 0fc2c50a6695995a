use burn::tensor::{backend::Backend, Tensor};

use super::{AxisKind, PortError};

/// A tensor tagged with the role of each of its axes
#[derive(Clone, Debug)]
pub struct Typed<B: Backend, const D: usize> {
    /// The underlying tensor
    pub tensor: Tensor<B, D>,

    /// One role per axis, outermost first
    pub axes: [AxisKind; D],
}

impl<B: Backend, const D: usize> Typed<B, D> {
    /// Tag a tensor, one role per axis
    pub fn new(tensor: Tensor<B, D>, axes: [AxisKind; D]) -> Self {
        Self { tensor, axes }
    }
}

impl<B: Backend> Typed<B, 3> {
    /// Tag token-level data as `[batch, time, channel]`
    pub fn batch_time_channel(tensor: Tensor<B, 3>) -> Self {
        Self::new(tensor, [AxisKind::Batch, AxisKind::Time, AxisKind::Channel])
    }

    /// Tag encoder output as hidden states
    pub fn hidden_states(tensor: Tensor<B, 3>) -> Self {
        Self::batch_time_channel(tensor)
    }
}

impl<B: Backend> Typed<B, 2> {
    /// Tag sequence-level output as `[batch, channel]`
    pub fn batch_channel(tensor: Tensor<B, 2>) -> Self {
        Self::new(tensor, [AxisKind::Batch, AxisKind::Channel])
    }
}

impl<B: Backend, const D: usize> Typed<B, D> {
    /// The size of the first axis with the given role
    pub fn size_of(&self, kind: AxisKind) -> Option<usize> {
        let dims = self.tensor.dims();

        self.axes
            .iter()
            .position(|axis| *axis == kind)
            .map(|index| dims[index])
    }

    /// Check that `index` addresses an element along the axis with the given role
    pub fn check_index(&self, kind: AxisKind, index: usize) -> Result<(), PortError> {
        let size = self.size_of(kind).unwrap_or(0);

        if index < size {
            Ok(())
        } else {
            Err(PortError::IndexOutOfRange { index, kind, size })
        }
    }

    /// Drop the tags
    pub fn into_inner(self) -> Tensor<B, D> {
        self.tensor
    }
}
