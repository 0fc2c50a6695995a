/// Axis roles
pub mod axis;

/// Port schemas
pub mod neural_type;

/// Named ports
pub mod port;

/// Axis-tagged tensors
pub mod typed;

pub use axis::{Axis, AxisKind};
pub use neural_type::{Compatibility, NeuralType};
pub use port::{Port, Ports};
pub use typed::Typed;

/// The name of the hidden state input port every head declares
pub static HIDDEN_STATES: &str = "hidden_states";

/// A module that publishes the schemas of its inputs and outputs
pub trait NeuralModule {
    /// The input ports
    fn input_ports(&self) -> Ports;

    /// The output ports
    fn output_ports(&self) -> Ports;
}

/// Port Error
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum PortError {
    /// The tensor has a different number of axes than declared
    #[error("port {port} expects rank {expected}, got rank {actual}")]
    Rank {
        /// Port name
        port: String,
        /// Declared rank
        expected: usize,
        /// Actual rank
        actual: usize,
    },

    /// An axis is tagged with a different role than declared
    #[error("port {port} expects axis {axis} to be {expected}, got {actual}")]
    AxisKind {
        /// Port name
        port: String,
        /// Axis position
        axis: usize,
        /// Declared role
        expected: AxisKind,
        /// Tagged role
        actual: AxisKind,
    },

    /// An axis with a fixed size has a different size
    #[error("port {port} expects axis {axis} ({kind}) to have size {expected}, got {actual}")]
    AxisSize {
        /// Port name
        port: String,
        /// Axis position
        axis: usize,
        /// Declared role
        kind: AxisKind,
        /// Declared size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// An index falls outside an axis
    #[error("index {index} is out of range for a {kind} axis of size {size}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Axis role
        kind: AxisKind,
        /// Axis size
        size: usize,
    },

    /// No port with the given name
    #[error("no port named {0}")]
    UnknownPort(String),
}
