use std::{fmt::Display, ops::Deref};

use burn::tensor::backend::Backend;

use super::{NeuralType, PortError, Typed};

/// A named tensor slot with a declared schema
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Port {
    /// The port name (e.g., "hidden_states")
    pub name: &'static str,

    /// The declared schema
    pub ty: NeuralType,
}

impl Port {
    /// Create a port
    pub fn new(name: &'static str, ty: NeuralType) -> Self {
        Self { name, ty }
    }

    /// Check a typed tensor against this port
    pub fn validate<B: Backend, const D: usize>(
        &self,
        tensor: &Typed<B, D>,
    ) -> Result<(), PortError> {
        self.ty.check(self.name, &tensor.axes, &tensor.tensor.dims())
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// The ordered set of ports a module publishes on one side
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Ports(Vec<Port>);

impl Ports {
    /// Create a port set
    pub fn new(ports: Vec<Port>) -> Self {
        Self(ports)
    }

    /// Look up a port by name
    pub fn get(&self, name: &str) -> Result<&Port, PortError> {
        self.0
            .iter()
            .find(|port| port.name == name)
            .ok_or_else(|| PortError::UnknownPort(name.to_string()))
    }

    /// Check a typed tensor against the named port
    pub fn validate<B: Backend, const D: usize>(
        &self,
        name: &str,
        tensor: &Typed<B, D>,
    ) -> Result<(), PortError> {
        self.get(name)?.validate(tensor)
    }
}

impl Deref for Ports {
    type Target = Vec<Port>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Ports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, port) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", port)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, tensor::Tensor};
    use pretty_assertions::assert_eq;

    use crate::types::{AxisKind, HIDDEN_STATES};

    use super::*;

    type TestBackend = NdArray;

    fn ports() -> Ports {
        Ports::new(vec![
            Port::new(HIDDEN_STATES, NeuralType::batch_time_channel(Some(4))),
            Port::new("pooled", NeuralType::batch_channel(None)),
        ])
    }

    #[test]
    fn test_lookup_by_name() {
        let ports = ports();

        assert_eq!(ports.len(), 2);
        assert_eq!(ports.get("pooled").unwrap().ty, NeuralType::batch_channel(None));
        assert_eq!(
            ports.get("missing").err(),
            Some(PortError::UnknownPort("missing".to_string()))
        );
    }

    #[test]
    fn test_validate_named_port() {
        let device = Default::default();
        let ports = ports();

        let hidden = Typed::batch_time_channel(Tensor::<TestBackend, 3>::zeros([2, 3, 4], &device));
        assert!(ports.validate(HIDDEN_STATES, &hidden).is_ok());

        let pooled = Typed::batch_channel(Tensor::<TestBackend, 2>::zeros([2, 9], &device));
        assert!(ports.validate("pooled", &pooled).is_ok());

        let swapped = Typed::new(
            Tensor::<TestBackend, 2>::zeros([2, 9], &device),
            [AxisKind::Channel, AxisKind::Batch],
        );
        assert!(ports.validate("pooled", &swapped).is_err());
    }

    #[test]
    fn test_display_one_port_per_line() {
        assert_eq!(
            ports().to_string(),
            "hidden_states: [batch, time, channel(4)]\npooled: [batch, channel]"
        );
    }
}
