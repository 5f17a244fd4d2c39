use serde::Serialize;
use crate::network::node::NodeRef;
use crate::regularization::regularization::RegularizationFunction;

/// A weighted edge from a node in layer `i` to a node in layer `i + 1`.
///
/// A dead link keeps its slot so indexing stays stable, but it is skipped by
/// the forward sum, by backprop and by the weight update. Death is permanent.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    id: String,
    source: NodeRef,
    destination: NodeRef,
    pub(crate) weight: f64,
    regularization: Option<RegularizationFunction>,
    is_dead: bool,
}

impl Link {
    pub(crate) fn new(
        source_id: &str,
        source: NodeRef,
        destination_id: &str,
        destination: NodeRef,
        weight: f64,
        regularization: Option<RegularizationFunction>,
    ) -> Link {
        Link {
            id: format!("{source_id}-{destination_id}"),
            source,
            destination,
            weight,
            regularization,
            is_dead: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> NodeRef {
        self.source
    }

    pub fn destination(&self) -> NodeRef {
        self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn regularization(&self) -> Option<RegularizationFunction> {
        self.regularization
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Zeroes the weight and marks the link dead. There is no way back.
    pub(crate) fn prune(&mut self) {
        self.weight = 0.0;
        self.is_dead = true;
    }
}
