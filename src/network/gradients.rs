use crate::network::network::Network;

/// Backprop scratch and batch accumulators for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeGradient {
    /// ∂E/∂output for the most recent sample.
    pub output_derivative: f64,
    /// ∂E/∂total_input for the most recent sample.
    pub input_derivative: f64,
    pub accumulated_input_derivative: f64,
    pub count: usize,
}

/// Backprop scratch and batch accumulators for one link.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkGradient {
    /// ∂E/∂weight for the most recent sample.
    pub error_derivative: f64,
    pub accumulated_error_derivative: f64,
    pub count: usize,
}

/// Per-batch training state, kept apart from the network topology.
///
/// Laid out exactly like the network arena: `nodes[layer][index]`, and
/// `links[layer]` holds the links *into* `layer`, destination-major.
/// Allocate once with `Network::gradients()` and reuse across batches;
/// `Network::update_weights` consumes and clears the accumulators.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub(crate) nodes: Vec<Vec<NodeGradient>>,
    pub(crate) links: Vec<Vec<LinkGradient>>,
}

impl Gradients {
    pub fn new(network: &Network) -> Gradients {
        let sizes = network.shape();
        let nodes = sizes.iter()
            .map(|&n| vec![NodeGradient::default(); n])
            .collect();
        let links = (0..sizes.len())
            .map(|layer| {
                let count = if layer == 0 { 0 } else { sizes[layer - 1] * sizes[layer] };
                vec![LinkGradient::default(); count]
            })
            .collect();
        Gradients { nodes, links }
    }

    pub fn node(&self, layer: usize, index: usize) -> Option<&NodeGradient> {
        self.nodes.get(layer)?.get(index)
    }

    /// Gradient of the link `(from_layer, from_node) -> (from_layer + 1, to_node)`.
    pub fn link(&self, from_layer: usize, from_node: usize, to_node: usize) -> Option<&LinkGradient> {
        let fan_in = self.nodes.get(from_layer)?.len();
        if from_node >= fan_in || to_node >= self.nodes.get(from_layer + 1)?.len() {
            return None;
        }
        self.links[from_layer + 1].get(to_node * fan_in + from_node)
    }

    /// True when nothing has been accumulated since the last reset or update.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().flatten().all(|g| g.count == 0)
            && self.links.iter().flatten().all(|g| g.count == 0)
    }

    /// Drops everything accumulated so far without touching the network.
    pub fn reset(&mut self) {
        self.nodes.iter_mut().flatten().for_each(|g| *g = NodeGradient::default());
        self.links.iter_mut().flatten().for_each(|g| *g = LinkGradient::default());
    }

    pub(crate) fn matches(&self, network: &Network) -> bool {
        let sizes = network.shape();
        self.nodes.len() == sizes.len()
            && self.nodes.iter().zip(sizes.iter()).all(|(layer, &n)| layer.len() == n)
    }
}
