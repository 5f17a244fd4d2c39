use log::{debug, trace};
use rand::Rng;
use serde::Serialize;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::loss::error_function::ErrorFunction;
use crate::network::gradients::Gradients;
use crate::network::link::Link;
use crate::network::node::{Node, NodeRef};
use crate::regularization::regularization::RegularizationFunction;

const DEFAULT_BIAS: f64 = 0.1;
const INIT_WEIGHT_RANGE: f64 = 0.5;

/// A fully connected feed-forward network stored as an arena.
///
/// `layers[0]` is the input layer and the last layer is the output layer.
/// `links[l]` holds every link into layer `l` (empty for `l == 0`), ordered
/// destination-major: the link from node `s` of layer `l - 1` to node `d` of
/// layer `l` lives at `links[l][d * layers[l - 1].len() + s]`.
///
/// `Serialize` exists for debug dumps (e.g. `serde_json::to_string_pretty`
/// while inspecting a run). It is not a storage format: there is no
/// `Deserialize`, and weights cannot be loaded back.
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    layers: Vec<Vec<Node>>,
    links: Vec<Vec<Link>>,
    pub learning_rate: f64,
    pub regularization_rate: f64,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local RNG.
    ///
    /// See [`Network::build_with_rng`].
    pub fn build<S: AsRef<str>>(
        shape: &[usize],
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        regularization: Option<RegularizationFunction>,
        input_ids: &[S],
        init_zero: bool,
    ) -> Result<Network> {
        Network::build_with_rng(
            shape,
            hidden_activation,
            output_activation,
            regularization,
            input_ids,
            init_zero,
            &mut rand::thread_rng(),
        )
    }

    /// Builds a fully connected network from per-layer node counts.
    ///
    /// Input nodes take their ids from `input_ids`; every other node gets a
    /// sequential id starting at `"1"`. Weights are uniform in [-0.5, 0.5]
    /// and biases start at 0.1, unless `init_zero` is set, in which case
    /// both are exactly 0 and `rng` is never used.
    pub fn build_with_rng<S: AsRef<str>, R: Rng + ?Sized>(
        shape: &[usize],
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        regularization: Option<RegularizationFunction>,
        input_ids: &[S],
        init_zero: bool,
        rng: &mut R,
    ) -> Result<Network> {
        if shape.len() < 2 {
            return Err(NetworkError::InvalidShape(format!(
                "need at least an input and an output layer, got {} layer(s)",
                shape.len()
            )));
        }
        if input_ids.len() != shape[0] {
            return Err(NetworkError::ShapeMismatch {
                expected: shape[0],
                actual: input_ids.len(),
            });
        }
        if let Some(empty) = shape.iter().position(|&n| n == 0) {
            return Err(NetworkError::InvalidShape(format!("layer {empty} has no nodes")));
        }

        let output_layer = shape.len() - 1;
        let bias = if init_zero { 0.0 } else { DEFAULT_BIAS };
        let mut next_id = 1usize;
        let mut layers: Vec<Vec<Node>> = Vec::with_capacity(shape.len());
        let mut links: Vec<Vec<Link>> = Vec::with_capacity(shape.len());

        for (layer_idx, &size) in shape.iter().enumerate() {
            let activation = if layer_idx == output_layer {
                output_activation
            } else {
                hidden_activation
            };

            let nodes: Vec<Node> = (0..size)
                .map(|i| {
                    let id = if layer_idx == 0 {
                        input_ids[i].as_ref().to_owned()
                    } else {
                        let id = next_id.to_string();
                        next_id += 1;
                        id
                    };
                    Node::new(id, activation, bias)
                })
                .collect();

            let mut incoming = Vec::new();
            if let Some(prev) = layers.last() {
                incoming.reserve(prev.len() * size);
                for (d, dest) in nodes.iter().enumerate() {
                    for (s, src) in prev.iter().enumerate() {
                        let weight = if init_zero {
                            0.0
                        } else {
                            rng.gen_range(-INIT_WEIGHT_RANGE..=INIT_WEIGHT_RANGE)
                        };
                        incoming.push(Link::new(
                            src.id(),
                            NodeRef { layer: layer_idx - 1, index: s },
                            dest.id(),
                            NodeRef { layer: layer_idx, index: d },
                            weight,
                            regularization,
                        ));
                    }
                }
            }

            layers.push(nodes);
            links.push(incoming);
        }

        debug!(
            "built network: shape={shape:?} links={} init_zero={init_zero}",
            links.iter().map(Vec::len).sum::<usize>()
        );

        Ok(Network {
            layers,
            links,
            learning_rate: 0.1,
            regularization_rate: 0.01,
        })
    }

    /// Allocates a gradient buffer matching this network's topology.
    pub fn gradients(&self) -> Gradients {
        Gradients::new(self)
    }

    /// Forward pass. Input values are copied straight into the input nodes
    /// (no bias, no activation); every later node recomputes its total input
    /// from live incoming links. Returns the output-layer values.
    ///
    /// A wrongly sized input is rejected before any node is touched.
    pub fn forward_prop(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let expected = self.input_size();
        if inputs.len() != expected {
            return Err(NetworkError::InputSizeMismatch { expected, actual: inputs.len() });
        }

        for (node, &x) in self.layers[0].iter_mut().zip(inputs.iter()) {
            node.output = x;
        }

        for layer_idx in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(layer_idx);
            let prev = &before[layer_idx - 1];
            let fan_in = prev.len();
            let incoming = &self.links[layer_idx];

            for (d, node) in after[0].iter_mut().enumerate() {
                let weighted: f64 = incoming[d * fan_in..(d + 1) * fan_in]
                    .iter()
                    .filter(|link| !link.is_dead())
                    .map(|link| link.weight * prev[link.source().index].output)
                    .sum();
                node.activate(node.bias + weighted);
            }
        }

        Ok(self.output())
    }

    /// Backpropagates `error_function` against `targets` through the values
    /// cached by the last forward pass, adding this sample's derivatives to
    /// `grads`. Weights and biases are left alone until `update_weights`.
    pub fn back_prop(
        &self,
        targets: &[f64],
        error_function: ErrorFunction,
        grads: &mut Gradients,
    ) -> Result<()> {
        let expected = self.output_size();
        if targets.len() != expected {
            return Err(NetworkError::TargetSizeMismatch { expected, actual: targets.len() });
        }
        if !grads.matches(self) {
            return Err(NetworkError::GradientShapeMismatch);
        }

        let output_layer = self.layers.len() - 1;
        for (i, node) in self.layers[output_layer].iter().enumerate() {
            grads.nodes[output_layer][i].output_derivative =
                error_function.derivative(node.output, targets[i]);
        }

        for layer_idx in (1..=output_layer).rev() {
            let prev = &self.layers[layer_idx - 1];
            let fan_in = prev.len();

            for (node, g) in self.layers[layer_idx].iter().zip(grads.nodes[layer_idx].iter_mut()) {
                g.input_derivative = g.output_derivative * node.activation().derivative(node.total_input);
                g.accumulated_input_derivative += g.input_derivative;
                g.count += 1;
            }

            for (link, g) in self.links[layer_idx].iter().zip(grads.links[layer_idx].iter_mut()) {
                if link.is_dead() {
                    continue;
                }
                let input_derivative = grads.nodes[layer_idx][link.destination().index].input_derivative;
                g.error_derivative = input_derivative * prev[link.source().index].output;
                g.accumulated_error_derivative += g.error_derivative;
                g.count += 1;
            }

            if layer_idx == 1 {
                continue;
            }

            let width = self.layers[layer_idx].len();
            for s in 0..fan_in {
                let mut output_derivative = 0.0;
                for d in 0..width {
                    let link = &self.links[layer_idx][d * fan_in + s];
                    if link.is_dead() {
                        continue;
                    }
                    output_derivative += link.weight * grads.nodes[layer_idx][d].input_derivative;
                }
                grads.nodes[layer_idx - 1][s].output_derivative = output_derivative;
            }
        }

        Ok(())
    }

    /// Applies one gradient-descent step from everything accumulated in
    /// `grads`, then clears those accumulators.
    ///
    /// Per live link the gradient step runs first; the regularization step
    /// is then taken from the post-gradient weight using the penalty slope
    /// at the pre-gradient weight. Under L1, a link whose regularization
    /// step would flip the sign of its weight is zeroed and pruned for good.
    pub fn update_weights(&mut self, grads: &mut Gradients) -> Result<()> {
        if !grads.matches(self) {
            return Err(NetworkError::GradientShapeMismatch);
        }

        let learning_rate = self.learning_rate;
        let regularization_rate = self.regularization_rate;

        for layer_idx in 1..self.layers.len() {
            for (node, g) in self.layers[layer_idx].iter_mut().zip(grads.nodes[layer_idx].iter_mut()) {
                if g.count > 0 {
                    node.bias -= learning_rate * g.accumulated_input_derivative / g.count as f64;
                    g.accumulated_input_derivative = 0.0;
                    g.count = 0;
                }
            }

            for (link, g) in self.links[layer_idx].iter_mut().zip(grads.links[layer_idx].iter_mut()) {
                if link.is_dead() || g.count == 0 {
                    continue;
                }

                let regularization_derivative = link
                    .regularization()
                    .map_or(0.0, |r| r.derivative(link.weight));

                link.weight -= (learning_rate / g.count as f64) * g.accumulated_error_derivative;

                let candidate =
                    link.weight - learning_rate * regularization_rate * regularization_derivative;

                if link.regularization() == Some(RegularizationFunction::L1)
                    && link.weight * candidate < 0.0
                {
                    link.prune();
                    trace!("pruned link {}", link.id());
                } else {
                    link.weight = candidate;
                }

                g.accumulated_error_derivative = 0.0;
                g.count = 0;
            }
        }

        Ok(())
    }

    // ── Query surface ──────────────────────────────────────────────────────

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of nodes in `layer`, or `None` if the layer does not exist.
    pub fn layer_size(&self, layer: usize) -> Option<usize> {
        self.layers.get(layer).map(Vec::len)
    }

    /// Node counts per layer, input first.
    pub fn shape(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    pub fn node(&self, layer: usize, index: usize) -> Option<&Node> {
        self.layers.get(layer)?.get(index)
    }

    /// Current output of a node; 0 when the coordinates are out of range.
    pub fn node_output(&self, layer: usize, index: usize) -> f64 {
        self.node(layer, index).map_or(0.0, Node::output)
    }

    /// Current output-layer values.
    pub fn output(&self) -> Vec<f64> {
        self.layers[self.layers.len() - 1].iter().map(Node::output).collect()
    }

    /// All links into `layer`, destination-major. Empty for the input layer.
    pub fn links_into(&self, layer: usize) -> &[Link] {
        self.links.get(layer).map_or(&[], Vec::as_slice)
    }

    /// The link between two nodes, if the layers are adjacent and both exist.
    pub fn link(&self, from_layer: usize, from_node: usize, to_layer: usize, to_node: usize) -> Option<&Link> {
        let index = self.link_index(from_layer, from_node, to_layer, to_node)?;
        Some(&self.links[to_layer][index])
    }

    /// Weight of a link; 0 when the link does not exist.
    pub fn weight(&self, from_layer: usize, from_node: usize, to_layer: usize, to_node: usize) -> f64 {
        self.link(from_layer, from_node, to_layer, to_node).map_or(0.0, Link::weight)
    }

    /// Overwrites a link weight. Returns `false`, leaving the network
    /// untouched, if no such link exists or the link has been pruned.
    pub fn set_weight(
        &mut self,
        from_layer: usize,
        from_node: usize,
        to_layer: usize,
        to_node: usize,
        weight: f64,
    ) -> bool {
        match self.link_index(from_layer, from_node, to_layer, to_node) {
            Some(index) if !self.links[to_layer][index].is_dead() => {
                self.links[to_layer][index].weight = weight;
                true
            }
            _ => false,
        }
    }

    /// Calls `action` on every node in layer order, optionally skipping inputs.
    pub fn for_each_node<F: FnMut(&Node)>(&self, ignore_inputs: bool, mut action: F) {
        let start = if ignore_inputs { 1 } else { 0 };
        for layer in &self.layers[start..] {
            layer.iter().for_each(&mut action);
        }
    }

    fn link_index(&self, from_layer: usize, from_node: usize, to_layer: usize, to_node: usize) -> Option<usize> {
        if to_layer != from_layer + 1 || to_layer >= self.layers.len() {
            return None;
        }
        let fan_in = self.layers[from_layer].len();
        if from_node >= fan_in || to_node >= self.layers[to_layer].len() {
            return None;
        }
        Some(to_node * fan_in + from_node)
    }
}
