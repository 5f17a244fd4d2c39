use approx::assert_relative_eq;
use linknet::loss::MseError;
use linknet::{
    ActivationFunction, ErrorFunction, Link, Network, NetworkError, RegularizationFunction,
    Trainer, TrainingParameters,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

fn seeded(shape: &[usize], seed: u64) -> Network {
    Network::build_with_rng(
        shape,
        ActivationFunction::Tanh,
        ActivationFunction::Sigmoid,
        None,
        &ids(shape[0]),
        false,
        &mut StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

fn all_outputs(net: &Network) -> Vec<f64> {
    let mut out = Vec::new();
    net.for_each_node(false, |node| out.push(node.output()));
    out
}

fn all_weights(net: &Network) -> Vec<f64> {
    (1..net.layer_count())
        .flat_map(|l| net.links_into(l).iter().map(Link::weight))
        .collect()
}

#[test]
fn layer_sizes_follow_shape() {
    for shape in [vec![1, 1], vec![3, 5, 2], vec![2, 4, 4, 3, 1]] {
        let net = seeded(&shape, 1);
        assert_eq!(net.layer_count(), shape.len());
        for (i, &n) in shape.iter().enumerate() {
            assert_eq!(net.layer_size(i), Some(n));
        }
        assert_eq!(net.layer_size(shape.len()), None);
    }
}

#[test]
fn adjacent_layers_are_fully_connected() {
    let shape = [3, 5, 2, 4];
    let net = seeded(&shape, 2);
    assert!(net.links_into(0).is_empty());
    for i in 0..shape.len() - 1 {
        assert_eq!(net.links_into(i + 1).len(), shape[i] * shape[i + 1]);
        for s in 0..shape[i] {
            for d in 0..shape[i + 1] {
                assert!(net.link(i, s, i + 1, d).is_some());
            }
        }
    }
}

#[test]
fn forward_is_deterministic() {
    let mut net = seeded(&[3, 4, 2], 3);
    let first = net.forward_prop(&[0.3, -1.2, 0.8]).unwrap();
    let second = net.forward_prop(&[0.3, -1.2, 0.8]).unwrap();
    assert_eq!(first, second);
    assert_eq!(net.output(), second);
}

#[test]
fn zero_init_outputs_activation_of_zero() {
    let mut net = Network::build(
        &[2, 2, 1],
        ActivationFunction::Tanh,
        ActivationFunction::Tanh,
        None,
        &["a", "b"],
        true,
    )
    .unwrap();

    let out = net.forward_prop(&[1.0, 0.0]).unwrap();
    assert_eq!(net.node_output(1, 0), 0.0);
    assert_eq!(net.node_output(1, 1), 0.0);
    assert_eq!(out, vec![0.0]);
    assert!(all_weights(&net).iter().all(|&w| w == 0.0));
}

#[test]
fn input_nodes_take_raw_values() {
    let mut net = seeded(&[2, 2, 1], 4);
    net.forward_prop(&[-3.5, 7.0]).unwrap();
    assert_eq!(net.node_output(0, 0), -3.5);
    assert_eq!(net.node_output(0, 1), 7.0);
    assert_eq!(net.node_output(5, 0), 0.0);
}

#[test]
fn backprop_matches_finite_differences() {
    let mut net = seeded(&[2, 3, 2], 5);
    let input = [0.7, -0.4];
    let target = [1.0, 0.0];

    let mut grads = net.gradients();
    net.forward_prop(&input).unwrap();
    net.back_prop(&target, ErrorFunction::MeanSquared, &mut grads).unwrap();

    let eps = 1e-5;
    let error_at = |w: f64, l: usize, s: usize, d: usize| {
        let mut probe = net.clone();
        probe.set_weight(l, s, l + 1, d, w);
        let out = probe.forward_prop(&input).unwrap();
        MseError::total_error(&out, &target).unwrap()
    };

    for l in 0..net.layer_count() - 1 {
        for s in 0..net.layer_size(l).unwrap() {
            for d in 0..net.layer_size(l + 1).unwrap() {
                let w = net.weight(l, s, l + 1, d);
                let numeric = (error_at(w + eps, l, s, d) - error_at(w - eps, l, s, d)) / (2.0 * eps);
                let analytic = grads.link(l, s, d).unwrap().accumulated_error_derivative;
                assert_relative_eq!(analytic, numeric, epsilon = 1e-8, max_relative = 1e-3);
            }
        }
    }
}

#[test]
fn l1_sign_flip_prunes_for_good() {
    let mut net = Network::build(
        &[1, 1],
        ActivationFunction::Linear,
        ActivationFunction::Linear,
        Some(RegularizationFunction::L1),
        &["x"],
        false,
    )
    .unwrap();
    net.set_weight(0, 0, 1, 0, 0.0005);
    net.regularization_rate = 1.0;
    let mut grads = net.gradients();

    // Zero input keeps the gradient step at zero, so only L1 acts.
    net.forward_prop(&[0.0]).unwrap();
    net.back_prop(&[0.0], ErrorFunction::MeanSquared, &mut grads).unwrap();
    net.update_weights(&mut grads).unwrap();

    let link = net.link(0, 0, 1, 0).unwrap();
    assert!(link.is_dead());
    assert_eq!(link.weight(), 0.0);

    // A dead link cannot be rewritten and receives no gradient.
    assert!(!net.set_weight(0, 0, 1, 0, 5.0));
    for _ in 0..10 {
        let out = net.forward_prop(&[2.0]).unwrap();
        assert_relative_eq!(out[0], net.node(1, 0).unwrap().bias());
        net.back_prop(&[-4.0], ErrorFunction::MeanSquared, &mut grads).unwrap();
        assert_eq!(grads.link(0, 0, 0).unwrap().count, 0);
        net.update_weights(&mut grads).unwrap();
    }
    let link = net.link(0, 0, 1, 0).unwrap();
    assert!(link.is_dead());
    assert_eq!(link.weight(), 0.0);
}

#[test]
fn pruned_link_carries_no_error_upstream() {
    let mut net = Network::build(
        &[1, 1, 1],
        ActivationFunction::Linear,
        ActivationFunction::Linear,
        Some(RegularizationFunction::L1),
        &["x"],
        false,
    )
    .unwrap();
    net.set_weight(0, 0, 1, 0, 0.4);
    net.set_weight(1, 0, 2, 0, 0.0005);
    net.regularization_rate = 1.0;
    let mut grads = net.gradients();

    // Target equal to the output: zero error, so only L1 moves weights and
    // the small hidden->output weight flips sign and is pruned.
    let out = net.forward_prop(&[0.0]).unwrap();
    net.back_prop(&out, ErrorFunction::MeanSquared, &mut grads).unwrap();
    net.update_weights(&mut grads).unwrap();
    assert!(net.link(1, 0, 2, 0).unwrap().is_dead());
    assert!(!net.link(0, 0, 1, 0).unwrap().is_dead());

    assert!(!net.set_weight(1, 0, 2, 0, 5.0));
    let upstream = net.weight(0, 0, 1, 0);

    net.forward_prop(&[1.0]).unwrap();
    net.back_prop(&[-10.0], ErrorFunction::MeanSquared, &mut grads).unwrap();
    assert_eq!(grads.node(1, 0).unwrap().output_derivative, 0.0);
    assert_eq!(grads.link(0, 0, 0).unwrap().accumulated_error_derivative, 0.0);
    assert_eq!(grads.link(1, 0, 0).unwrap().count, 0);

    // Upstream link only feels its own L1 penalty.
    net.update_weights(&mut grads).unwrap();
    assert_relative_eq!(net.weight(0, 0, 1, 0), upstream - 0.1 * 1.0 * 1.0, epsilon = 1e-12);
}

#[test]
fn l1_without_sign_flip_only_shrinks() {
    let mut net = Network::build(
        &[1, 1],
        ActivationFunction::Linear,
        ActivationFunction::Linear,
        Some(RegularizationFunction::L1),
        &["x"],
        false,
    )
    .unwrap();
    net.set_weight(0, 0, 1, 0, -0.3);
    let mut grads = net.gradients();

    net.forward_prop(&[0.0]).unwrap();
    net.back_prop(&[0.0], ErrorFunction::MeanSquared, &mut grads).unwrap();
    net.update_weights(&mut grads).unwrap();

    let link = net.link(0, 0, 1, 0).unwrap();
    assert!(!link.is_dead());
    assert_relative_eq!(link.weight(), -0.3 + 0.1 * 0.01);
}

#[test]
fn wrong_input_size_leaves_outputs_untouched() {
    let mut net = seeded(&[2, 3, 1], 6);
    net.forward_prop(&[0.5, 0.25]).unwrap();
    let before = all_outputs(&net);

    for bad in [vec![], vec![1.0], vec![1.0, 2.0, 3.0]] {
        let err = net.forward_prop(&bad).unwrap_err();
        assert_eq!(err, NetworkError::InputSizeMismatch { expected: 2, actual: bad.len() });
    }
    assert_eq!(all_outputs(&net), before);
}

#[test]
fn trainer_updates_once_per_full_batch() {
    let params = TrainingParameters { batch_size: 5, ..TrainingParameters::default() };
    let mut trainer = Trainer::new(seeded(&[2, 2, 2], 7), params).unwrap();
    let before = all_weights(trainer.network());

    for i in 0..4 {
        let x = i as f64 / 4.0;
        assert!(trainer.train(&[x, 1.0 - x], &[1.0, 0.0]).unwrap().is_none());
        assert_eq!(all_weights(trainer.network()), before);
    }

    let stats = trainer.train(&[1.0, 0.0], &[0.0, 1.0]).unwrap().unwrap();
    assert_eq!(stats.epoch, 1);
    assert_eq!(trainer.epoch_count(), 1);
    assert_ne!(all_weights(trainer.network()), before);
    assert_relative_eq!(trainer.current_error(), stats.mean_error);
}
