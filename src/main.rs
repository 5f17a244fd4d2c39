// Toy training demo: alternates two one-hot samples and trains on each one
// immediately, logging the network state as it converges.
//
//   RUST_LOG=debug cargo run -- [network-spec.json] [iterations]
use std::process::ExitCode;

use log::{error, info};

use linknet::{
    ActivationFunction, ErrorFunction, Network, NetworkSpec, RegularizationFunction,
};

const DEFAULT_ITERATIONS: usize = 1000;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let spec = match args.next() {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => NetworkSpec {
            shape: vec![2, 3, 2],
            hidden_activation: ActivationFunction::Tanh,
            output_activation: ActivationFunction::Tanh,
            regularization: Some(RegularizationFunction::L2),
            input_ids: vec!["0".to_owned(), "1".to_owned()],
            init_zero: false,
        },
    };
    let iterations = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_ITERATIONS,
    };

    let mut network = spec.build()?;
    let mut grads = network.gradients();

    info!("training {:?} for {iterations} iterations", network.shape());

    let mut flip = false;
    for step in 0..iterations {
        let hot = if flip { 0 } else { 1 };
        let input = one_hot(network.input_size(), hot);
        let target = one_hot(network.output_size(), 1 - hot);

        network.forward_prop(&input)?;
        network.back_prop(&target, ErrorFunction::MeanSquared, &mut grads)?;
        network.update_weights(&mut grads)?;

        if step % 100 == 0 {
            log_state(&network, step);
        }
        flip = !flip;
    }

    log_state(&network, iterations);
    Ok(())
}

/// `hot` is clamped to the last slot so single-node layers still work.
fn one_hot(len: usize, hot: usize) -> Vec<f64> {
    let hot = hot.min(len - 1);
    (0..len).map(|i| if i == hot { 1.0 } else { 0.0 }).collect()
}

/// Roughly what a visualizer reads each frame: node outputs and link weights.
fn log_state(network: &Network, step: usize) {
    let mut outputs = Vec::new();
    network.for_each_node(true, |node| outputs.push(format!("{}={:+.3}", node.id(), node.output())));

    let dead = (1..network.layer_count())
        .flat_map(|l| network.links_into(l))
        .filter(|link| link.is_dead())
        .count();

    info!("step {step}: {} dead_links={dead}", outputs.join(" "));
}
