use linknet::{train_loop, ActivationFunction, Network, Trainer, TrainingParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> linknet::Result<()> {
    let mut rng = StdRng::seed_from_u64(0);
    let network = Network::build_with_rng(
        &[2, 4, 1],
        ActivationFunction::Tanh,
        ActivationFunction::Sigmoid,
        None,
        &["x0", "x1"],
        false,
        &mut rng,
    )?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let params = TrainingParameters {
        learning_rate: 0.5,
        batch_size: 4,
        regularization: 0.0,
        ..TrainingParameters::default()
    };
    let mut trainer = Trainer::new(network, params)?;

    for round in 0..10 {
        if let Some(stats) = train_loop(&mut trainer, &inputs, &expected_outputs, 1000, &mut rng)? {
            println!("Round {round}: batch {} error = {:.6}", stats.epoch, stats.mean_error);
        }
    }

    let mut network = trainer.into_network();
    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.forward_prop(input)?[0]);
    }
    Ok(())
}
