use backprop_net::data::builtin_dominant;
use backprop_net::{accuracy, Network, NetworkConfig, TrainConfig, Trainer};

fn main() -> backprop_net::Result<()> {
    let mut network = Network::new(&NetworkConfig::new(2, 2, 4))?;
    let mut samples = builtin_dominant();

    let mut trainer = Trainer::new(TrainConfig::new(500, 0.5).with_shuffle_seed(17))?;
    let stats = trainer.fit(&mut network, &mut samples)?;

    for s in stats.iter().step_by(50) {
        println!("Epoch {}: mse = {:.6}", s.epoch, s.mean_squared_error);
    }

    for sample in &samples {
        let output = network.activate(&sample.features)?;
        println!(
            "Input: {:?} (class {}) -> Output: [{:.4}, {:.4}]",
            sample.features, sample.label, output[0], output[1]
        );
    }
    println!("Accuracy: {:.2}", accuracy(&mut network, &samples)?);
    Ok(())
}
