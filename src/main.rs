// End-to-end demo: synthesize two moons, train the dense classifier, and
// trace the resulting decision boundary.
use moonbench::{
    decision_boundary, fit, DenseNet, MoonsGenerator, TrainConfig, DEFAULT_GRID_RESOLUTION,
};
use std::error::Error;
use std::process::ExitCode;

fn run() -> Result<(), Box<dyn Error>> {
    let mut train_gen = MoonsGenerator::<f64>::new(300, 0.2, 42);
    train_gen.offset = 1.0;
    train_gen.rotation_degrees = 90.0;
    let mut test_gen = train_gen.clone();
    test_gen.seed = 43;

    let train_data = train_gen.generate()?;
    let test_data = test_gen.generate()?;
    println!(
        "Generated {} training and {} test points",
        train_data.len(),
        test_data.len()
    );

    let mut net = DenseNet::<f64>::moons(42);
    println!("Classifier with {} parameters", net.parameter_count());

    let config = TrainConfig::new(0.01, 100, 50, 42);
    let history = fit(&mut net, &train_data, &test_data, &config)?;

    for record in &history {
        println!(
            "epoch {:3}: train loss {:.4}, train acc {:.3}, test loss {:.4}, test acc {:.3}",
            record.epoch,
            record.train_loss,
            record.train_accuracy,
            record.test_loss,
            record.test_accuracy
        );
    }
    if let Some(last) = history.last() {
        if last.stopped_early {
            println!(
                "Stopped early at epoch {} with test accuracy {:.3}",
                last.epoch, last.test_accuracy
            );
        }
    }

    let field = decision_boundary(&test_data, &net, DEFAULT_GRID_RESOLUTION)?;
    println!(
        "Decision boundary: {}x{} grid over x in [{:.2}, {:.2}], y in [{:.2}, {:.2}], {} segments",
        field.x_coords.len(),
        field.y_coords.len(),
        field.x_coords[0],
        field.x_coords[field.x_coords.len() - 1],
        field.y_coords[0],
        field.y_coords[field.y_coords.len() - 1],
        field.segments.len()
    );

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
