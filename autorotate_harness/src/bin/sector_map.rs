use clap::Parser;

use autorotate::classifier::SectorClassifier;
use autorotate::rotation::Rotation;
use autorotate_harness::motions;

/// Command line arguments for the sector map tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Print the classifier's decision map over all orientations",
    long_about = "Prints, for every previous rotation state and each requested tilt, \
        the rotation the classifier proposes at every whole-degree orientation, \
        compressed into runs.\n\n\
        The map makes the transition thresholds and hysteresis bands visible: the \
        runs shift between previous states, and sweeping the tilt list shows the \
        bands widening as tilt departs the 20 degree pivot.\n\n\
        Useful for:\n  \
        - Checking threshold tuning without instrumenting a device\n  \
        - Seeing which boundaries move under tilt and which stay put\n  \
        - Explaining why a rotation did or did not happen at a given angle"
)]
struct Args {
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "-9,0,20,45,64",
        help = "Comma-separated tilt angles in degrees",
        long_help = "Tilt angles (degrees out of the screen plane) to map. Decisions \
            only happen inside the -10 to 65 degree gate; values outside it print as \
            one no-decision run. Exactly at a gate edge the reconstructed tilt lands \
            on either side sample by sample, so prefer values just inside."
    )]
    tilts: Vec<f32>,
}

const PREVIOUS_STATES: [Option<Rotation>; 5] = [
    None,
    Some(Rotation::Deg0),
    Some(Rotation::Deg90),
    Some(Rotation::Deg180),
    Some(Rotation::Deg270),
];

fn state_label(state: Option<Rotation>) -> String {
    match state {
        Some(rotation) => rotation.to_string(),
        None => "unknown".to_string(),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Sector map");
    println!("==========");

    for previous in PREVIOUS_STATES {
        for &tilt in &args.tilts {
            let mut classifier = SectorClassifier::new();
            if let Some(rotation) = previous {
                classifier.commit(rotation);
            }

            // Runs of consecutive orientations with the same decision.
            let mut runs: Vec<(i32, i32, Option<Rotation>)> = Vec::new();
            for orientation in 0..360 {
                let sample = motions::sample_at(orientation as f32, tilt);
                let candidate = classifier.evaluate(sample);
                match runs.last_mut() {
                    Some(run) if run.2 == candidate => run.1 = orientation,
                    _ => runs.push((orientation, orientation, candidate)),
                }
            }

            println!();
            println!("previous {}, tilt {}°:", state_label(previous), tilt);
            for (start, end, candidate) in runs {
                println!("  {:>3}..={:>3}  {}", start, end, state_label(candidate));
            }
        }
    }
}
