use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::Parser;

use autorotate::listener::OrientationListener;
use autorotate::rotation::Rotation;
use autorotate::sample::AccelSample;
use autorotate::sensor::SampleRate;
use autorotate::settings::FixedRotationSettings;
use autorotate_harness::{motions, ScriptedAccelerometer};

/// Command line arguments for the replay tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay accelerometer traces through the rotation listener",
    long_about = "Replays an accelerometer trace through the orientation listener and \
        prints every rotation change with the index of the sample that caused it.\n\n\
        The trace is a JSON array of {\"x\": .., \"y\": .., \"z\": ..} samples in m/s^2. \
        Without a trace file, a built-in sweep carries the orientation around the full \
        circle and back at a comfortable tilt, which walks every switching threshold \
        from both directions.\n\n\
        Useful for:\n  \
        - Reproducing a rotation bug from a captured sensor log\n  \
        - Seeing where the switching thresholds sit in practice\n  \
        - Demonstrating the upside-down preference gate"
)]
struct Args {
    #[arg(
        help = "JSON trace file to replay",
        long_help = "Path to a JSON trace file, an array of accelerometer samples with \
            x, y and z fields in m/s^2. Omit to replay the built-in demo sweep."
    )]
    trace: Option<PathBuf>,

    #[arg(
        long,
        help = "Permit the upside-down rotation",
        long_help = "Allow the listener to commit the 180 degree rotation. Off by \
            default, matching the usual device policy; suppressed decisions show up \
            as missing changes in the output."
    )]
    allow_180: bool,

    #[arg(
        short,
        long,
        default_value = "normal",
        value_parser = parse_rate,
        help = "Sample rate to subscribe at (normal, ui, game, fastest)",
        long_help = "Sample rate requested from the source: normal (5 Hz), ui (15 Hz), \
            game (50 Hz) or fastest. Replay is not paced, so this only affects what \
            the listener requests on subscribe."
    )]
    rate: SampleRate,
}

fn parse_rate(value: &str) -> Result<SampleRate, String> {
    match value {
        "normal" => Ok(SampleRate::Normal),
        "ui" => Ok(SampleRate::Ui),
        "game" => Ok(SampleRate::Game),
        "fastest" => Ok(SampleRate::Fastest),
        other => Err(format!("unknown sample rate: {other}")),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("Rotation replay");
    println!("===============");

    let samples: Vec<AccelSample> = match &args.trace {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let samples = serde_json::from_reader(reader)?;
            println!("Trace: {}", path.display());
            samples
        }
        None => {
            let mut demo = motions::sweep(0.0, 360.0, 361, 20.0);
            demo.extend(motions::sweep(360.0, 0.0, 361, 20.0));
            println!("Trace: built-in demo sweep");
            demo
        }
    };
    println!("Samples: {}", samples.len());
    println!("Allow 180°: {}", args.allow_180);
    println!("Rate: {:?}", args.rate);
    println!();

    let source = Arc::new(ScriptedAccelerometer::new());
    let cursor = Arc::new(AtomicUsize::new(0));
    let changes = Arc::new(AtomicUsize::new(0));

    let observer_cursor = cursor.clone();
    let observer_changes = changes.clone();
    let observer = move |rotation: Rotation| {
        observer_changes.fetch_add(1, Ordering::Relaxed);
        println!(
            "sample {:>5}: rotation -> {}",
            observer_cursor.load(Ordering::Relaxed),
            rotation
        );
    };

    let mut listener = OrientationListener::with_rate(
        source.clone(),
        Arc::new(FixedRotationSettings(args.allow_180)),
        Arc::new(observer),
        args.rate,
    );
    listener.enable()?;

    for (index, sample) in samples.iter().enumerate() {
        cursor.store(index, Ordering::Relaxed);
        source.deliver(*sample);
    }

    println!();
    println!("{} rotation changes", changes.load(Ordering::Relaxed));
    match listener.current_rotation() {
        Some(rotation) => println!("final rotation: {}", rotation),
        None => println!("final rotation: unknown"),
    }

    listener.disable();
    Ok(())
}
