// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, Context, Result};
use tonal::config::ProgressionFile;
use tonal::{Key, Pitch};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("TONAL - Music Theory Calculator");
    println!();
    println!("Usage: tonal [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --demo                             Print a tour of pitches, scales, chords and keys");
    println!("  --key <NOTE> <SCALE> <DEGREE>...   Resolve roman numerals (e.g. V7, ii, bIII+) in a key");
    println!("  --identify <NOTE> <SCALE> <N>...   Identify the chord on scale-degree indexes (0 = I)");
    println!("  --progression <FILE>              Resolve a YAML or TOML progression file");
    println!("  --help                             Show this help message");
    println!();
    println!("Set RUST_LOG=debug to trace key and chord resolution.");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo() -> Result<()> {
    let d_sharp = Pitch::new("D#")?;
    println!("{}", d_sharp);

    let d_sharp = Pitch::with_octave("D#", 5)?;
    println!("{}", d_sharp);
    println!("{}", d_sharp.chord("m7")?);
    println!("{}", d_sharp.scale("minor")?);

    let c_flat_major = Key::new("Cb", "major")?;
    println!("{}: {}", c_flat_major, c_flat_major.scale());

    let mut chord = c_flat_major.chord("bIII", "aug")?;
    println!("{}", chord);

    chord.set_position(1)?;
    println!("{}", chord);

    chord.sort();
    println!("{}", chord);

    let c_major = Key::new("C", "major")?;
    for degree in ["I", "II", "III", "IV", "V", "VI", "VII"] {
        println!("{}", c_major.diatonic_seventh(degree)?);
    }
    Ok(())
}

fn resolve_degrees(note: &str, scale: &str, degrees: &[String]) -> Result<()> {
    let key = Key::new(note, scale)?;
    println!("{}: {}", key, key.scale());
    for degree in degrees {
        let chord = key
            .chord_from_numeral(degree)
            .with_context(|| format!("Failed to resolve '{}' in {}", degree, key))?;
        println!("{}", chord);
    }
    Ok(())
}

fn identify(note: &str, scale: &str, indexes: &[String]) -> Result<()> {
    let key = Key::new(note, scale)?;
    let indexes = indexes
        .iter()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| anyhow!("Invalid scale-degree index: {}", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let chord = key.identify_chord(&indexes)?;
    println!("{}: {}", key, chord);
    Ok(())
}

fn print_progression(path: &str) -> Result<()> {
    let file = ProgressionFile::load(path)?;
    let key = file.key()?;
    println!("{}: {}", key, key.scale());
    for chord in file.resolve()? {
        println!("{}", chord);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("TONAL - Music Theory Calculator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--demo" => {
            run_demo()?;
        }
        "--key" => {
            if args.len() < 5 {
                eprintln!("Error: --key requires a note, a scale and at least one degree");
                std::process::exit(1);
            }
            resolve_degrees(&args[2], &args[3], &args[4..])?;
        }
        "--identify" => {
            if args.len() < 6 {
                eprintln!("Error: --identify requires a note, a scale and at least two indexes");
                std::process::exit(1);
            }
            identify(&args[2], &args[3], &args[4..])?;
        }
        "--progression" => {
            if args.len() < 3 {
                eprintln!("Error: --progression requires a file path");
                std::process::exit(1);
            }
            print_progression(&args[2])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
