//! hrmatch - Binary Entry Point
//!
//! Given an instance file, runs deferred acceptance and reports the
//! matching and its stability. Given an instance file and a matching
//! file, verifies the supplied matching instead of solving.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use hrmatch::{check_stability, check_validity, parse_instance, parse_matching};
use hrmatch::{Instance, MatchingEngine};

#[derive(Parser)]
#[command(name = "hrmatch")]
#[command(about = "Hospitals/Residents stable matching solver with hospital-side ties")]
struct Cli {
    /// Instance file: doctor and hospital preference lists
    instance: PathBuf,

    /// Matching file to verify instead of running the solver
    matching: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let instance_text = fs::read_to_string(&cli.instance)
        .with_context(|| format!("failed to read instance file {}", cli.instance.display()))?;
    let mut instance = parse_instance(&instance_text)
        .with_context(|| format!("failed to parse instance file {}", cli.instance.display()))?;

    let report = match &cli.matching {
        // Verify a supplied matching
        Some(path) => {
            let matching_text = fs::read_to_string(path)
                .with_context(|| format!("failed to read matching file {}", path.display()))?;
            parse_matching(&mut instance, &matching_text)
                .with_context(|| format!("failed to parse matching file {}", path.display()))?
        }
        // Solve, then self-check the constructed matching
        None => {
            MatchingEngine::new().run(&mut instance);
            check_validity(&instance)
        }
    };

    if !report.is_valid() {
        for violation in report.violations() {
            println!("{violation}");
        }
        println!("The matching is invalid!");
        return Ok(ExitCode::FAILURE);
    }

    print_matching(&instance);

    let stability = check_stability(&instance);
    for pair in stability.blocking_pairs() {
        println!("{pair}");
    }
    if stability.is_stable() {
        println!("Matching is stable");
    } else {
        println!("Matching is not stable");
    }

    Ok(ExitCode::SUCCESS)
}

/// Print every doctor's outcome and the matching size.
fn print_matching(instance: &Instance) {
    println!("Matching:");
    let mut matched = 0;
    for doctor in instance.doctors() {
        match doctor.assignment() {
            Some(hospital_id) => {
                println!(
                    "Doctor {} is assigned to hospital {}.",
                    doctor.id(),
                    hospital_id
                );
                matched += 1;
            }
            None => println!("Doctor {} is unmatched.", doctor.id()),
        }
    }
    println!("Matching size: {matched}");
}
