//! tabprep CLI
//!
//! # Usage
//!
//! ```bash
//! # Check the dataset
//! tabprep validate --data Iris.csv
//!
//! # Write processed_data/train.csv and processed_data/test.csv
//! tabprep split --test-size 0.25 --seed 42
//!
//! # Register a model and stage it
//! tabprep registry register iris-classifier-prod demos/centroid_model.json
//! tabprep registry promote iris-classifier-prod 1 Development
//! tabprep registry promote iris-classifier-prod 1 Staging
//!
//! # Smoke-test the staged model on the first row
//! tabprep predict
//! ```

use clap::Parser;
use std::process::ExitCode;
use tabprep::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
