//! Validate template files from the command line.
//!
//! Every input is validated as if it had just been uploaded under its own
//! file name. Directories are expanded one level deep.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example check_files -- people.csv report.xlsx
//! ```
//!
//! Check a whole directory and print JSON:
//! ```sh
//! RUST_LOG=tabgate=debug cargo run --example check_files -- uploads/ --json
//! ```

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tabgate::{PathUpload, TemplateValidator, ValidatorConfig};
use tracing_subscriber::EnvFilter;

/// Validate CSV and Excel templates
#[derive(Parser, Debug)]
#[command(name = "check_files", version)]
struct Args {
    /// Files or directories to check
    #[arg(value_name = "INPUT", required = true)]
    input: Vec<PathBuf>,

    /// Bytes sampled for charset detection
    #[arg(long, default_value_t = 1_000_000)]
    charset_sample_bytes: usize,

    /// Print each result as a JSON object
    #[arg(long)]
    json: bool,
}

fn expand(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            match fs::read_dir(input) {
                Ok(entries) => {
                    let mut found: Vec<PathBuf> = entries
                        .filter_map(|entry| entry.ok().map(|e| e.path()))
                        .filter(|path| path.is_file())
                        .collect();
                    found.sort();
                    files.extend(found);
                },
                Err(e) => eprintln!("Cannot list {}: {}", input.display(), e),
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ValidatorConfig::new().with_charset_sample_bytes(args.charset_sample_bytes);
    let validator = TemplateValidator::with_config(config);

    let files = expand(&args.input);
    let mut accepted = 0usize;
    let total_start = Instant::now();

    for path in &files {
        let upload = PathUpload::new(path).with_filename(display_name(path));
        let start = Instant::now();
        let result = validator.validate_upload(&upload);
        let elapsed = start.elapsed();

        if result.is_ok() {
            accepted += 1;
        }

        if args.json {
            match serde_json::to_string(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Cannot serialize result for {}: {}", path.display(), e),
            }
        } else {
            println!("== {} ({:.2?})", path.display(), elapsed);
            println!("{}", result);
            println!();
        }
    }

    eprintln!(
        "{} of {} file(s) accepted in {:.2?}",
        accepted,
        files.len(),
        total_start.elapsed()
    );
}
