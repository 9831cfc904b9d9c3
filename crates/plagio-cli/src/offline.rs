//! # Offline Subcommands
//!
//! `fingerprint` and `count` run locally with the same code the services
//! use, so their output matches what an upload or analysis would produce.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use plagio_analysis::{decode_text, TextCounts};
use plagio_core::{FileExtension, Fingerprint, FingerprintAlgorithm};
use plagio_store::Location;
use serde::Serialize;

use crate::EXIT_OK;

/// Arguments for `plagio fingerprint`.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// File to fingerprint.
    pub file: PathBuf,

    /// Digest algorithm (sha256 or sha512).
    #[arg(long, default_value = "sha256")]
    pub algorithm: FingerprintAlgorithm,
}

/// Arguments for `plagio count`.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// UTF-8 text file to count.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct FingerprintOutput {
    algorithm: FingerprintAlgorithm,
    fingerprint: Fingerprint,
    location: String,
    byte_size: u64,
}

/// Print the fingerprint and content-addressed location of a file.
pub fn run_fingerprint(args: &FingerprintArgs) -> Result<u8> {
    let output = fingerprint_file(args)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(EXIT_OK)
}

/// Print paragraph, word and character counts of a file.
pub fn run_count(args: &CountArgs) -> Result<u8> {
    let counts = count_file(args)?;
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(EXIT_OK)
}

fn fingerprint_file(args: &FingerprintArgs) -> Result<FingerprintOutput> {
    let name = args.file.to_string_lossy();
    let extension = FileExtension::from_file_name(&name)?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let fingerprint = Fingerprint::compute(args.algorithm, &bytes);
    let location = Location::derive(&fingerprint, &extension);
    Ok(FingerprintOutput {
        algorithm: args.algorithm,
        location: location.as_str().to_string(),
        fingerprint,
        byte_size: bytes.len() as u64,
    })
}

fn count_file(args: &CountArgs) -> Result<TextCounts> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let text = match decode_text(&bytes) {
        Ok(text) => text,
        Err(e) => bail!("{} is not UTF-8 text: {e}", args.file.display()),
    };
    Ok(TextCounts::of(text))
}
