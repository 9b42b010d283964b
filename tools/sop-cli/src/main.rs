//! SOP Command Line Tool
//!
//! Provides commands for working with open-platform request envelopes:
//! - validate: check an envelope JSON file for required fields
//! - canonicalize: print the exact string that gets signed
//! - sign: sign an envelope with a private key file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sop_canonical::sign_content;
use sop_core::types::{FIELD_SIGN, FIELD_SIGN_TYPE};
use sop_core::{validate_envelope, RequestEnvelope};
use sop_signing::sign_envelope;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sop")]
#[command(version)]
#[command(about = "SOP Command Line Tool - Validate, canonicalize, and sign request envelopes")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an envelope JSON file
    #[command(about = "Validate a request envelope JSON file")]
    Validate {
        /// Path to the envelope JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the canonical sign content of an envelope
    #[command(about = "Output the exact string fed to the signature algorithm")]
    Canonicalize {
        /// Path to the envelope JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Sign an envelope with a private key
    #[command(about = "Sign an envelope and print the signature or the signed envelope")]
    Sign {
        /// Path to the envelope JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the private key (bare base64 body or PEM)
        #[arg(long, short, value_name = "KEYFILE")]
        key: PathBuf,

        /// Override the envelope's sign_type (RSA or RSA2)
        #[arg(long)]
        sign_type: Option<String>,

        /// Print the full envelope with the signature merged in
        #[arg(long, short)]
        merge: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => handle_validate(&file),
        Commands::Canonicalize { file } => handle_canonicalize(&file),
        Commands::Sign {
            file,
            key,
            sign_type,
            merge,
        } => handle_sign(&file, &key, sign_type.as_deref(), merge),
    }
}

fn read_envelope(file: &PathBuf) -> Result<RequestEnvelope> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {} as a request envelope", file.display()))
}

fn handle_validate(file: &PathBuf) -> Result<()> {
    let envelope = read_envelope(file)?;
    validate_envelope(&envelope).with_context(|| "Envelope validation failed")?;
    println!("Valid request envelope");
    Ok(())
}

fn handle_canonicalize(file: &PathBuf) -> Result<()> {
    let envelope = read_envelope(file)?;
    println!("{}", sign_content(&envelope));
    Ok(())
}

fn handle_sign(
    file: &PathBuf,
    key: &PathBuf,
    sign_type: Option<&str>,
    merge: bool,
) -> Result<()> {
    let mut envelope = read_envelope(file)?;
    let raw_key = std::fs::read_to_string(key)
        .with_context(|| format!("Failed to read key file: {}", key.display()))?;

    let tag = match sign_type {
        Some(tag) => tag.to_string(),
        None => envelope
            .scalar(FIELD_SIGN_TYPE)
            .context("Envelope has no sign_type field; pass --sign-type")?
            .to_string(),
    };

    let signature =
        sign_envelope(&envelope, &tag, raw_key.trim()).context("Signing failed")?;

    if merge {
        envelope.insert(FIELD_SIGN, signature);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        println!("{}", signature);
    }

    Ok(())
}
