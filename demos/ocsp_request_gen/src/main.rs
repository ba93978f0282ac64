//! Generates a DER-encoded `OCSPRequest` for a single serial number and
//! writes it to a file. Ported from
//! `original_source/cmd/revocation-server/generateRequest.go`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

/// Generates an OCSP request for a given serial number against an issuer cert.
#[derive(Debug, Parser)]
struct Args {
    /// Serial number corresponding to cert to check for revocation status.
    #[arg(long)]
    serial: u64,

    /// Location of issuer CA cert file.
    #[arg(long, default_value = "testdata/root.cert")]
    cert: PathBuf,

    /// Location of generated request.
    #[arg(long, default_value = "./generated.req")]
    out_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let issuer = revocation_crypto::pem_loader::load_issuer_certificate(Path::new(&args.cert))
        .with_context(|| format!("failed to load issuer certificate from {}", args.cert.display()))?;

    let request = revocation_ocsp::create_request(&issuer, args.serial)
        .context("failed to create request")?;

    std::fs::write(&args.out_file, &request)
        .with_context(|| format!("failed to write request to {}", args.out_file.display()))?;

    println!("wrote {} byte OCSP request for serial {} to {}", request.len(), args.serial, args.out_file.display());
    Ok(())
}
