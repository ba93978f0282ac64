//! Parses a DER-encoded `OCSPResponse` from disk and prints its revocation
//! status and inclusion proof. Ported from
//! `original_source/cmd/revocation-server/parseResponse.go`.
//!
//! The original also loads the issuer certificate to verify the response's
//! signature before trusting its contents; this codec doesn't expose a
//! verification routine (see DESIGN.md), so this demo only decodes.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use revocation_ocsp::cert_id::serial_from_cert_id;

/// Parses an OCSP response and reports the cert status it carries.
#[derive(Debug, Parser)]
struct Args {
    /// Path to file containing OCSP response from server.
    #[arg(long)]
    resp: PathBuf,

    /// Serial that we are checking the response for status of.
    #[arg(long)]
    serial: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let der_bytes = std::fs::read(&args.resp)
        .with_context(|| format!("could not read response file {}", args.resp.display()))?;

    let parsed = revocation_ocsp::parse_response(&der_bytes).context("could not parse ocsp response")?;

    let response_serial = serial_from_cert_id(&parsed.cert_id).context("response CertID has no usable serial")?;
    if response_serial != args.serial {
        anyhow::bail!(
            "response is for serial {response_serial}, expected {}",
            args.serial
        );
    }

    println!("Cert status according to response: {}", if parsed.revoked { "Revoked" } else { "Good (nonRevoked)" });
    println!("Proof = {:?}", parsed.proof.iter().map(hex::encode).collect::<Vec<_>>());

    Ok(())
}
