//! Entry point for the revocation log server: parses flags, loads the
//! signing key and issuer certificate, builds the sparse Merkle tree, starts
//! the sequencer thread, and serves the HTTP surface until a shutdown
//! signal arrives.
//!
//! Ported from `cmd/revocation-server/server.go`'s `main`: same flags, same
//! route table, same two-step shutdown (sequencer told to stop first, then
//! the HTTP server gets a bounded window for in-flight requests).

mod cli;
mod error;
mod handlers;
mod state;

use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use revocation_crypto::pem_loader;
use revocation_merkle_tree::SparseMerkleTree;
use revocation_types::{parse_mmd, Config};

use crate::state::AppState;

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = cli::Args::parse();
    tracing::info!("Starting revocation server.");

    let cfg = Config {
        max_certs: args.max_certs,
        key_path: args.key.clone(),
        cert_path: args.cert_file.clone(),
        mmd: args.mmd.clone(),
    };
    let mmd = cfg.validated_mmd().context("invalid configuration")?;
    let addr = args.socket_addr().context("invalid --listen address")?;

    let signing_key = pem_loader::load_signing_key(Path::new(&cfg.key_path))
        .with_context(|| format!("failed to load signing key from {}", cfg.key_path))?;
    // Loaded to validate the CLI contract (`--cert_file` must name a valid
    // issuer certificate); nothing in the current route set reads it, since
    // `GetOcsp` echoes the request's own `CertID` back rather than
    // re-deriving one from this certificate (see DESIGN.md).
    pem_loader::load_issuer_certificate(Path::new(&cfg.cert_path))
        .with_context(|| format!("failed to load issuer certificate from {}", cfg.cert_path))?;

    let signer = revocation_crypto::Signer::new(0, signing_key);
    let tree = Arc::new(
        SparseMerkleTree::new(cfg.max_certs, mmd, signer)
            .context("failed to initialize merkle tree")?,
    );

    tracing::info!("Setting up handlers");
    let app = handlers::routes()
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(AppState { tree: tree.clone() });

    tracing::info!("Starting sequencer");
    let (stop_tx, stop_rx) = mpsc::channel();
    let sequencer_tree = tree.clone();
    let sequencer_handle = std::thread::spawn(move || {
        revocation_merkle_tree::sequencer::run(&sequencer_tree, mmd, stop_rx);
    });
    tracing::info!("Sequencer started");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
    let server_task = tokio::spawn(server);

    tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
    tracing::info!("Received stop signal");

    // Tell the sequencer to stop before the HTTP server, matching
    // `cmd/revocation-server/server.go`'s shutdown ordering: pending queue
    // entries are dropped, not flushed (see sequencer module docs).
    let _ = stop_tx.send(());
    let _ = shutdown_tx.send(());

    if tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, server_task).await.is_err() {
        tracing::warn!("HTTP server did not shut down within the grace period");
    }
    let _ = sequencer_handle.join();

    tracing::info!("Graceful shutdown");
    Ok(())
}
