use thiserror::Error;

/// Errors raised by the tree's public operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// `AddNode` with a serial past what the configured height can address.
    /// The request is rejected and the queue is left unchanged.
    #[error("serial {serial} exceeds maximum serial {max_serial} storable by tree; increase max_certs")]
    CapacityError { serial: u64, max_serial: u64 },

    /// The signer failed mid-pass. Node creation and hash recomputation have
    /// already been committed; only the SLR publish step is skipped, so the
    /// tree remains structurally valid and the sequencer may retry at the
    /// next tick.
    #[error("failed to sign new log root")]
    Signing(#[from] revocation_crypto::SigningError),
}
