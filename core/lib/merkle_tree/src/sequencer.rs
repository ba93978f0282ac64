//! The sequencer loop: wake every MMD, drain the queue into the tree, sign a
//! new root. Ported from `sequencer.Run` (the caller passed a `chan bool` to
//! request shutdown; here that's a `mpsc::Receiver<()>` whose `recv_timeout`
//! does double duty as both the MMD sleep and the stop signal).
//!
//! The tree is the sole writer of its own structure, so this loop only needs
//! a shared reference — no `&mut` is required anywhere in this crate.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::tree::SparseMerkleTree;

/// Runs until `stop` receives a message or its sending half is dropped. Exits
/// cleanly without a final integration pass: any serials enqueued after the
/// last tick are left in the queue and dropped with the process. This is
/// deliberate, not an oversight — a clean shutdown never blocks on draining
/// the queue.
pub fn run(tree: &SparseMerkleTree, mmd: Duration, stop: Receiver<()>) {
    loop {
        match stop.recv_timeout(mmd) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::info!("sequencer stopping; pending queue entries are not integrated");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Err(e) = tree.integrate_queue() {
                    tracing::warn!(error = %e, "integration pass aborted, retrying next tick");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use revocation_crypto::{Signer, SigningKey};
    use std::sync::mpsc;
    use std::thread;

    fn signer() -> Signer {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        Signer::new(0, SigningKey::EcdsaP256(Box::new(key)))
    }

    #[test]
    fn integrates_at_least_once_before_stopping() {
        let tree = SparseMerkleTree::new(7, Duration::from_millis(5), signer()).unwrap();
        tree.add_node(5).unwrap();

        let (stop_tx, stop_rx) = mpsc::channel();
        thread::scope(|s| {
            s.spawn(|| run(&tree, Duration::from_millis(5), stop_rx));
            thread::sleep(Duration::from_millis(50));
            stop_tx.send(()).unwrap();
        });

        assert!(tree.get_revocation_value(5));
    }
}
