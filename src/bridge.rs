//! # Completion Bridge
//!
//! The registration backend exposes a suspending call; the pipeline's public
//! contract is blocking. This module adapts one to the other: a single-shot
//! future is spawned onto a process-wide runtime and its one completion,
//! success or failure alike, resolves a one-shot channel the calling thread
//! blocks on.

use std::future::Future;
use std::sync::OnceLock;

use anyhow::anyhow;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use crate::error::Error;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// The process-wide runtime registrations are driven on. Built exactly once,
/// before the first registration; subsequent calls return the same runtime.
pub(crate) fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("didgen-registrar")
            .build()
            .expect("runtime should build")
    })
}

/// Run a single-shot suspending operation to completion, blocking the calling
/// thread until its one result arrives.
///
/// The operation's completion resolves the channel exactly once: the sender
/// is consumed by the send, so a second resolution cannot be expressed. A
/// failing operation travels through the channel unchanged and is re-raised
/// with its original cause. There is no timeout and no cancellation.
pub(crate) fn wait<F, T>(operation: F) -> crate::Result<T>
where
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    runtime().spawn(async move {
        let _ = tx.send(operation.await);
    });

    match rx.blocking_recv() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::Registration(e)),
        Err(_) => Err(Error::Registration(anyhow!("registration ended without a result"))),
    }
}
