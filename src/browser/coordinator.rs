use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::thread;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::app::{Result, SiteFeedError};

const QUEUE_DEPTH: usize = 100;
const WORKER_THREAD_NAME: &str = "sitefeed-browser";

type Job<S> = Box<dyn for<'s> FnOnce(&'s mut S) -> LocalBoxFuture<'s, ()> + Send>;

fn job<S, F>(f: F) -> Job<S>
where
    F: for<'s> FnOnce(&'s mut S) -> LocalBoxFuture<'s, ()> + Send + 'static,
{
    Box::new(f)
}

/// Handle to the dedicated worker that exclusively owns a resource `S`.
///
/// The worker is an OS thread driving a current-thread tokio runtime. Units
/// of work are queued and executed one at a time, each to completion, with
/// mutable access to `S`. Any number of handles may submit work concurrently.
pub struct Coordinator<S> {
    tx: mpsc::Sender<Job<S>>,
}

impl<S> Clone for Coordinator<S> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<S: 'static> Coordinator<S> {
    /// Spawn the worker and build `S` on it with `init`.
    ///
    /// Blocks until `init` has finished and returns its error if it failed,
    /// in which case the worker has already exited.
    pub fn start<F, Fut>(init: F) -> Result<Self>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<S>>,
    {
        let (tx, mut rx) = mpsc::channel::<Job<S>>(QUEUE_DEPTH);
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<()>>();

        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(SiteFeedError::Io(e)));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let mut state = match init().await {
                        Ok(state) => state,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };
                    let _ = ready_tx.send(Ok(()));
                    info!("Browser worker ready");

                    while let Some(job) = rx.recv().await {
                        job(&mut state).await;
                    }

                    debug!("Browser worker queue closed, shutting down");
                });
            })?;

        ready_rx.recv().map_err(|_| {
            SiteFeedError::Coordinator("Worker thread exited during startup".to_string())
        })??;

        Ok(Self { tx })
    }

    /// Submit `work` and wait for its result without blocking the async caller's thread.
    pub async fn run<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: for<'s> FnOnce(&'s mut S) -> LocalBoxFuture<'s, Result<T>> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(wrap(work, reply_tx))
            .await
            .map_err(|_| worker_gone())?;

        reply_rx.await.map_err(|_| worker_gone())?
    }

    /// Submit `work` from a synchronous context and block the calling thread on the result.
    ///
    /// Must not be called from within an async runtime.
    pub fn run_blocking<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: for<'s> FnOnce(&'s mut S) -> LocalBoxFuture<'s, Result<T>> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .blocking_send(wrap(work, reply_tx))
            .map_err(|_| worker_gone())?;

        reply_rx.blocking_recv().map_err(|_| worker_gone())?
    }
}

fn wrap<S, T, F>(work: F, reply_tx: oneshot::Sender<Result<T>>) -> Job<S>
where
    S: 'static,
    T: Send + 'static,
    F: for<'s> FnOnce(&'s mut S) -> LocalBoxFuture<'s, Result<T>> + Send + 'static,
{
    job(move |state: &mut S| {
        async move {
            let outcome = match AssertUnwindSafe(work(state)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!("Unit of work panicked on the browser worker");
                    Err(SiteFeedError::Coordinator("Unit of work panicked".to_string()))
                }
            };
            // The caller may have gone away; nothing to do then.
            let _ = reply_tx.send(outcome);
        }
        .boxed_local()
    })
}

fn worker_gone() -> SiteFeedError {
    SiteFeedError::Coordinator("Browser worker is not running".to_string())
}
