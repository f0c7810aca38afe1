//! Concurrency back-end adapters.
//!
//! One canonical resolution (the [`Resolve`] future) exposed in the three
//! calling conventions the embedder may be built around: a producer stream
//! with an explicit lifetime, a single-shot promise, and plain structured
//! async. The adapters are thin on purpose; none of them re-implements any
//! parsing or validation.
//!
//! Guarantees, identical across back-ends:
//! - exactly one terminal event per resolution attempt;
//! - no event is delivered after cancellation (dropping the stream or the
//!   promise aborts the spawned work).

use crate::base::address::DomainName;
use crate::base::error::DnsError;
use crate::base::settings::ConcurrencyBackend;
use crate::dns::resolve::Resolve;
use futures::{Stream, StreamExt};
use std::{net::IpAddr, pin::Pin, sync::Arc};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Aborts the spawned resolution when the owning adapter goes away.
#[derive(Debug)]
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Single-shot resolution promise.
///
/// Backed by a spawned task and a oneshot channel. Dropping the promise
/// cancels the task; a cancelled promise observed via [`wait`] yields
/// [`DnsError::Cancelled`].
///
/// [`wait`]: ResolutionPromise::wait
#[derive(Debug)]
pub struct ResolutionPromise {
    rx: oneshot::Receiver<Result<IpAddr, DnsError>>,
    _task: AbortOnDrop,
}

impl ResolutionPromise {
    /// Await the terminal event.
    pub async fn wait(self) -> Result<IpAddr, DnsError> {
        match self.rx.await {
            Ok(result) => result,
            // Sender dropped without a send: the task was aborted.
            Err(_) => Err(DnsError::Cancelled),
        }
    }
}

/// Start a resolution in promise form.
pub fn promise(resolver: Arc<dyn Resolve>, name: DomainName) -> ResolutionPromise {
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let result = resolver.resolve(name).await;
        // Receiver gone means the promise was dropped; nothing to deliver.
        let _ = tx.send(result);
    });
    ResolutionPromise {
        rx,
        _task: AbortOnDrop(handle),
    }
}

/// Alias for the producer-stream form of a resolution.
pub type ResolutionStream = Pin<Box<dyn Stream<Item = Result<IpAddr, DnsError>> + Send>>;

/// Start a resolution in stream form: exactly one terminal item, then end.
/// Dropping the stream before the item arrives cancels the work.
pub fn stream(resolver: Arc<dyn Resolve>, name: DomainName) -> ResolutionStream {
    Box::pin(futures::stream::once(promise(resolver, name).wait()))
}

/// Drive one resolution through the selected back-end.
///
/// This is the coordinator's entry point; the flag only changes plumbing,
/// never outcomes.
pub async fn resolve_via(
    backend: ConcurrencyBackend,
    resolver: Arc<dyn Resolve>,
    name: DomainName,
) -> Result<IpAddr, DnsError> {
    match backend {
        ConcurrencyBackend::Task => resolver.resolve(name).await,
        ConcurrencyBackend::Future => promise(resolver, name).wait().await,
        ConcurrencyBackend::Stream => match stream(resolver, name).next().await {
            Some(result) => result,
            None => Err(DnsError::Cancelled),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::resolve::Resolving;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicBool, Ordering};

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34));

    struct FixedResolver {
        response: Result<IpAddr, DnsError>,
        completed: Arc<AtomicBool>,
    }

    impl FixedResolver {
        fn ok() -> (Arc<Self>, Arc<AtomicBool>) {
            let completed = Arc::new(AtomicBool::new(false));
            (
                Arc::new(Self {
                    response: Ok(IP),
                    completed: completed.clone(),
                }),
                completed,
            )
        }
    }

    impl Resolve for FixedResolver {
        fn resolve(&self, _name: DomainName) -> Resolving {
            let response = self.response.clone();
            let completed = self.completed.clone();
            Box::pin(async move {
                completed.store(true, Ordering::SeqCst);
                response
            })
        }
    }

    fn name() -> DomainName {
        DomainName::new("example.com").unwrap()
    }

    #[tokio::test]
    async fn test_all_backends_agree_on_success() {
        for backend in [
            ConcurrencyBackend::Task,
            ConcurrencyBackend::Future,
            ConcurrencyBackend::Stream,
        ] {
            let (resolver, _) = FixedResolver::ok();
            let ip = resolve_via(backend, resolver, name()).await.unwrap();
            assert_eq!(ip, IP);
        }
    }

    #[tokio::test]
    async fn test_all_backends_agree_on_failure() {
        for backend in [
            ConcurrencyBackend::Task,
            ConcurrencyBackend::Future,
            ConcurrencyBackend::Stream,
        ] {
            let resolver = Arc::new(FixedResolver {
                response: Err(DnsError::EmptyAnswers),
                completed: Arc::new(AtomicBool::new(false)),
            });
            let err = resolve_via(backend, resolver, name()).await.unwrap_err();
            assert_eq!(err, DnsError::EmptyAnswers);
        }
    }

    #[tokio::test]
    async fn test_dropped_promise_never_completes() {
        let (resolver, completed) = FixedResolver::ok();
        let pending = promise(resolver, name());
        // Drop before the current-thread executor ever polls the task.
        drop(pending);
        tokio::task::yield_now().await;
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropped_stream_never_completes() {
        let (resolver, completed) = FixedResolver::ok();
        let pending = stream(resolver, name());
        drop(pending);
        tokio::task::yield_now().await;
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_stream_yields_exactly_one_item() {
        let (resolver, _) = FixedResolver::ok();
        let mut events = stream(resolver, name());
        assert!(events.next().await.is_some());
        assert!(events.next().await.is_none());
    }
}
