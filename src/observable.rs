//! Hot, multi-subscriber value cells and the handles that detach observers.
//!
//! An [`Observable`] holds the latest published value (or nothing yet). Any number of
//! observers can watch it; each receives the current value on subscription and every
//! later one. Observers are cheap tokio tasks that stop when their [`Subscription`] is
//! cancelled or dropped, so a torn-down screen never keeps receiving outcomes.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub struct Observable<T> {
    tx: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("has_value", &self.tx.borrow().is_some())
            .field("observers", &self.tx.receiver_count())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// An empty cell.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_value(value: T) -> Self {
        let (tx, _) = watch::channel(Some(value));
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the current value and wakes every observer.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    pub fn get(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    pub fn has_value(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Raw receiver for callers that want to drive the channel themselves.
    pub fn receiver(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }

    /// Resolves with the current value, or the first one published.
    pub async fn wait(&self) -> Option<T> {
        let mut rx = self.tx.subscribe();
        let value = rx.wait_for(Option::is_some).await.ok()?;
        value.clone()
    }

    /// Runs `observer` with the current value (if any) and with every later one, on a
    /// spawned task, until the returned subscription is cancelled or dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn observe<F>(&self, mut observer: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let token = CancellationToken::new();
        let stop = token.clone();
        tokio::spawn(async move {
            loop {
                let current = rx.borrow_and_update().clone();
                if let Some(value) = current {
                    observer(value);
                }
                tokio::select! {
                    _ = stop.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                // a cancellation racing with a publish wins
                if stop.is_cancelled() {
                    break;
                }
            }
        });
        Subscription::new(token)
    }

    /// Runs `observer` once, with the current value or the first one published. The
    /// subscription reports itself cancelled once the observer has run.
    pub fn observe_once<F>(&self, observer: F) -> Subscription
    where
        F: FnOnce(T) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let token = CancellationToken::new();
        let stop = token.clone();
        tokio::spawn(async move {
            let value = tokio::select! {
                _ = stop.cancelled() => None,
                value = rx.wait_for(Option::is_some) => value.ok().and_then(|v| v.clone()),
            };
            if let Some(value) = value {
                if !stop.is_cancelled() {
                    observer(value);
                }
            }
            stop.cancel();
        });
        Subscription::new(token)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running observer. Dropping it detaches the observer.
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately detaches its observer"]
pub struct Subscription {
    token: CancellationToken,
}

impl Subscription {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
