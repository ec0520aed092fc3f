// ── Reactive slot streams ──
//
// Subscription handles for values held by the AppStore.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to one store value.
///
/// Provides point-in-time access plus change notification via
/// [`changed()`](Self::changed) or by converting to a `Stream`.
pub struct SlotStream<T: Clone + Send + Sync + 'static> {
    current: T,
    receiver: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> SlotStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<T>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The value captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The latest value (may have changed since creation).
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new value.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        let value = self.receiver.borrow_and_update().clone();
        self.current = value.clone();
        Some(value)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current value first, then every change.
    pub fn into_stream(self) -> SlotWatchStream<T> {
        SlotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }

    /// Like [`into_stream`](Self::into_stream), but only yields values set
    /// after this subscription was created.
    pub fn into_changes(self) -> SlotWatchStream<T> {
        SlotWatchStream {
            inner: WatchStream::from_changes(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SlotWatchStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SlotWatchStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::store::AppStore;

    #[tokio::test]
    async fn stream_starts_with_current_value() {
        let store = AppStore::new();
        store.update_search_params(|p| p.adults = 2);

        let mut stream = store.subscribe_search_params().into_stream();
        assert_eq!(stream.next().await.unwrap().adults, 2);

        store.update_search_params(|p| p.adults = 3);
        assert_eq!(stream.next().await.unwrap().adults, 3);
    }

    #[tokio::test]
    async fn changes_skip_value_at_subscribe_time() {
        let store = AppStore::new();
        let mut changes = store.subscribe_search_params().into_changes();

        store.update_search_params(|p| p.adults = 4);
        assert_eq!(changes.next().await.unwrap().adults, 4);
    }
}
