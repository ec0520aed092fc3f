// ── Watch-backed value slot ──
//
// One value plus push-based change notification. Writes succeed even
// when nobody is subscribed.

use tokio::sync::watch;

use crate::stream::SlotStream;

pub(crate) struct Slot<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Slot<T> {
    pub(crate) fn new(value: T) -> Self {
        let (tx, _) = watch::channel(value);
        Self { tx }
    }

    pub(crate) fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Read through a closure without cloning the whole value.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub(crate) fn subscribe(&self) -> SlotStream<T> {
        SlotStream::new(self.tx.subscribe())
    }
}
