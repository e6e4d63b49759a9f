//! State containers.
//!
//! Each store owns one [`Dispatcher`]: a `watch` channel holding the current
//! snapshot plus a per-store operation lock. Every state change is an action
//! reduced into a fresh snapshot under the channel's write lock, and every
//! applied action wakes all subscribers.

use tokio::sync::{watch, Mutex, MutexGuard};

pub mod resume;
pub mod session;

pub use resume::{ResumeAction, ResumeState, ResumeStore};
pub use session::{SessionAction, SessionState, SessionStore};

/// A state snapshot that knows how to apply its own action vocabulary.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Action: Send;

    fn reduce(&self, action: Self::Action) -> Self;
}

pub(crate) struct Dispatcher<S: Reducer> {
    tx: watch::Sender<S>,
    op_lock: Mutex<()>,
}

impl<S: Reducer> Dispatcher<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            op_lock: Mutex::new(()),
        }
    }

    pub(crate) fn dispatch(&self, action: S::Action) {
        self.tx.send_modify(|state| *state = state.reduce(action));
    }

    pub(crate) fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Waits for the store's previous operation to settle. Held until the
    /// operation has applied its terminal transition.
    pub(crate) async fn begin(&self) -> MutexGuard<'_, ()> {
        self.op_lock.lock().await
    }

    /// Dispatches `start` now and `finish` when the returned guard drops, so
    /// the finishing transition runs on success, on error and if the
    /// operation's future is dropped before completing.
    pub(crate) fn bracket(&self, start: S::Action, finish: S::Action) -> Bracket<'_, S> {
        self.dispatch(start);
        Bracket {
            dispatcher: self,
            finish: Some(finish),
        }
    }
}

pub(crate) struct Bracket<'a, S: Reducer> {
    dispatcher: &'a Dispatcher<S>,
    finish: Option<S::Action>,
}

impl<S: Reducer> Drop for Bracket<'_, S> {
    fn drop(&mut self) {
        if let Some(action) = self.finish.take() {
            self.dispatcher.dispatch(action);
        }
    }
}
