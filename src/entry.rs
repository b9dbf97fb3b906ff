//! Disposal entries and their execution-time normalization.
//!
//! Entries are stored in the shape the caller handed in; nothing is converted
//! at registration time. Each disposal pass resolves every entry it reaches to
//! a zero-argument action, so capability changes between passes are observed.

use std::fmt;
use std::future::Future;
use std::mem::{self, Discriminant};
use std::pin::Pin;
use std::sync::Arc;

use crate::error::DisposeResult;
use crate::traits::{AsyncDispose, Dispose, DualDispose, DynamicDispose};

/// Future type for asynchronous disposal actions.
pub type BoxDisposeFuture = Pin<Box<dyn Future<Output = DisposeResult<()>> + Send>>;

/// Shape of a registered synchronous callback.
pub type CallbackFn = dyn Fn() -> DisposeResult<()> + Send + Sync;

/// Shape of a registered callback producing a cleanup future.
pub type AsyncCallbackFn = dyn Fn() -> BoxDisposeFuture + Send + Sync;

/// A registered cleanup obligation.
///
/// An entry is either a bare callback (plain or future-returning) or an object
/// carrying dispose capabilities. Entries have *identity*: the allocation
/// behind the `Arc` handle plus the registration shape. Clones share identity,
/// so the value returned by the `add_*` helpers (or a clone kept at
/// construction) is the token for [`delete`](crate::DisposalController::delete)
/// and for the controller's duplicate collapsing.
///
/// Equality compares identity, never structure: two separately-built callbacks
/// with identical bodies are distinct entries.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{DisposalController, DisposalEntry};
///
/// let entry = DisposalEntry::callback(|| println!("closing"));
/// let controller = DisposalController::new();
///
/// controller.add(entry.clone());
/// controller.add(entry.clone()); // same identity, collapses to one
/// assert_eq!(controller.len(), 1);
///
/// assert!(controller.delete(&entry));
/// assert!(controller.is_empty());
/// ```
#[derive(Clone)]
pub enum DisposalEntry {
    /// Zero-argument cleanup callback.
    Callback(Arc<CallbackFn>),
    /// Zero-argument callback producing a cleanup future.
    AsyncCallback(Arc<AsyncCallbackFn>),
    /// Object with a synchronous dispose capability.
    Disposable(Arc<dyn Dispose>),
    /// Object with an asynchronous dispose capability.
    AsyncDisposable(Arc<dyn AsyncDispose>),
    /// Object with both capabilities; the trigger kind selects which one runs.
    DualDisposable(Arc<dyn DualDispose>),
    /// Object whose capabilities are probed again at every pass.
    Dynamic(Arc<dyn DynamicDispose>),
}

impl DisposalEntry {
    /// Wraps an infallible cleanup closure.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        DisposalEntry::Callback(Arc::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wraps a fallible cleanup closure.
    pub fn try_callback<F>(f: F) -> Self
    where
        F: Fn() -> DisposeResult<()> + Send + Sync + 'static,
    {
        DisposalEntry::Callback(Arc::new(f))
    }

    /// Wraps an infallible asynchronous cleanup closure.
    pub fn async_callback<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        DisposalEntry::AsyncCallback(Arc::new(move || {
            let fut = f();
            let boxed: BoxDisposeFuture = Box::pin(async move {
                fut.await;
                Ok(())
            });
            boxed
        }))
    }

    /// Wraps a fallible asynchronous cleanup closure.
    pub fn try_async_callback<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DisposeResult<()>> + Send + 'static,
    {
        DisposalEntry::AsyncCallback(Arc::new(move || {
            let boxed: BoxDisposeFuture = Box::pin(f());
            boxed
        }))
    }

    /// Registers an object through its synchronous dispose capability.
    pub fn disposable(object: Arc<dyn Dispose>) -> Self {
        DisposalEntry::Disposable(object)
    }

    /// Registers an object through its asynchronous dispose capability.
    pub fn async_disposable(object: Arc<dyn AsyncDispose>) -> Self {
        DisposalEntry::AsyncDisposable(object)
    }

    /// Registers an object through both capabilities at once.
    pub fn dual_disposable(object: Arc<dyn DualDispose>) -> Self {
        DisposalEntry::DualDisposable(object)
    }

    /// Registers an object through the per-pass capability probe.
    pub fn dynamic(object: Arc<dyn DynamicDispose>) -> Self {
        DisposalEntry::Dynamic(object)
    }

    pub(crate) fn id(&self) -> EntryId {
        let addr = match self {
            DisposalEntry::Callback(f) => Arc::as_ptr(f) as *const () as usize,
            DisposalEntry::AsyncCallback(f) => Arc::as_ptr(f) as *const () as usize,
            DisposalEntry::Disposable(d) => Arc::as_ptr(d) as *const () as usize,
            DisposalEntry::AsyncDisposable(d) => Arc::as_ptr(d) as *const () as usize,
            DisposalEntry::DualDisposable(d) => Arc::as_ptr(d) as *const () as usize,
            DisposalEntry::Dynamic(d) => Arc::as_ptr(d) as *const () as usize,
        };
        EntryId(mem::discriminant(self), addr)
    }

    fn shape(&self) -> &'static str {
        match self {
            DisposalEntry::Callback(_) => "Callback",
            DisposalEntry::AsyncCallback(_) => "AsyncCallback",
            DisposalEntry::Disposable(_) => "Disposable",
            DisposalEntry::AsyncDisposable(_) => "AsyncDisposable",
            DisposalEntry::DualDisposable(_) => "DualDisposable",
            DisposalEntry::Dynamic(_) => "Dynamic",
        }
    }

    /// Normalizes this entry for the synchronous trigger.
    ///
    /// Priority order: callable, then the synchronous capability, then the
    /// asynchronous capability (started, never awaited), then no action.
    pub(crate) fn resolve_sync(&self) -> Action {
        match self {
            DisposalEntry::Callback(f) => {
                let f = f.clone();
                Action::Invoke(Box::new(move || (*f)()))
            }
            DisposalEntry::AsyncCallback(f) => Action::Await((**f)()),
            DisposalEntry::Disposable(d) => {
                let d = d.clone();
                Action::Invoke(Box::new(move || d.dispose()))
            }
            DisposalEntry::AsyncDisposable(d) => {
                let d = d.clone();
                Action::Await(Box::pin(async move { d.dispose().await }))
            }
            DisposalEntry::DualDisposable(d) => {
                let d = d.clone();
                Action::Invoke(Box::new(move || Dispose::dispose(d.as_ref())))
            }
            DisposalEntry::Dynamic(d) => {
                if d.sync_capability().is_some() {
                    let d = d.clone();
                    Action::Invoke(Box::new(move || match d.sync_capability() {
                        Some(capability) => capability.dispose(),
                        None => Ok(()),
                    }))
                } else if d.async_capability().is_some() {
                    let d = d.clone();
                    Action::Await(Box::pin(async move {
                        match d.async_capability() {
                            Some(capability) => capability.dispose().await,
                            None => Ok(()),
                        }
                    }))
                } else {
                    Action::Skip
                }
            }
        }
    }

    /// Normalizes this entry for the asynchronous trigger.
    ///
    /// Mirror of [`resolve_sync`](Self::resolve_sync) with the capability
    /// preference flipped: an object carrying both capabilities contributes
    /// only its asynchronous one here.
    pub(crate) fn resolve_async(&self) -> Action {
        match self {
            DisposalEntry::Callback(f) => {
                let f = f.clone();
                Action::Invoke(Box::new(move || (*f)()))
            }
            DisposalEntry::AsyncCallback(f) => Action::Await((**f)()),
            DisposalEntry::Disposable(d) => {
                let d = d.clone();
                Action::Invoke(Box::new(move || d.dispose()))
            }
            DisposalEntry::AsyncDisposable(d) => {
                let d = d.clone();
                Action::Await(Box::pin(async move { d.dispose().await }))
            }
            DisposalEntry::DualDisposable(d) => {
                let d = d.clone();
                Action::Await(Box::pin(
                    async move { AsyncDispose::dispose(d.as_ref()).await },
                ))
            }
            DisposalEntry::Dynamic(d) => {
                if d.async_capability().is_some() {
                    let d = d.clone();
                    Action::Await(Box::pin(async move {
                        match d.async_capability() {
                            Some(capability) => capability.dispose().await,
                            None => Ok(()),
                        }
                    }))
                } else if d.sync_capability().is_some() {
                    let d = d.clone();
                    Action::Invoke(Box::new(move || match d.sync_capability() {
                        Some(capability) => capability.dispose(),
                        None => Ok(()),
                    }))
                } else {
                    Action::Skip
                }
            }
        }
    }
}

impl PartialEq for DisposalEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for DisposalEntry {}

impl fmt::Debug for DisposalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let EntryId(_, addr) = self.id();
        write!(f, "DisposalEntry::{}({:#x})", self.shape(), addr)
    }
}

/// Identity of a registered entry: allocation address plus shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EntryId(Discriminant<DisposalEntry>, usize);

/// A disposal entry resolved to an invocable zero-argument action.
pub(crate) enum Action {
    /// Invoke on the calling thread.
    Invoke(Box<dyn FnOnce() -> DisposeResult<()> + Send>),
    /// Drive a future: awaited by the asynchronous trigger, started without
    /// awaiting by the synchronous one.
    Await(BoxDisposeFuture),
    /// No live capability; the entry is a no-op this pass.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let entry = DisposalEntry::callback(|| {});
        let clone = entry.clone();
        assert_eq!(entry, clone);
        assert_eq!(entry.id(), clone.id());
    }

    #[test]
    fn separate_entries_are_distinct() {
        let a = DisposalEntry::callback(|| {});
        let b = DisposalEntry::callback(|| {});
        assert_ne!(a, b);
    }

    #[test]
    fn debug_names_the_shape() {
        let entry = DisposalEntry::callback(|| {});
        assert!(format!("{:?}", entry).starts_with("DisposalEntry::Callback"));
    }
}
