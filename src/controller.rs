//! The disposal controller.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::entry::{Action, BoxDisposeFuture, DisposalEntry, EntryId};
use crate::error::DisposeResult;
use crate::traits::{AsyncDispose, Dispose, DualDispose, DynamicDispose};

/// Aggregates cleanup obligations behind one scoped handle.
///
/// The controller owns an insertion-ordered, duplicate-free set of
/// [`DisposalEntry`] values and runs them all when triggered, either
/// synchronously ([`dispose`](Self::dispose)) or by awaiting each action in
/// turn ([`dispose_async`](Self::dispose_async)). Entries run in registration
/// order; there is no reordering, no priority, and no dependency resolution.
///
/// Dropping the controller runs the synchronous trigger over whatever the set
/// still holds, so a block-scoped controller guarantees its cleanups run at
/// scope exit. The set is never cleared by a trigger: a second trigger (manual
/// or at drop) re-runs every entry still present. A caller that tears a
/// resource down manually opts it out of later passes with
/// [`delete`](Self::delete), preventing a double release. Rust has no
/// asynchronous scope exit, so the asynchronous counterpart of the drop hook is
/// an explicit `dispose_async().await` before the controller leaves scope.
///
/// The controller is a single-use resource only in the sense of its
/// [`disposed`](Self::disposed) flag: the flag flips to `true` once a full pass
/// completes and never resets, but it guards nothing. Registration and
/// further triggers remain valid.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::DisposalController;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// let closed = Arc::new(AtomicBool::new(false));
///
/// {
///     let controller = DisposalController::new();
///     let flag = closed.clone();
///     controller.add_callback(move || flag.store(true, Ordering::Release));
/// } // scope exit runs the synchronous trigger
///
/// assert!(closed.load(Ordering::Acquire));
/// ```
pub struct DisposalController {
    entries: Mutex<Vec<DisposalEntry>>,
    disposed: AtomicBool,
}

impl DisposalController {
    /// Creates an empty controller.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Creates a controller seeded with `entries`, in order.
    ///
    /// Duplicates by identity collapse, exactly as with [`add`](Self::add).
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DisposalEntry>,
    {
        let controller = Self::new();
        for entry in entries {
            controller.add(entry);
        }
        controller
    }

    /// Registers `entry` unless an entry with the same identity is present.
    ///
    /// The entry is stored unchanged; no shape validation happens here.
    /// Whether it produces an action is decided when a disposal pass reaches
    /// it, so an object that grows its capability after registration still
    /// works.
    pub fn add(&self, entry: DisposalEntry) {
        let mut entries = self.entries.lock().unwrap();
        if !entries.iter().any(|existing| *existing == entry) {
            entries.push(entry);
        }
    }

    /// Registers an infallible cleanup closure.
    ///
    /// Returns the entry so the caller can [`delete`](Self::delete) it later.
    pub fn add_callback<F>(&self, f: F) -> DisposalEntry
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.insert(DisposalEntry::callback(f))
    }

    /// Registers an infallible asynchronous cleanup closure.
    pub fn add_async_callback<F, Fut>(&self, f: F) -> DisposalEntry
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.insert(DisposalEntry::async_callback(f))
    }

    /// Registers an object through its synchronous dispose capability.
    pub fn add_disposable<T>(&self, object: Arc<T>) -> DisposalEntry
    where
        T: Dispose,
    {
        self.insert(DisposalEntry::disposable(object))
    }

    /// Registers an object through its asynchronous dispose capability.
    pub fn add_async_disposable<T>(&self, object: Arc<T>) -> DisposalEntry
    where
        T: AsyncDispose,
    {
        self.insert(DisposalEntry::async_disposable(object))
    }

    /// Registers an object carrying both capabilities; the trigger kind picks
    /// which one runs.
    pub fn add_dual_disposable<T>(&self, object: Arc<T>) -> DisposalEntry
    where
        T: DualDispose,
    {
        self.insert(DisposalEntry::dual_disposable(object))
    }

    /// Registers an object through the per-pass capability probe.
    pub fn add_dynamic<T>(&self, object: Arc<T>) -> DisposalEntry
    where
        T: DynamicDispose,
    {
        self.insert(DisposalEntry::dynamic(object))
    }

    fn insert(&self, entry: DisposalEntry) -> DisposalEntry {
        self.add(entry.clone());
        entry
    }

    /// Removes `entry` from the set by identity.
    ///
    /// Returns whether it was present; removing an absent entry is a no-op,
    /// not an error. This is the opt-out for resources the caller has already
    /// torn down manually.
    pub fn delete(&self, entry: &DisposalEntry) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.iter().position(|existing| existing == entry) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `entry` is currently registered.
    pub fn contains(&self, entry: &DisposalEntry) -> bool {
        self.entries.lock().unwrap().iter().any(|e| e == entry)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Whether a full disposal pass has completed.
    ///
    /// `false` at construction, `true` once a synchronous or asynchronous pass
    /// runs to completion, and never reset. A pass aborted by a failing action
    /// leaves the flag unchanged. Purely observable: it does not block
    /// registration or further triggers.
    pub fn disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Runs every registered entry synchronously, in registration order.
    ///
    /// Each entry is normalized when the pass reaches it: a callback is
    /// invoked; an object contributes its synchronous capability if it has
    /// one, otherwise its asynchronous capability is *started* and handed to
    /// the ambient tokio runtime without being awaited (and dropped unstarted
    /// when the calling thread has no runtime). This fire-without-await
    /// behavior is a deliberate asymmetry: a nominally synchronous trigger
    /// never blocks on async work, so neither completion of such actions nor
    /// any error they produce is observable here. Await
    /// [`dispose_async`](Self::dispose_async) instead when that matters.
    ///
    /// Iteration is over the live set: entries removed before their turn are
    /// skipped, and entries added by an in-flight action join the same pass.
    ///
    /// # Errors
    ///
    /// The first failing action aborts the pass; its error propagates and the
    /// remaining entries do not run.
    pub fn dispose(&self) -> DisposeResult<()> {
        let mut visited = HashSet::new();
        while let Some(entry) = self.next_unvisited(&mut visited) {
            match entry.resolve_sync() {
                Action::Invoke(run) => run()?,
                Action::Await(fut) => fire_and_forget(fut),
                Action::Skip => {}
            }
        }
        self.disposed.store(true, Ordering::Release);
        Ok(())
    }

    /// Runs every registered entry, awaiting each action to completion before
    /// the next entry starts.
    ///
    /// Execution is strictly sequential, never concurrent, so cleanups that
    /// depend on ordering (closing a child before its parent) stay safe. An
    /// object carrying both capabilities contributes only its asynchronous one
    /// here. A hung action blocks the returned future indefinitely; wrap
    /// individual actions in timeouts if that is a concern.
    ///
    /// Live-set semantics match [`dispose`](Self::dispose).
    ///
    /// # Errors
    ///
    /// The first failing action aborts the pass; its error propagates and the
    /// remaining entries do not run.
    pub async fn dispose_async(&self) -> DisposeResult<()> {
        let mut visited = HashSet::new();
        while let Some(entry) = self.next_unvisited(&mut visited) {
            match entry.resolve_async() {
                Action::Invoke(run) => run()?,
                Action::Await(fut) => fut.await?,
                Action::Skip => {}
            }
        }
        self.disposed.store(true, Ordering::Release);
        Ok(())
    }

    /// Picks the first entry this pass has not visited, in insertion order.
    ///
    /// The lock is released before the caller executes the entry, so in-flight
    /// actions may add or delete entries without deadlocking.
    fn next_unvisited(&self, visited: &mut HashSet<EntryId>) -> Option<DisposalEntry> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .find(|entry| !visited.contains(&entry.id()))
            .map(|entry| {
                visited.insert(entry.id());
                entry.clone()
            })
    }
}

impl Default for DisposalController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisposalController {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Err(err) = self.dispose() {
            eprintln!("[ferrous-dispose] drop-time disposal failed: {}", err);
        }
    }
}

/// Starts an asynchronous action without waiting for it.
///
/// The future is handed to the tokio runtime of the calling thread when one
/// exists; otherwise it is dropped unstarted. Its outcome is not observable
/// from the synchronous trigger either way.
fn fire_and_forget(fut: BoxDisposeFuture) {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        let _ = handle.spawn(async move {
            let _ = fut.await;
        });
    }
}
