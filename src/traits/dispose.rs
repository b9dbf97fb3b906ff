//! Disposal capability traits.

use crate::error::DisposeResult;

/// Trait for synchronous resource disposal.
///
/// Implement this trait for resources with structured teardown that completes
/// on the calling thread (e.g., flushing caches, closing file handles). An
/// object registered through this capability is invoked when a disposal pass
/// reaches it; the first `Err` aborts the rest of the pass.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Dispose, DisposalController, DisposeResult};
/// use std::sync::Arc;
///
/// struct Cache {
///     name: String,
/// }
///
/// impl Dispose for Cache {
///     fn dispose(&self) -> DisposeResult<()> {
///         println!("Flushing cache: {}", self.name);
///         Ok(())
///     }
/// }
///
/// let controller = DisposalController::new();
/// controller.add_disposable(Arc::new(Cache { name: "user_cache".to_string() }));
/// controller.dispose().unwrap();
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform synchronous cleanup of resources.
    fn dispose(&self) -> DisposeResult<()>;
}

/// Trait for asynchronous resource disposal.
///
/// Implement this trait for resources that require async teardown (e.g.,
/// graceful connection shutdown, async I/O cleanup). The asynchronous trigger
/// awaits each action to completion before moving to the next entry; the
/// synchronous trigger starts the action without awaiting it.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{AsyncDispose, DisposalController, DisposeResult};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct DatabaseClient {
///     connection_id: String,
/// }
///
/// #[async_trait]
/// impl AsyncDispose for DatabaseClient {
///     async fn dispose(&self) -> DisposeResult<()> {
///         println!("Closing database connection: {}", self.connection_id);
///         Ok(())
///     }
/// }
///
/// # async fn example() {
/// let controller = DisposalController::new();
/// controller.add_async_disposable(Arc::new(DatabaseClient {
///     connection_id: "conn_123".to_string(),
/// }));
/// controller.dispose_async().await.unwrap();
/// # }
/// ```
#[async_trait::async_trait]
pub trait AsyncDispose: Send + Sync + 'static {
    /// Perform asynchronous cleanup of resources.
    async fn dispose(&self) -> DisposeResult<()>;
}

/// Both dispose capabilities on one object.
///
/// Blanket-implemented for every type carrying both [`Dispose`] and
/// [`AsyncDispose`]. An entry registered through this capability never has its
/// capability kind switched: the synchronous trigger invokes only the
/// synchronous capability and the asynchronous trigger only the asynchronous
/// one.
pub trait DualDispose: Dispose + AsyncDispose {}

impl<T: Dispose + AsyncDispose> DualDispose for T {}

/// Capability probe resolved again at every disposal pass.
///
/// This is the lenient, late-bound registration shape: the controller asks the
/// object for its capabilities at the moment it is executed, not when it was
/// registered. An object registered before it carries any capability is a
/// silent no-op until one appears; an object that never produces one stays a
/// no-op, which is deliberate lenience rather than an error. Because the probe
/// runs on every pass, a second trigger sees whatever capabilities the object
/// has by then.
///
/// Both accessors default to `None`; implementors override the ones they can
/// serve.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Dispose, DisposalController, DisposeResult, DynamicDispose};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct LazyHandle {
///     opened: AtomicBool,
/// }
///
/// impl Dispose for LazyHandle {
///     fn dispose(&self) -> DisposeResult<()> {
///         self.opened.store(false, Ordering::Release);
///         Ok(())
///     }
/// }
///
/// impl DynamicDispose for LazyHandle {
///     fn sync_capability(&self) -> Option<&dyn Dispose> {
///         // Nothing to tear down until the handle is opened.
///         if self.opened.load(Ordering::Acquire) {
///             Some(self)
///         } else {
///             None
///         }
///     }
/// }
///
/// let handle = Arc::new(LazyHandle { opened: AtomicBool::new(false) });
/// let controller = DisposalController::new();
/// controller.add_dynamic(handle.clone());
///
/// // Not opened yet: the entry normalizes to a no-op and the pass completes.
/// controller.dispose().unwrap();
/// assert!(controller.disposed());
///
/// // Once opened, the next pass picks the capability up.
/// handle.opened.store(true, Ordering::Release);
/// controller.dispose().unwrap();
/// assert!(!handle.opened.load(Ordering::Acquire));
/// ```
pub trait DynamicDispose: Send + Sync + 'static {
    /// The object's synchronous dispose capability, if it currently has one.
    fn sync_capability(&self) -> Option<&dyn Dispose> {
        None
    }

    /// The object's asynchronous dispose capability, if it currently has one.
    fn async_capability(&self) -> Option<&dyn AsyncDispose> {
        None
    }
}
