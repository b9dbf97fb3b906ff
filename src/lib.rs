//! # ferrous-dispose
//!
//! Scoped aggregation of synchronous and asynchronous cleanup actions behind one disposal handle.
//!
//! ## Features
//!
//! - **One exit path**: register any number of independent cleanup obligations, trigger them all at once
//! - **Heterogeneous entries**: bare callbacks, future-returning callbacks, and capability-bearing objects
//! - **Execution-time normalization**: entries are stored raw and resolved when a pass reaches them
//! - **Registration order**: entries run in the order they were added, sequentially, never concurrently
//! - **Live set**: in-flight actions may add or remove entries and the running pass observes it
//! - **Fail-fast**: the first failing action aborts the pass and its error propagates unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_dispose::DisposalController;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! let controller = DisposalController::new();
//!
//! // Register a cleanup callback.
//! let closed = Arc::new(AtomicBool::new(false));
//! let flag = closed.clone();
//! controller.add_callback(move || flag.store(true, Ordering::Release));
//!
//! // Trigger every registered cleanup synchronously.
//! controller.dispose().unwrap();
//! assert!(closed.load(Ordering::Acquire));
//! assert!(controller.disposed());
//! ```
//!
//! ## Disposal Entries
//!
//! An entry is either a zero-argument callable or an object exposing dispose
//! capabilities through [`Dispose`], [`AsyncDispose`], both, or the per-pass
//! probe [`DynamicDispose`]. Entries have identity: clones of one entry
//! collapse to a single registration, and the entry value doubles as the
//! removal token.
//!
//! ```rust
//! use ferrous_dispose::{Dispose, DisposalController, DisposeResult};
//! use std::sync::Arc;
//!
//! struct TempDir {
//!     path: String,
//! }
//!
//! impl Dispose for TempDir {
//!     fn dispose(&self) -> DisposeResult<()> {
//!         println!("removing {}", self.path);
//!         Ok(())
//!     }
//! }
//!
//! let controller = DisposalController::new();
//! let entry = controller.add_disposable(Arc::new(TempDir { path: "/tmp/job-7".into() }));
//!
//! // Torn down manually instead? Opt the entry out of the batch.
//! controller.delete(&entry);
//! controller.dispose().unwrap();
//! ```
//!
//! ## Asynchronous Disposal
//!
//! The asynchronous trigger awaits each action to completion before starting
//! the next, so ordering-dependent teardown stays safe. The synchronous
//! trigger never awaits: an async-only action is started and handed to the
//! ambient tokio runtime, best effort.
//!
//! ```rust
//! use ferrous_dispose::{AsyncDispose, DisposalController, DisposeResult};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Connection {
//!     peer: String,
//! }
//!
//! #[async_trait]
//! impl AsyncDispose for Connection {
//!     async fn dispose(&self) -> DisposeResult<()> {
//!         println!("draining {}", self.peer);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() {
//! let controller = DisposalController::new();
//! controller.add_async_disposable(Arc::new(Connection { peer: "db-1".into() }));
//! controller.dispose_async().await.unwrap();
//! # }
//! ```
//!
//! ## Scope Exit
//!
//! Dropping a controller runs the synchronous trigger over whatever the set
//! still holds, so a block-scoped controller is a scoped-acquisition handle:
//!
//! ```rust
//! use ferrous_dispose::DisposalController;
//!
//! {
//!     let controller = DisposalController::new();
//!     controller.add_callback(|| println!("cancelling timers"));
//! } // cleanups run here
//! ```

// Module declarations
pub mod controller;
pub mod entry;
pub mod error;
pub mod traits;

// Re-export core types
pub use controller::DisposalController;
pub use entry::{AsyncCallbackFn, BoxDisposeFuture, CallbackFn, DisposalEntry};
pub use error::{BoxError, DisposeError, DisposeResult};
pub use traits::{AsyncDispose, Dispose, DualDispose, DynamicDispose};
