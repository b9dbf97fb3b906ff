//! Error types for the disposal controller.

use std::error::Error;
use std::fmt;

/// Boxed error source produced by a failing cleanup action.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Failure reported by a registered cleanup action.
///
/// The controller never fabricates these on its own: every `DisposeError`
/// surfacing from a trigger wraps, unchanged, the error some registered action
/// returned. The first failing action aborts the remaining iteration and its
/// error propagates directly to the trigger's caller; nothing is caught,
/// retried, or logged along the way.
///
/// # Examples
///
/// ```rust
/// use ferrous_dispose::{DisposalController, DisposalEntry, DisposeError};
///
/// let controller = DisposalController::new();
/// controller.add(DisposalEntry::try_callback(|| Err(DisposeError::msg("socket already closed"))));
///
/// let err = controller.dispose().unwrap_err();
/// assert_eq!(err.to_string(), "disposal action failed: socket already closed");
/// ```
#[derive(Debug)]
pub struct DisposeError {
    source: BoxError,
}

impl DisposeError {
    /// Wraps an action's error source.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Creates an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            source: message.into().into(),
        }
    }

    /// Borrows the underlying source.
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Consumes the error, returning the action's original source.
    pub fn into_source(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "disposal action failed: {}", self.source)
    }
}

impl Error for DisposeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let source: &(dyn Error + 'static) = self.source.as_ref();
        Some(source)
    }
}

/// Result type for disposal operations
///
/// A convenience type alias for `Result<T, DisposeError>` used throughout
/// ferrous-dispose, both by the trigger operations and by the cleanup actions
/// they invoke.
///
/// # Examples
///
/// ```rust
/// use ferrous_dispose::{DisposeError, DisposeResult};
///
/// fn release_handle(open: bool) -> DisposeResult<()> {
///     if open {
///         Ok(())
///     } else {
///         Err(DisposeError::msg("handle already released"))
///     }
/// }
///
/// assert!(release_handle(true).is_ok());
/// assert!(release_handle(false).is_err());
/// ```
pub type DisposeResult<T> = Result<T, DisposeError>;
