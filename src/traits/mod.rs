//! Core traits for the disposal controller.

mod dispose;

pub use dispose::{AsyncDispose, Dispose, DualDispose, DynamicDispose};
