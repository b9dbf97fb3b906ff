/// Unit tests for DisposeError and DisposeResult types
use ferrous_dispose::{DisposeError, DisposeResult};
use std::error::Error;

#[test]
fn test_msg_display() {
    let err = DisposeError::msg("pipe already closed");
    assert_eq!(err.to_string(), "disposal action failed: pipe already closed");
}

#[test]
fn test_wrapped_source_is_preserved() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
    let err = DisposeError::new(io);

    let source = err.source().expect("source present");
    assert!(source.to_string().contains("broken pipe"));
}

#[test]
fn test_get_ref_exposes_source() {
    let err = DisposeError::msg("unreachable peer");
    assert!(err.get_ref().to_string().contains("unreachable peer"));
}

#[test]
fn test_into_source_returns_original_error() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let err = DisposeError::new(io);

    let source = err.into_source();
    let io_back = source.downcast::<std::io::Error>().expect("io error back");
    assert_eq!(io_back.kind(), std::io::ErrorKind::TimedOut);
}

#[test]
fn test_result_alias_round_trip() {
    fn succeeds() -> DisposeResult<u32> {
        Ok(7)
    }

    fn fails() -> DisposeResult<u32> {
        Err(DisposeError::msg("no"))
    }

    assert_eq!(succeeds().unwrap(), 7);
    assert!(fails().is_err());
}

#[test]
fn test_debug_impl_present() {
    let err = DisposeError::msg("x");
    let debug = format!("{:?}", err);
    assert!(debug.contains("DisposeError"));
}
