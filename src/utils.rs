//! Small helpers shared by the library and the binaries.
//!

use std::string::FromUtf8Error;

use bytes::Bytes;
use tracing_subscriber::EnvFilter;

/// Read an entire [`Bytes`] buffer into a [`String`].
///
/// Returns an error if the buffer contains invalid UTF-8.
pub fn string_from_bytes(buf: Bytes) -> Result<String, FromUtf8Error> {
    String::from_utf8(buf.into())
}

/// Installs the global `tracing` subscriber.
///
/// Honors `RUST_LOG` and logs at `info` when it is unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        assert_eq!(string_from_bytes(Bytes::from("héllo")).unwrap(), "héllo");
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(string_from_bytes(Bytes::from_static(&[0xff, 0xfe])).is_err());
    }
}
