//! Transport seam
//!
//! The client hands each encoded request frame to a [`Transport`] and gets
//! the response frame back. Binding, authentication, fragmentation and
//! retries all live behind this trait.

use bytes::Bytes;
use thiserror::Error;

/// Identity of the call being carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallInfo {
    pub opnum: u16,
    /// Operation name, used for diagnostics only
    pub name: &'static str,
}

/// Errors reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fault: status 0x{0:08x}")]
    Fault(u32),

    #[error("no response for opnum {0}")]
    NoResponse(u16),

    #[error("connection closed")]
    ConnectionClosed,
}

/// Exchanges one request frame for one response frame
pub trait Transport {
    fn invoke(&self, call: &CallInfo, request: Bytes) -> Result<Bytes, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke(&self, call: &CallInfo, request: Bytes) -> Result<Bytes, TransportError> {
        (**self).invoke(call, request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn invoke(&self, call: &CallInfo, request: Bytes) -> Result<Bytes, TransportError> {
        (**self).invoke(call, request)
    }
}
