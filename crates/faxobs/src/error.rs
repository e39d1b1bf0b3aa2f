//! Error types for the FaxObs client and server

use crate::transport::TransportError;
use crate::Status;
use faxobs_ndr::NdrError;
use thiserror::Error;

/// Fault code for requests to an unknown or unimplemented opnum (nca_s_op_rng_error)
pub const FAULT_OP_RNG_ERROR: u32 = 0x1c01_0002;

/// Fault code for stub data that failed to decode (RPC_X_BAD_STUB_DATA)
pub const FAULT_BAD_STUB_DATA: u32 = 0x0000_06f7;

/// Errors returned to a client caller
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("codec error: {0}")]
    Codec(#[from] NdrError),

    /// Nonzero status, produced only by `Reply::check`
    #[error("{operation} returned {status}")]
    Status { operation: &'static str, status: Status },
}

/// Errors raised by a server implementation
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("fault: status 0x{0:08x}")]
    Fault(u32),
}

/// Errors raised while dispatching a request frame
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown opnum: {0}")]
    UnknownOpnum(u16),

    #[error("codec error: {0}")]
    Codec(#[from] NdrError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

impl DispatchError {
    /// Fault status reported to the caller in place of a response
    pub fn fault_status(&self) -> u32 {
        match self {
            DispatchError::UnknownOpnum(_) | DispatchError::Server(ServerError::NotImplemented(_)) => {
                FAULT_OP_RNG_ERROR
            }
            DispatchError::Codec(_) => FAULT_BAD_STUB_DATA,
            DispatchError::Server(ServerError::Fault(status)) => *status,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
