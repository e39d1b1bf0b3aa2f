//! FaxObs RPC interface
//!
//! Client and server stubs for the legacy fax service interface
//! (`ea0a3165-4834-11d2-a6f8-00c04fa346cc`, version 4.0), built on the
//! `faxobs-ndr` marshaling engine.
//!
//! # Example
//!
//! ```
//! use faxobs::{
//!     messages::{ConnectionRefCountRequest, ConnectionRefCountResponse},
//!     ContextHandle, FaxObsClient, FaxObsServer, Loopback, Outcome, Reply, Uuid,
//! };
//!
//! struct Server;
//!
//! impl FaxObsServer for Server {
//!     fn connection_ref_count(&self, _request: ConnectionRefCountRequest) -> Outcome<ConnectionRefCountResponse> {
//!         let handle = ContextHandle::new(0, Uuid::new(1, 2, 3, [4; 8]));
//!         Ok(Reply::ok(ConnectionRefCountResponse { handle, can_share: 0 }))
//!     }
//! }
//!
//! let client = FaxObsClient::new(Loopback::new(Server));
//! let handle = client.connect().unwrap();
//! assert!(!handle.is_empty());
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod operations;
pub mod schema;
pub mod server;
pub mod status;
pub mod transport;
pub mod types;

pub use client::{FaxObsClient, Reply};
pub use error::{ClientError, DispatchError, Result, ServerError, FAULT_BAD_STUB_DATA, FAULT_OP_RNG_ERROR};
pub use operations::Operation;
pub use schema::{lookup, OPERATIONS, RESERVED_OPNUM};
pub use server::{dispatch, dispatch_with, DispatchStats, DispatchStatsSnapshot, FaxObsServer, Loopback, Outcome};
pub use status::Status;
pub use transport::{CallInfo, Transport, TransportError};
pub use types::{Configuration, GlobalRoutingInfo, JobEntry, JobParam, PortInfo, SystemTime, Time};

pub use faxobs_ndr::{ContextHandle, NdrContext, NdrError, SizeWidth, Uuid, ZeroLength};

/// FaxObs interface UUID
pub const FAXOBS_UUID: Uuid = Uuid::new(0xea0a_3165, 0x4834, 0x11d2, [0xa6, 0xf8, 0x00, 0xc0, 0x4f, 0xa3, 0x46, 0xcc]);

/// Interface version (major)
pub const FAXOBS_VERSION_MAJOR: u16 = 4;

/// Interface version (minor)
pub const FAXOBS_VERSION_MINOR: u16 = 0;
