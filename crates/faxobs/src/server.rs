//! FaxObs server side
//!
//! [`FaxObsServer`] has one method per operation; every method defaults to
//! [`ServerError::NotImplemented`], so an implementation only overrides what
//! it serves. [`dispatch`] decodes a request frame, routes it by opnum and
//! encodes the reply. [`Loopback`] wraps a server as an in-process
//! [`Transport`].

use crate::client::Reply;
use crate::error::{DispatchError, ServerError};
use crate::operations::{self, Operation};
use crate::schema::RESERVED_OPNUM;
use crate::transport::{CallInfo, Transport, TransportError};
use bytes::Bytes;
use faxobs_ndr::{decode_request, encode_response, FrameMessage, NdrContext};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// What a server method returns
pub type Outcome<R> = std::result::Result<Reply<R>, ServerError>;

/// Decode, call and encode one operation
fn handle<O, F>(ctx: &NdrContext, data: &[u8], call: F) -> Result<Bytes, DispatchError>
where
    O: Operation,
    F: FnOnce(O::Request) -> Outcome<O::Response>,
{
    let schema = O::SCHEMA;
    let values = decode_request(ctx, schema, data)?;
    let request = O::Request::from_values(values.clone())?;
    let reply = call(request)?;
    let bytes = encode_response(
        ctx,
        schema,
        &reply.response.to_values(),
        reply.status.0,
        Some(&values),
    )?;
    Ok(bytes)
}

macro_rules! server_interface {
    ($( $(#[$meta:meta])* $method:ident => $op:ident; )*) => {
        /// Server-side FaxObs interface
        pub trait FaxObsServer {
            $(
                $(#[$meta])*
                fn $method(
                    &self,
                    _request: <operations::$op as Operation>::Request,
                ) -> Outcome<<operations::$op as Operation>::Response> {
                    Err(ServerError::NotImplemented(<operations::$op as Operation>::SCHEMA.name))
                }
            )*
        }

        fn route<S: FaxObsServer + ?Sized>(
            server: &S,
            ctx: &NdrContext,
            opnum: u16,
            data: &[u8],
        ) -> Result<Option<Bytes>, DispatchError> {
            $(
                if opnum == <operations::$op as Operation>::SCHEMA.opnum {
                    return handle::<operations::$op, _>(ctx, data, |request| server.$method(request)).map(Some);
                }
            )*
            if opnum == RESERVED_OPNUM {
                return Ok(None);
            }
            Err(DispatchError::UnknownOpnum(opnum))
        }
    };
}

server_interface! {
    /// Connect (1) or disconnect (0); the reply carries the handle to use
    connection_ref_count => ConnectionRefCount;
    get_version => GetVersion;
    get_install_type => GetInstallType;
    open_port => OpenPort;
    close_port => ClosePort;
    send_document => SendDocument;
    /// The returned name is marshaled with the request's `FileNameSize` capacity
    get_queue_file_name => GetQueueFileName;
    enum_jobs => EnumJobs;
    get_job => GetJob;
    set_job => SetJob;
    get_page_data => GetPageData;
    get_device_status => GetDeviceStatus;
    abort => Abort;
    enum_ports => EnumPorts;
    get_port => GetPort;
    set_port => SetPort;
    enum_routing_methods => EnumRoutingMethods;
    enable_routing_method => EnableRoutingMethod;
    get_routing_info => GetRoutingInfo;
    set_routing_info => SetRoutingInfo;
    enum_global_routing_info => EnumGlobalRoutingInfo;
    set_global_routing_info => SetGlobalRoutingInfo;
    get_configuration => GetConfiguration;
    set_configuration => SetConfiguration;
    get_logging_categories => GetLoggingCategories;
    set_logging_categories => SetLoggingCategories;
    get_tapi_locations => GetTapiLocations;
    set_tapi_locations => SetTapiLocations;
    get_mapi_profiles => GetMapiProfiles;
    start_client_server => StartClientServer;
    get_security_descriptor => GetSecurityDescriptor;
    set_security_descriptor => SetSecurityDescriptor;
    get_security_descriptor_count => GetSecurityDescriptorCount;
    access_check => AccessCheck;
}

/// Dispatch one request frame with the default NDR context
pub fn dispatch<S: FaxObsServer + ?Sized>(server: &S, opnum: u16, data: &[u8]) -> Result<Option<Bytes>, DispatchError> {
    dispatch_with(server, &NdrContext::new(), opnum, data)
}

/// Dispatch one request frame.
///
/// Returns `Ok(None)` for the reserved opnum, which produces no response.
pub fn dispatch_with<S: FaxObsServer + ?Sized>(
    server: &S,
    ctx: &NdrContext,
    opnum: u16,
    data: &[u8],
) -> Result<Option<Bytes>, DispatchError> {
    debug!("Dispatching request: opnum={}, len={}", opnum, data.len());

    let result = route(server, ctx, opnum, data);
    match &result {
        Ok(Some(reply)) => debug!("Sending response: opnum={}, len={}", opnum, reply.len()),
        Ok(None) => debug!("No response for reserved opnum {}", opnum),
        Err(DispatchError::UnknownOpnum(_)) => warn!("Unknown opnum: {}", opnum),
        Err(DispatchError::Server(ServerError::NotImplemented(name))) => {
            warn!("Operation not implemented: opnum={}, name={}", opnum, name)
        }
        Err(e) => debug!("Request failed: opnum={}, error={}", opnum, e),
    }
    result
}

/// Dispatch statistics
#[derive(Debug, Default)]
pub struct DispatchStats {
    pub requests_received: AtomicU64,
    pub requests_processed: AtomicU64,
    pub requests_failed: AtomicU64,
    pub bytes_received: AtomicU64,
    pub bytes_sent: AtomicU64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_processed: self.requests_processed.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatch statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStatsSnapshot {
    pub requests_received: u64,
    pub requests_processed: u64,
    pub requests_failed: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// In-process transport that dispatches straight into a server
///
/// Dispatch failures come back as [`TransportError::Fault`] carrying
/// [`DispatchError::fault_status`]; the reserved opnum comes back as
/// [`TransportError::NoResponse`].
pub struct Loopback<S> {
    server: S,
    ctx: NdrContext,
    stats: Arc<DispatchStats>,
}

impl<S: FaxObsServer> Loopback<S> {
    pub fn new(server: S) -> Self {
        Self::with_context(server, NdrContext::new())
    }

    pub fn with_context(server: S, ctx: NdrContext) -> Self {
        Self {
            server,
            ctx,
            stats: Arc::new(DispatchStats::default()),
        }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn stats(&self) -> &Arc<DispatchStats> {
        &self.stats
    }
}

impl<S: FaxObsServer> Transport for Loopback<S> {
    fn invoke(&self, call: &CallInfo, request: Bytes) -> Result<Bytes, TransportError> {
        self.stats.requests_received.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_received
            .fetch_add(request.len() as u64, Ordering::Relaxed);

        match dispatch_with(&self.server, &self.ctx, call.opnum, &request) {
            Ok(Some(reply)) => {
                self.stats.requests_processed.fetch_add(1, Ordering::Relaxed);
                self.stats.bytes_sent.fetch_add(reply.len() as u64, Ordering::Relaxed);
                Ok(reply)
            }
            Ok(None) => {
                self.stats.requests_processed.fetch_add(1, Ordering::Relaxed);
                Err(TransportError::NoResponse(call.opnum))
            }
            Err(e) => {
                self.stats.requests_failed.fetch_add(1, Ordering::Relaxed);
                Err(TransportError::Fault(e.fault_status()))
            }
        }
    }
}
