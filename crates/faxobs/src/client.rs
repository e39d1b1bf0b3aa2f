//! FaxObs client
//!
//! Marshals typed requests, hands the frames to a [`Transport`] and decodes
//! the replies. A nonzero status is returned inside the [`Reply`]; call
//! [`Reply::check`] to turn it into an error.

use crate::error::{ClientError, Result};
use crate::messages::*;
use crate::operations::{self, Operation};
use crate::transport::{CallInfo, Transport};
use crate::Status;
use faxobs_ndr::{decode_response, encode_request, ContextHandle, FrameMessage, NdrContext};
use tracing::debug;

/// A decoded response together with the status that ended it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<R> {
    pub response: R,
    pub status: Status,
}

impl<R> Reply<R> {
    /// Successful reply
    pub fn ok(response: R) -> Self {
        Self {
            response,
            status: Status::SUCCESS,
        }
    }

    pub fn with_status(response: R, status: impl Into<Status>) -> Self {
        Self {
            response,
            status: status.into(),
        }
    }

    /// Return the response, or the status as an error when it is nonzero
    pub fn check(self, operation: &'static str) -> Result<R> {
        if self.status.is_success() {
            Ok(self.response)
        } else {
            Err(ClientError::Status {
                operation,
                status: self.status,
            })
        }
    }
}

/// FaxObs client over any transport
pub struct FaxObsClient<T> {
    transport: T,
    ctx: NdrContext,
}

impl<T: Transport> FaxObsClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_context(transport, NdrContext::new())
    }

    pub fn with_context(transport: T, ctx: NdrContext) -> Self {
        Self { transport, ctx }
    }

    pub fn context(&self) -> &NdrContext {
        &self.ctx
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Make one call
    pub fn call<O: Operation>(&self, request: &O::Request) -> Result<Reply<O::Response>> {
        let schema = O::SCHEMA;
        let values = O::prepare(request.to_values());
        let frame = encode_request(&self.ctx, schema, &values)?;

        debug!("Sending request: opnum={}, name={}, len={}", schema.opnum, schema.name, frame.len());

        let call = CallInfo {
            opnum: schema.opnum,
            name: schema.name,
        };
        let reply = self.transport.invoke(&call, frame)?;

        let (values, status) = decode_response(&self.ctx, schema, &reply)?;
        let status = Status::from(status);
        debug!(
            "Received response: opnum={}, name={}, len={}, status={}",
            schema.opnum,
            schema.name,
            reply.len(),
            status
        );

        Ok(Reply {
            response: O::Response::from_values(values)?,
            status,
        })
    }

    /// Open a connection reference and return the server's handle
    pub fn connect(&self) -> Result<ContextHandle> {
        let request = ConnectionRefCountRequest {
            handle: ContextHandle::EMPTY,
            connect: 1,
        };
        let reply = self
            .connection_ref_count(&request)?
            .check(operations::ConnectionRefCount::SCHEMA.name)?;
        Ok(reply.handle)
    }

    /// Drop a connection reference
    pub fn disconnect(&self, handle: ContextHandle) -> Result<ContextHandle> {
        let request = ConnectionRefCountRequest { handle, connect: 0 };
        let reply = self
            .connection_ref_count(&request)?
            .check(operations::ConnectionRefCount::SCHEMA.name)?;
        Ok(reply.handle)
    }
}

macro_rules! client_methods {
    ($( $(#[$meta:meta])* $method:ident => $op:ident; )*) => {
        impl<T: Transport> FaxObsClient<T> {
            $(
                $(#[$meta])*
                pub fn $method(
                    &self,
                    request: &<operations::$op as Operation>::Request,
                ) -> Result<Reply<<operations::$op as Operation>::Response>> {
                    self.call::<operations::$op>(request)
                }
            )*
        }
    };
}

client_methods! {
    connection_ref_count => ConnectionRefCount;
    get_version => GetVersion;
    get_install_type => GetInstallType;
    open_port => OpenPort;
    close_port => ClosePort;
    send_document => SendDocument;
    /// `file_name_size` sets the capacity of the returned name
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
    /// A zero `routing_info_buffer_size` is filled from the buffer length
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
