//! Operation bindings
//!
//! Each FaxObs operation is a zero-sized marker tying its descriptor to its
//! typed request and response.

use crate::messages::*;
use crate::schema;
use faxobs_ndr::{FrameMessage, OperationSchema, Value, Values};

/// One FaxObs operation
pub trait Operation {
    const SCHEMA: &'static OperationSchema;
    type Request: FrameMessage;
    type Response: FrameMessage;

    /// Adjust request values right before they are encoded
    fn prepare(values: Values) -> Values {
        values
    }
}

/// Fill a zero size field from the length of the buffer it describes
fn fill_buffer_size(mut values: Values, buffer: &'static str, size: &'static str) -> Values {
    let len = match values.get(buffer) {
        Some(Value::Bytes(data)) if !data.is_empty() => data.len(),
        _ => return values,
    };
    if values.get(size) == Some(&Value::U32(0)) {
        values.insert(size, Value::U32(u32::try_from(len).unwrap_or(u32::MAX)));
    }
    values
}

macro_rules! operations {
    ($(
        $(#[$meta:meta])*
        $op:ident = $schema:ident ($req:ty => $resp:ty) $(, fill $buffer:literal in $size:literal)?;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $op;

            impl Operation for $op {
                const SCHEMA: &'static OperationSchema = &schema::$schema;
                type Request = $req;
                type Response = $resp;

                $(
                    fn prepare(values: Values) -> Values {
                        fill_buffer_size(values, $buffer, $size)
                    }
                )?
            }
        )*
    };
}

operations! {
    /// Add or drop a reference on the server connection
    ConnectionRefCount = CONNECTION_REF_COUNT (ConnectionRefCountRequest => ConnectionRefCountResponse);
    GetVersion = GET_VERSION (Empty => GetVersionResponse);
    GetInstallType = GET_INSTALL_TYPE (Empty => GetInstallTypeResponse);
    OpenPort = OPEN_PORT (OpenPortRequest => PortHandle);
    ClosePort = CLOSE_PORT (PortHandle => PortHandle);
    SendDocument = SEND_DOCUMENT (SendDocumentRequest => SendDocumentResponse);
    /// Reserve a file name in the server queue
    GetQueueFileName = GET_QUEUE_FILE_NAME (GetQueueFileNameRequest => GetQueueFileNameResponse);
    EnumJobs = ENUM_JOBS (Buffer => EnumJobsResponse);
    GetJob = GET_JOB (GetJobRequest => Buffer);
    SetJob = SET_JOB (SetJobRequest => Empty);
    GetPageData = GET_PAGE_DATA (GetPageDataRequest => GetPageDataResponse);
    GetDeviceStatus = GET_DEVICE_STATUS (GetDeviceStatusRequest => GetDeviceStatusResponse);
    Abort = ABORT (JobIdRequest => Empty);
    EnumPorts = ENUM_PORTS (PortBuffer => EnumPortsResponse);
    GetPort = GET_PORT (GetPortRequest => PortBuffer);
    SetPort = SET_PORT (SetPortRequest => Empty);
    EnumRoutingMethods = ENUM_ROUTING_METHODS (EnumRoutingMethodsRequest => EnumRoutingMethodsResponse);
    EnableRoutingMethod = ENABLE_ROUTING_METHOD (EnableRoutingMethodRequest => Empty);
    GetRoutingInfo = GET_ROUTING_INFO (RoutingInfoRequest => RoutingInfoBuffer);
    SetRoutingInfo = SET_ROUTING_INFO (RoutingInfoRequest => Empty),
        fill "RoutingInfoBuffer" in "RoutingInfoBufferSize";
    EnumGlobalRoutingInfo = ENUM_GLOBAL_ROUTING_INFO (RoutingInfoBuffer => EnumGlobalRoutingInfoResponse);
    SetGlobalRoutingInfo = SET_GLOBAL_ROUTING_INFO (SetGlobalRoutingInfoRequest => Empty);
    GetConfiguration = GET_CONFIGURATION (Buffer => Buffer);
    SetConfiguration = SET_CONFIGURATION (SetConfigurationRequest => Empty);
    GetLoggingCategories = GET_LOGGING_CATEGORIES (LoggingCategories => LoggingCategories);
    SetLoggingCategories = SET_LOGGING_CATEGORIES (LoggingCategories => Empty),
        fill "Buffer" in "BufferSize";
    GetTapiLocations = GET_TAPI_LOCATIONS (Buffer => Buffer);
    SetTapiLocations = SET_TAPI_LOCATIONS (Buffer => Empty),
        fill "Buffer" in "BufferSize";
    GetMapiProfiles = GET_MAPI_PROFILES (MapiProfiles => MapiProfiles);
    StartClientServer = START_CLIENT_SERVER (StartClientServerRequest => Empty);
    GetSecurityDescriptor = GET_SECURITY_DESCRIPTOR (GetSecurityDescriptorRequest => SecurityDescriptor);
    SetSecurityDescriptor = SET_SECURITY_DESCRIPTOR (SecurityDescriptor => Empty),
        fill "FaxSecurityDescriptor" in "BufferSize";
    GetSecurityDescriptorCount = GET_SECURITY_DESCRIPTOR_COUNT (Empty => GetSecurityDescriptorCountResponse);
    AccessCheck = ACCESS_CHECK (AccessCheckRequest => AccessCheckResponse);
}
