//! FaxObs operation descriptors
//!
//! One [`OperationSchema`] per opnum, listing parameters in IDL declaration
//! order. Buffers declared `size_is(,*X)` are double unique pointers; buffers
//! declared `size_is(X)` are single unique pointers. `[string]` names are
//! conformant-varying; structures passed by `const T*` are reference pointers
//! and carry no marker. Opnum 30 is reserved and has no descriptor.

use crate::types::{CONFIGURATION_SCHEMA, GLOBAL_ROUTING_INFO_SCHEMA, JOB_ENTRY_SCHEMA, JOB_PARAM_SCHEMA, PORT_INFO_SCHEMA};
use faxobs_ndr::{Direction, Kind, OperationSchema, Param, SizeIs};

use Direction::{In, InOut, Out};

/// Reserved opnum with no operation
pub const RESERVED_OPNUM: u16 = 30;

const WSTR: Kind = Kind::Unique(&Kind::VaryingWString(SizeIs::Natural));
const BUFFER: Kind = Kind::Unique(&Kind::Unique(&Kind::Bytes(SizeIs::Field("BufferSize"))));
const IN_BUFFER: Kind = Kind::Unique(&Kind::Bytes(SizeIs::Field("BufferSize")));
const ROUTING_BUFFER: Kind = Kind::Unique(&Kind::Unique(&Kind::Bytes(SizeIs::Field("RoutingInfoBufferSize"))));

pub const CONNECTION_REF_COUNT: OperationSchema = OperationSchema {
    opnum: 0,
    name: "/faxobs/v4/FaxObs_ConnectionRefCount",
    params: &[
        Param::new("Handle", InOut, Kind::ContextHandle),
        Param::new("Connect", In, Kind::U32),
        Param::new("CanShare", Out, Kind::U32),
    ],
};

pub const GET_VERSION: OperationSchema = OperationSchema {
    opnum: 1,
    name: "/faxobs/v4/FaxObs_GetVersion",
    params: &[Param::new("Version", Out, Kind::U32)],
};

pub const GET_INSTALL_TYPE: OperationSchema = OperationSchema {
    opnum: 2,
    name: "/faxobs/v4/FaxObs_GetInstallType",
    params: &[
        Param::new("InstallType", Out, Kind::U32),
        Param::new("InstalledPlatforms", Out, Kind::U32),
        Param::new("ProductType", Out, Kind::U32),
    ],
};

pub const OPEN_PORT: OperationSchema = OperationSchema {
    opnum: 3,
    name: "/faxobs/v4/FaxObs_OpenPort",
    params: &[
        Param::new("DeviceId", In, Kind::U32),
        Param::new("Flags", In, Kind::U32),
        Param::new("FaxPortHandle", Out, Kind::ContextHandle),
    ],
};

pub const CLOSE_PORT: OperationSchema = OperationSchema {
    opnum: 4,
    name: "/faxobs/v4/FaxObs_ClosePort",
    params: &[Param::new("FaxPortHandle", InOut, Kind::ContextHandle)],
};

pub const SEND_DOCUMENT: OperationSchema = OperationSchema {
    opnum: 5,
    name: "/faxobs/v4/FaxObs_SendDocument",
    params: &[
        Param::new("FileName", In, WSTR),
        Param::new("JobParams", In, Kind::Ref(&Kind::Struct(&JOB_PARAM_SCHEMA))),
        Param::new("FaxJobId", Out, Kind::U32),
    ],
};

pub const GET_QUEUE_FILE_NAME: OperationSchema = OperationSchema {
    opnum: 6,
    name: "/faxobs/v4/FaxObs_GetQueueFileName",
    params: &[
        Param::new(
            "FileName",
            InOut,
            Kind::Unique(&Kind::WString(SizeIs::Field("FileNameSize"))),
        ),
        Param::new("FileNameSize", In, Kind::U32),
    ],
};

pub const ENUM_JOBS: OperationSchema = OperationSchema {
    opnum: 7,
    name: "/faxobs/v4/FaxObs_EnumJobs",
    params: &[
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
        Param::new("JobsReturned", Out, Kind::U32),
    ],
};

pub const GET_JOB: OperationSchema = OperationSchema {
    opnum: 8,
    name: "/faxobs/v4/FaxObs_GetJob",
    params: &[
        Param::new("JobId", In, Kind::U32),
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const SET_JOB: OperationSchema = OperationSchema {
    opnum: 9,
    name: "/faxobs/v4/FaxObs_SetJob",
    params: &[
        Param::new("JobId", In, Kind::U32),
        Param::new("Command", In, Kind::U32),
        Param::new("JobEntry", In, Kind::Ref(&Kind::Struct(&JOB_ENTRY_SCHEMA))),
    ],
};

pub const GET_PAGE_DATA: OperationSchema = OperationSchema {
    opnum: 10,
    name: "/faxobs/v4/FaxObs_GetPageData",
    params: &[
        Param::new("JobId", In, Kind::U32),
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
        Param::new("ImageWidth", InOut, Kind::U32),
        Param::new("ImageHeight", InOut, Kind::U32),
    ],
};

pub const GET_DEVICE_STATUS: OperationSchema = OperationSchema {
    opnum: 11,
    name: "/faxobs/v4/FaxObs_GetDeviceStatus",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("StatusBuffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const ABORT: OperationSchema = OperationSchema {
    opnum: 12,
    name: "/faxobs/v4/FaxObs_Abort",
    params: &[Param::new("JobId", In, Kind::U32)],
};

pub const ENUM_PORTS: OperationSchema = OperationSchema {
    opnum: 13,
    name: "/faxobs/v4/FaxObs_EnumPorts",
    params: &[
        Param::new("PortBuffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
        Param::new("PortsReturned", Out, Kind::U32),
    ],
};

pub const GET_PORT: OperationSchema = OperationSchema {
    opnum: 14,
    name: "/faxobs/v4/FaxObs_GetPort",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("PortBuffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const SET_PORT: OperationSchema = OperationSchema {
    opnum: 15,
    name: "/faxobs/v4/FaxObs_SetPort",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("PortInfo", In, Kind::Ref(&Kind::Struct(&PORT_INFO_SCHEMA))),
    ],
};

pub const ENUM_ROUTING_METHODS: OperationSchema = OperationSchema {
    opnum: 16,
    name: "/faxobs/v4/FaxObs_EnumRoutingMethods",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("RoutingInfoBuffer", InOut, ROUTING_BUFFER),
        Param::new("RoutingInfoBufferSize", InOut, Kind::U32),
        Param::new("PortsReturned", Out, Kind::U32),
    ],
};

pub const ENABLE_ROUTING_METHOD: OperationSchema = OperationSchema {
    opnum: 17,
    name: "/faxobs/v4/FaxObs_EnableRoutingMethod",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("RoutingGuidString", In, WSTR),
        Param::new("Enabled", In, Kind::Bool),
    ],
};

pub const GET_ROUTING_INFO: OperationSchema = OperationSchema {
    opnum: 18,
    name: "/faxobs/v4/FaxObs_GetRoutingInfo",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("RoutingGuidString", In, WSTR),
        Param::new("RoutingInfoBuffer", InOut, ROUTING_BUFFER),
        Param::new("RoutingInfoBufferSize", InOut, Kind::U32),
    ],
};

pub const SET_ROUTING_INFO: OperationSchema = OperationSchema {
    opnum: 19,
    name: "/faxobs/v4/FaxObs_SetRoutingInfo",
    params: &[
        Param::new("FaxPortHandle", In, Kind::ContextHandle),
        Param::new("RoutingGuidString", In, WSTR),
        Param::new(
            "RoutingInfoBuffer",
            In,
            Kind::Unique(&Kind::Bytes(SizeIs::Field("RoutingInfoBufferSize"))),
        ),
        Param::new("RoutingInfoBufferSize", In, Kind::U32),
    ],
};

pub const ENUM_GLOBAL_ROUTING_INFO: OperationSchema = OperationSchema {
    opnum: 20,
    name: "/faxobs/v4/FaxObs_EnumGlobalRoutingInfo",
    params: &[
        Param::new("RoutingInfoBuffer", InOut, ROUTING_BUFFER),
        Param::new("RoutingInfoBufferSize", InOut, Kind::U32),
        Param::new("MethodsReturned", Out, Kind::U32),
    ],
};

pub const SET_GLOBAL_ROUTING_INFO: OperationSchema = OperationSchema {
    opnum: 21,
    name: "/faxobs/v4/FaxObs_SetGlobalRoutingInfo",
    params: &[Param::new(
        "RoutingInfo",
        In,
        Kind::Ref(&Kind::Struct(&GLOBAL_ROUTING_INFO_SCHEMA)),
    )],
};

pub const GET_CONFIGURATION: OperationSchema = OperationSchema {
    opnum: 22,
    name: "/faxobs/v4/FaxObs_GetConfiguration",
    params: &[
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const SET_CONFIGURATION: OperationSchema = OperationSchema {
    opnum: 23,
    name: "/faxobs/v4/FaxObs_SetConfiguration",
    params: &[Param::new("FaxConfig", In, Kind::Ref(&Kind::Struct(&CONFIGURATION_SCHEMA)))],
};

pub const GET_LOGGING_CATEGORIES: OperationSchema = OperationSchema {
    opnum: 24,
    name: "/faxobs/v4/FaxObs_GetLoggingCategories",
    params: &[
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
        Param::new("NumberCategories", InOut, Kind::U32),
    ],
};

pub const SET_LOGGING_CATEGORIES: OperationSchema = OperationSchema {
    opnum: 25,
    name: "/faxobs/v4/FaxObs_SetLoggingCategories",
    params: &[
        Param::new("Buffer", In, IN_BUFFER),
        Param::new("BufferSize", In, Kind::U32),
        Param::new("NumberCategories", In, Kind::U32),
    ],
};

pub const GET_TAPI_LOCATIONS: OperationSchema = OperationSchema {
    opnum: 26,
    name: "/faxobs/v4/FaxObs_GetTapiLocations",
    params: &[
        Param::new("Buffer", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const SET_TAPI_LOCATIONS: OperationSchema = OperationSchema {
    opnum: 27,
    name: "/faxobs/v4/FaxObs_SetTapiLocations",
    params: &[
        Param::new("Buffer", In, IN_BUFFER),
        Param::new("BufferSize", In, Kind::U32),
    ],
};

pub const GET_MAPI_PROFILES: OperationSchema = OperationSchema {
    opnum: 28,
    name: "/faxobs/v4/FaxObs_GetMapiProfiles",
    params: &[
        Param::new("MapiProfiles", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const START_CLIENT_SERVER: OperationSchema = OperationSchema {
    opnum: 29,
    name: "/faxobs/v4/FaxObs_StartClientServer",
    params: &[
        Param::new("MachineName", In, WSTR),
        Param::new("ClientName", In, WSTR),
        Param::new("Context", In, Kind::U64),
    ],
};

pub const GET_SECURITY_DESCRIPTOR: OperationSchema = OperationSchema {
    opnum: 31,
    name: "/faxobs/v4/FaxObs_GetSecurityDescriptor",
    params: &[
        Param::new("Id", In, Kind::U32),
        Param::new("FaxSecurityDescriptor", InOut, BUFFER),
        Param::new("BufferSize", InOut, Kind::U32),
    ],
};

pub const SET_SECURITY_DESCRIPTOR: OperationSchema = OperationSchema {
    opnum: 32,
    name: "/faxobs/v4/FaxObs_SetSecurityDescriptor",
    params: &[
        Param::new("FaxSecurityDescriptor", In, IN_BUFFER),
        Param::new("BufferSize", In, Kind::U32),
    ],
};

pub const GET_SECURITY_DESCRIPTOR_COUNT: OperationSchema = OperationSchema {
    opnum: 33,
    name: "/faxobs/v4/FaxObs_GetSecurityDescriptorCount",
    params: &[Param::new("Count", Out, Kind::U32)],
};

pub const ACCESS_CHECK: OperationSchema = OperationSchema {
    opnum: 34,
    name: "/faxobs/v4/FaxObs_AccessCheck",
    params: &[
        Param::new("AccessMask", In, Kind::U32),
        Param::new("fAccess", Out, Kind::Bool),
    ],
};

/// Every defined operation, in opnum order
pub const OPERATIONS: &[&OperationSchema] = &[
    &CONNECTION_REF_COUNT,
    &GET_VERSION,
    &GET_INSTALL_TYPE,
    &OPEN_PORT,
    &CLOSE_PORT,
    &SEND_DOCUMENT,
    &GET_QUEUE_FILE_NAME,
    &ENUM_JOBS,
    &GET_JOB,
    &SET_JOB,
    &GET_PAGE_DATA,
    &GET_DEVICE_STATUS,
    &ABORT,
    &ENUM_PORTS,
    &GET_PORT,
    &SET_PORT,
    &ENUM_ROUTING_METHODS,
    &ENABLE_ROUTING_METHOD,
    &GET_ROUTING_INFO,
    &SET_ROUTING_INFO,
    &ENUM_GLOBAL_ROUTING_INFO,
    &SET_GLOBAL_ROUTING_INFO,
    &GET_CONFIGURATION,
    &SET_CONFIGURATION,
    &GET_LOGGING_CATEGORIES,
    &SET_LOGGING_CATEGORIES,
    &GET_TAPI_LOCATIONS,
    &SET_TAPI_LOCATIONS,
    &GET_MAPI_PROFILES,
    &START_CLIENT_SERVER,
    &GET_SECURITY_DESCRIPTOR,
    &SET_SECURITY_DESCRIPTOR,
    &GET_SECURITY_DESCRIPTOR_COUNT,
    &ACCESS_CHECK,
];

/// Descriptor for an opnum; `None` for the reserved opnum and out-of-range values
pub fn lookup(opnum: u16) -> Option<&'static OperationSchema> {
    OPERATIONS.iter().copied().find(|op| op.opnum == opnum)
}
