//! Typed requests and responses
//!
//! A request carries every `[in]` and `[in, out]` parameter of its
//! operation; a response carries every `[out]` and `[in, out]` parameter.
//! Buffers and strings behind unique pointers are `Option`s so that a null
//! pointer and an empty value stay distinct.

use crate::types::{Configuration, GlobalRoutingInfo, JobEntry, JobParam, PortInfo};
use faxobs_ndr::{ndr_message, ContextHandle, ZeroLength};

ndr_message! {
    /// Operation with no parameters in this direction
    pub struct Empty {}
}

ndr_message! {
    pub struct ConnectionRefCountRequest {
        "Handle" => handle: ContextHandle,
        /// 1 to connect, 0 to disconnect
        "Connect" => connect: u32,
    }
}

ndr_message! {
    pub struct ConnectionRefCountResponse {
        "Handle" => handle: ContextHandle,
        "CanShare" => can_share: u32,
    }
}

ndr_message! {
    pub struct GetVersionResponse {
        "Version" => version: u32,
    }
}

ndr_message! {
    pub struct GetInstallTypeResponse {
        "InstallType" => install_type: u32,
        "InstalledPlatforms" => installed_platforms: u32,
        "ProductType" => product_type: u32,
    }
}

ndr_message! {
    pub struct OpenPortRequest {
        "DeviceId" => device_id: u32,
        "Flags" => flags: u32,
    }
}

ndr_message! {
    pub struct PortHandle {
        "FaxPortHandle" => port: ContextHandle,
    }
}

ndr_message! {
    pub struct SendDocumentRequest {
        "FileName" => file_name: Option<String>,
        "JobParams" => job_params: JobParam,
    }
}

ndr_message! {
    pub struct SendDocumentResponse {
        "FaxJobId" => job_id: u32,
    }
}

ndr_message! {
    pub struct GetQueueFileNameRequest {
        "FileName" => file_name: Option<String>,
        /// Capacity of the returned name, in UTF-16 units including the NUL
        "FileNameSize" => file_name_size: u32,
    }
}

ndr_message! {
    pub struct GetQueueFileNameResponse {
        "FileName" => file_name: Option<String>,
    }
}

ndr_message! {
    /// Generic `Buffer`/`BufferSize` pair
    pub struct Buffer {
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

impl Buffer {
    /// Buffer carrying `data`, with `BufferSize` set to its length.
    ///
    /// `zero` decides whether empty `data` is sent as a null pointer or as a
    /// zero-length array.
    pub fn with_data(data: Vec<u8>, zero: ZeroLength) -> Self {
        let buffer_size = u32::try_from(data.len()).unwrap_or(u32::MAX);
        Self {
            buffer: zero.apply(data),
            buffer_size,
        }
    }

    /// Request for at most `size` bytes
    pub fn sized(size: u32) -> Self {
        Self {
            buffer: None,
            buffer_size: size,
        }
    }
}

ndr_message! {
    pub struct EnumJobsResponse {
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
        "JobsReturned" => jobs_returned: u32,
    }
}

ndr_message! {
    pub struct GetJobRequest {
        "JobId" => job_id: u32,
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct SetJobRequest {
        "JobId" => job_id: u32,
        "Command" => command: u32,
        "JobEntry" => job_entry: JobEntry,
    }
}

ndr_message! {
    pub struct GetPageDataRequest {
        "JobId" => job_id: u32,
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
        "ImageWidth" => image_width: u32,
        "ImageHeight" => image_height: u32,
    }
}

ndr_message! {
    pub struct GetPageDataResponse {
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
        "ImageWidth" => image_width: u32,
        "ImageHeight" => image_height: u32,
    }
}

ndr_message! {
    pub struct GetDeviceStatusRequest {
        "FaxPortHandle" => port: ContextHandle,
        "StatusBuffer" => status_buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct GetDeviceStatusResponse {
        "StatusBuffer" => status_buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct JobIdRequest {
        "JobId" => job_id: u32,
    }
}

ndr_message! {
    pub struct PortBuffer {
        "PortBuffer" => port_buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct EnumPortsResponse {
        "PortBuffer" => port_buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
        "PortsReturned" => ports_returned: u32,
    }
}

ndr_message! {
    pub struct GetPortRequest {
        "FaxPortHandle" => port: ContextHandle,
        "PortBuffer" => port_buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct SetPortRequest {
        "FaxPortHandle" => port: ContextHandle,
        "PortInfo" => port_info: PortInfo,
    }
}

ndr_message! {
    pub struct EnumRoutingMethodsRequest {
        "FaxPortHandle" => port: ContextHandle,
        "RoutingInfoBuffer" => routing_info_buffer: Option<Vec<u8>>,
        "RoutingInfoBufferSize" => routing_info_buffer_size: u32,
    }
}

ndr_message! {
    pub struct EnumRoutingMethodsResponse {
        "RoutingInfoBuffer" => routing_info_buffer: Option<Vec<u8>>,
        "RoutingInfoBufferSize" => routing_info_buffer_size: u32,
        "PortsReturned" => methods_returned: u32,
    }
}

ndr_message! {
    pub struct EnableRoutingMethodRequest {
        "FaxPortHandle" => port: ContextHandle,
        "RoutingGuidString" => routing_guid: Option<String>,
        "Enabled" => enabled: bool,
    }
}

ndr_message! {
    pub struct RoutingInfoRequest {
        "FaxPortHandle" => port: ContextHandle,
        "RoutingGuidString" => routing_guid: Option<String>,
        "RoutingInfoBuffer" => routing_info_buffer: Option<Vec<u8>>,
        "RoutingInfoBufferSize" => routing_info_buffer_size: u32,
    }
}

ndr_message! {
    /// Generic `RoutingInfoBuffer`/`RoutingInfoBufferSize` pair
    pub struct RoutingInfoBuffer {
        "RoutingInfoBuffer" => routing_info_buffer: Option<Vec<u8>>,
        "RoutingInfoBufferSize" => routing_info_buffer_size: u32,
    }
}

ndr_message! {
    pub struct EnumGlobalRoutingInfoResponse {
        "RoutingInfoBuffer" => routing_info_buffer: Option<Vec<u8>>,
        "RoutingInfoBufferSize" => routing_info_buffer_size: u32,
        "MethodsReturned" => methods_returned: u32,
    }
}

ndr_message! {
    pub struct SetGlobalRoutingInfoRequest {
        "RoutingInfo" => routing_info: GlobalRoutingInfo,
    }
}

ndr_message! {
    pub struct SetConfigurationRequest {
        "FaxConfig" => config: Configuration,
    }
}

ndr_message! {
    pub struct LoggingCategories {
        "Buffer" => buffer: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
        "NumberCategories" => number_categories: u32,
    }
}

ndr_message! {
    pub struct MapiProfiles {
        "MapiProfiles" => profiles: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct StartClientServerRequest {
        "MachineName" => machine_name: Option<String>,
        "ClientName" => client_name: Option<String>,
        "Context" => context: u64,
    }
}

ndr_message! {
    pub struct GetSecurityDescriptorRequest {
        "Id" => id: u32,
        "FaxSecurityDescriptor" => descriptor: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct SecurityDescriptor {
        "FaxSecurityDescriptor" => descriptor: Option<Vec<u8>>,
        "BufferSize" => buffer_size: u32,
    }
}

ndr_message! {
    pub struct GetSecurityDescriptorCountResponse {
        "Count" => count: u32,
    }
}

ndr_message! {
    pub struct AccessCheckRequest {
        "AccessMask" => access_mask: u32,
    }
}

ndr_message! {
    pub struct AccessCheckResponse {
        "fAccess" => access: bool,
    }
}
