//! Structures carried by FaxObs operations
//!
//! String members are unique pointers to `[string]` wide strings: their text
//! is written as a conformant-varying array in the deferred section after the
//! structure's fixed part, in member order. `None` is sent as a null pointer.

use faxobs_ndr::{ndr_struct, Kind, SizeIs};

const WSTR: Kind = Kind::Unique(&Kind::VaryingWString(SizeIs::Natural));

ndr_struct! {
    /// SYSTEMTIME
    pub struct SystemTime as SYSTEM_TIME_SCHEMA = "SYSTEMTIME" {
        "Year" => year: u16 = Kind::U16,
        "Month" => month: u16 = Kind::U16,
        "DayOfWeek" => day_of_week: u16 = Kind::U16,
        "Day" => day: u16 = Kind::U16,
        "Hour" => hour: u16 = Kind::U16,
        "Minute" => minute: u16 = Kind::U16,
        "Second" => second: u16 = Kind::U16,
        "Milliseconds" => milliseconds: u16 = Kind::U16,
    }
}

ndr_struct! {
    /// FAX_TIME: hour and minute of a daily discount period boundary
    pub struct Time as TIME_SCHEMA = "FAX_TIME" {
        "Hour" => hour: u16 = Kind::U16,
        "Minute" => minute: u16 = Kind::U16,
    }
}

ndr_struct! {
    /// FAX_JOB_PARAMW: parameters of an outgoing fax job
    pub struct JobParam as JOB_PARAM_SCHEMA = "FAX_JOB_PARAMW" {
        "SizeOfStruct" => size_of_struct: u32 = Kind::U32,
        "RecipientNumber" => recipient_number: Option<String> = WSTR,
        "RecipientName" => recipient_name: Option<String> = WSTR,
        "Tsid" => tsid: Option<String> = WSTR,
        "SenderName" => sender_name: Option<String> = WSTR,
        "SenderCompany" => sender_company: Option<String> = WSTR,
        "SenderDept" => sender_dept: Option<String> = WSTR,
        "BillingCode" => billing_code: Option<String> = WSTR,
        "ScheduleAction" => schedule_action: u32 = Kind::U32,
        "ScheduleTime" => schedule_time: SystemTime = Kind::Struct(&SYSTEM_TIME_SCHEMA),
        "DeliveryReportType" => delivery_report_type: u32 = Kind::U32,
        "DeliveryReportAddress" => delivery_report_address: Option<String> = WSTR,
        "DocumentName" => document_name: Option<String> = WSTR,
        "CallHandle" => call_handle: u32 = Kind::U32,
        /// Broadcast sequencing; all ignored when the first entry is zero
        "Reserved" => reserved: [u64; 3] = Kind::Fixed(&Kind::U64, 3),
    }
}

ndr_struct! {
    /// FAX_JOB_ENTRYW: a queued job
    pub struct JobEntry as JOB_ENTRY_SCHEMA = "FAX_JOB_ENTRYW" {
        "SizeOfStruct" => size_of_struct: u32 = Kind::U32,
        "JobId" => job_id: u32 = Kind::U32,
        "UserName" => user_name: Option<String> = WSTR,
        "JobType" => job_type: u32 = Kind::U32,
        "QueueStatus" => queue_status: u32 = Kind::U32,
        "Status" => status: u32 = Kind::U32,
        "Size" => size: u32 = Kind::U32,
        "PageCount" => page_count: u32 = Kind::U32,
        "RecipientNumber" => recipient_number: Option<String> = WSTR,
        "RecipientName" => recipient_name: Option<String> = WSTR,
        "Tsid" => tsid: Option<String> = WSTR,
        "SenderName" => sender_name: Option<String> = WSTR,
        "SenderCompany" => sender_company: Option<String> = WSTR,
        "SenderDept" => sender_dept: Option<String> = WSTR,
        "BillingCode" => billing_code: Option<String> = WSTR,
        "ScheduleAction" => schedule_action: u32 = Kind::U32,
        "ScheduleTime" => schedule_time: SystemTime = Kind::Struct(&SYSTEM_TIME_SCHEMA),
        "DeliveryReportType" => delivery_report_type: u32 = Kind::U32,
        "DeliveryReportAddress" => delivery_report_address: Option<String> = WSTR,
        "DocumentName" => document_name: Option<String> = WSTR,
    }
}

ndr_struct! {
    /// FAX_PORT_INFO: configuration of one fax device
    pub struct PortInfo as PORT_INFO_SCHEMA = "FAX_PORT_INFO" {
        "SizeOfStruct" => size_of_struct: u32 = Kind::U32,
        "DeviceId" => device_id: u32 = Kind::U32,
        "State" => state: u32 = Kind::U32,
        "Flags" => flags: u32 = Kind::U32,
        "Rings" => rings: u32 = Kind::U32,
        "Priority" => priority: u32 = Kind::U32,
        "DeviceName" => device_name: Option<String> = WSTR,
        "Tsid" => tsid: Option<String> = WSTR,
        "Csid" => csid: Option<String> = WSTR,
    }
}

ndr_struct! {
    /// FAX_GLOBAL_ROUTING_INFOW
    pub struct GlobalRoutingInfo as GLOBAL_ROUTING_INFO_SCHEMA = "FAX_GLOBAL_ROUTING_INFOW" {
        "SizeOfStruct" => size_of_struct: u32 = Kind::U32,
        "Priority" => priority: u32 = Kind::U32,
        "Guid" => guid: Option<String> = WSTR,
        "FriendlyName" => friendly_name: Option<String> = WSTR,
        "FunctionName" => function_name: Option<String> = WSTR,
        "ExtensionImageName" => extension_image_name: Option<String> = WSTR,
        "ExtensionFriendlyName" => extension_friendly_name: Option<String> = WSTR,
    }
}

ndr_struct! {
    /// FAX_CONFIGURATIONW: server-wide settings
    pub struct Configuration as CONFIGURATION_SCHEMA = "FAX_CONFIGURATIONW" {
        "SizeOfStruct" => size_of_struct: u32 = Kind::U32,
        "Retries" => retries: u32 = Kind::U32,
        "RetryDelay" => retry_delay: u32 = Kind::U32,
        "DirtyDays" => dirty_days: u32 = Kind::U32,
        "Branding" => branding: bool = Kind::Bool,
        "UseDeviceTsid" => use_device_tsid: bool = Kind::Bool,
        "ServerCp" => server_cp: bool = Kind::Bool,
        "PauseServerQueue" => pause_server_queue: bool = Kind::Bool,
        "StartCheapTime" => start_cheap_time: Time = Kind::Struct(&TIME_SCHEMA),
        "StopCheapTime" => stop_cheap_time: Time = Kind::Struct(&TIME_SCHEMA),
        "ArchiveOutgoingFaxes" => archive_outgoing_faxes: bool = Kind::Bool,
        "ArchiveDirectory" => archive_directory: Option<String> = WSTR,
        "ProfileName" => profile_name: Option<String> = WSTR,
    }
}
