//! Operation status codes
//!
//! Every FaxObs response ends with a 32-bit status. Zero is success; any
//! other value is a Win32 or fax-specific error code. A failing status is a
//! decoded result, not a codec error: the response values are still
//! available alongside it.

/// 32-bit status returned by every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(pub u32);

impl Status {
    pub const SUCCESS: Status = Status(0x0000_0000);
    pub const INVALID_FUNCTION: Status = Status(0x0000_0001);
    pub const FILE_NOT_FOUND: Status = Status(0x0000_0002);
    pub const ACCESS_DENIED: Status = Status(0x0000_0005);
    pub const INVALID_HANDLE: Status = Status(0x0000_0006);
    pub const NOT_ENOUGH_MEMORY: Status = Status(0x0000_0008);
    pub const INVALID_DATA: Status = Status(0x0000_000D);
    pub const BAD_UNIT: Status = Status(0x0000_0014);
    pub const NOT_SUPPORTED: Status = Status(0x0000_0032);
    pub const INVALID_PARAMETER: Status = Status(0x0000_0057);
    pub const INSUFFICIENT_BUFFER: Status = Status(0x0000_007A);
    pub const MORE_DATA: Status = Status(0x0000_00EA);
    pub const NO_SYSTEM_RESOURCES: Status = Status(0x0000_05AA);
    pub const FAX_ERR_SRV_OUTOFMEMORY: Status = Status(7001);
    pub const FAX_ERR_GROUP_NOT_FOUND: Status = Status(7002);
    pub const FAX_ERR_BAD_GROUP_CONFIGURATION: Status = Status(7003);
    pub const FAX_ERR_GROUP_IN_USE: Status = Status(7004);
    pub const FAX_ERR_RULE_NOT_FOUND: Status = Status(7005);
    pub const FAX_ERR_NOT_NTFS: Status = Status(7006);
    pub const FAX_ERR_DIRECTORY_IN_USE: Status = Status(7007);
    pub const FAX_ERR_FILE_ACCESS_DENIED: Status = Status(7008);
    pub const FAX_ERR_MESSAGE_NOT_FOUND: Status = Status(7009);
    pub const FAX_ERR_DEVICE_NUM_LIMIT_EXCEEDED: Status = Status(7010);
    pub const FAX_ERR_NOT_SUPPORTED_ON_THIS_SKU: Status = Status(7011);
    pub const FAX_ERR_VERSION_MISMATCH: Status = Status(7012);
    pub const FAX_ERR_RECIPIENTS_LIMIT: Status = Status(7013);

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Symbolic name of a known code
    pub fn name(self) -> Option<&'static str> {
        STATUS_NAMES
            .iter()
            .find(|(status, _)| *status == self)
            .map(|(_, name)| *name)
    }
}

const STATUS_NAMES: &[(Status, &str)] = &[
    (Status::SUCCESS, "ERROR_SUCCESS"),
    (Status::INVALID_FUNCTION, "ERROR_INVALID_FUNCTION"),
    (Status::FILE_NOT_FOUND, "ERROR_FILE_NOT_FOUND"),
    (Status::ACCESS_DENIED, "ERROR_ACCESS_DENIED"),
    (Status::INVALID_HANDLE, "ERROR_INVALID_HANDLE"),
    (Status::NOT_ENOUGH_MEMORY, "ERROR_NOT_ENOUGH_MEMORY"),
    (Status::INVALID_DATA, "ERROR_INVALID_DATA"),
    (Status::BAD_UNIT, "ERROR_BAD_UNIT"),
    (Status::NOT_SUPPORTED, "ERROR_NOT_SUPPORTED"),
    (Status::INVALID_PARAMETER, "ERROR_INVALID_PARAMETER"),
    (Status::INSUFFICIENT_BUFFER, "ERROR_INSUFFICIENT_BUFFER"),
    (Status::MORE_DATA, "ERROR_MORE_DATA"),
    (Status::NO_SYSTEM_RESOURCES, "ERROR_NO_SYSTEM_RESOURCES"),
    (Status::FAX_ERR_SRV_OUTOFMEMORY, "FAX_ERR_SRV_OUTOFMEMORY"),
    (Status::FAX_ERR_GROUP_NOT_FOUND, "FAX_ERR_GROUP_NOT_FOUND"),
    (Status::FAX_ERR_BAD_GROUP_CONFIGURATION, "FAX_ERR_BAD_GROUP_CONFIGURATION"),
    (Status::FAX_ERR_GROUP_IN_USE, "FAX_ERR_GROUP_IN_USE"),
    (Status::FAX_ERR_RULE_NOT_FOUND, "FAX_ERR_RULE_NOT_FOUND"),
    (Status::FAX_ERR_NOT_NTFS, "FAX_ERR_NOT_NTFS"),
    (Status::FAX_ERR_DIRECTORY_IN_USE, "FAX_ERR_DIRECTORY_IN_USE"),
    (Status::FAX_ERR_FILE_ACCESS_DENIED, "FAX_ERR_FILE_ACCESS_DENIED"),
    (Status::FAX_ERR_MESSAGE_NOT_FOUND, "FAX_ERR_MESSAGE_NOT_FOUND"),
    (Status::FAX_ERR_DEVICE_NUM_LIMIT_EXCEEDED, "FAX_ERR_DEVICE_NUM_LIMIT_EXCEEDED"),
    (Status::FAX_ERR_NOT_SUPPORTED_ON_THIS_SKU, "FAX_ERR_NOT_SUPPORTED_ON_THIS_SKU"),
    (Status::FAX_ERR_VERSION_MISMATCH, "FAX_ERR_VERSION_MISMATCH"),
    (Status::FAX_ERR_RECIPIENTS_LIMIT, "FAX_ERR_RECIPIENTS_LIMIT"),
];

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        Status(code)
    }
}

impl From<Status> for u32 {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08x})", name, self.0),
            None => write!(f, "0x{:08x}", self.0),
        }
    }
}
