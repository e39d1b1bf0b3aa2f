//! NDR error types

use thiserror::Error;

/// Default upper bound on the element count of a single conformant array.
///
/// Applied in addition to the remaining-bytes check so that a peer cannot make
/// us reserve memory proportional to an arbitrary 64-bit size prefix.
pub const MAX_NDR_ARRAY_ELEMENTS: usize = 16 * 1024 * 1024;

/// NDR encoding/decoding errors
#[derive(Debug, Error)]
pub enum NdrError {
    /// Not enough data left in the buffer for a fixed-width read
    #[error("truncated buffer: needed {needed} bytes, have {have}")]
    TruncatedBuffer { needed: usize, have: usize },

    /// A size prefix that cannot be satisfied by the remaining bytes
    #[error("malformed size: {count} elements of {element_size} bytes exceed {remaining} remaining bytes")]
    MalformedSize {
        count: u64,
        element_size: usize,
        remaining: usize,
    },

    /// Size prefix larger than the configured element limit
    #[error("allocation limit exceeded: requested {requested} elements, limit {limit}")]
    AllocationLimitExceeded { requested: u64, limit: usize },

    /// Varying array whose transmitted range lies outside its capacity
    #[error("varying array: offset {offset} + actual count {actual_count} exceeds max count {max_count}")]
    VarianceMismatch {
        max_count: u64,
        offset: u64,
        actual_count: u64,
    },

    /// Bytes left unread after a complete frame
    #[error("{operation}: {count} trailing bytes after frame")]
    TrailingBytes { operation: &'static str, count: usize },

    /// Cursor positioned outside the buffer
    #[error("invalid position {position} for buffer of {len} bytes")]
    InvalidPosition { position: usize, len: usize },

    /// Invalid string contents
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// A parameter or field value was not supplied
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    /// The supplied value does not match the declared kind
    #[error("type mismatch for {field}: expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// The companion length field named by size_is could not be resolved
    #[error("size_is field {0} is missing or not an integer")]
    MissingSizeField(&'static str),

    /// A frame operation was attempted in the wrong state
    #[error("invalid frame state: expected {expected}, frame is {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    /// An error raised while processing a specific operation field
    #[error("{operation}: field {field}: {source}")]
    Field {
        operation: &'static str,
        field: &'static str,
        #[source]
        source: Box<NdrError>,
    },

    /// UTF-16 decoding error
    #[error("UTF-16 error: {0}")]
    Utf16Error(#[from] std::char::DecodeUtf16Error),
}

impl NdrError {
    /// Attach operation and field context.
    ///
    /// Errors that already carry context are returned unchanged so the
    /// innermost field stays visible.
    pub fn in_field(self, operation: &'static str, field: &'static str) -> Self {
        match self {
            NdrError::Field { .. } => self,
            other => NdrError::Field {
                operation,
                field,
                source: Box::new(other),
            },
        }
    }

    /// The underlying codec error, with any field context removed
    pub fn root(&self) -> &NdrError {
        match self {
            NdrError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this error indicates malformed or truncated wire data
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.root(),
            NdrError::TruncatedBuffer { .. }
                | NdrError::MalformedSize { .. }
                | NdrError::AllocationLimitExceeded { .. }
                | NdrError::VarianceMismatch { .. }
                | NdrError::TrailingBytes { .. }
        )
    }
}

/// Result type for NDR operations
pub type Result<T> = std::result::Result<T, NdrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_context_wraps_once() {
        let err = NdrError::TruncatedBuffer { needed: 4, have: 1 }
            .in_field("FaxObs_GetVersion", "Version")
            .in_field("FaxObs_GetVersion", "Other");

        match &err {
            NdrError::Field { field, .. } => assert_eq!(*field, "Version"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.is_malformed());
        assert!(err.to_string().contains("FaxObs_GetVersion"));
    }

    #[test]
    fn test_trailing_bytes_is_malformed() {
        let err = NdrError::TrailingBytes {
            operation: "FaxObs_Abort",
            count: 3,
        };
        assert!(err.is_malformed());
        assert_eq!(err.to_string(), "FaxObs_Abort: 3 trailing bytes after frame");
    }

    #[test]
    fn test_root_of_plain_error() {
        let err = NdrError::MissingValue("Connect");
        assert!(matches!(err.root(), NdrError::MissingValue("Connect")));
        assert!(!err.is_malformed());
    }
}
