//! Declarative operation descriptors
//!
//! An operation is described once, as an ordered table of parameters. The
//! frame encoder and decoder both walk the same table, so immediate fields and
//! deferred pointees are written and read in the same order without any
//! hand-maintained pairing.
//!
//! ```
//! use faxobs_ndr::{Direction, Kind, OperationSchema, Param, SizeIs};
//!
//! const GET_QUEUE_FILE_NAME: OperationSchema = OperationSchema {
//!     opnum: 6,
//!     name: "/faxobs/v4/FaxObs_GetQueueFileName",
//!     params: &[
//!         Param::new(
//!             "FileName",
//!             Direction::InOut,
//!             Kind::Unique(&Kind::WString(SizeIs::Field("FileNameSize"))),
//!         ),
//!         Param::new("FileNameSize", Direction::In, Kind::U32),
//!     ],
//! };
//!
//! assert_eq!(GET_QUEUE_FILE_NAME.request_params().count(), 2);
//! assert_eq!(GET_QUEUE_FILE_NAME.response_params().count(), 1);
//! ```

/// Parameter direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// [in] - sent in the request only
    In,
    /// [out] - sent in the response only
    Out,
    /// [in, out] - sent in both frames
    InOut,
}

impl Direction {
    /// Whether the parameter appears in the request frame
    pub fn is_in(self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }

    /// Whether the parameter appears in the response frame
    pub fn is_out(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

/// Source of a conformant array's declared capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeIs {
    /// Element count of the value itself (plus a terminator for strings)
    Natural,
    /// Value of a companion integer field or parameter
    Field(&'static str),
}

/// Wire kind of a parameter or structure field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    U8,
    U16,
    U32,
    U64,
    /// 32-bit BOOL
    Bool,
    /// 20-byte context handle
    ContextHandle,
    /// Conformant byte array
    Bytes(SizeIs),
    /// Conformant array of UTF-16 code units
    WString(SizeIs),
    /// Conformant-varying byte array: only the data is transmitted
    VaryingBytes(SizeIs),
    /// `[string]` wide string: conformant-varying, terminator included
    VaryingWString(SizeIs),
    /// Structure whose fields are laid out in order
    Struct(&'static StructSchema),
    /// Fixed-length inline array
    Fixed(&'static Kind, usize),
    /// Unique pointer; the pointee is deferred
    Unique(&'static Kind),
    /// Top-level reference pointer: never null, no marker, pointee in place
    Ref(&'static Kind),
}

impl Kind {
    /// Short name used in type mismatch errors
    pub fn name(&self) -> &'static str {
        match self {
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Bool => "bool",
            Kind::ContextHandle => "context handle",
            Kind::Bytes(_) => "byte array",
            Kind::WString(_) => "wide string",
            Kind::VaryingBytes(_) => "varying byte array",
            Kind::VaryingWString(_) => "varying wide string",
            Kind::Struct(schema) => schema.name,
            Kind::Fixed(..) => "fixed array",
            Kind::Unique(_) => "unique pointer",
            Kind::Ref(inner) => inner.name(),
        }
    }

    /// Number of unique pointer levels wrapping the innermost kind
    pub fn pointer_depth(&self) -> usize {
        match self {
            Kind::Unique(inner) => 1 + inner.pointer_depth(),
            _ => 0,
        }
    }
}

/// One field of a nested structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
}

impl Field {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// Layout of a nested structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSchema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl StructSchema {
    /// Position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// One operation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub direction: Direction,
    pub kind: Kind,
}

impl Param {
    pub const fn new(name: &'static str, direction: Direction, kind: Kind) -> Self {
        Self {
            name,
            direction,
            kind,
        }
    }
}

/// Descriptor of one remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSchema {
    pub opnum: u16,
    /// Stable name used for diagnostics
    pub name: &'static str,
    /// Parameters in declaration order
    pub params: &'static [Param],
}

impl OperationSchema {
    /// Parameters written to the request frame, in order
    pub fn request_params(&self) -> impl Iterator<Item = &'static Param> {
        let params: &'static [Param] = self.params;
        params.iter().filter(|p| p.direction.is_in())
    }

    /// Parameters written to the response frame, in order
    pub fn response_params(&self) -> impl Iterator<Item = &'static Param> {
        let params: &'static [Param] = self.params;
        params.iter().filter(|p| p.direction.is_out())
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&'static Param> {
        let params: &'static [Param] = self.params;
        params.iter().find(|p| p.name == name)
    }
}
