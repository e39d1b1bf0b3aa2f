//! NDR (Network Data Representation) marshaling engine
//!
//! This crate implements the subset of NDR used by FaxObs-style RPC
//! operations: fixed-width scalars, unique and top-level reference pointers,
//! conformant and conformant-varying byte and character arrays, context
//! handles and NUL-terminated wide strings.
//!
//! # Wire format
//!
//! - Scalars are little-endian by default and carry no alignment padding
//! - A unique pointer is a 4-byte marker; its pointee is written after all
//!   immediate fields of the frame, in declaration order
//! - A conformant array is its declared capacity followed by exactly that
//!   many elements
//! - A conformant-varying array (and every `[string]`) is its capacity, a
//!   zero offset and the transmitted count, followed by that many elements
//! - A response frame ends with a 32-bit status
//!
//! Operations are described by [`OperationSchema`] tables and marshaled with
//! [`encode_request`], [`decode_request`], [`encode_response`] and
//! [`decode_response`].

mod arrays;
mod context;
mod cursor;
mod decode;
mod encode;
mod error;
mod frame;
mod handle;
mod message;
mod pointers;
mod primitives;
mod schema;
mod strings;
mod value;

pub use arrays::{
    check_count, decode_bytes, decode_conformant, decode_varying, decode_varying_bytes, encode_bytes,
    encode_conformant, encode_varying, encode_varying_bytes, ConformantArray, ConformantVaryingArray,
};
pub use context::{NdrContext, SizeWidth};
pub use cursor::ByteCursor;
pub use decode::NdrDecode;
pub use encode::{FixedWire, NdrEncode};
pub use error::{NdrError, Result, MAX_NDR_ARRAY_ELEMENTS};
pub use frame::{
    decode_request, decode_response, encode_request, encode_response, FrameReader, FrameWriter, ReadState,
    WriteState,
};
pub use handle::{ContextHandle, CONTEXT_HANDLE_SIZE};
pub use message::FrameMessage;
pub use pointers::{decode_marker, encode_marker, ReferentIds, ZeroLength, FIRST_REFERENT_ID, NULL_MARKER};
pub use primitives::Uuid;
pub use schema::{Direction, Field, Kind, OperationSchema, Param, SizeIs, StructSchema};
pub use strings::{
    decode_varying_wstring, decode_wstring, encode_varying_wstring, encode_wstring, natural_capacity, NdrWString,
};
pub use value::{FromValue, IntoValue, Value, Values};

/// Re-export bytes for convenience
pub use bytes::Bytes;
