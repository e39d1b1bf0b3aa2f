//! NDR pointer markers
//!
//! Only unique pointers appear in FaxObs frames. A unique pointer is written
//! in the immediate section as a 4-byte marker: zero for null, otherwise a
//! referent ID. The pointee is not written inline; the frame defers it until
//! every immediate field has been written (see [`crate::frame`]).
//!
//! Referent IDs are allocated per frame, starting at `0x00020000` and
//! increasing by 4, matching what Windows NDR engines emit. Decoders only
//! look at whether the marker is zero.

use crate::{ByteCursor, NdrContext, Result};

/// Marker written for a null pointer
pub const NULL_MARKER: u32 = 0;

/// First referent ID handed out in a frame
pub const FIRST_REFERENT_ID: u32 = 0x0002_0000;

const REFERENT_ID_STEP: u32 = 4;

/// Per-frame referent ID allocator
#[derive(Debug, Clone)]
pub struct ReferentIds {
    next: u32,
}

impl ReferentIds {
    pub fn new() -> Self {
        Self {
            next: FIRST_REFERENT_ID,
        }
    }

    /// Allocate the next referent ID (never zero)
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = match self.next.wrapping_add(REFERENT_ID_STEP) {
            0 => FIRST_REFERENT_ID,
            n => n,
        };
        id
    }
}

impl Default for ReferentIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a pointer marker; returns whether the pointee must be deferred
pub fn encode_marker(cur: &mut ByteCursor, ctx: &NdrContext, ids: &mut ReferentIds, present: bool) -> bool {
    if present {
        ctx.put_u32(cur, ids.allocate());
    } else {
        ctx.put_u32(cur, NULL_MARKER);
    }
    present
}

/// Read a pointer marker; returns whether a pointee follows in the deferred section
pub fn decode_marker(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<bool> {
    Ok(ctx.get_u32(cur)? != NULL_MARKER)
}

/// How an empty buffer is sent through a unique pointer.
///
/// Some peers expect a null pointer for "no data", others a non-null pointer
/// to a zero-length array. Callers pick one per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroLength {
    /// Empty data is sent as a null pointer
    #[default]
    Null,
    /// Empty data is sent as a non-null pointer to a zero-length array
    Empty,
}

impl ZeroLength {
    /// Apply the convention to a buffer
    pub fn apply<T>(self, data: Vec<T>) -> Option<Vec<T>> {
        match self {
            ZeroLength::Null if data.is_empty() => None,
            _ => Some(data),
        }
    }

    /// Apply the convention to a string
    pub fn apply_text(self, text: String) -> Option<String> {
        match self {
            ZeroLength::Null if text.is_empty() => None,
            _ => Some(text),
        }
    }
}
