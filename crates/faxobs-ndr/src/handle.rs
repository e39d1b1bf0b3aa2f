//! Context handles
//!
//! A context handle is an opaque 20-byte token minted by the remote peer: a
//! 32-bit attribute word followed by a UUID. The engine only transports it;
//! it never allocates, validates or releases one.

use crate::{ByteCursor, NdrContext, NdrDecode, NdrEncode, Result, Uuid};

/// Encoded size of a context handle
pub const CONTEXT_HANDLE_SIZE: usize = 20;

/// Opaque remote session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContextHandle {
    pub attributes: u32,
    pub uuid: Uuid,
}

impl ContextHandle {
    /// The all-zero handle sent when the caller holds no session
    pub const EMPTY: Self = Self {
        attributes: 0,
        uuid: Uuid::NIL,
    };

    pub fn new(attributes: u32, uuid: Uuid) -> Self {
        Self { attributes, uuid }
    }

    /// True for the all-zero handle
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl std::fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}:{}", self.attributes, self.uuid)
    }
}

impl NdrEncode for ContextHandle {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        ctx.put_u32(cur, self.attributes);
        self.uuid.ndr_encode(cur, ctx)
    }

    fn ndr_size(&self, _ctx: &NdrContext) -> usize {
        CONTEXT_HANDLE_SIZE
    }
}

impl NdrDecode for ContextHandle {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        cur.ensure(CONTEXT_HANDLE_SIZE)?;
        let attributes = ctx.get_u32(cur)?;
        let uuid = Uuid::ndr_decode(cur, ctx)?;
        Ok(Self { attributes, uuid })
    }
}
