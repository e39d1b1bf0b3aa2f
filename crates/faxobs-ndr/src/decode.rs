//! NDR decoding trait

use crate::{ByteCursor, NdrContext, Result};

/// Trait for types that can be decoded from NDR format
pub trait NdrDecode: Sized {
    /// Decode a value from the cursor's current position.
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self>;
}
