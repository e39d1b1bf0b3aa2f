//! NDR encoding trait

use crate::{ByteCursor, NdrContext, Result};

/// Trait for types that can be encoded to NDR format
pub trait NdrEncode {
    /// Encode this value at the cursor's current position.
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()>;

    /// Encoded size in bytes
    fn ndr_size(&self, ctx: &NdrContext) -> usize;
}

/// Element types with a fixed encoded width.
///
/// Conformant arrays use the width to reject size prefixes that the remaining
/// buffer cannot hold before any allocation happens.
pub trait FixedWire: Sized + Copy + Default {
    const WIRE_SIZE: usize;
}
