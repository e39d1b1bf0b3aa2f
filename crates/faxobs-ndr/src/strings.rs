//! NDR wide strings
//!
//! A `[string]` wide string is a conformant-varying array of UTF-16 code
//! units that includes its terminator:
//!
//! ```text
//! max_count: size     # capacity in code units
//! offset: size        # 0
//! actual_count: size  # transmitted code units, NUL included
//! chars[actual_count]
//! ```
//!
//! A buffer sized by a companion field is a plain conformant array instead:
//!
//! ```text
//! max_count: size     # declared capacity in code units
//! chars[max_count]    # text, truncated or NUL padded to the capacity
//! ```
//!
//! Without a declared capacity the natural capacity is used: the code units
//! of the text plus one terminating NUL. An over-capacity string is truncated,
//! not rejected, and may lose its terminator. Decoding strips every trailing
//! NUL code unit.

use crate::arrays::{decode_conformant, decode_varying, encode_conformant, encode_varying};
use crate::{ByteCursor, NdrContext, NdrDecode, NdrEncode, Result};

/// Capacity of `text` including a terminating NUL, in code units
pub fn natural_capacity(text: &str) -> u64 {
    text.encode_utf16().count() as u64 + 1
}

/// Encode `text` into a wide string of `capacity` code units
pub fn encode_wstring(cur: &mut ByteCursor, ctx: &NdrContext, text: &str, capacity: u64) -> Result<()> {
    let units: Vec<u16> = text.encode_utf16().collect();
    encode_conformant(cur, ctx, &units, capacity)
}

/// Decode a wide string, dropping trailing NULs
pub fn decode_wstring(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<String> {
    units_to_string(decode_conformant::<u16>(cur, ctx)?)
}

/// Encode `text` and its terminator as a varying wide string of `capacity`
/// code units
pub fn encode_varying_wstring(cur: &mut ByteCursor, ctx: &NdrContext, text: &str, capacity: u64) -> Result<()> {
    let units: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    encode_varying(cur, ctx, &units, capacity)
}

/// Decode a varying wide string, dropping trailing NULs
pub fn decode_varying_wstring(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<String> {
    units_to_string(decode_varying::<u16>(cur, ctx)?)
}

fn units_to_string(mut units: Vec<u16>) -> Result<String> {
    while units.last() == Some(&0) {
        units.pop();
    }
    let text = char::decode_utf16(units).collect::<std::result::Result<String, _>>()?;
    Ok(text)
}

/// Unicode string type (null-terminated wchar_t*)
///
/// Encoded as a varying string with its natural capacity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdrWString(pub String);

impl NdrWString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for NdrWString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NdrWString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for NdrWString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl NdrEncode for NdrWString {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        encode_varying_wstring(cur, ctx, &self.0, natural_capacity(&self.0))
    }

    fn ndr_size(&self, ctx: &NdrContext) -> usize {
        3 * ctx.size_width.bytes() + natural_capacity(&self.0) as usize * 2
    }
}

impl NdrDecode for NdrWString {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        decode_varying_wstring(cur, ctx).map(Self)
    }
}
