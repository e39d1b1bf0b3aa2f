//! NDR primitive type implementations
//!
//! Primitive types and their encodings (no alignment padding is applied):
//!
//! | MIDL Type      | Rust Type | Size |
//! |----------------|-----------|------|
//! | byte           | u8        | 1    |
//! | unsigned short | u16       | 2    |
//! | wchar_t        | u16       | 2    |
//! | DWORD          | u32       | 4    |
//! | long           | i32       | 4    |
//! | error_status_t | u32       | 4    |
//! | ULONG64        | u64       | 8    |
//! | BOOL           | bool      | 4    |
//! | GUID           | Uuid      | 16   |

use crate::encode::FixedWire;
use crate::{ByteCursor, NdrContext, NdrDecode, NdrEncode, Result};

// Macro to implement NdrEncode/NdrDecode for fixed-width integers
macro_rules! impl_ndr_primitive {
    ($ty:ty, $size:expr, $put:ident, $get:ident) => {
        impl NdrEncode for $ty {
            fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
                ctx.$put(cur, *self);
                Ok(())
            }

            fn ndr_size(&self, _ctx: &NdrContext) -> usize {
                $size
            }
        }

        impl NdrDecode for $ty {
            fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
                ctx.$get(cur)
            }
        }

        impl FixedWire for $ty {
            const WIRE_SIZE: usize = $size;
        }
    };
}

impl_ndr_primitive!(u8, 1, put_u8, get_u8);
impl_ndr_primitive!(u16, 2, put_u16, get_u16);
impl_ndr_primitive!(u32, 4, put_u32, get_u32);
impl_ndr_primitive!(u64, 8, put_u64, get_u64);
impl_ndr_primitive!(i32, 4, put_i32, get_i32);

/// BOOL - a 32-bit integer; exactly 0 or 1 is written, any nonzero value reads as true
impl NdrEncode for bool {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        ctx.put_u32(cur, u32::from(*self));
        Ok(())
    }

    fn ndr_size(&self, _ctx: &NdrContext) -> usize {
        4
    }
}

impl NdrDecode for bool {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        Ok(ctx.get_u32(cur)? != 0)
    }
}

/// GUID/UUID type for NDR encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uuid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Uuid {
    /// Nil UUID
    pub const NIL: Self = Self {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Parse from string "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('{').trim_end_matches('}');
        if s.len() != 36 {
            return None;
        }
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5 {
            return None;
        }

        let data1 = u32::from_str_radix(parts[0], 16).ok()?;
        let data2 = u16::from_str_radix(parts[1], 16).ok()?;
        let data3 = u16::from_str_radix(parts[2], 16).ok()?;
        let clock = u16::from_str_radix(parts[3], 16).ok()?;
        let node_str = parts[4];
        if node_str.len() != 12 {
            return None;
        }

        let mut data4 = [0u8; 8];
        data4[..2].copy_from_slice(&clock.to_be_bytes());
        for i in 0..6 {
            data4[2 + i] = u8::from_str_radix(node_str.get(i * 2..i * 2 + 2)?, 16).ok()?;
        }

        Some(Self {
            data1,
            data2,
            data3,
            data4,
        })
    }
}

impl std::fmt::Display for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-",
            self.data1, self.data2, self.data3, self.data4[0], self.data4[1],
        )?;
        for b in &self.data4[2..] {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl NdrEncode for Uuid {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        ctx.put_u32(cur, self.data1);
        ctx.put_u16(cur, self.data2);
        ctx.put_u16(cur, self.data3);
        cur.write(&self.data4);
        Ok(())
    }

    fn ndr_size(&self, _ctx: &NdrContext) -> usize {
        16
    }
}

impl NdrDecode for Uuid {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        cur.ensure(16)?;
        let data1 = ctx.get_u32(cur)?;
        let data2 = ctx.get_u16(cur)?;
        let data3 = ctx.get_u16(cur)?;
        let data4 = cur.read_array::<8>()?;
        Ok(Self {
            data1,
            data2,
            data3,
            data4,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_encode_decode() {
        let ctx = NdrContext::new();
        let mut cur = ByteCursor::new();

        true.ndr_encode(&mut cur, &ctx).unwrap();
        false.ndr_encode(&mut cur, &ctx).unwrap();
        assert_eq!(cur.as_slice(), &[1, 0, 0, 0, 0, 0, 0, 0]);

        cur.set_position(0).unwrap();
        assert!(bool::ndr_decode(&mut cur, &ctx).unwrap());
        assert!(!bool::ndr_decode(&mut cur, &ctx).unwrap());
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        let ctx = NdrContext::new();
        let mut cur = ByteCursor::from_slice(&[0x00, 0x01, 0x00, 0x80]);
        assert!(bool::ndr_decode(&mut cur, &ctx).unwrap());
    }

    #[test]
    fn test_no_alignment_padding() {
        let ctx = NdrContext::new();
        let mut cur = ByteCursor::new();

        42u8.ndr_encode(&mut cur, &ctx).unwrap();
        0xDEADBEEFu32.ndr_encode(&mut cur, &ctx).unwrap();
        assert_eq!(cur.len(), 5);

        cur.set_position(0).unwrap();
        assert_eq!(u8::ndr_decode(&mut cur, &ctx).unwrap(), 42);
        assert_eq!(u32::ndr_decode(&mut cur, &ctx).unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn test_uuid_roundtrip() {
        let ctx = NdrContext::new();
        let uuid = Uuid::parse("12345678-1234-5678-9ABC-DEF012345678").unwrap();

        let mut cur = ByteCursor::new();
        uuid.ndr_encode(&mut cur, &ctx).unwrap();
        assert_eq!(cur.len(), 16);

        cur.set_position(0).unwrap();
        let decoded = Uuid::ndr_decode(&mut cur, &ctx).unwrap();
        assert_eq!(uuid, decoded);
    }

    #[test]
    fn test_uuid_parse_display() {
        let uuid_str = "ea0a3165-4834-11d2-a6f8-00c04fa346cc";
        let uuid = Uuid::parse(uuid_str).unwrap();
        assert_eq!(uuid.to_string(), uuid_str);
        assert_eq!(Uuid::parse(&format!("{{{}}}", uuid_str)), Some(uuid));
        assert!(Uuid::parse("not-a-uuid").is_none());
    }
}
