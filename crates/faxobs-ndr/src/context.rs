//! NDR encoding/decoding context
//!
//! The context carries the settings a frame is marshaled with: byte order,
//! the width of conformance (size) prefixes, the allocation guard for
//! conformant arrays and whether a decoded frame may be followed by unread
//! bytes. It also provides the fixed-width primitive helpers
//! every codec builds on.

use crate::error::MAX_NDR_ARRAY_ELEMENTS;
use crate::{ByteCursor, NdrError, Result};

/// Width of the element-count prefix written before conformant data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeWidth {
    /// 32-bit prefix (classic NDR20 peers)
    U32,
    /// 64-bit prefix
    #[default]
    U64,
}

impl SizeWidth {
    /// Encoded width in bytes
    pub fn bytes(self) -> usize {
        match self {
            SizeWidth::U32 => 4,
            SizeWidth::U64 => 8,
        }
    }
}

/// NDR encoding/decoding context
#[derive(Debug, Clone, Copy)]
pub struct NdrContext {
    /// Whether to use little-endian byte order
    pub little_endian: bool,
    /// Width of conformance prefixes
    pub size_width: SizeWidth,
    /// Largest element count accepted for a single conformant array
    pub max_elements: usize,
    /// Accept (and log) unread bytes after a decoded frame instead of failing
    pub allow_trailing_bytes: bool,
}

macro_rules! impl_put_get {
    ($put:ident, $get:ident, $ty:ty, $n:expr) => {
        #[inline]
        pub fn $put(&self, cur: &mut ByteCursor, value: $ty) {
            if self.little_endian {
                cur.write(&value.to_le_bytes());
            } else {
                cur.write(&value.to_be_bytes());
            }
        }

        #[inline]
        pub fn $get(&self, cur: &mut ByteCursor) -> Result<$ty> {
            let raw = cur.read_array::<$n>()?;
            Ok(if self.little_endian {
                <$ty>::from_le_bytes(raw)
            } else {
                <$ty>::from_be_bytes(raw)
            })
        }
    };
}

impl NdrContext {
    /// Create a new NDR context with little-endian byte order (default)
    pub fn new() -> Self {
        Self {
            little_endian: true,
            size_width: SizeWidth::default(),
            max_elements: MAX_NDR_ARRAY_ELEMENTS,
            allow_trailing_bytes: false,
        }
    }

    /// Create a context with big-endian byte order
    pub fn big_endian() -> Self {
        Self::new().with_byte_order(false)
    }

    /// Set the byte order
    pub fn with_byte_order(mut self, little_endian: bool) -> Self {
        self.little_endian = little_endian;
        self
    }

    /// Set the width of conformance prefixes
    pub fn with_size_width(mut self, size_width: SizeWidth) -> Self {
        self.size_width = size_width;
        self
    }

    /// Set the per-array element limit
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Tolerate unread bytes after a decoded frame
    pub fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }

    impl_put_get!(put_u16, get_u16, u16, 2);
    impl_put_get!(put_u32, get_u32, u32, 4);
    impl_put_get!(put_u64, get_u64, u64, 8);
    impl_put_get!(put_i32, get_i32, i32, 4);

    #[inline]
    pub fn put_u8(&self, cur: &mut ByteCursor, value: u8) {
        cur.write(&[value]);
    }

    #[inline]
    pub fn get_u8(&self, cur: &mut ByteCursor) -> Result<u8> {
        Ok(cur.read(1)?[0])
    }

    /// Put a conformance (element count) prefix
    pub fn put_size(&self, cur: &mut ByteCursor, count: u64) -> Result<()> {
        match self.size_width {
            SizeWidth::U64 => self.put_u64(cur, count),
            SizeWidth::U32 => {
                let narrow = u32::try_from(count).map_err(|_| NdrError::MalformedSize {
                    count,
                    element_size: 0,
                    remaining: u32::MAX as usize,
                })?;
                self.put_u32(cur, narrow);
            }
        }
        Ok(())
    }

    /// Get a conformance (element count) prefix
    pub fn get_size(&self, cur: &mut ByteCursor) -> Result<u64> {
        match self.size_width {
            SizeWidth::U64 => self.get_u64(cur),
            SizeWidth::U32 => Ok(u64::from(self.get_u32(cur)?)),
        }
    }
}

impl Default for NdrContext {
    fn default() -> Self {
        Self::new()
    }
}
