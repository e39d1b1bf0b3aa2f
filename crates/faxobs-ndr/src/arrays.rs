//! NDR array types
//!
//! Conformant arrays carry their element count on the wire immediately before
//! the elements:
//!
//! ```text
//! max_count: size      # declared capacity (width set by NdrContext::size_width)
//! elements[max_count]
//! ```
//!
//! The encoder trusts the caller-declared capacity over the slice length:
//! longer data is truncated to the capacity and shorter data is zero-padded
//! up to it. The decoder rejects any count whose byte length exceeds the
//! bytes remaining in the buffer before allocating.
//!
//! Conformant-varying arrays transmit only part of their capacity:
//!
//! ```text
//! max_count: size      # declared capacity
//! offset: size         # first transmitted element, always 0 when encoding
//! actual_count: size   # transmitted elements
//! elements[actual_count]
//! ```
//!
//! All three prefixes use the context's size width. Nothing is padded.

use crate::encode::FixedWire;
use crate::{ByteCursor, NdrContext, NdrDecode, NdrEncode, NdrError, Result};
use tracing::trace;

/// Validate a decoded element count against the remaining buffer and the
/// configured allocation limit.
pub fn check_count(cur: &ByteCursor, ctx: &NdrContext, count: u64, element_size: usize) -> Result<usize> {
    let remaining = cur.remaining();
    let fits = count
        .checked_mul(element_size as u64)
        .map_or(false, |byte_len| byte_len <= remaining as u64);
    let count = match usize::try_from(count) {
        Ok(n) if fits => n,
        _ => {
            return Err(NdrError::MalformedSize {
                count,
                element_size,
                remaining,
            })
        }
    };
    if count > ctx.max_elements {
        return Err(NdrError::AllocationLimitExceeded {
            requested: count as u64,
            limit: ctx.max_elements,
        });
    }
    Ok(count)
}

fn check_capacity(ctx: &NdrContext, capacity: u64) -> Result<usize> {
    match usize::try_from(capacity) {
        Ok(cap) if cap <= ctx.max_elements => Ok(cap),
        _ => Err(NdrError::AllocationLimitExceeded {
            requested: capacity,
            limit: ctx.max_elements,
        }),
    }
}

/// Encode `elements` as a conformant array of `capacity` elements
pub fn encode_conformant<T: NdrEncode + FixedWire>(
    cur: &mut ByteCursor,
    ctx: &NdrContext,
    elements: &[T],
    capacity: u64,
) -> Result<()> {
    let cap = check_capacity(ctx, capacity)?;
    ctx.put_size(cur, capacity)?;

    let written = elements.len().min(cap);
    if written < elements.len() {
        trace!("Truncating conformant array: len={}, capacity={}", elements.len(), cap);
    }
    for elem in &elements[..written] {
        elem.ndr_encode(cur, ctx)?;
    }
    for _ in written..cap {
        T::default().ndr_encode(cur, ctx)?;
    }
    Ok(())
}

/// Decode a conformant array
pub fn decode_conformant<T: NdrDecode + FixedWire>(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Vec<T>> {
    let start = cur.position();
    let count = ctx.get_size(cur)?;
    let count = match check_count(cur, ctx, count, T::WIRE_SIZE) {
        Ok(count) => count,
        Err(e) => {
            cur.set_position(start)?;
            return Err(e);
        }
    };

    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(T::ndr_decode(cur, ctx)?);
    }
    Ok(elements)
}

/// Encode a byte buffer as a conformant array of `capacity` bytes
pub fn encode_bytes(cur: &mut ByteCursor, ctx: &NdrContext, data: &[u8], capacity: u64) -> Result<()> {
    let cap = check_capacity(ctx, capacity)?;
    ctx.put_size(cur, capacity)?;
    let written = data.len().min(cap);
    cur.write(&data[..written]);
    cur.write_zeros(cap - written);
    Ok(())
}

/// Decode a conformant byte array
pub fn decode_bytes(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Vec<u8>> {
    let start = cur.position();
    let count = ctx.get_size(cur)?;
    let count = match check_count(cur, ctx, count, 1) {
        Ok(count) => count,
        Err(e) => {
            cur.set_position(start)?;
            return Err(e);
        }
    };
    Ok(cur.read(count)?.to_vec())
}

/// Decoded conformant-varying header
struct Variance {
    max_count: u64,
    offset: u64,
    count: usize,
}

fn decode_variance(cur: &mut ByteCursor, ctx: &NdrContext, element_size: usize) -> Result<Variance> {
    let start = cur.position();
    let result = read_variance(cur, ctx, element_size);
    if result.is_err() {
        cur.set_position(start)?;
    }
    result
}

fn read_variance(cur: &mut ByteCursor, ctx: &NdrContext, element_size: usize) -> Result<Variance> {
    let max_count = ctx.get_size(cur)?;
    let offset = ctx.get_size(cur)?;
    let actual_count = ctx.get_size(cur)?;
    match offset.checked_add(actual_count) {
        Some(end) if end <= max_count => {}
        _ => {
            return Err(NdrError::VarianceMismatch {
                max_count,
                offset,
                actual_count,
            })
        }
    }
    let count = check_count(cur, ctx, actual_count, element_size)?;
    Ok(Variance {
        max_count,
        offset,
        count,
    })
}

fn put_variance(cur: &mut ByteCursor, ctx: &NdrContext, max_count: u64, actual: usize) -> Result<()> {
    ctx.put_size(cur, max_count)?;
    ctx.put_size(cur, 0)?;
    ctx.put_size(cur, actual as u64)
}

/// Encode `elements` as a conformant-varying array of `max_count` capacity.
///
/// At most `max_count` elements are transmitted.
pub fn encode_varying<T: NdrEncode + FixedWire>(
    cur: &mut ByteCursor,
    ctx: &NdrContext,
    elements: &[T],
    max_count: u64,
) -> Result<()> {
    let cap = check_capacity(ctx, max_count)?;
    let actual = elements.len().min(cap);
    if actual < elements.len() {
        trace!("Truncating varying array: len={}, max_count={}", elements.len(), cap);
    }
    put_variance(cur, ctx, max_count, actual)?;
    for elem in &elements[..actual] {
        elem.ndr_encode(cur, ctx)?;
    }
    Ok(())
}

/// Decode a conformant-varying array, returning the transmitted elements
pub fn decode_varying<T: NdrDecode + FixedWire>(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Vec<T>> {
    decode_varying_parts(cur, ctx).map(|(_, _, elements)| elements)
}

fn decode_varying_parts<T: NdrDecode + FixedWire>(
    cur: &mut ByteCursor,
    ctx: &NdrContext,
) -> Result<(u64, u64, Vec<T>)> {
    let variance = decode_variance(cur, ctx, T::WIRE_SIZE)?;
    let mut elements = Vec::with_capacity(variance.count);
    for _ in 0..variance.count {
        elements.push(T::ndr_decode(cur, ctx)?);
    }
    Ok((variance.max_count, variance.offset, elements))
}

/// Encode a byte buffer as a conformant-varying array of `max_count` capacity
pub fn encode_varying_bytes(cur: &mut ByteCursor, ctx: &NdrContext, data: &[u8], max_count: u64) -> Result<()> {
    let cap = check_capacity(ctx, max_count)?;
    let actual = data.len().min(cap);
    put_variance(cur, ctx, max_count, actual)?;
    cur.write(&data[..actual]);
    Ok(())
}

/// Decode a conformant-varying byte array
pub fn decode_varying_bytes(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Vec<u8>> {
    let variance = decode_variance(cur, ctx, 1)?;
    Ok(cur.read(variance.count)?.to_vec())
}

/// Conformant array - size determined at runtime
///
/// `capacity` is the declared `size_is` value; when unset the element count
/// is used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformantArray<T> {
    pub elements: Vec<T>,
    pub capacity: Option<u64>,
}

impl<T> ConformantArray<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            elements,
            capacity: None,
        }
    }

    /// Array with an explicitly declared capacity
    pub fn with_capacity(elements: Vec<T>, capacity: u64) -> Self {
        Self {
            elements,
            capacity: Some(capacity),
        }
    }

    /// Capacity written on the wire
    pub fn declared_capacity(&self) -> u64 {
        self.capacity.unwrap_or(self.elements.len() as u64)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> From<Vec<T>> for ConformantArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T: NdrEncode + FixedWire> NdrEncode for ConformantArray<T> {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        encode_conformant(cur, ctx, &self.elements, self.declared_capacity())
    }

    fn ndr_size(&self, ctx: &NdrContext) -> usize {
        ctx.size_width.bytes() + self.declared_capacity() as usize * T::WIRE_SIZE
    }
}

impl<T: NdrDecode + FixedWire> NdrDecode for ConformantArray<T> {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        let elements = decode_conformant(cur, ctx)?;
        let capacity = Some(elements.len() as u64);
        Ok(Self { elements, capacity })
    }
}

/// Conformant-varying array - capacity and transmitted length both on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformantVaryingArray<T> {
    pub max_count: u64,
    pub offset: u64,
    pub elements: Vec<T>,
}

impl<T> ConformantVaryingArray<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            max_count: elements.len() as u64,
            offset: 0,
            elements,
        }
    }

    pub fn with_max(max_count: u64, elements: Vec<T>) -> Self {
        Self {
            max_count,
            offset: 0,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: NdrEncode + FixedWire> NdrEncode for ConformantVaryingArray<T> {
    fn ndr_encode(&self, cur: &mut ByteCursor, ctx: &NdrContext) -> Result<()> {
        encode_varying(cur, ctx, &self.elements, self.max_count)
    }

    fn ndr_size(&self, ctx: &NdrContext) -> usize {
        let transmitted = self.elements.len().min(self.max_count as usize);
        3 * ctx.size_width.bytes() + transmitted * T::WIRE_SIZE
    }
}

impl<T: NdrDecode + FixedWire> NdrDecode for ConformantVaryingArray<T> {
    fn ndr_decode(cur: &mut ByteCursor, ctx: &NdrContext) -> Result<Self> {
        let (max_count, offset, elements) = decode_varying_parts(cur, ctx)?;
        Ok(Self {
            max_count,
            offset,
            elements,
        })
    }
}
