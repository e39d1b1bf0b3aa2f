//! Position-tracked byte buffer
//!
//! Every codec reads and writes through a [`ByteCursor`]. Reads are bounds
//! checked against the bytes remaining after the current position, so a
//! length taken from the wire is never trusted before it is compared with
//! [`ByteCursor::remaining`].

use crate::{NdrError, Result};
use bytes::{Bytes, BytesMut};

/// Read/write byte buffer with an explicit position
#[derive(Debug, Clone, Default)]
pub struct ByteCursor {
    buf: BytesMut,
    position: usize,
}

impl ByteCursor {
    /// Create an empty cursor for writing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cursor with preallocated space
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            position: 0,
        }
    }

    /// Create a cursor positioned at the start of existing data
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(data),
            position: 0,
        }
    }

    /// Write bytes at the current position, growing the buffer as needed
    pub fn write(&mut self, bytes: &[u8]) {
        let end = self.position + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.position..end].copy_from_slice(bytes);
        self.position = end;
    }

    /// Write `count` zero bytes
    pub fn write_zeros(&mut self, count: usize) {
        let end = self.position + count;
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.position..end].fill(0);
        self.position = end;
    }

    /// Read `n` bytes from the current position
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        self.ensure(n)?;
        let start = self.position;
        self.position += n;
        Ok(&self.buf[start..self.position])
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Fail with `TruncatedBuffer` unless `n` bytes remain
    pub fn ensure(&self, n: usize) -> Result<()> {
        let have = self.remaining();
        if n > have {
            return Err(NdrError::TruncatedBuffer { needed: n, have });
        }
        Ok(())
    }

    /// Bytes between the current position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    /// Current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the position; positions past the end of the buffer are rejected
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.buf.len() {
            return Err(NdrError::InvalidPosition {
                position,
                len: self.buf.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Freeze the written contents
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl From<&[u8]> for ByteCursor {
    fn from(data: &[u8]) -> Self {
        Self::from_slice(data)
    }
}
