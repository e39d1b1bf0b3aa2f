//! Operation frames
//!
//! A frame is the byte stream for one direction of one call:
//!
//! ```text
//! immediate fields, in parameter order
//!   scalars and context handles inline
//!   unique pointers as a 4-byte marker (0 = null)
//! deferred section, in pointer declaration order
//!   each pointee, followed directly by the pointees it embeds
//! status: u32        # responses only
//! ```
//!
//! [`FrameWriter`] moves through `BuildingImmediate -> WritingDeferred ->
//! Sealed` and [`FrameReader`] through `ReadingImmediate -> ReadingDeferred ->
//! Complete`; response frames pass through `StatusWritten` / `StatusRead`
//! before the last step. Calls made out of order fail with
//! [`NdrError::InvalidState`]. A frame with bytes left over after decoding is
//! rejected unless [`NdrContext::allow_trailing_bytes`] is set.
//! Both sides schedule deferred work from the same [`OperationSchema`], so the
//! number and order of deferred writes always equals the number and order of
//! deferred reads.

use std::collections::VecDeque;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::arrays::{decode_bytes, decode_varying_bytes, encode_bytes, encode_varying_bytes};
use crate::pointers::{decode_marker, encode_marker, ReferentIds};
use crate::strings::{decode_varying_wstring, decode_wstring, encode_varying_wstring, encode_wstring, natural_capacity};
use crate::{
    ByteCursor, ContextHandle, Kind, NdrContext, NdrDecode, NdrEncode, NdrError, OperationSchema, Param, Result,
    SizeIs, StructSchema, Value, Values,
};

/// Encoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    BuildingImmediate,
    WritingDeferred,
    StatusWritten,
    Sealed,
}

impl WriteState {
    fn name(self) -> &'static str {
        match self {
            WriteState::BuildingImmediate => "BuildingImmediate",
            WriteState::WritingDeferred => "WritingDeferred",
            WriteState::StatusWritten => "StatusWritten",
            WriteState::Sealed => "Sealed",
        }
    }
}

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    ReadingImmediate,
    ReadingDeferred,
    StatusRead,
    Complete,
}

impl ReadState {
    fn name(self) -> &'static str {
        match self {
            ReadState::ReadingImmediate => "ReadingImmediate",
            ReadState::ReadingDeferred => "ReadingDeferred",
            ReadState::StatusRead => "StatusRead",
            ReadState::Complete => "Complete",
        }
    }
}

/// Where `size_is` names are looked up: the enclosing structure's fields,
/// then the frame's parameters, then the paired request (responses only).
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    record: Option<(&'static StructSchema, &'a [Value])>,
    params: &'a Values,
    fallback: Option<&'a Values>,
}

impl<'a> Scope<'a> {
    fn size_of(&self, name: &'static str) -> Result<u64> {
        let in_record = self
            .record
            .and_then(|(schema, fields)| schema.index_of(name).and_then(|i| fields.get(i)));
        in_record
            .or_else(|| self.params.get(name))
            .or_else(|| self.fallback.and_then(|values| values.get(name)))
            .and_then(Value::as_size)
            .ok_or(NdrError::MissingSizeField(name))
    }

    fn capacity(&self, size_is: SizeIs, natural: u64) -> Result<u64> {
        match size_is {
            SizeIs::Natural => Ok(natural),
            SizeIs::Field(name) => self.size_of(name),
        }
    }
}

struct Deferred<'a> {
    field: &'static str,
    kind: &'static Kind,
    value: &'a Value,
    scope: Scope<'a>,
}

struct Emitter {
    ctx: NdrContext,
    cur: ByteCursor,
    ids: ReferentIds,
    deferred_written: usize,
}

impl Emitter {
    fn write_value<'a>(
        &mut self,
        field: &'static str,
        kind: &'static Kind,
        value: &'a Value,
        scope: Scope<'a>,
        queue: &mut VecDeque<Deferred<'a>>,
    ) -> Result<()> {
        let ctx = self.ctx;
        match (kind, value) {
            (Kind::U8, Value::U8(v)) => ctx.put_u8(&mut self.cur, *v),
            (Kind::U16, Value::U16(v)) => ctx.put_u16(&mut self.cur, *v),
            (Kind::U32, Value::U32(v)) => ctx.put_u32(&mut self.cur, *v),
            (Kind::U64, Value::U64(v)) => ctx.put_u64(&mut self.cur, *v),
            (Kind::Bool, Value::Bool(v)) => v.ndr_encode(&mut self.cur, &ctx)?,
            (Kind::ContextHandle, Value::Handle(h)) => h.ndr_encode(&mut self.cur, &ctx)?,
            (Kind::Bytes(size_is), Value::Bytes(data)) => {
                let capacity = scope.capacity(*size_is, data.len() as u64)?;
                encode_bytes(&mut self.cur, &ctx, data, capacity)?;
            }
            (Kind::WString(size_is), Value::Text(text)) => {
                let capacity = scope.capacity(*size_is, natural_capacity(text))?;
                encode_wstring(&mut self.cur, &ctx, text, capacity)?;
            }
            (Kind::VaryingBytes(size_is), Value::Bytes(data)) => {
                let capacity = scope.capacity(*size_is, data.len() as u64)?;
                encode_varying_bytes(&mut self.cur, &ctx, data, capacity)?;
            }
            (Kind::VaryingWString(size_is), Value::Text(text)) => {
                let capacity = scope.capacity(*size_is, natural_capacity(text))?;
                encode_varying_wstring(&mut self.cur, &ctx, text, capacity)?;
            }
            (Kind::Struct(schema), Value::Struct(fields)) if fields.len() == schema.fields.len() => {
                let inner = Scope {
                    record: Some((*schema, fields.as_slice())),
                    ..scope
                };
                for (f, v) in schema.fields.iter().zip(fields) {
                    self.write_value(f.name, &f.kind, v, inner, queue)?;
                }
            }
            (Kind::Fixed(elem, n), Value::List(items)) if items.len() == *n => {
                for item in items {
                    self.write_value(field, *elem, item, scope, queue)?;
                }
            }
            (Kind::Unique(inner), value) => {
                if encode_marker(&mut self.cur, &ctx, &mut self.ids, !value.is_null()) {
                    queue.push_back(Deferred {
                        field,
                        kind: *inner,
                        value,
                        scope,
                    });
                }
            }
            (_, Value::Null) => return Err(NdrError::MissingValue(field)),
            (Kind::Ref(inner), value) => self.write_value(field, *inner, value, scope, queue)?,
            (kind, _) => {
                return Err(NdrError::TypeMismatch {
                    field,
                    expected: kind.name(),
                })
            }
        }
        Ok(())
    }

    fn flush<'a>(&mut self, operation: &'static str, queue: VecDeque<Deferred<'a>>) -> Result<()> {
        for item in queue {
            trace!(
                "Writing deferred: op={}, field={}, kind={}, position={}",
                operation,
                item.field,
                item.kind.name(),
                self.cur.position()
            );
            let mut nested = VecDeque::new();
            self.write_value(item.field, item.kind, item.value, item.scope, &mut nested)
                .map_err(|e| e.in_field(operation, item.field))?;
            self.deferred_written += 1;
            self.flush(operation, nested)?;
        }
        Ok(())
    }
}

/// Builds one frame from parameter values
pub struct FrameWriter<'a> {
    operation: &'static str,
    out: Emitter,
    state: WriteState,
    with_status: bool,
    params: &'a Values,
    fallback: Option<&'a Values>,
    deferred: VecDeque<Deferred<'a>>,
}

impl<'a> FrameWriter<'a> {
    pub fn new(ctx: NdrContext, operation: &'static str, params: &'a Values) -> Self {
        Self {
            operation,
            out: Emitter {
                ctx,
                cur: ByteCursor::new(),
                ids: ReferentIds::new(),
                deferred_written: 0,
            },
            state: WriteState::BuildingImmediate,
            with_status: false,
            params,
            fallback: None,
            deferred: VecDeque::new(),
        }
    }

    /// Writer for a response frame, which must end with a status.
    ///
    /// `request` is consulted for `size_is` names missing from the frame's
    /// own parameters.
    pub fn response(ctx: NdrContext, operation: &'static str, params: &'a Values, request: Option<&'a Values>) -> Self {
        Self {
            with_status: true,
            fallback: request,
            ..Self::new(ctx, operation, params)
        }
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Deferred payloads written so far, nested pointees included
    pub fn deferred_count(&self) -> usize {
        self.out.deferred_written
    }

    fn expect(&self, expected: WriteState) -> Result<()> {
        if self.state != expected {
            return Err(NdrError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            });
        }
        Ok(())
    }

    /// Write one parameter's immediate representation
    pub fn write_immediate(&mut self, param: &'static Param) -> Result<()> {
        self.expect(WriteState::BuildingImmediate)?;
        let params = self.params;
        let scope = Scope {
            record: None,
            params,
            fallback: self.fallback,
        };
        let result = match params.get(param.name) {
            Some(value) => {
                trace!("Writing immediate: op={}, field={}", self.operation, param.name);
                self.out
                    .write_value(param.name, &param.kind, value, scope, &mut self.deferred)
            }
            None => Err(NdrError::MissingValue(param.name)),
        };
        result.map_err(|e| e.in_field(self.operation, param.name))
    }

    /// Close the immediate section and write every deferred pointee
    pub fn write_deferred(&mut self) -> Result<()> {
        self.expect(WriteState::BuildingImmediate)?;
        self.state = WriteState::WritingDeferred;
        let queue = std::mem::take(&mut self.deferred);
        self.out.flush(self.operation, queue)
    }

    /// Append the trailing status of a response
    pub fn write_status(&mut self, status: u32) -> Result<()> {
        self.expect(WriteState::WritingDeferred)?;
        self.state = WriteState::StatusWritten;
        self.out.ctx.put_u32(&mut self.out.cur, status);
        Ok(())
    }

    /// Finish the frame and hand out its bytes
    pub fn seal(&mut self) -> Result<Bytes> {
        self.expect(if self.with_status {
            WriteState::StatusWritten
        } else {
            WriteState::WritingDeferred
        })?;
        self.state = WriteState::Sealed;
        Ok(std::mem::take(&mut self.out.cur).into_bytes())
    }
}

/// Partially decoded value; `Pending` refers to a deferred slot
#[derive(Debug)]
enum Node {
    Value(Value),
    Struct(Vec<Node>),
    List(Vec<Node>),
    Pending(usize),
}

struct PendingRead {
    field: &'static str,
    kind: &'static Kind,
    slot: usize,
}

struct Parser {
    ctx: NdrContext,
    cur: ByteCursor,
    slots: Vec<Option<Node>>,
}

impl Parser {
    fn read_node(
        &mut self,
        field: &'static str,
        kind: &'static Kind,
        queue: &mut VecDeque<PendingRead>,
    ) -> Result<Node> {
        let ctx = self.ctx;
        let cur = &mut self.cur;
        let value = match kind {
            Kind::U8 => Value::U8(ctx.get_u8(cur)?),
            Kind::U16 => Value::U16(ctx.get_u16(cur)?),
            Kind::U32 => Value::U32(ctx.get_u32(cur)?),
            Kind::U64 => Value::U64(ctx.get_u64(cur)?),
            Kind::Bool => Value::Bool(bool::ndr_decode(cur, &ctx)?),
            Kind::ContextHandle => Value::Handle(ContextHandle::ndr_decode(cur, &ctx)?),
            Kind::Bytes(_) => Value::Bytes(decode_bytes(cur, &ctx)?),
            Kind::WString(_) => Value::Text(decode_wstring(cur, &ctx)?),
            Kind::VaryingBytes(_) => Value::Bytes(decode_varying_bytes(cur, &ctx)?),
            Kind::VaryingWString(_) => Value::Text(decode_varying_wstring(cur, &ctx)?),
            Kind::Ref(inner) => return self.read_node(field, *inner, queue),
            Kind::Struct(schema) => {
                let mut fields = Vec::with_capacity(schema.fields.len());
                for f in schema.fields {
                    fields.push(self.read_node(f.name, &f.kind, queue)?);
                }
                return Ok(Node::Struct(fields));
            }
            Kind::Fixed(elem, n) => {
                let mut items = Vec::with_capacity(*n);
                for _ in 0..*n {
                    items.push(self.read_node(field, *elem, queue)?);
                }
                return Ok(Node::List(items));
            }
            Kind::Unique(inner) => {
                if !decode_marker(cur, &ctx)? {
                    Value::Null
                } else {
                    let slot = self.slots.len();
                    self.slots.push(None);
                    queue.push_back(PendingRead {
                        field,
                        kind: *inner,
                        slot,
                    });
                    return Ok(Node::Pending(slot));
                }
            }
        };
        Ok(Node::Value(value))
    }

    fn flush(&mut self, operation: &'static str, queue: VecDeque<PendingRead>) -> Result<()> {
        for item in queue {
            trace!(
                "Reading deferred: op={}, field={}, kind={}, position={}",
                operation,
                item.field,
                item.kind.name(),
                self.cur.position()
            );
            let mut nested = VecDeque::new();
            let node = self
                .read_node(item.field, item.kind, &mut nested)
                .map_err(|e| e.in_field(operation, item.field))?;
            if let Some(slot) = self.slots.get_mut(item.slot) {
                *slot = Some(node);
            }
            self.flush(operation, nested)?;
        }
        Ok(())
    }

    fn resolve(&mut self, node: Node) -> Result<Value> {
        match node {
            Node::Value(v) => Ok(v),
            Node::Struct(items) => Ok(Value::Struct(
                items.into_iter().map(|n| self.resolve(n)).collect::<Result<_>>()?,
            )),
            Node::List(items) => Ok(Value::List(
                items.into_iter().map(|n| self.resolve(n)).collect::<Result<_>>()?,
            )),
            Node::Pending(slot) => match self.slots.get_mut(slot).and_then(Option::take) {
                Some(node) => self.resolve(node),
                None => Err(NdrError::InvalidState {
                    expected: ReadState::Complete.name(),
                    actual: ReadState::ReadingImmediate.name(),
                }),
            },
        }
    }
}

/// Reads one frame back into parameter values
pub struct FrameReader {
    operation: &'static str,
    input: Parser,
    state: ReadState,
    with_status: bool,
    params: Vec<(&'static str, Node)>,
    pending: VecDeque<PendingRead>,
}

impl FrameReader {
    pub fn new(ctx: NdrContext, operation: &'static str, data: &[u8]) -> Self {
        Self {
            operation,
            input: Parser {
                ctx,
                cur: ByteCursor::from_slice(data),
                slots: Vec::new(),
            },
            state: ReadState::ReadingImmediate,
            with_status: false,
            params: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Reader for a response frame, which must end with a status
    pub fn response(ctx: NdrContext, operation: &'static str, data: &[u8]) -> Self {
        Self {
            with_status: true,
            ..Self::new(ctx, operation, data)
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Non-null pointers seen so far, nested ones included
    pub fn deferred_count(&self) -> usize {
        self.input.slots.len()
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.input.cur.remaining()
    }

    fn expect(&self, expected: ReadState) -> Result<()> {
        if self.state != expected {
            return Err(NdrError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            });
        }
        Ok(())
    }

    /// Read one parameter's immediate representation
    pub fn read_immediate(&mut self, param: &'static Param) -> Result<()> {
        self.expect(ReadState::ReadingImmediate)?;
        trace!("Reading immediate: op={}, field={}", self.operation, param.name);
        let node = self
            .input
            .read_node(param.name, &param.kind, &mut self.pending)
            .map_err(|e| e.in_field(self.operation, param.name))?;
        self.params.push((param.name, node));
        Ok(())
    }

    /// Close the immediate section and read every deferred pointee
    pub fn read_deferred(&mut self) -> Result<()> {
        self.expect(ReadState::ReadingImmediate)?;
        self.state = ReadState::ReadingDeferred;
        let queue = std::mem::take(&mut self.pending);
        self.input.flush(self.operation, queue)
    }

    /// Read the trailing status of a response
    pub fn read_status(&mut self) -> Result<u32> {
        self.expect(ReadState::ReadingDeferred)?;
        let ctx = self.input.ctx;
        let status = ctx
            .get_u32(&mut self.input.cur)
            .map_err(|e| e.in_field(self.operation, "Return"))?;
        self.state = ReadState::StatusRead;
        Ok(status)
    }

    /// Finish decoding and hand out the values
    pub fn finish(&mut self) -> Result<Values> {
        self.expect(if self.with_status {
            ReadState::StatusRead
        } else {
            ReadState::ReadingDeferred
        })?;
        self.state = ReadState::Complete;

        let trailing = self.input.cur.remaining();
        if trailing > 0 {
            if !self.input.ctx.allow_trailing_bytes {
                return Err(NdrError::TrailingBytes {
                    operation: self.operation,
                    count: trailing,
                });
            }
            warn!("Trailing bytes after frame: op={}, count={}", self.operation, trailing);
        }

        let mut values = Values::new();
        for (name, node) in std::mem::take(&mut self.params) {
            let value = self.input.resolve(node)?;
            values.insert(name, value);
        }
        Ok(values)
    }
}

/// Encode the request frame of `op`
pub fn encode_request(ctx: &NdrContext, op: &OperationSchema, values: &Values) -> Result<Bytes> {
    let mut frame = FrameWriter::new(*ctx, op.name, values);
    for param in op.request_params() {
        frame.write_immediate(param)?;
    }
    frame.write_deferred()?;
    let bytes = frame.seal()?;
    debug!(
        "Encoded request: opnum={}, name={}, len={}, deferred={}",
        op.opnum,
        op.name,
        bytes.len(),
        frame.deferred_count()
    );
    Ok(bytes)
}

/// Decode the request frame of `op`
pub fn decode_request(ctx: &NdrContext, op: &OperationSchema, data: &[u8]) -> Result<Values> {
    let mut frame = FrameReader::new(*ctx, op.name, data);
    for param in op.request_params() {
        frame.read_immediate(param)?;
    }
    frame.read_deferred()?;
    debug!(
        "Decoded request: opnum={}, name={}, len={}, deferred={}",
        op.opnum,
        op.name,
        data.len(),
        frame.deferred_count()
    );
    frame.finish()
}

/// Encode the response frame of `op` followed by `status`.
///
/// `request` supplies `size_is` values for out arrays sized by in-only
/// parameters.
pub fn encode_response(
    ctx: &NdrContext,
    op: &OperationSchema,
    values: &Values,
    status: u32,
    request: Option<&Values>,
) -> Result<Bytes> {
    let mut frame = FrameWriter::response(*ctx, op.name, values, request);
    for param in op.response_params() {
        frame.write_immediate(param)?;
    }
    frame.write_deferred()?;
    frame.write_status(status)?;
    let bytes = frame.seal()?;
    debug!(
        "Encoded response: opnum={}, name={}, len={}, status={:#x}",
        op.opnum,
        op.name,
        bytes.len(),
        status
    );
    Ok(bytes)
}

/// Decode the response frame of `op`, returning its values and status
pub fn decode_response(ctx: &NdrContext, op: &OperationSchema, data: &[u8]) -> Result<(Values, u32)> {
    let mut frame = FrameReader::response(*ctx, op.name, data);
    for param in op.response_params() {
        frame.read_immediate(param)?;
    }
    frame.read_deferred()?;
    let status = frame.read_status()?;
    debug!(
        "Decoded response: opnum={}, name={}, len={}, status={:#x}",
        op.opnum,
        op.name,
        data.len(),
        status
    );
    Ok((frame.finish()?, status))
}
