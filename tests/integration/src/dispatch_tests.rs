//! Dispatch Tests - faults and malformed frames
//!
//! These tests exercise how the server side answers requests it cannot
//! serve: the reserved opnum, unknown and unimplemented operations, and
//! frames that fail to decode.

mod common;

use bytes::Bytes;
use common::*;
use faxobs::messages::{Buffer, PortBuffer};
use faxobs::{
    dispatch, dispatch_with, CallInfo, ClientError, DispatchError, Loopback, NdrContext, NdrError, Transport,
    TransportError, FAULT_BAD_STUB_DATA, FAULT_OP_RNG_ERROR, RESERVED_OPNUM,
};

fn call(opnum: u16) -> CallInfo {
    CallInfo {
        opnum,
        name: faxobs::lookup(opnum).map_or("unknown", |op| op.name),
    }
}

#[test]
fn test_reserved_opnum_produces_nothing() {
    init_logging();

    let service = FaxService::new();
    assert!(dispatch(&service, RESERVED_OPNUM, &[]).unwrap().is_none());

    let loopback = Loopback::new(service);
    let err = loopback.invoke(&call(RESERVED_OPNUM), Bytes::new()).unwrap_err();
    assert!(matches!(err, TransportError::NoResponse(30)));
}

#[test]
fn test_unknown_opnum_faults() {
    init_logging();

    let loopback = Loopback::new(FaxService::new());
    let err = loopback.invoke(&call(200), Bytes::new()).unwrap_err();
    assert!(matches!(err, TransportError::Fault(FAULT_OP_RNG_ERROR)));

    let err = dispatch(loopback.server(), 35, &[]).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownOpnum(35)));
}

#[test]
fn test_unimplemented_operation_faults() {
    init_logging();

    let client = loopback_client();
    let err = client
        .enum_ports(&PortBuffer {
            port_buffer: None,
            buffer_size: 0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Fault(FAULT_OP_RNG_ERROR))
    ));

    let stats = client.transport().stats().snapshot();
    assert_eq!(stats.requests_failed, 1);
}

#[test]
fn test_truncated_request_faults() {
    init_logging();

    let loopback = Loopback::new(FaxService::new());
    // Abort expects a 4-byte JobId
    let err = loopback.invoke(&call(12), Bytes::from_static(&[1, 0])).unwrap_err();
    assert!(matches!(err, TransportError::Fault(FAULT_BAD_STUB_DATA)));
}

#[test]
fn test_oversized_count_is_rejected() {
    init_logging();

    // Non-null Buffer, BufferSize, non-null inner pointer, then a capacity
    // far beyond the frame
    let mut frame = Vec::new();
    frame.extend_from_slice(&0x0002_0000u32.to_le_bytes());
    frame.extend_from_slice(&8u32.to_le_bytes());
    frame.extend_from_slice(&0x0002_0004u32.to_le_bytes());
    frame.extend_from_slice(&u64::MAX.to_le_bytes());

    let service = FaxService::new();
    let err = dispatch(&service, 26, &frame).unwrap_err();
    assert!(matches!(err, DispatchError::Codec(_)));
    assert_eq!(err.fault_status(), FAULT_BAD_STUB_DATA);
}

#[test]
fn test_trailing_bytes_are_rejected() {
    init_logging();

    let service = FaxService::with_tapi_locations(b"x");
    let mut frame = faxobs_ndr::encode_request(
        &NdrContext::new(),
        <faxobs::operations::GetTapiLocations as faxobs::Operation>::SCHEMA,
        &faxobs_ndr::FrameMessage::to_values(&Buffer {
            buffer: None,
            buffer_size: 1,
        }),
    )
    .unwrap()
    .to_vec();
    frame.extend_from_slice(&[0xEE; 3]);

    let err = dispatch(&service, 26, &frame).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Codec(NdrError::TrailingBytes { count: 3, .. })
    ));
    assert_eq!(err.fault_status(), FAULT_BAD_STUB_DATA);

    // Peers that pad their frames can opt in to leniency
    let lenient = NdrContext::new().with_trailing_bytes(true);
    let reply = dispatch_with(&service, &lenient, 26, &frame).unwrap().unwrap();
    assert_eq!(&reply[reply.len() - 4..], &0u32.to_le_bytes());
}
