//! Connection Tests - context handle lifecycle
//!
//! These tests exercise ConnectionRefCount end to end:
//! - Connect with an empty handle and receive a server handle
//! - Disconnect with the issued handle
//! - Exact frame layout of the request and response

mod common;

use common::*;
use faxobs::messages::{ConnectionRefCountRequest, ConnectionRefCountResponse, Empty};
use faxobs::operations::{ConnectionRefCount, Operation};
use faxobs::{ContextHandle, Status};
use faxobs_ndr::{decode_response, encode_request, FrameMessage, NdrContext};

#[test]
fn test_connect_returns_server_handle() {
    init_logging();

    let client = loopback_client();
    let request = ConnectionRefCountRequest {
        handle: ContextHandle::EMPTY,
        connect: 1,
    };

    let reply = client.connection_ref_count(&request).unwrap();
    assert_eq!(reply.status, Status::SUCCESS);
    assert_eq!(reply.response.can_share, 0);
    assert!(!reply.response.handle.is_empty());

    let state = client.transport().server().state.lock().unwrap();
    assert_eq!(state.connect_requests.len(), 1);
    let seen = &state.connect_requests[0];
    assert_eq!(seen.connect, 1);
    assert!(seen.handle.is_empty());
    assert_eq!(state.connections, 1);
}

#[test]
fn test_handle_bytes_survive_round_trip() {
    init_logging();

    let ctx = NdrContext::new();
    let client = loopback_client();
    let handle = client.connect().unwrap();

    // The handle the server minted is the one the client decoded
    let server_handle = {
        let state = client.transport().server().state.lock().unwrap();
        state.next_handle
    };
    assert_eq!(handle.uuid.data1, server_handle);

    // Sending it back reproduces identical bytes
    let request = ConnectionRefCountRequest { handle, connect: 0 };
    let frame = encode_request(&ctx, ConnectionRefCount::SCHEMA, &request.to_values()).unwrap();
    assert_eq!(frame.len(), 24);
    assert_eq!(&frame[0..4], &0u32.to_le_bytes());
    assert_eq!(&frame[4..8], &handle.uuid.data1.to_le_bytes());
    assert_eq!(&frame[20..24], &0u32.to_le_bytes());

    let released = client.disconnect(handle).unwrap();
    assert!(released.is_empty());
    assert_eq!(client.transport().server().state.lock().unwrap().connections, 0);
}

#[test]
fn test_response_frame_layout() {
    let ctx = NdrContext::new();
    let handle = ContextHandle::new(0, faxobs::Uuid::new(0x1122_3344, 0x5566, 0x7788, [9; 8]));
    let response = ConnectionRefCountResponse { handle, can_share: 1 };
    let frame = faxobs_ndr::encode_response(&ctx, ConnectionRefCount::SCHEMA, &response.to_values(), 0, None).unwrap();

    // handle, CanShare, status
    assert_eq!(frame.len(), 20 + 4 + 4);
    assert_eq!(&frame[4..8], &0x1122_3344u32.to_le_bytes());
    assert_eq!(&frame[20..24], &1u32.to_le_bytes());

    let (values, status) = decode_response(&ctx, ConnectionRefCount::SCHEMA, &frame).unwrap();
    assert_eq!(status, 0);
    assert_eq!(ConnectionRefCountResponse::from_values(values).unwrap(), response);
}

#[test]
fn test_invalid_connect_value_is_a_status() {
    init_logging();

    let client = loopback_client();
    let request = ConnectionRefCountRequest {
        handle: ContextHandle::EMPTY,
        connect: 7,
    };
    let reply = client.connection_ref_count(&request).unwrap();
    assert_eq!(reply.status, Status::INVALID_PARAMETER);
    assert!(reply.check(ConnectionRefCount::SCHEMA.name).is_err());
}

#[test]
fn test_repeated_connections_get_distinct_handles() {
    init_logging();

    let client = loopback_client();
    let first = client.connect().unwrap();
    let second = client.connect().unwrap();
    assert_ne!(first, second);

    let version = client.get_version(&Empty {}).unwrap().check("GetVersion").unwrap();
    assert_eq!(version.version, SERVICE_VERSION);
    assert_eq!(client.transport().server().state.lock().unwrap().connections, 2);
}
