//! Buffer Tests - caller-sized byte buffers
//!
//! These tests exercise:
//! - Double-pointer out buffers sized by an in/out size field
//! - Size fields filled from the buffer on Set operations
//! - Null versus empty buffers

mod common;

use common::*;
use faxobs::messages::{Buffer, Empty, StartClientServerRequest};
use faxobs::operations::{GetTapiLocations, Operation, SetTapiLocations};
use faxobs::{FaxObsClient, Loopback};
use faxobs::{Status, ZeroLength};
use faxobs_ndr::{encode_request, FrameMessage, NdrContext};

#[test]
fn test_small_buffer_reports_needed_size() {
    init_logging();

    let client = FaxObsClient::new(Loopback::new(FaxService::with_tapi_locations(b"Redmond;Seattle")));

    let reply = client
        .get_tapi_locations(&Buffer {
            buffer: None,
            buffer_size: 4,
        })
        .unwrap();
    assert_eq!(reply.status, Status::INSUFFICIENT_BUFFER);
    assert_eq!(reply.response.buffer, None);
    assert_eq!(reply.response.buffer_size, 15);

    let reply = client
        .get_tapi_locations(&Buffer {
            buffer: None,
            buffer_size: reply.response.buffer_size,
        })
        .unwrap()
        .check(GetTapiLocations::SCHEMA.name)
        .unwrap();
    assert_eq!(reply.buffer.as_deref(), Some(&b"Redmond;Seattle"[..]));
}

#[test]
fn test_set_fills_zero_buffer_size() {
    init_logging();

    let client = loopback_client();
    let data = vec![0x10, 0x20, 0x30];
    client
        .set_tapi_locations(&Buffer {
            buffer: Some(data.clone()),
            buffer_size: 0,
        })
        .unwrap()
        .check(SetTapiLocations::SCHEMA.name)
        .unwrap();

    assert_eq!(client.transport().server().state.lock().unwrap().tapi_locations, data);

    let reply = client
        .get_tapi_locations(&Buffer {
            buffer: None,
            buffer_size: 64,
        })
        .unwrap();
    assert_eq!(reply.status, Status::SUCCESS);
    assert_eq!(reply.response.buffer, Some(data));
    assert_eq!(reply.response.buffer_size, 3);
}

#[test]
fn test_empty_buffer_is_not_null() {
    let ctx = NdrContext::new();

    let null = Buffer {
        buffer: None,
        buffer_size: 0,
    };
    let empty = Buffer {
        buffer: Some(Vec::new()),
        buffer_size: 0,
    };

    let null_frame = encode_request(&ctx, GetTapiLocations::SCHEMA, &null.to_values()).unwrap();
    let empty_frame = encode_request(&ctx, GetTapiLocations::SCHEMA, &empty.to_values()).unwrap();

    assert_eq!(null_frame.len(), 8);
    // outer marker, size, inner marker, zero capacity
    assert_eq!(empty_frame.len(), 4 + 4 + 4 + 8);
    assert_ne!(&empty_frame[0..4], &[0, 0, 0, 0]);
    assert_ne!(&empty_frame[8..12], &[0, 0, 0, 0]);
}

#[test]
fn test_string_parameters_in_declaration_order() {
    init_logging();

    let client = loopback_client();
    let request = StartClientServerRequest {
        machine_name: Some("FAXHOST".into()),
        client_name: None,
        context: 0xDEAD_BEEF_0000_0001,
    };
    client.start_client_server(&request).unwrap().check("StartClientServer").unwrap();

    assert_eq!(client.transport().server().state.lock().unwrap().client_servers, vec![request]);

    let count = client.get_security_descriptor_count(&Empty {}).unwrap();
    assert_eq!(count.response.count, 1);
}

#[test]
fn test_zero_length_convention() {
    init_logging();

    let client = FaxObsClient::new(Loopback::new(FaxService::with_tapi_locations(b"old")));

    // Sent as a null pointer: the server sees no buffer and clears its list
    let null = Buffer::with_data(Vec::new(), ZeroLength::Null);
    assert_eq!(null.buffer, None);
    client.set_tapi_locations(&null).unwrap().check("SetTapiLocations").unwrap();
    assert!(client.transport().server().state.lock().unwrap().tapi_locations.is_empty());

    let empty = Buffer::with_data(Vec::new(), ZeroLength::Empty);
    assert_eq!(empty.buffer, Some(Vec::new()));
    client.set_tapi_locations(&empty).unwrap().check("SetTapiLocations").unwrap();

    let reply = client.get_tapi_locations(&Buffer::sized(16)).unwrap();
    assert_eq!(reply.response.buffer, Some(Vec::new()));
    assert_eq!(reply.response.buffer_size, 0);
}
